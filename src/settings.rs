//! Game settings and preferences
//!
//! Persisted separately from high scores.

use serde::{Deserialize, Serialize};

use crate::persistence::{self, Store};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Sound on/off (the mute button)
    pub sound_enabled: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Background ambience volume (0.0 - 1.0)
    pub music_volume: f32,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Accessibility ===
    /// Freeze decorative motion (light rays, seaweed sway)
    pub reduced_motion: bool,

    // === Simulation ===
    /// Fixed RNG seed; a fresh one per boot when unset
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            master_volume: 0.8,
            sfx_volume: 0.6,
            music_volume: 0.35,
            show_fps: false,
            reduced_motion: false,
            seed: None,
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "seahorse_dash_settings";

    /// Volume actually applied to sound effects
    pub fn effective_sfx_volume(&self) -> f32 {
        if self.sound_enabled {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Volume actually applied to the ambient loop
    pub fn effective_music_volume(&self) -> f32 {
        if self.sound_enabled {
            (self.master_volume * self.music_volume).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Flip the mute toggle; returns the new state
    pub fn toggle_sound(&mut self) -> bool {
        self.sound_enabled = !self.sound_enabled;
        self.sound_enabled
    }

    pub fn load<S: Store + ?Sized>(store: &S) -> Self {
        let mut settings: Self = persistence::load_json_or_default(store, Self::STORAGE_KEY);
        settings.master_volume = settings.master_volume.clamp(0.0, 1.0);
        settings.sfx_volume = settings.sfx_volume.clamp(0.0, 1.0);
        settings.music_volume = settings.music_volume.clamp(0.0, 1.0);
        log::info!("Settings loaded (sound {})", if settings.sound_enabled { "on" } else { "off" });
        settings
    }

    pub fn save<S: Store + ?Sized>(&self, store: &mut S) {
        match persistence::save_json(store, Self::STORAGE_KEY, self) {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Settings not saved: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_mute_silences_effects() {
        let mut s = Settings::default();
        assert!(s.effective_sfx_volume() > 0.0);
        assert!(s.effective_music_volume() > 0.0);
        assert!(!s.toggle_sound());
        assert_eq!(s.effective_sfx_volume(), 0.0);
        assert_eq!(s.effective_music_volume(), 0.0);

        // Unmuting brings the ambience back at its configured level
        assert!(s.toggle_sound());
        assert!((s.effective_music_volume() - 0.8 * 0.35).abs() < 1e-6);
    }

    #[test]
    fn test_music_volume_clamped_on_load() {
        let mut store = MemoryStore::new();
        store
            .save(Settings::STORAGE_KEY, r#"{"music_volume":-2.0}"#)
            .unwrap();
        assert_eq!(Settings::load(&store).music_volume, 0.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let mut store = MemoryStore::new();
        store
            .save(Settings::STORAGE_KEY, r#"{"sound_enabled":false,"seed":7}"#)
            .unwrap();
        let s = Settings::load(&store);
        assert!(!s.sound_enabled);
        assert_eq!(s.seed, Some(7));
        assert_eq!(s.master_volume, Settings::default().master_volume);
    }

    #[test]
    fn test_out_of_range_volume_clamped() {
        let mut store = MemoryStore::new();
        store
            .save(Settings::STORAGE_KEY, r#"{"master_volume":3.5}"#)
            .unwrap();
        assert_eq!(Settings::load(&store).master_volume, 1.0);
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        let mut s = Settings::default();
        s.reduced_motion = true;
        s.save(&mut store);
        assert_eq!(Settings::load(&store), s);
    }
}
