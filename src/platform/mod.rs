//! Platform abstraction layer
//!
//! Handles the edges between the host and the simulation:
//! - Input events → one coalesced [`TickInput`] per frame
//! - The renderer seam and HUD text
//! - Host timestamps (see [`crate::sim::FrameClock`])

use crate::sim::{GamePhase, GameState, TickInput};

/// Where a primary action came from; each source tracks its own held state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionSource {
    Pointer,
    Keyboard,
}

impl ActionSource {
    fn index(self) -> usize {
        match self {
            ActionSource::Pointer => 0,
            ActionSource::Keyboard => 1,
        }
    }
}

/// What a key press means to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Swim,
    Reset,
    ToggleAutopilot,
}

/// Map a keyboard event to an action
///
/// Swim keys match the physical `code`; letter commands match the typed
/// `key`, so they follow the user's layout.
pub fn key_action(code: &str, key: &str) -> Option<KeyAction> {
    if matches!(code, "Space" | "ArrowUp") {
        return Some(KeyAction::Swim);
    }
    match key.to_lowercase().as_str() {
        "r" => Some(KeyAction::Reset),
        "a" => Some(KeyAction::ToggleAutopilot),
        _ => None,
    }
}

/// Collects input events between frames
///
/// Any number of presses within one frame become a single swim, and a key
/// held down (auto-repeat) only counts once until it is released.
#[derive(Debug, Default, Clone)]
pub struct InputLatch {
    primary: bool,
    reset: bool,
    held: [bool; 2],
    /// Demo mode toggle, persists across frames
    pub autopilot: bool,
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a press; returns false when it was a duplicate of a held press
    pub fn press(&mut self, source: ActionSource) -> bool {
        let held = &mut self.held[source.index()];
        if *held {
            return false;
        }
        *held = true;
        self.primary = true;
        true
    }

    pub fn release(&mut self, source: ActionSource) {
        self.held[source.index()] = false;
    }

    pub fn request_reset(&mut self) {
        self.reset = true;
    }

    /// Reset and immediately start a new run (the start button)
    pub fn request_restart(&mut self) {
        self.reset = true;
        self.primary = true;
    }

    pub fn toggle_autopilot(&mut self) -> bool {
        self.autopilot = !self.autopilot;
        self.autopilot
    }

    /// Hand the frame's input to the simulation and clear one-shot actions
    pub fn take(&mut self) -> TickInput {
        let input = TickInput {
            primary: self.primary,
            reset: self.reset,
            autopilot: self.autopilot,
        };
        self.primary = false;
        self.reset = false;
        input
    }
}

/// Draws a frame from simulation state; never mutates it
pub trait Renderer {
    fn draw(&mut self, state: &GameState, time_ms: f64);
}

/// Text shown around the playfield
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hud {
    pub score: String,
    pub best: String,
    /// Centre prompt ("tap to swim" / "game over") visible
    pub show_prompt: bool,
}

impl Hud {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            score: format!("Score: {}", state.score),
            best: format!("Best: {}", state.best),
            show_prompt: state.phase != GamePhase::Playing,
        }
    }
}

/// Headless renderer: logs the HUD whenever it changes
#[derive(Debug, Default)]
pub struct HudLog {
    last: Option<Hud>,
    pub frames: u64,
}

impl Renderer for HudLog {
    fn draw(&mut self, state: &GameState, _time_ms: f64) {
        self.frames += 1;
        let hud = Hud::from_state(state);
        if self.last.as_ref() != Some(&hud) {
            log::debug!("{} | {} | prompt {}", hud.score, hud.best, hud.show_prompt);
            self.last = Some(hud);
        }
    }
}
