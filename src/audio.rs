//! Sound cues
//!
//! The simulation only emits events. Presentation drains them once per frame
//! and hands each to an [`AudioNotifier`], which must never fail back into the
//! game: a refused or missing audio device just means silence.

use crate::sim::{GameEvent, GameState};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// Player swam up
    Jump,
    /// Obstacle passed
    Scored,
    /// Run ended
    Collided,
}

impl From<GameEvent> for SoundCue {
    fn from(event: GameEvent) -> Self {
        match event {
            GameEvent::Jump => SoundCue::Jump,
            GameEvent::Scored => SoundCue::Scored,
            GameEvent::Collided => SoundCue::Collided,
        }
    }
}

/// Fire-and-forget sound sink
pub trait AudioNotifier {
    fn notify(&mut self, cue: SoundCue);
}

/// Drain the state's event outbox into `audio`; returns how many cues were sent
pub fn dispatch_events(state: &mut GameState, audio: &mut dyn AudioNotifier) -> usize {
    let mut sent = 0;
    for event in state.drain_events() {
        audio.notify(event.into());
        sent += 1;
    }
    sent
}

/// Headless sink: logs cues and counts them
#[derive(Debug, Default, Clone)]
pub struct LogAudio {
    pub enabled: bool,
    pub jumps: u32,
    pub points: u32,
    pub hits: u32,
}

impl LogAudio {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            ..Default::default()
        }
    }
}

impl AudioNotifier for LogAudio {
    fn notify(&mut self, cue: SoundCue) {
        match cue {
            SoundCue::Jump => self.jumps += 1,
            SoundCue::Scored => self.points += 1,
            SoundCue::Collided => self.hits += 1,
        }
        if self.enabled {
            log::trace!("sfx {:?}", cue);
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

#[cfg(target_arch = "wasm32")]
mod web {
    //! Procedurally generated sound effects via the Web Audio API - no asset files

    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioNotifier, SoundCue};

    /// Peak gain of the ambient drone at full music volume
    const AMBIENT_LEVEL: f32 = 0.12;
    /// Seconds for the ambience to fade when the volume changes
    const AMBIENT_FADE: f64 = 0.15;

    /// Looping background drone: detuned low fifth with a slow swell
    struct Ambient {
        gain: GainNode,
        /// Swell depth, scaled with the volume so muting silences it too
        depth: GainNode,
        _voices: Vec<OscillatorNode>,
    }

    impl Ambient {
        fn start(ctx: &AudioContext, volume: f32) -> Option<Self> {
            let gain = ctx.create_gain().ok()?;
            gain.gain().set_value(volume * AMBIENT_LEVEL);
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            let mut voices = Vec::new();
            for freq in [110.0, 110.6, 164.81] {
                let osc = ctx.create_oscillator().ok()?;
                osc.set_type(OscillatorType::Sine);
                osc.frequency().set_value(freq);
                osc.connect_with_audio_node(&gain).ok()?;
                osc.start().ok()?;
                voices.push(osc);
            }

            let lfo = ctx.create_oscillator().ok()?;
            lfo.frequency().set_value(0.08);
            let depth = ctx.create_gain().ok()?;
            depth.gain().set_value(volume * AMBIENT_LEVEL * 0.5);
            lfo.connect_with_audio_node(&depth).ok()?;
            depth.connect_with_audio_param(&gain.gain()).ok()?;
            lfo.start().ok()?;
            voices.push(lfo);

            Some(Self {
                gain,
                depth,
                _voices: voices,
            })
        }

        fn set_volume(&self, ctx: &AudioContext, volume: f32) {
            let t = ctx.current_time();
            let level = volume * AMBIENT_LEVEL;
            self.gain.gain().set_target_at_time(level, t, AMBIENT_FADE).ok();
            self.depth
                .gain()
                .set_target_at_time(level * 0.5, t, AMBIENT_FADE)
                .ok();
        }
    }

    /// Audio manager for the browser build
    pub struct WebAudio {
        ctx: Option<AudioContext>,
        volume: f32,
        music_volume: f32,
        music: Option<Ambient>,
    }

    impl WebAudio {
        pub fn new(volume: f32, music_volume: f32) -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: volume.clamp(0.0, 1.0),
                music_volume: music_volume.clamp(0.0, 1.0),
                music: None,
            }
        }

        /// Resume audio context and start the ambience (browsers require a user gesture first)
        pub fn resume(&mut self) {
            let Some(ctx) = &self.ctx else { return };
            let _ = ctx.resume();
            if self.music.is_none() {
                self.music = Ambient::start(ctx, self.music_volume);
                if self.music.is_none() {
                    log::warn!("Ambient loop unavailable");
                }
            }
        }

        pub fn set_volume(&mut self, volume: f32) {
            self.volume = volume.clamp(0.0, 1.0);
        }

        /// Fade the ambience to a new level; 0 pauses it
        pub fn set_music_volume(&mut self, volume: f32) {
            self.music_volume = volume.clamp(0.0, 1.0);
            if let (Some(ctx), Some(music)) = (&self.ctx, &self.music) {
                music.set_volume(ctx, self.music_volume);
            }
        }

        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Swim - quick upward bloop
        fn play_jump(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 400.0, OscillatorType::Sine) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.3, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.12)
                .ok();
            osc.frequency().set_value_at_time(400.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(800.0, t + 0.08)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.14).ok();
        }

        /// Point - two-note chime
        fn play_point(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [520.0, 680.0].iter().enumerate() {
                let delay = i as f64 * 0.1;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.25, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.2).ok();
                }
            }
        }

        /// Hit - falling saw thump
        fn play_hit(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 400.0, OscillatorType::Sawtooth) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.35, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.5)
                .ok();
            osc.frequency().set_value_at_time(400.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(80.0, t + 0.4)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.5).ok();
        }
    }

    impl AudioNotifier for WebAudio {
        fn notify(&mut self, cue: SoundCue) {
            let vol = self.volume;
            if vol <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match cue {
                SoundCue::Jump => self.play_jump(ctx, vol),
                SoundCue::Scored => self.play_point(ctx, vol),
                SoundCue::Collided => self.play_hit(ctx, vol),
            }
        }
    }
}
