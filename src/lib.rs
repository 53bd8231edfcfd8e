//! Seahorse Dash - a side-scrolling underwater reflex game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collisions, scoring, game state)
//! - `audio`: Fire-and-forget sound cues
//! - `platform`: Input coalescing and the renderer seam
//! - `persistence`: Key/value storage for settings and high scores
//! - `renderer`: Canvas 2D drawing (browser) and decorative effects

pub mod audio;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use settings::Settings;

use serde::{Deserialize, Serialize};

/// Game configuration constants, expressed at the reference screen size
pub mod consts {
    /// Screen dimension (the smaller of width/height) the constants below are tuned for
    pub const REFERENCE_SCREEN: f32 = 700.0;

    /// Largest simulation step accepted per frame (seconds)
    pub const MAX_FRAME_DT: f32 = 0.033;

    /// Downward acceleration (units/s²)
    pub const GRAVITY: f32 = 1700.0;
    /// Upward swim impulse, applied as an absolute velocity (units/s)
    pub const JUMP_SPEED: f32 = 560.0;

    /// Obstacle scroll speed (units/s)
    pub const OBSTACLE_SPEED: f32 = 260.0;
    pub const OBSTACLE_WIDTH: f32 = 84.0;
    /// Vertical opening between the top and bottom pillar
    pub const GAP_HEIGHT: f32 = 210.0;
    /// Seconds between obstacle spawns (not scaled)
    pub const SPAWN_INTERVAL: f32 = 1.15;
    /// Sea floor band at the bottom of the playfield
    pub const FLOOR_PADDING: f32 = 90.0;
    /// Unscaled margin kept between a gap and the world edges
    pub const GAP_MARGIN: f32 = 90.0;

    /// New obstacles appear this far past the right edge
    pub const SPAWN_OFFSET: f32 = 20.0;
    /// The obstacle seeded on reset starts this far past the right edge
    pub const SEED_OFFSET: f32 = 180.0;
    /// Obstacles are dropped once their trailing edge passes this x
    pub const CULL_X: f32 = -80.0;

    /// Player collision radius and its floor
    pub const PLAYER_RADIUS: f32 = 18.0;
    pub const PLAYER_MIN_RADIUS: f32 = 14.0;
    /// Player sits at this fraction of the screen width...
    pub const PLAYER_X_FRACTION: f32 = 0.22;
    /// ...but never closer to the left edge than this
    pub const PLAYER_MIN_X: f32 = 90.0;
    /// Starting height as a fraction of the screen height
    pub const PLAYER_START_Y_FRACTION: f32 = 0.45;

    /// Idle bobbing in the ready screen: period divisor (ms) and amplitude per tick
    pub const IDLE_FLOAT_PERIOD_MS: f32 = 260.0;
    pub const IDLE_FLOAT_AMPLITUDE: f32 = 0.25;
}

/// Size of the visible playfield in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// The smaller screen dimension, which drives all scaling
    #[inline]
    pub fn base(&self) -> f32 {
        self.width.min(self.height)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(consts::REFERENCE_SCREEN, consts::REFERENCE_SCREEN)
    }
}

/// Scale a reference-size value to the current viewport
///
/// `x * min(width, height) / 700`, so physics feels the same on every screen.
#[inline]
pub fn scale_by_screen(x: f32, viewport: Viewport) -> f32 {
    x * (viewport.base() / consts::REFERENCE_SCREEN)
}
