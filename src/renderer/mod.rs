//! Drawing
//!
//! Presentation only: reads `GameState`, never writes it. Decorative state
//! (bubbles) lives here with its own RNG so the simulation stays reproducible.

pub mod bubbles;
#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use bubbles::{Bubble, BubbleField};
#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;

use crate::{Viewport, scale_by_screen};

/// Vertical speed that maps to one radian of tilt at the reference size
const TILT_SPEED: f32 = 950.0;
const TILT_MIN: f32 = -0.7;
const TILT_MAX: f32 = 0.9;

/// Body rotation (radians) for a given vertical velocity; nose-down when sinking
pub fn tilt_angle(vy: f32, viewport: Viewport) -> f32 {
    (vy / scale_by_screen(TILT_SPEED, viewport)).clamp(TILT_MIN, TILT_MAX)
}

/// Pillar colors (main, lip) as CSS strings
pub fn obstacle_palette(kind: crate::sim::ObstacleKind) -> (&'static str, &'static str) {
    use crate::sim::ObstacleKind;
    match kind {
        ObstacleKind::Coral => ("rgba(255, 130, 170, 0.95)", "rgba(210, 70, 125, 0.95)"),
        ObstacleKind::Seaweed => ("rgba(60, 220, 170, 0.95)", "rgba(20, 150, 115, 0.95)"),
    }
}
