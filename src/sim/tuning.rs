//! Viewport-derived gameplay constants
//!
//! Everything physical is expressed at the 700-unit reference screen and
//! scaled by the current viewport. The spawn interval is the one exception.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::{Viewport, scale_by_screen};

/// Scaled constants for one viewport
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    /// Downward acceleration (units/s²)
    pub gravity: f32,
    /// Velocity set by a swim impulse (negative = up)
    pub jump_velocity: f32,
    pub obstacle_speed: f32,
    pub obstacle_width: f32,
    pub gap: f32,
    pub spawn_every: f32,
    pub floor_pad: f32,
    /// y of the sea floor line
    pub floor_y: f32,
}

impl Tuning {
    pub fn for_viewport(viewport: Viewport) -> Self {
        let floor_pad = scale_by_screen(FLOOR_PADDING, viewport);
        Self {
            gravity: scale_by_screen(GRAVITY, viewport),
            jump_velocity: -scale_by_screen(JUMP_SPEED, viewport),
            obstacle_speed: scale_by_screen(OBSTACLE_SPEED, viewport),
            obstacle_width: scale_by_screen(OBSTACLE_WIDTH, viewport),
            gap: scale_by_screen(GAP_HEIGHT, viewport),
            spawn_every: SPAWN_INTERVAL,
            floor_pad,
            floor_y: viewport.height - floor_pad,
        }
    }

    /// Inclusive-exclusive range the gap center is drawn from
    pub fn gap_bounds(&self) -> (f32, f32) {
        let half = self.gap / 2.0;
        (GAP_MARGIN + half, self.floor_y - GAP_MARGIN - half)
    }
}
