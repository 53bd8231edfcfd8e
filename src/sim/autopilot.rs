//! Demo-mode controller
//!
//! Aims for a point a little below the center of the next gap and swims
//! whenever the player is falling below it.

use super::state::{GamePhase, GameState};

/// Fraction of the gap below its center the autopilot aims for
const AIM_BELOW_CENTER: f32 = 0.25;

/// y the autopilot is trying to hold
pub fn target_y(state: &GameState) -> f32 {
    let tuning = state.tuning();
    let player = &state.player;
    // Keep tracking an obstacle until the player's back has fully cleared it
    state
        .obstacles
        .iter()
        .find(|o| o.x + tuning.obstacle_width >= player.x - player.radius)
        .map(|o| o.gap_y + tuning.gap * AIM_BELOW_CENTER)
        .unwrap_or(tuning.floor_y / 2.0)
}

/// Whether the autopilot presses swim this tick
pub fn wants_swim(state: &GameState) -> bool {
    match state.phase {
        GamePhase::Ready => true,
        GamePhase::Playing => state.player.vy >= 0.0 && state.player.y > target_y(state),
        GamePhase::GameOver => false,
    }
}
