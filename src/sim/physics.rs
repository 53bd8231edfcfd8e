//! Motion integration

use super::state::{Obstacle, Player};
use super::tuning::Tuning;
use crate::consts::{IDLE_FLOAT_AMPLITUDE, IDLE_FLOAT_PERIOD_MS};

/// Semi-implicit Euler: velocity first, then position with the new velocity
pub fn integrate_player(player: &mut Player, tuning: &Tuning, dt: f32) {
    player.vy += tuning.gravity * dt;
    player.y += player.vy * dt;
}

/// Scroll every obstacle left
pub fn advance_obstacles(obstacles: &mut [Obstacle], tuning: &Tuning, dt: f32) {
    let step = tuning.obstacle_speed * dt;
    for o in obstacles {
        o.x -= step;
    }
}

/// Gentle bob on the ready screen. Applied per frame, not per second.
pub fn idle_float(player: &mut Player, elapsed_secs: f32) {
    let phase = elapsed_secs * 1000.0 / IDLE_FLOAT_PERIOD_MS;
    player.y += phase.sin() * IDLE_FLOAT_AMPLITUDE;
}
