//! Obstacle generation and culling

use rand::Rng;

use super::state::{GameState, Obstacle, ObstacleKind};
use super::tuning::Tuning;
use crate::consts::{CULL_X, SPAWN_OFFSET};

/// Build an obstacle at `x` with a random gap and look
///
/// The gap center is drawn from `[min_y, max_y)`. On viewports too short for
/// the margins the range inverts; the draw still lands between the two bounds.
pub fn make_obstacle<R: Rng + ?Sized>(rng: &mut R, id: u32, x: f32, tuning: &Tuning) -> Obstacle {
    let (min_y, max_y) = tuning.gap_bounds();
    let gap_y = min_y + rng.random::<f32>() * (max_y - min_y);
    let kind = if rng.random_bool(0.5) {
        ObstacleKind::Coral
    } else {
        ObstacleKind::Seaweed
    };
    Obstacle {
        id,
        x,
        gap_y,
        scored: false,
        kind,
    }
}

/// Advance the spawn timer; emit one obstacle off the right edge when it fires.
///
/// The timer restarts from zero, not from the overshoot.
pub fn update_spawner(state: &mut GameState, dt: f32) -> bool {
    state.spawn_timer += dt;
    let tuning = state.tuning();
    if state.spawn_timer < tuning.spawn_every {
        return false;
    }
    state.spawn_timer = 0.0;

    let id = state.next_entity_id();
    let x = state.viewport.width + SPAWN_OFFSET;
    let obstacle = make_obstacle(&mut state.rng, id, x, &tuning);
    log::debug!("Spawned obstacle {} gap_y={:.1} {:?}", id, obstacle.gap_y, obstacle.kind);
    state.obstacles.push(obstacle);
    true
}

/// Drop obstacles whose trailing edge has left the screen
pub fn cull_obstacles(state: &mut GameState) {
    let width = state.tuning().obstacle_width;
    state.obstacles.retain(|o| o.x + width > CULL_X);
}
