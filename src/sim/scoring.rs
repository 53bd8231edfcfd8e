//! Pass detection
//!
//! An obstacle is worth one point the first tick its midpoint is strictly
//! left of the player. The `scored` flag makes later ticks no-ops.

use super::state::{GameEvent, GameState};

/// Award points for newly passed obstacles; returns how many were awarded
pub fn update_score(state: &mut GameState) -> u32 {
    let width = state.tuning().obstacle_width;
    let player_x = state.player.x;

    let mut awarded = 0;
    for o in state.obstacles.iter_mut() {
        if !o.scored && o.midpoint(width) < player_x {
            o.scored = true;
            awarded += 1;
        }
    }

    for _ in 0..awarded {
        state.score += 1;
        state.emit(GameEvent::Scored);
    }
    if awarded > 0 {
        log::debug!("Score {}", state.score);
    }
    awarded
}
