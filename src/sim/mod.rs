//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - Clamped per-frame timestep
//! - Seeded RNG only
//! - Obstacles iterated in creation order
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod clock;
pub mod collision;
pub mod physics;
pub mod scoring;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod tuning;

pub use clock::{FrameClock, clamp_dt};
pub use collision::{Collision, Rect, circle_rect_collide, hit_test};
pub use state::{GameEvent, GamePhase, GameState, Obstacle, ObstacleKind, Player};
pub use tick::{TickInput, tick};
pub use tuning::Tuning;
