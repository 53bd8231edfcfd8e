//! Game state and core simulation types
//!
//! One owned aggregate holds everything a tick touches. Presentation reads it
//! and drains its event outbox; nothing else mutates it.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{Collision, Rect};
use super::spawn::make_obstacle;
use super::tuning::Tuning;
use crate::Viewport;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Player bobs in place, waiting for the first swim
    Ready,
    /// Active gameplay
    Playing,
    /// Run ended; frozen until reset
    GameOver,
}

/// One-way notifications from the simulation to presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A swim impulse was applied
    Jump,
    /// An obstacle was passed
    Scored,
    /// The run ended on a collision
    Collided,
}

/// The seahorse
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Fixed horizontal position for the whole run
    pub x: f32,
    pub y: f32,
    /// Vertical velocity (positive = down)
    pub vy: f32,
    pub radius: f32,
}

impl Player {
    /// Place a fresh player for the given viewport
    pub fn spawn(viewport: Viewport) -> Self {
        Self {
            x: PLAYER_MIN_X.max(viewport.width * PLAYER_X_FRACTION),
            y: viewport.height * PLAYER_START_Y_FRACTION,
            vy: 0.0,
            radius: PLAYER_MIN_RADIUS.max(crate::scale_by_screen(PLAYER_RADIUS, viewport)),
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y - self.radius
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.radius
    }
}

/// Cosmetic obstacle look; never affects physics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Coral,
    Seaweed,
}

/// A pair of pillars with an opening between them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Left edge
    pub x: f32,
    /// Center of the opening
    pub gap_y: f32,
    /// Set once when the player passes the midpoint
    pub scored: bool,
    pub kind: ObstacleKind,
}

impl Obstacle {
    #[inline]
    pub fn midpoint(&self, width: f32) -> f32 {
        self.x + width / 2.0
    }

    /// Pillar from the world top down to the opening
    pub fn top_pillar(&self, tuning: &Tuning) -> Rect {
        let height = self.gap_y - tuning.gap / 2.0;
        Rect::new(self.x, 0.0, tuning.obstacle_width, height)
    }

    /// Pillar from the opening down to the sea floor
    pub fn bottom_pillar(&self, tuning: &Tuning) -> Rect {
        let top = self.gap_y + tuning.gap / 2.0;
        Rect::new(self.x, top, tuning.obstacle_width, tuning.floor_y - top)
    }
}

/// Complete session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    /// Drives gap placement and obstacle kind
    pub rng: Pcg32,
    pub viewport: Viewport,
    pub phase: GamePhase,
    pub player: Player,
    /// Ordered by creation (descending x)
    pub obstacles: Vec<Obstacle>,
    /// Seconds since the last spawn
    pub spawn_timer: f32,
    pub score: u32,
    /// Highest score this process has seen
    pub best: u32,
    /// Total simulated seconds, drives the idle bob
    pub elapsed: f32,
    /// Runs that reached game over
    pub runs_finished: u32,
    /// What ended the current run, if it has ended
    pub last_collision: Option<Collision>,
    /// Outbox for presentation, drained every frame
    #[serde(skip)]
    events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a fresh session in the ready phase
    pub fn new(seed: u64, viewport: Viewport) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            viewport,
            phase: GamePhase::Ready,
            player: Player::spawn(viewport),
            obstacles: Vec::new(),
            spawn_timer: 0.0,
            score: 0,
            best: 0,
            elapsed: 0.0,
            runs_finished: 0,
            last_collision: None,
            events: Vec::new(),
            next_id: 1,
        };
        state.reset();
        state
    }

    /// Scaled constants for the current viewport
    #[inline]
    pub fn tuning(&self) -> Tuning {
        Tuning::for_viewport(self.viewport)
    }

    /// Allocate a new obstacle ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Raise `best` to an externally persisted value
    pub fn seed_best(&mut self, best: u32) {
        self.best = self.best.max(best);
    }

    /// Back to the ready screen with a fresh player and a single far obstacle.
    /// Keeps `best`; only a finished run's score is folded in, an abandoned
    /// run never counts.
    pub fn reset(&mut self) {
        if self.phase == GamePhase::GameOver {
            self.best = self.best.max(self.score);
        }
        self.phase = GamePhase::Ready;
        self.spawn_timer = 0.0;
        self.score = 0;
        self.last_collision = None;
        self.player = Player::spawn(self.viewport);

        let tuning = self.tuning();
        let id = self.next_entity_id();
        let first = make_obstacle(
            &mut self.rng,
            id,
            self.viewport.width + SEED_OFFSET,
            &tuning,
        );
        self.obstacles.clear();
        self.obstacles.push(first);
    }

    /// Handle a primary (swim) action
    ///
    /// Starts the run from `Ready`, swims while `Playing`, ignored in `GameOver`.
    pub fn primary_action(&mut self) {
        match self.phase {
            GamePhase::Ready => {
                self.phase = GamePhase::Playing;
                self.player.vy = 0.0;
                log::info!("Run started (seed {}, best {})", self.seed, self.best);
                self.swim();
            }
            GamePhase::Playing => self.swim(),
            GamePhase::GameOver => {}
        }
    }

    fn swim(&mut self) {
        self.player.vy = self.tuning().jump_velocity;
        self.emit(GameEvent::Jump);
    }

    /// End the run after a collision
    pub fn game_over(&mut self) {
        self.phase = GamePhase::GameOver;
        let previous = self.best;
        self.best = self.best.max(self.score);
        self.runs_finished += 1;
        self.emit(GameEvent::Collided);
        if self.best > previous {
            log::info!("Game over: score {} (new best, was {})", self.score, previous);
        } else {
            log::info!("Game over: score {} (best {})", self.score, self.best);
        }
    }

    /// Adopt a new viewport. Positions are left alone; only future derived
    /// constants change.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        if viewport != self.viewport {
            log::debug!("Viewport {}x{}", viewport.width, viewport.height);
            self.viewport = viewport;
        }
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all pending events in emission order
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    /// Pending events without consuming them
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Number of obstacles currently flagged as passed
    pub fn scored_count(&self) -> usize {
        self.obstacles.iter().filter(|o| o.scored).count()
    }
}
