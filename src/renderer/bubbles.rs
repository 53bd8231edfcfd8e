//! Rising background bubbles

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::{Viewport, scale_by_screen};

/// Chance of a new bubble each update
const SPAWN_CHANCE: f64 = 0.18;
/// Oldest bubbles are dropped past this count
const MAX_BUBBLES: usize = 120;
/// Bubbles are removed once fully above this y
const DESPAWN_Y: f32 = -30.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Bubble {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    /// Rise speed (units/s, upward)
    pub rise: f32,
    pub alpha: f32,
}

#[derive(Debug, Clone)]
pub struct BubbleField {
    bubbles: Vec<Bubble>,
    rng: Pcg32,
}

impl BubbleField {
    pub fn new(seed: u64) -> Self {
        Self {
            bubbles: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    fn spawn(&mut self, viewport: Viewport) {
        let rng = &mut self.rng;
        let bubble = Bubble {
            x: rng.random::<f32>() * viewport.width,
            y: viewport.height + 20.0,
            radius: rng.random::<f32>() * scale_by_screen(10.0, viewport)
                + scale_by_screen(4.0, viewport),
            rise: rng.random::<f32>() * scale_by_screen(60.0, viewport)
                + scale_by_screen(40.0, viewport),
            alpha: rng.random::<f32>() * 0.25 + 0.05,
        };
        self.bubbles.push(bubble);
    }

    /// Move bubbles up; `spawning` false lets the field drain without refilling
    pub fn update(&mut self, viewport: Viewport, dt: f32, spawning: bool) {
        if spawning && self.rng.random_bool(SPAWN_CHANCE) {
            self.spawn(viewport);
        }

        for b in &mut self.bubbles {
            b.y -= b.rise * dt;
        }

        if self.bubbles.len() > MAX_BUBBLES {
            let excess = self.bubbles.len() - MAX_BUBBLES;
            self.bubbles.drain(..excess);
        }
        self.bubbles.retain(|b| b.y + b.radius >= DESPAWN_Y);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bubble> {
        self.bubbles.iter()
    }

    pub fn len(&self) -> usize {
        self.bubbles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bubbles.is_empty()
    }
}
