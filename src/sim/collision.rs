//! Collision detection
//!
//! The player is a circle; the world is a ceiling, a floor line and pairs of
//! axis-aligned pillars. All tests are closed: touching counts as a hit.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{GameState, Player};
use super::tuning::Tuning;

/// Axis-aligned rectangle, `pos` is the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Point of the rectangle nearest to `p`
    ///
    /// Pillars can end up with negative height when a gap hugs the top of a
    /// shrunken viewport, so this must not assume `lo <= hi`.
    #[inline]
    pub fn nearest_point(&self, p: Vec2) -> Vec2 {
        let far = self.pos + self.size;
        Vec2::new(
            clamp_loose(p.x, self.pos.x, far.x),
            clamp_loose(p.y, self.pos.y, far.y),
        )
    }
}

/// `max(lo, min(hi, v))`; returns `lo` when the bounds are inverted
#[inline]
fn clamp_loose(v: f32, lo: f32, hi: f32) -> f32 {
    lo.max(hi.min(v))
}

/// What the player ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Collision {
    Ceiling,
    Floor,
    TopPillar { obstacle_id: u32 },
    BottomPillar { obstacle_id: u32 },
}

/// Exact circle vs rectangle overlap
pub fn circle_rect_collide(center: Vec2, radius: f32, rect: &Rect) -> bool {
    let nearest = rect.nearest_point(center);
    center.distance_squared(nearest) <= radius * radius
}

/// Check the player against the world; first hit wins
pub fn hit_test(state: &GameState) -> Option<Collision> {
    let tuning = state.tuning();
    let player = &state.player;

    if let Some(edge) = world_edge_hit(player, &tuning) {
        return Some(edge);
    }

    let center = player.center();
    for o in &state.obstacles {
        if circle_rect_collide(center, player.radius, &o.top_pillar(&tuning)) {
            return Some(Collision::TopPillar { obstacle_id: o.id });
        }
        if circle_rect_collide(center, player.radius, &o.bottom_pillar(&tuning)) {
            return Some(Collision::BottomPillar { obstacle_id: o.id });
        }
    }
    None
}

fn world_edge_hit(player: &Player, tuning: &Tuning) -> Option<Collision> {
    if player.top() <= 0.0 {
        Some(Collision::Ceiling)
    } else if player.bottom() >= tuning.floor_y {
        Some(Collision::Floor)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Viewport;
    use crate::sim::state::{Obstacle, ObstacleKind};
    use proptest::prelude::*;

    fn state_with_obstacle(gap_y: f32, x: f32) -> GameState {
        let mut state = GameState::new(7, Viewport::new(700.0, 700.0));
        state.obstacles = vec![Obstacle {
            id: 10,
            x,
            gap_y,
            scored: false,
            kind: ObstacleKind::Seaweed,
        }];
        state
    }

    #[test]
    fn test_circle_inside_rect() {
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(circle_rect_collide(Vec2::new(50.0, 50.0), 5.0, &rect));
    }

    #[test]
    fn test_circle_touching_edge_is_a_hit() {
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(circle_rect_collide(Vec2::new(110.0, 50.0), 10.0, &rect));
        assert!(!circle_rect_collide(Vec2::new(110.5, 50.0), 10.0, &rect));
    }

    #[test]
    fn test_circle_near_corner_uses_true_distance() {
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        // 8-8-√128 ≈ 11.3 from the corner: inside the bounding box, outside the circle
        assert!(!circle_rect_collide(Vec2::new(108.0, 108.0), 10.0, &rect));
        assert!(circle_rect_collide(Vec2::new(106.0, 106.0), 10.0, &rect));
    }

    #[test]
    fn test_inverted_rect_does_not_panic() {
        let rect = Rect::new(0.0, 0.0, 50.0, -20.0);
        assert_eq!(rect.nearest_point(Vec2::new(10.0, 40.0)), Vec2::new(10.0, 0.0));
        assert!(!circle_rect_collide(Vec2::new(10.0, 40.0), 5.0, &rect));
    }

    #[test]
    fn test_ceiling_hit() {
        let mut state = state_with_obstacle(300.0, 600.0);
        state.player.y = state.player.radius;
        assert_eq!(hit_test(&state), Some(Collision::Ceiling));
    }

    #[test]
    fn test_floor_hit() {
        let mut state = state_with_obstacle(300.0, 600.0);
        state.player.y = 610.0 - state.player.radius;
        assert_eq!(hit_test(&state), Some(Collision::Floor));
        state.player.y -= 0.5;
        assert_eq!(hit_test(&state), None);
    }

    #[test]
    fn test_ceiling_checked_before_pillars() {
        let mut state = state_with_obstacle(400.0, 140.0);
        state.player.y = 5.0;
        assert_eq!(hit_test(&state), Some(Collision::Ceiling));
    }

    #[test]
    fn test_top_pillar_hit() {
        // Gap 195..405 centered on 300; player at 315 with radius 18 clears it
        let mut state = state_with_obstacle(300.0, 140.0);
        assert_eq!(hit_test(&state), None);

        state.player.y = 200.0;
        assert_eq!(
            hit_test(&state),
            Some(Collision::TopPillar { obstacle_id: 10 })
        );
    }

    #[test]
    fn test_bottom_pillar_hit() {
        let mut state = state_with_obstacle(300.0, 140.0);
        state.player.y = 390.0;
        assert_eq!(
            hit_test(&state),
            Some(Collision::BottomPillar { obstacle_id: 10 })
        );
    }

    #[test]
    fn test_obstacle_ahead_is_clear() {
        let mut state = state_with_obstacle(500.0, 400.0);
        state.player.y = 315.0;
        assert_eq!(hit_test(&state), None);
    }

    proptest! {
        #[test]
        fn prop_translation_invariant(
            cx in -500.0f32..500.0,
            cy in -500.0f32..500.0,
            r in 1.0f32..60.0,
            rx in -500.0f32..500.0,
            ry in -500.0f32..500.0,
            w in 1.0f32..200.0,
            h in 1.0f32..200.0,
            tx in -64i32..64,
            ty in -64i32..64,
        ) {
            // Integer-valued inputs keep the translated arithmetic exact
            let (cx, cy, r, rx, ry, w, h) =
                (cx.round(), cy.round(), r.round(), rx.round(), ry.round(), w.round(), h.round());
            let shift = Vec2::new(tx as f32, ty as f32);
            let rect = Rect::new(rx, ry, w, h);
            let moved = Rect { pos: rect.pos + shift, size: rect.size };

            let a = circle_rect_collide(Vec2::new(cx, cy), r, &rect);
            let b = circle_rect_collide(Vec2::new(cx, cy) + shift, r, &moved);
            prop_assert_eq!(a, b);
        }

        #[test]
        fn prop_mirror_invariant(
            cx in -300.0f32..300.0,
            cy in -300.0f32..300.0,
            r in 1.0f32..60.0,
            rx in -300.0f32..300.0,
            w in 1.0f32..200.0,
            h in 1.0f32..200.0,
        ) {
            let (cx, cy, r, rx, w, h) =
                (cx.round(), cy.round(), r.round(), rx.round(), w.round(), h.round());
            let rect = Rect::new(rx, 0.0, w, h);
            let mirrored = Rect::new(-rx - w, 0.0, w, h);

            let a = circle_rect_collide(Vec2::new(cx, cy), r, &rect);
            let b = circle_rect_collide(Vec2::new(-cx, cy), r, &mirrored);
            prop_assert_eq!(a, b);
        }
    }
}
