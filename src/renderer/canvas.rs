//! Canvas 2D renderer for the browser build

use std::f64::consts::TAU;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{BubbleField, obstacle_palette, tilt_angle};
use crate::platform::Renderer;
use crate::sim::{FrameClock, GameState, Obstacle, ObstacleKind, Player, Tuning};
use crate::{Viewport, scale_by_screen};

/// Draws the playfield into a `<canvas>` sized in CSS pixels times the device pixel ratio
pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    bubbles: BubbleField,
    clock: FrameClock,
    /// Freeze light rays and seaweed sway, stop spawning bubbles
    pub reduced_motion: bool,
}

impl CanvasRenderer {
    pub fn new(canvas: HtmlCanvasElement, seed: u64, reduced_motion: bool) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self {
            canvas,
            ctx,
            bubbles: BubbleField::new(seed ^ 0x5eed_b0b),
            clock: FrameClock::new(),
            reduced_motion,
        })
    }

    /// Match the backing store to the viewport; drawing stays in CSS pixels
    pub fn resize(&mut self, viewport: Viewport, dpr: f64) {
        self.canvas.set_width((viewport.width as f64 * dpr).round() as u32);
        self.canvas.set_height((viewport.height as f64 * dpr).round() as u32);
        if let Err(e) = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0) {
            log::warn!("Canvas transform failed: {:?}", e);
        }
    }

    fn draw_background(&self, vp: Viewport, time_ms: f64) {
        let ctx = &self.ctx;
        let (w, h) = (vp.width as f64, vp.height as f64);

        let g = ctx.create_linear_gradient(0.0, 0.0, 0.0, h);
        let _ = g.add_color_stop(0.0, "#0a6fb3");
        let _ = g.add_color_stop(0.55, "#064d7a");
        let _ = g.add_color_stop(1.0, "#04263d");
        ctx.set_fill_style_canvas_gradient(&g);
        ctx.fill_rect(0.0, 0.0, w, h);

        // Light rays
        let t = if self.reduced_motion { 0.0 } else { time_ms / 1400.0 };
        ctx.save();
        ctx.set_global_alpha(0.08);
        ctx.set_fill_style_str("#ffffff");
        for i in 0..6 {
            let x = (i as f64 / 6.0) * w + (t + i as f64).sin() * 40.0;
            ctx.begin_path();
            ctx.move_to(x, 0.0);
            ctx.line_to(x + 140.0, h);
            ctx.line_to(x + 260.0, h);
            ctx.close_path();
            ctx.fill();
        }
        ctx.restore();

        ctx.save();
        ctx.set_stroke_style_str("#ffffff");
        ctx.set_line_width(2.0);
        for b in self.bubbles.iter() {
            ctx.set_global_alpha(b.alpha as f64);
            ctx.begin_path();
            let _ = ctx.arc(b.x as f64, b.y as f64, b.radius as f64, 0.0, TAU);
            ctx.stroke();
        }
        ctx.restore();
    }

    fn draw_obstacle(&self, o: &Obstacle, tuning: &Tuning, vp: Viewport, time_ms: f64) {
        let ctx = &self.ctx;
        let (main, lip_color) = obstacle_palette(o.kind);
        let top = o.top_pillar(tuning);
        let bottom = o.bottom_pillar(tuning);
        let (x, w) = (top.pos.x as f64, top.size.x as f64);

        ctx.set_fill_style_str(main);
        ctx.fill_rect(x, 0.0, w, top.size.y as f64);
        ctx.fill_rect(x, bottom.pos.y as f64, w, bottom.size.y as f64);

        // Lips around the opening
        let lip = scale_by_screen(18.0, vp) as f64;
        ctx.set_fill_style_str(lip_color);
        ctx.fill_rect(x - lip * 0.35, top.size.y as f64 - lip, w + lip * 0.7, lip);
        ctx.fill_rect(x - lip * 0.35, bottom.pos.y as f64, w + lip * 0.7, lip);

        if o.kind == ObstacleKind::Seaweed {
            let t = if self.reduced_motion { 0.0 } else { time_ms / 240.0 };
            ctx.save();
            ctx.set_global_alpha(0.25);
            ctx.set_stroke_style_str("#022c22");
            ctx.set_line_width(3.0);
            for i in 0..3 {
                let xx = x + (i + 1) as f64 * (w / 4.0);
                for (from, to) in [
                    (0.0, top.size.y as f64),
                    (bottom.pos.y as f64, (bottom.pos.y + bottom.size.y) as f64),
                ] {
                    ctx.begin_path();
                    let mut y = from;
                    while y < to {
                        let wiggle = (t + y / 30.0 + i as f64).sin() * 4.0;
                        ctx.line_to(xx + wiggle, y);
                        y += 18.0;
                    }
                    ctx.stroke();
                }
            }
            ctx.restore();
        }
    }

    fn draw_floor(&self, tuning: &Tuning, vp: Viewport) {
        let ctx = &self.ctx;
        let (w, floor) = (vp.width as f64, tuning.floor_y as f64);
        ctx.save();
        ctx.set_global_alpha(0.55);
        ctx.set_fill_style_str("#072a2b");
        ctx.fill_rect(0.0, floor, w, tuning.floor_pad as f64);
        ctx.set_global_alpha(0.25);
        ctx.set_fill_style_str("#0ea5a7");
        ctx.fill_rect(0.0, floor, w, 4.0);
        ctx.restore();
    }

    fn ellipse(&self, x: f64, y: f64, rx: f64, ry: f64, rotation: f64) {
        self.ctx.begin_path();
        let _ = self.ctx.ellipse(x, y, rx, ry, rotation, 0.0, TAU);
        self.ctx.fill();
    }

    fn draw_player(&self, player: &Player, vp: Viewport) {
        let ctx = &self.ctx;
        let r = player.radius as f64;

        ctx.save();
        let _ = ctx.translate(player.x as f64, player.y as f64);
        let _ = ctx.rotate(tilt_angle(player.vy, vp) as f64);

        ctx.set_fill_style_str("#ffc0da");
        self.ellipse(0.0, 0.0, r * 0.95, r * 1.25, 0.0);

        // Snout
        ctx.set_fill_style_str("#ffb3d3");
        self.ellipse(r * 0.95, 0.0, r * 0.45, r * 0.22, 0.0);

        ctx.save();
        ctx.set_global_alpha(0.35);
        ctx.set_fill_style_str("#ffffff");
        self.ellipse(-r * 0.15, r * 0.2, r * 0.45, r * 0.75, 0.2);
        ctx.restore();

        // Fin
        ctx.save();
        ctx.set_global_alpha(0.8);
        ctx.set_fill_style_str("#ffd8ea");
        self.ellipse(-r * 0.75, -r * 0.15, r * 0.35, r * 0.55, -0.5);
        ctx.restore();

        // Tail
        ctx.set_stroke_style_str("#ff98c6");
        ctx.set_line_width((r * 0.22).max(3.0));
        ctx.set_line_cap("round");
        ctx.begin_path();
        ctx.move_to(-r * 0.25, r * 1.05);
        ctx.quadratic_curve_to(-r * 0.95, r * 1.35, -r * 0.45, r * 1.75);
        ctx.quadratic_curve_to(0.0, r * 2.05, -r * 0.25, r * 1.85);
        ctx.stroke();

        // Eye
        ctx.set_fill_style_str("#1a1a1a");
        ctx.begin_path();
        let _ = ctx.arc(r * 0.25, -r * 0.30, r * 0.17, 0.0, TAU);
        ctx.fill();
        ctx.set_fill_style_str("#ffffff");
        ctx.begin_path();
        let _ = ctx.arc(r * 0.30, -r * 0.35, r * 0.06, 0.0, TAU);
        ctx.fill();

        ctx.restore();
    }

    fn draw_vignette(&self, vp: Viewport) {
        let ctx = &self.ctx;
        let (w, h) = (vp.width as f64, vp.height as f64);
        let Ok(g) = ctx.create_radial_gradient(
            w / 2.0,
            h / 2.0,
            w.min(h) * 0.2,
            w / 2.0,
            h / 2.0,
            w.max(h) * 0.7,
        ) else {
            return;
        };
        let _ = g.add_color_stop(0.0, "rgba(0,0,0,0)");
        let _ = g.add_color_stop(1.0, "rgba(0,0,0,1)");
        ctx.save();
        ctx.set_global_alpha(0.12);
        ctx.set_fill_style_canvas_gradient(&g);
        ctx.fill_rect(0.0, 0.0, w, h);
        ctx.restore();
    }
}

impl Renderer for CanvasRenderer {
    fn draw(&mut self, state: &GameState, time_ms: f64) {
        let vp = state.viewport;
        let tuning = state.tuning();

        let dt = self.clock.tick(time_ms);
        self.bubbles.update(vp, dt, !self.reduced_motion);

        self.draw_background(vp, time_ms);
        for o in &state.obstacles {
            self.draw_obstacle(o, &tuning, vp, time_ms);
        }
        self.draw_floor(&tuning, vp);
        self.draw_player(&state.player, vp);
        self.draw_vignette(vp);
    }
}
