//! Frame clock
//!
//! Turns host frame timestamps into a bounded simulation step. After a tab
//! switch the host can hand us a multi-second gap; integrating that in one
//! step would tunnel the player straight through the floor.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_FRAME_DT;

/// Clamp a raw delta (seconds) into `[0, MAX_FRAME_DT]`
#[inline]
pub fn clamp_dt(raw: f32) -> f32 {
    // NaN falls through both comparisons to 0
    if raw > 0.0 { raw.min(MAX_FRAME_DT) } else { 0.0 }
}

/// Tracks the previous frame timestamp
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a frame timestamp in milliseconds, get the clamped dt in seconds.
    /// The first frame yields 0.
    pub fn tick(&mut self, now_ms: f64) -> f32 {
        let raw = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        clamp_dt(raw)
    }

    /// Forget the previous timestamp; the browser calls this when the page is
    /// hidden so the first frame back yields 0
    pub fn restart(&mut self) {
        self.last_ms = None;
    }
}
