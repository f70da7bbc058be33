use crate::constants::{POP_IN_DURATION_MS, POP_IN_START_SCALE};

#[inline]
pub fn ease_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * (2.0 - t)
}

/// Short scale/opacity pop played when a marker appears.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PopIn {
    pub start_ms: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PopInSample {
    /// Multiplier applied on top of the marker's base scale.
    pub scale: f32,
    pub opacity: f32,
    pub done: bool,
}

impl PopIn {
    pub fn new(start_ms: f64) -> Self {
        Self { start_ms }
    }

    pub fn sample(&self, now_ms: f64) -> PopInSample {
        let t = ((now_ms - self.start_ms) / POP_IN_DURATION_MS).clamp(0.0, 1.0) as f32;
        let k = ease_out_quad(t);
        PopInSample {
            scale: POP_IN_START_SCALE + (1.0 - POP_IN_START_SCALE) * k,
            opacity: k,
            done: t >= 1.0,
        }
    }
}
