//! Frame timing from host timestamps

/// Turns monotonically increasing host timestamps (ms) into frame deltas (s)
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous call. The first call after creation or
    /// `reset` only records the baseline and returns 0.
    pub fn tick(&mut self, timestamp_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((timestamp_ms - last) / 1000.0).max(0.0) as f32,
            None => 0.0,
        };
        self.last_ms = Some(timestamp_ms);
        dt
    }

    /// Forget the baseline so the next frame starts at dt = 0
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}
