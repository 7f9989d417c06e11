/// Fixed-step accumulator. Fires at most once per `advance` call and carries
/// the part of the frame that overshot the interval into the next tick.
#[derive(Clone, Debug)]
pub struct TickTimer {
    interval: f32,
    accumulated: f32,
}

impl TickTimer {
    pub fn new(interval: f32) -> Self {
        Self { interval, accumulated: 0.0 }
    }

    /// Adds `dt` seconds without ever firing.
    pub fn accumulate(&mut self, dt: f32) {
        self.accumulated += dt.max(0.0);
    }

    pub fn advance(&mut self, dt: f32) -> bool {
        self.accumulate(dt);
        if self.accumulated < self.interval {
            return false;
        }
        // a stall longer than one interval must not queue a burst of ticks
        self.accumulated = (self.accumulated - self.interval) % self.interval;
        true
    }

    /// Progress towards the next tick, clamped to `[0, 1]`.
    pub fn fraction(&self) -> f32 {
        (self.accumulated / self.interval).min(1.0)
    }

    pub fn reset(&mut self) {
        self.accumulated = 0.0;
    }
}
