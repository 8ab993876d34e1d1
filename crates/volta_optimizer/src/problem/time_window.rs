use serde::Serialize;

/// Hard time window `[ready, due]` in instance time units.
#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
pub struct TimeWindow {
    ready: f64,
    due: f64,
}

impl TimeWindow {
    pub const UNBOUNDED: TimeWindow = TimeWindow {
        ready: 0.0,
        due: f64::INFINITY,
    };

    pub fn new(ready: f64, due: f64) -> Self {
        TimeWindow { ready, due }
    }

    pub fn ready(&self) -> f64 {
        self.ready
    }

    pub fn due(&self) -> f64 {
        self.due
    }

    pub fn width(&self) -> f64 {
        self.due - self.ready
    }

    pub fn is_valid(&self) -> bool {
        self.ready <= self.due && !self.ready.is_nan()
    }

    /// Earliest service start when arriving at `arrival`, waiting if early.
    pub fn earliest_start(&self, arrival: f64) -> f64 {
        arrival.max(self.ready)
    }

    pub fn is_satisfied(&self, start: f64, tolerance: f64) -> bool {
        start <= self.due + tolerance
    }
}

impl Default for TimeWindow {
    fn default() -> Self {
        TimeWindow::UNBOUNDED
    }
}
