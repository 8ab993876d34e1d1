use std::f64::consts::LN_2;

use serde::Serialize;

/// Geometric cooling schedule, `T(k) = T0 * rate^k`. The temperature is
/// recomputed from the iteration count so no rounding accumulates.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Temperature {
    initial: f64,
    cooling_rate: f64,
    iteration: usize,
}

impl Temperature {
    pub fn new(initial: f64, cooling_rate: f64) -> Self {
        Temperature {
            initial,
            cooling_rate,
            iteration: 0,
        }
    }

    /// A candidate 1% worse than the initial cost, scaled by `factor`, is
    /// accepted with probability one half at the start.
    pub fn from_initial_cost(initial_cost: f64, factor: f64, cooling_rate: f64) -> Self {
        Temperature::new(0.01 * factor * initial_cost / LN_2, cooling_rate)
    }

    pub fn initial(&self) -> f64 {
        self.initial
    }

    pub fn iteration(&self) -> usize {
        self.iteration
    }

    pub fn current(&self) -> f64 {
        self.initial * self.cooling_rate.powf(self.iteration as f64)
    }

    pub fn cool(&mut self) {
        self.iteration += 1;
    }
}
