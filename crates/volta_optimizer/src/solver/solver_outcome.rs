use jiff::SignedDuration;
use serde::Serialize;

use super::{solution::working_solution::WorkingSolution, statistics::SearchStatistics};

/// Result of a complete run.
#[derive(Clone, Serialize)]
pub struct SolverOutcome {
    /// Best routes as external node ids, depots included.
    pub routes: Vec<Vec<String>>,
    pub distance: f64,
    pub num_routes: usize,
    pub initial_distance: f64,
    pub initial_num_routes: usize,
    pub duration: SignedDuration,
    pub statistics: SearchStatistics,

    #[serde(skip)]
    pub best_solution: WorkingSolution,
}

impl SolverOutcome {
    /// Relative distance gain of the best solution over the initial one.
    pub fn improvement(&self) -> f64 {
        if self.initial_distance == 0.0 {
            0.0
        } else {
            (self.initial_distance - self.distance) / self.initial_distance
        }
    }
}
