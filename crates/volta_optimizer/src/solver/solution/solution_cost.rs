use std::fmt::Display;

use serde::Serialize;

/// Lexicographic objective: vehicles first, then total distance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SolutionCost {
    /// Routes serving at least one node besides the depots.
    pub routes: usize,
    pub distance: f64,
}

impl SolutionCost {
    pub fn new(routes: usize, distance: f64) -> Self {
        SolutionCost { routes, distance }
    }

    /// Fewer routes always wins, distance breaks ties.
    pub fn is_better_than(&self, other: &SolutionCost) -> bool {
        self.routes < other.routes
            || (self.routes == other.routes && self.distance < other.distance)
    }
}

impl Display for SolutionCost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} routes, distance {:.2}", self.routes, self.distance)
    }
}
