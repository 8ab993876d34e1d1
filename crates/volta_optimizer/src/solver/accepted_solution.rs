use super::solution::{solution_cost::SolutionCost, working_solution::WorkingSolution};

/// A solution held by the search together with its cost at acceptance time.
#[derive(Clone)]
pub struct AcceptedSolution {
    pub solution: WorkingSolution,
    pub cost: SolutionCost,
}

impl AcceptedSolution {
    pub fn new(solution: WorkingSolution) -> Self {
        let cost = solution.cost();
        AcceptedSolution { solution, cost }
    }

    pub fn is_feasible(&self) -> bool {
        self.solution.is_feasible()
    }
}
