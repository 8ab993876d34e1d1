use rand::Rng;

use crate::solver::solution::solution_cost::SolutionCost;

use super::accept_solution::{
    AcceptSolution, AcceptSolutionContext, AcceptanceOutcome, improving_outcome,
};

/// Only accepts improvements.
pub struct GreedySolutionAcceptor;

impl AcceptSolution for GreedySolutionAcceptor {
    fn accept<R>(
        &self,
        candidate: &SolutionCost,
        working: &SolutionCost,
        best: &SolutionCost,
        _: AcceptSolutionContext<R>,
    ) -> AcceptanceOutcome
    where
        R: Rng,
    {
        improving_outcome(candidate, working, best).unwrap_or(AcceptanceOutcome::Rejected)
    }
}
