use rand::Rng;

use crate::solver::solution::solution_cost::SolutionCost;

use super::{
    accept_solution::{AcceptSolution, AcceptSolutionContext, AcceptanceOutcome},
    greedy_solution_acceptor::GreedySolutionAcceptor,
    simulated_annealing_acceptor::SimulatedAnnealingAcceptor,
};

pub enum SolutionAcceptor {
    Greedy(GreedySolutionAcceptor),
    SimulatedAnnealing(SimulatedAnnealingAcceptor),
}

impl AcceptSolution for SolutionAcceptor {
    fn accept<R>(
        &self,
        candidate: &SolutionCost,
        working: &SolutionCost,
        best: &SolutionCost,
        context: AcceptSolutionContext<R>,
    ) -> AcceptanceOutcome
    where
        R: Rng,
    {
        match self {
            SolutionAcceptor::Greedy(acceptor) => {
                acceptor.accept(candidate, working, best, context)
            }
            SolutionAcceptor::SimulatedAnnealing(acceptor) => {
                acceptor.accept(candidate, working, best, context)
            }
        }
    }
}
