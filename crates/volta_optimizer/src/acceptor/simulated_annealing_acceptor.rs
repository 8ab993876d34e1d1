use rand::Rng;

use crate::solver::solution::solution_cost::SolutionCost;

use super::accept_solution::{
    AcceptSolution, AcceptSolutionContext, AcceptanceOutcome, improving_outcome,
};

/// Metropolis criterion at equal route count: a candidate longer by `delta`
/// than the working solution is accepted with probability `exp(-delta / T)`.
/// Candidates with another route count that are not a new best are rejected.
pub struct SimulatedAnnealingAcceptor;

impl AcceptSolution for SimulatedAnnealingAcceptor {
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
        if let Some(outcome) = improving_outcome(candidate, working, best) {
            return outcome;
        }

        if candidate.routes != working.routes {
            return AcceptanceOutcome::Rejected;
        }

        let delta = candidate.distance - working.distance;
        if delta <= 0.0 {
            return AcceptanceOutcome::AcceptedWorse;
        }

        let probability = (-delta / context.temperature).exp();
        if context.rng.random::<f64>() < probability {
            AcceptanceOutcome::AcceptedWorse
        } else {
            AcceptanceOutcome::Rejected
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::test_utils::MockRng;

    use super::*;

    fn accept(candidate: SolutionCost, working: SolutionCost, draw: u64) -> AcceptanceOutcome {
        let mut rng = MockRng::new(vec![draw]);
        let best = SolutionCost::new(2, 90.0);

        SimulatedAnnealingAcceptor.accept(
            &candidate,
            &working,
            &best,
            AcceptSolutionContext {
                temperature: 1.0,
                rng: &mut rng,
            },
        )
    }

    #[test]
    fn test_new_best_with_fewer_routes_despite_longer_distance() {
        let outcome = accept(SolutionCost::new(1, 500.0), SolutionCost::new(2, 100.0), 0);

        assert_eq!(outcome, AcceptanceOutcome::NewBest);
    }

    #[test]
    fn test_improvement_of_working_solution() {
        let outcome = accept(SolutionCost::new(2, 95.0), SolutionCost::new(2, 100.0), 0);

        assert_eq!(outcome, AcceptanceOutcome::Improved);
    }

    #[test]
    fn test_equal_distance_is_always_accepted() {
        let outcome = accept(SolutionCost::new(2, 100.0), SolutionCost::new(2, 100.0), u64::MAX);

        assert_eq!(outcome, AcceptanceOutcome::AcceptedWorse);
    }

    #[test]
    fn test_worse_candidate_follows_metropolis_draw() {
        // exp(-1) is about 0.37.
        let working = SolutionCost::new(2, 100.0);
        let candidate = SolutionCost::new(2, 101.0);

        assert_eq!(
            accept(candidate, working, u64::MAX / 10),
            AcceptanceOutcome::AcceptedWorse
        );
        assert_eq!(
            accept(candidate, working, u64::MAX / 10 * 9),
            AcceptanceOutcome::Rejected
        );
    }

    #[test]
    fn test_different_route_count_is_rejected() {
        let outcome = accept(SolutionCost::new(3, 95.0), SolutionCost::new(2, 100.0), 0);

        assert_eq!(outcome, AcceptanceOutcome::Rejected);
    }
}
