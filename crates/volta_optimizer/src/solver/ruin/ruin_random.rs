use rand::{Rng, seq::IndexedRandom};

use crate::solver::solution::{removal_bank::RemovalBank, working_solution::WorkingSolution};

use super::{
    ruin_context::RuinContext,
    ruin_solution::RuinSolution,
    ruin_strategy::AdjacentStation,
    ruin_utils::{excise_customers, removal_count},
};

pub struct RuinRandom {
    pub adjacent: AdjacentStation,
}

impl RuinSolution for RuinRandom {
    fn ruin_solution<R>(&self, solution: &mut WorkingSolution, context: RuinContext<R>) -> RemovalBank
    where
        R: Rng,
    {
        let served = solution.served_customers();
        let count = removal_count(
            served.len(),
            &context.params.removal_lower,
            &context.params.removal_upper,
            context.rng,
        );

        let mut bank = RemovalBank::new(context.problem.num_nodes());
        bank.extend(served.choose_multiple(context.rng, count).copied());

        excise_customers(solution, &bank, self.adjacent);
        bank
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::{
        problem::fleet_params::FleetParams,
        solver::ruin::ruin_params::RuinParams,
        test_utils::{self, MockRng},
    };

    use super::*;

    #[test]
    fn test_random_ruin_removes_count_customers() {
        let problem = Arc::new(test_utils::create_line_problem(20, FleetParams::default()));
        let mut solution = test_utils::create_test_working_solution(
            problem.clone(),
            vec![(1..=10).collect(), (11..=20).collect()],
        );
        let params = RuinParams::default();
        // Removal count: ceil(uniform(2, 8)) with u close to 1.
        let mut rng = MockRng::new(vec![u64::MAX - 1, 3, 7, 11, 13, 17, 19, 23, 29, 31]);

        let bank = RuinRandom {
            adjacent: AdjacentStation::None,
        }
        .ruin_solution(
            &mut solution,
            RuinContext {
                params: &params,
                problem: &problem,
                rng: &mut rng,
            },
        );

        assert_eq!(bank.len(), 8);
        assert_eq!(solution.served_customers().len(), 12);
        assert!(bank.iter().all(|customer| solution.locate(customer).is_none()));
    }
}
