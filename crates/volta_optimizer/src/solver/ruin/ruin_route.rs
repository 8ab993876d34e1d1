use rand::{Rng, seq::IndexedRandom};
use tracing::debug;

use crate::solver::solution::{
    removal_bank::RemovalBank, route_id::RouteIdx, working_solution::WorkingSolution,
};

use super::{ruin_context::RuinContext, ruin_solution::RuinSolution, ruin_strategy::RouteRuinStrategy};

/// Removes whole routes, banking all of their customers.
pub struct RuinRoute {
    pub strategy: RouteRuinStrategy,
}

impl RuinRoute {
    /// `ceil(uniform(lower * R, upper * R))`, at most `R`.
    fn route_count<R>(&self, num_routes: usize, context: &mut RuinContext<R>) -> usize
    where
        R: Rng,
    {
        if num_routes == 0 {
            return 0;
        }

        let low = context.params.route_removal_lower_ratio * num_routes as f64;
        let high = (context.params.route_removal_upper_ratio * num_routes as f64).max(low);

        (context.rng.random_range(low..=high).ceil() as usize).min(num_routes)
    }
}

impl RuinSolution for RuinRoute {
    fn ruin_solution<R>(
        &self,
        solution: &mut WorkingSolution,
        mut context: RuinContext<R>,
    ) -> RemovalBank
    where
        R: Rng,
    {
        let problem = context.problem;
        let count = self.route_count(solution.num_routes(), &mut context);

        let route_ids: Vec<RouteIdx> = match self.strategy {
            RouteRuinStrategy::Random => {
                let all = (0..solution.num_routes())
                    .map(RouteIdx::new)
                    .collect::<Vec<_>>();
                all.choose_multiple(context.rng, count).copied().collect()
            }
            RouteRuinStrategy::Greedy => {
                let mut all = solution
                    .routes_iter_idx()
                    .map(|(route_id, route)| (route_id, route.customer_count(problem)))
                    .collect::<Vec<_>>();
                all.sort_by_key(|&(_, customers)| customers);
                all.into_iter()
                    .take(count)
                    .map(|(route_id, _)| route_id)
                    .collect()
            }
        };

        let mut bank = RemovalBank::new(problem.num_nodes());
        for &route_id in &route_ids {
            bank.extend(solution.route(route_id).customers(problem));
        }

        solution.remove_routes(&route_ids);
        debug!(
            routes = route_ids.len(),
            customers = bank.len(),
            "{} removed routes",
            self.strategy
        );

        bank
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::{
        problem::{fleet_params::FleetParams, node::NodeIdx},
        solver::ruin::ruin_params::RuinParams,
        test_utils::{self, MockRng},
    };

    use super::*;

    fn ruin(strategy: RouteRuinStrategy, rng: &mut MockRng) -> (WorkingSolution, RemovalBank) {
        let problem = Arc::new(test_utils::create_line_problem(10, FleetParams::default()));
        let mut solution = test_utils::create_test_working_solution(
            problem.clone(),
            vec![
                vec![1, 2, 3],
                vec![4],
                vec![5, 6],
                vec![7, 8, 9],
                vec![10],
            ],
        );
        let params = RuinParams::default();

        let bank = RuinRoute { strategy }.ruin_solution(
            &mut solution,
            RuinContext {
                params: &params,
                problem: &problem,
                rng,
            },
        );

        (solution, bank)
    }

    #[test]
    fn test_greedy_route_ruin_removes_smallest_routes() {
        // ceil(uniform(0.5, 1.5)) with u close to 1 removes 2 routes.
        let mut rng = MockRng::new(vec![u64::MAX - 1]);

        let (solution, bank) = ruin(RouteRuinStrategy::Greedy, &mut rng);

        assert_eq!(bank.customers(), &[NodeIdx::new(4), NodeIdx::new(10)]);
        assert_eq!(solution.num_routes(), 3);
    }

    #[test]
    fn test_random_route_ruin_banks_all_customers_of_removed_routes() {
        let mut rng = MockRng::new(vec![u64::MAX - 1, 1 << 40, 3 << 60, 5 << 58]);

        let (solution, bank) = ruin(RouteRuinStrategy::Random, &mut rng);

        assert_eq!(solution.num_routes(), 3);
        assert_eq!(bank.len() + solution.served_customers().len(), 10);
        assert!(solution.routes().iter().all(|route| !route.is_degenerate()));
    }
}
