use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

use crate::{
    problem::node::NodeIdx,
    solver::{
        constraints::feasibility_oracle::FeasibilityOracle,
        insertion::{Insertion, cheapest_by, feasible_insertions},
        solution::{removal_bank::RemovalBank, route::Route, working_solution::WorkingSolution},
    },
};

use super::{
    greedy_insertion::GreedyInsertion, recreate_context::RecreateContext,
    recreate_solution::RecreateSolution, route_cursor::RouteCursor,
};

/// Regret-k insertion on the cursor route.
///
/// For every banked customer with at least `k` feasible positions in the
/// route, the regret is the cost gap between its k-th best and best position.
/// The customer with the largest regret goes first, at its best position.
/// When no customer has `k` positions left the step falls back to
/// [`GreedyInsertion`].
pub struct RegretInsertion {
    k: usize,
}

impl RegretInsertion {
    /// # Panics
    /// Panics if `k < 2`.
    pub fn new(k: usize) -> Self {
        assert!(k >= 2, "regret insertion needs k >= 2, got {k}");
        RegretInsertion { k }
    }

    pub fn best_regret_insertion(
        &self,
        oracle: FeasibilityOracle,
        route: &Route,
        customers: &[NodeIdx],
    ) -> Option<Insertion> {
        let regrets: Vec<Option<(f64, Insertion)>> = customers
            .par_iter()
            .map(|&customer| {
                let mut insertions = feasible_insertions(oracle, route, customer);
                if insertions.len() < self.k {
                    return None;
                }

                insertions.sort_by(|a, b| a.cost.total_cmp(&b.cost));
                let regret = (insertions[self.k - 1].cost - insertions[0].cost).abs();
                Some((regret, insertions.swap_remove(0)))
            })
            .collect();

        cheapest_by(regrets.into_iter().flatten(), |(regret, _)| -regret)
            .map(|(_, insertion)| insertion)
    }
}

impl RecreateSolution for RegretInsertion {
    fn recreate_solution(
        &self,
        solution: &mut WorkingSolution,
        mut bank: RemovalBank,
        context: RecreateContext,
    ) {
        if bank.is_empty() {
            return;
        }

        let oracle = context.oracle();
        let mut cursor = RouteCursor::new(solution, bank.len());

        while !bank.is_empty() {
            let route_id = cursor.route_id();
            let route = solution.route(route_id);
            let regret = context
                .thread_pool
                .install(|| self.best_regret_insertion(oracle, route, bank.customers()));

            match regret {
                Some(insertion) => {
                    solution
                        .route_mut(route_id)
                        .insert(insertion.position, insertion.customer);
                    bank.remove(insertion.customer);
                }
                None => GreedyInsertion::insert_step(solution, &mut bank, &mut cursor, &context),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::{
        problem::{
            electric_vehicle_routing_problem::ElectricVehicleRoutingProblem,
            fleet_params::FleetParams,
        },
        solver::{insertion::best_direct_insertion, recreate::recreate_params::RecreateParams},
        test_utils::{self, TestNode},
    };

    use super::*;

    // F sits on the diagonal between the depot and E, cheap to insert
    // anywhere near the depot. B only fits well between A and E.
    fn create_problem() -> ElectricVehicleRoutingProblem {
        test_utils::create_test_problem(
            vec![
                TestNode::customer(10.0, 0.0),
                TestNode::customer(10.0, 10.0),
                TestNode::customer(20.0, 0.0),
                TestNode::customer(1.0, 1.0),
            ],
            FleetParams::default(),
        )
    }

    #[test]
    fn test_regret_prefers_least_flexible_customer() {
        let problem = create_problem();
        let oracle = FeasibilityOracle::new(&problem);
        let route = test_utils::create_test_route(&problem, &[1, 2]);
        let customers = [NodeIdx::new(4), NodeIdx::new(3)];

        let greedy = best_direct_insertion(oracle, &route, &customers).unwrap();
        let regret = RegretInsertion::new(2)
            .best_regret_insertion(oracle, &route, &customers)
            .unwrap();

        assert_eq!(greedy.customer, NodeIdx::new(4));
        assert_eq!(regret.customer, NodeIdx::new(3));
        assert_eq!(regret.position, 2);
    }

    #[test]
    fn test_customers_with_too_few_positions_are_skipped() {
        let problem = create_problem();
        let oracle = FeasibilityOracle::new(&problem);
        let route = test_utils::create_test_route(&problem, &[1]);

        let regret = RegretInsertion::new(3).best_regret_insertion(
            oracle,
            &route,
            &[NodeIdx::new(3), NodeIdx::new(4)],
        );

        assert!(regret.is_none());
    }

    #[test]
    fn test_recreate_inserts_every_customer() {
        let problem = Arc::new(create_problem());
        let mut solution = test_utils::create_test_working_solution(problem.clone(), vec![vec![1, 2]]);
        let mut bank = RemovalBank::new(problem.num_nodes());
        bank.extend([NodeIdx::new(4), NodeIdx::new(3)]);

        let params = RecreateParams::default();
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(2)
            .build()
            .unwrap();

        RegretInsertion::new(2).recreate_solution(
            &mut solution,
            bank,
            RecreateContext {
                params: &params,
                problem: &problem,
                thread_pool: &thread_pool,
            },
        );

        assert_eq!(solution.routes(), &[test_utils::create_test_route(&problem, &[1, 3, 2, 4])]);
        assert!(solution.covers_all_customers());
    }

    #[test]
    #[should_panic]
    fn test_k_below_two_panics() {
        RegretInsertion::new(1);
    }
}
