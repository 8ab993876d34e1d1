use tracing::{debug, error};

use crate::solver::{
    insertion::{best_augmented_insertion, best_direct_insertion},
    solution::{
        removal_bank::RemovalBank, route::Route, route_id::RouteIdx,
        working_solution::WorkingSolution,
    },
};

use super::{
    recreate_context::RecreateContext, recreate_solution::RecreateSolution,
    route_cursor::RouteCursor,
};

/// Fills the cursor route with the cheapest feasible insertion until nothing
/// fits, then moves on to the next route.
#[derive(Default)]
pub struct GreedyInsertion;

impl GreedyInsertion {
    /// Places one banked customer on the cursor route, or moves the cursor on.
    pub(super) fn insert_step(
        solution: &mut WorkingSolution,
        bank: &mut RemovalBank,
        cursor: &mut RouteCursor,
        context: &RecreateContext,
    ) {
        let route_id = cursor.route_id();
        let oracle = context.oracle();
        let route = solution.route(route_id);

        let direct = context
            .thread_pool
            .install(|| best_direct_insertion(oracle, route, bank.customers()));

        if let Some(insertion) = direct {
            solution
                .route_mut(route_id)
                .insert(insertion.position, insertion.customer);
            bank.remove(insertion.customer);
            return;
        }

        let repair = context.supplement_repair();
        let augmented = context.thread_pool.install(|| {
            best_augmented_insertion(oracle, route, bank.customers(), |candidate| {
                repair.repair(candidate).ok()
            })
        });

        if let Some(insertion) = augmented {
            solution.replace_route(route_id, insertion.route);
            bank.remove(insertion.customer);
            return;
        }

        debug!(
            route = %route_id,
            pending = bank.len(),
            "no feasible insertion left in route"
        );

        if cursor.is_last(solution) && solution.route(route_id).is_degenerate() {
            Self::perfect_repair(solution, bank, route_id, context);
        } else {
            cursor.advance(solution);
        }
    }

    /// Serves the first banked customer alone on the empty route `route_id`,
    /// keeping the unrepaired route when stations cannot make it feasible.
    fn perfect_repair(
        solution: &mut WorkingSolution,
        bank: &mut RemovalBank,
        route_id: RouteIdx,
        context: &RecreateContext,
    ) {
        let Some(customer) = bank.first() else {
            return;
        };

        let dedicated = Route::empty(context.problem).with_insertion(1, customer);
        let route = match context.supplement_repair().repair(dedicated) {
            Ok(route) => route,
            Err(err) => {
                error!(
                    customer = %customer,
                    error = %err,
                    "customer cannot be served by a dedicated route"
                );
                err.route
            }
        };

        solution.replace_route(route_id, route);
        bank.remove(customer);
    }
}

impl RecreateSolution for GreedyInsertion {
    fn recreate_solution(
        &self,
        solution: &mut WorkingSolution,
        mut bank: RemovalBank,
        context: RecreateContext,
    ) {
        if bank.is_empty() {
            return;
        }

        let mut cursor = RouteCursor::new(solution, bank.len());
        while !bank.is_empty() {
            GreedyInsertion::insert_step(solution, &mut bank, &mut cursor, &context);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::{
        problem::{
            electric_vehicle_routing_problem::ElectricVehicleRoutingProblem,
            fleet_params::FleetParams, node::NodeIdx,
        },
        solver::recreate::recreate_params::RecreateParams,
        test_utils::{self, TestNode},
    };

    use super::*;

    fn recreate(
        problem: Arc<ElectricVehicleRoutingProblem>,
        routes: Vec<Vec<usize>>,
        banked: &[usize],
    ) -> WorkingSolution {
        let mut solution = test_utils::create_test_working_solution(problem.clone(), routes);
        let mut bank = RemovalBank::new(problem.num_nodes());
        bank.extend(banked.iter().map(|&index| NodeIdx::new(index)));

        let params = RecreateParams::default();
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(2)
            .build()
            .unwrap();

        GreedyInsertion.recreate_solution(
            &mut solution,
            bank,
            RecreateContext {
                params: &params,
                problem: &problem,
                thread_pool: &thread_pool,
            },
        );

        solution
    }

    fn inner_routes(solution: &WorkingSolution) -> Vec<Vec<usize>> {
        solution
            .routes()
            .iter()
            .map(|route| {
                let nodes = route.nodes();
                nodes[1..nodes.len() - 1]
                    .iter()
                    .map(|node| node.get())
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_fills_first_route_before_moving_on() {
        let problem = Arc::new(test_utils::create_line_problem(4, FleetParams::default()));

        let solution = recreate(problem, vec![vec![1], vec![3]], &[2, 4]);

        assert_eq!(inner_routes(&solution), vec![vec![4, 2, 1], vec![3]]);
        assert!(solution.covers_all_customers());
        assert!(solution.is_feasible());
    }

    #[test]
    fn test_opens_new_route_when_capacity_is_reached() {
        let problem = Arc::new(test_utils::create_test_problem(
            (1..=3)
                .map(|x| TestNode::customer(x as f64, 0.0).with_demand(10.0))
                .collect(),
            FleetParams {
                load_capacity: 20.0,
                ..FleetParams::default()
            },
        ));

        let solution = recreate(problem, vec![], &[1, 2, 3]);

        assert_eq!(inner_routes(&solution), vec![vec![2, 1], vec![3]]);
        assert!(solution.is_feasible());
    }

    #[test]
    fn test_augments_with_stations() {
        let problem = Arc::new(test_utils::create_test_problem(
            vec![
                TestNode::customer(0.0, 30.0),
                TestNode::customer(30.0, 30.0),
                TestNode::station(15.0, 30.0),
            ],
            FleetParams {
                battery_capacity: 50.0,
                ..FleetParams::default()
            },
        ));

        let solution = recreate(problem, vec![], &[2]);

        assert_eq!(inner_routes(&solution), vec![vec![3, 2, 3]]);
        assert!(solution.is_feasible());
    }

    #[test]
    fn test_unreachable_customer_gets_a_dedicated_route() {
        let problem = Arc::new(test_utils::create_test_problem(
            vec![
                TestNode::customer(1.0, 0.0),
                TestNode::customer(50.0, 0.0).with_time_window(0.0, 10.0),
            ],
            FleetParams::default(),
        ));

        let solution = recreate(problem, vec![vec![1]], &[2]);

        assert_eq!(inner_routes(&solution), vec![vec![1], vec![2]]);
        assert!(solution.covers_all_customers());
        assert!(!solution.is_feasible());
    }
}
