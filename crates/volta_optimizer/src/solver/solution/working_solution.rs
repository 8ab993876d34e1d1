use std::sync::Arc;

use fixedbitset::FixedBitSet;

use crate::{
    problem::{electric_vehicle_routing_problem::ElectricVehicleRoutingProblem, node::NodeIdx},
    solver::{
        constraints::feasibility_oracle::FeasibilityOracle,
        solution::{route::Route, route_id::RouteIdx, solution_cost::SolutionCost},
    },
};

/// A full route plan. Cost is recomputed from the routes on every call.
#[derive(Clone)]
pub struct WorkingSolution {
    problem: Arc<ElectricVehicleRoutingProblem>,
    routes: Vec<Route>,
}

impl WorkingSolution {
    pub fn new(problem: Arc<ElectricVehicleRoutingProblem>) -> Self {
        WorkingSolution {
            problem,
            routes: Vec::new(),
        }
    }

    pub fn from_routes(problem: Arc<ElectricVehicleRoutingProblem>, routes: Vec<Route>) -> Self {
        WorkingSolution { problem, routes }
    }

    pub fn problem(&self) -> &ElectricVehicleRoutingProblem {
        &self.problem
    }

    pub fn problem_arc(&self) -> &Arc<ElectricVehicleRoutingProblem> {
        &self.problem
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn route(&self, route_id: RouteIdx) -> &Route {
        &self.routes[route_id]
    }

    pub fn routes_iter_idx(&self) -> impl Iterator<Item = (RouteIdx, &Route)> {
        self.routes
            .iter()
            .enumerate()
            .map(|(index, route)| (RouteIdx::new(index), route))
    }

    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    pub fn distance(&self) -> f64 {
        self.routes
            .iter()
            .map(|route| route.distance(&self.problem))
            .sum()
    }

    /// Routes still serving a node besides the depots.
    pub fn num_active_routes(&self) -> usize {
        self.routes
            .iter()
            .filter(|route| !route.is_degenerate())
            .count()
    }

    pub fn cost(&self) -> SolutionCost {
        SolutionCost::new(self.num_active_routes(), self.distance())
    }

    pub fn push_route(&mut self, route: Route) -> RouteIdx {
        self.routes.push(route);
        RouteIdx::new(self.routes.len() - 1)
    }

    pub fn replace_route(&mut self, route_id: RouteIdx, route: Route) {
        self.routes[route_id] = route;
    }

    pub fn route_mut(&mut self, route_id: RouteIdx) -> &mut Route {
        &mut self.routes[route_id]
    }

    /// Removes the given routes, returning them in ascending index order.
    pub fn remove_routes(&mut self, route_ids: &[RouteIdx]) -> Vec<Route> {
        let mut removed = Vec::with_capacity(route_ids.len());
        let mut kept = Vec::with_capacity(self.routes.len());

        for (index, route) in std::mem::take(&mut self.routes).into_iter().enumerate() {
            if route_ids.contains(&RouteIdx::new(index)) {
                removed.push(route);
            } else {
                kept.push(route);
            }
        }

        self.routes = kept;
        removed
    }

    /// Returns the number of pruned routes.
    pub fn prune_degenerate_routes(&mut self) -> usize {
        let before = self.routes.len();
        self.routes.retain(|route| !route.is_degenerate());
        before - self.routes.len()
    }

    pub fn is_feasible(&self) -> bool {
        let oracle = FeasibilityOracle::new(&self.problem);
        self.routes
            .iter()
            .all(|route| oracle.is_feasible(route.nodes()))
    }

    /// Every customer is served exactly once.
    pub fn covers_all_customers(&self) -> bool {
        let mut seen = FixedBitSet::with_capacity(self.problem.num_nodes());
        let mut count = 0;

        for customer in self
            .routes
            .iter()
            .flat_map(|route| route.customers(&self.problem))
        {
            if seen.contains(customer.get()) {
                return false;
            }
            seen.insert(customer.get());
            count += 1;
        }

        count == self.problem.customers().len()
    }

    pub fn served_customers(&self) -> Vec<NodeIdx> {
        self.routes
            .iter()
            .flat_map(|route| route.customers(&self.problem))
            .collect()
    }

    /// Route and position of a node, first occurrence.
    pub fn locate(&self, node: NodeIdx) -> Option<(RouteIdx, usize)> {
        self.routes_iter_idx()
            .find_map(|(route_id, route)| route.position_of(node).map(|position| (route_id, position)))
    }

    pub fn station_visit_count(&self) -> usize {
        self.routes
            .iter()
            .map(|route| route.station_positions(&self.problem).len())
            .sum()
    }

    /// Routes as external node ids.
    pub fn external_routes(&self) -> Vec<Vec<String>> {
        self.routes
            .iter()
            .map(|route| {
                route
                    .nodes()
                    .iter()
                    .map(|&node| self.problem.node(node).external_id().to_owned())
                    .collect()
            })
            .collect()
    }
}

impl std::fmt::Debug for WorkingSolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkingSolution")
            .field("routes", &self.routes)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::{problem::fleet_params::FleetParams, test_utils};

    use super::*;

    fn create_solution(routes: Vec<Vec<usize>>) -> WorkingSolution {
        let problem = Arc::new(test_utils::create_line_problem(4, FleetParams::default()));
        test_utils::create_test_working_solution(problem, routes)
    }

    #[test]
    fn test_distance_is_sum_of_routes() {
        let solution = create_solution(vec![vec![1, 2], vec![3, 4]]);

        assert_eq!(solution.distance(), 4.0 + 8.0);
        assert_eq!(solution.num_routes(), 2);
    }

    #[test]
    fn test_covers_all_customers() {
        assert!(create_solution(vec![vec![1, 2], vec![4, 3]]).covers_all_customers());
        assert!(!create_solution(vec![vec![1, 2], vec![3]]).covers_all_customers());
        assert!(!create_solution(vec![vec![1, 2, 3], vec![3, 4]]).covers_all_customers());
    }

    #[test]
    fn test_prune_degenerate_routes() {
        let mut solution = create_solution(vec![vec![], vec![1, 2, 3, 4], vec![]]);

        assert_eq!(solution.cost(), SolutionCost::new(1, 8.0));
        assert_eq!(solution.prune_degenerate_routes(), 2);
        assert_eq!(solution.num_routes(), 1);
    }

    #[test]
    fn test_remove_routes() {
        let mut solution = create_solution(vec![vec![1], vec![2], vec![3, 4]]);

        let removed = solution.remove_routes(&[RouteIdx::new(2), RouteIdx::new(0)]);

        assert_eq!(removed.len(), 2);
        assert_eq!(removed[0].nodes()[1], NodeIdx::new(1));
        assert_eq!(solution.served_customers(), vec![NodeIdx::new(2)]);
    }

    #[test]
    fn test_locate_and_external_routes() {
        let solution = create_solution(vec![vec![1], vec![3, 2]]);

        assert_eq!(solution.locate(NodeIdx::new(2)), Some((RouteIdx::new(1), 2)));
        assert_eq!(solution.locate(NodeIdx::new(4)), None);
        assert_eq!(
            solution.external_routes()[1],
            vec!["D0", "C3", "C2", "D0_end"]
        );
    }
}
