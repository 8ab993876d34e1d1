use crate::problem::{
    electric_vehicle_routing_problem::ElectricVehicleRoutingProblem, node::NodeIdx,
};

use super::route_constraint::{FEASIBILITY_EPSILON, RouteConstraint};

pub struct CapacityConstraint;

impl CapacityConstraint {
    pub fn total_demand(problem: &ElectricVehicleRoutingProblem, route: &[NodeIdx]) -> f64 {
        route.iter().map(|&node| problem.node(node).demand()).sum()
    }
}

impl RouteConstraint for CapacityConstraint {
    fn is_satisfied(&self, problem: &ElectricVehicleRoutingProblem, route: &[NodeIdx]) -> bool {
        CapacityConstraint::total_demand(problem, route)
            <= problem.fleet().load_capacity + FEASIBILITY_EPSILON
    }
}
