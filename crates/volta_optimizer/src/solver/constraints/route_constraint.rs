use crate::problem::{
    electric_vehicle_routing_problem::ElectricVehicleRoutingProblem, node::NodeIdx,
};

/// Absolute tolerance applied to time and charge comparisons.
pub const FEASIBILITY_EPSILON: f64 = 1e-9;

pub trait RouteConstraint {
    fn is_satisfied(&self, problem: &ElectricVehicleRoutingProblem, route: &[NodeIdx]) -> bool;
}
