use crate::problem::{
    electric_vehicle_routing_problem::ElectricVehicleRoutingProblem,
    node::{NodeIdx, NodeKind},
};

use super::{
    energy_constraint::ChargeProfile,
    route_constraint::{FEASIBILITY_EPSILON, RouteConstraint},
};

/// Every node is reached before its due date. Vehicles wait for the ready time.
pub struct TimeWindowConstraint;

impl TimeWindowConstraint {
    /// Time spent at a position before leaving. Stations dwell for their
    /// recharge when a charge profile is given, and not at all otherwise.
    fn dwell(
        problem: &ElectricVehicleRoutingProblem,
        node: NodeIdx,
        position: usize,
        charge: Option<&ChargeProfile>,
    ) -> f64 {
        match problem.kind(node) {
            NodeKind::Station => charge.map_or(0.0, |charge| {
                problem
                    .fleet()
                    .recharge_duration(charge.departure[position] - charge.arrival[position])
            }),
            _ => problem.node(node).service_duration(),
        }
    }

    /// Arrival times along the route, `None` as soon as a due date is missed.
    pub fn arrival_times(
        problem: &ElectricVehicleRoutingProblem,
        route: &[NodeIdx],
        charge: Option<&ChargeProfile>,
    ) -> Option<Vec<f64>> {
        let mut arrivals: Vec<f64> = Vec::with_capacity(route.len());
        let mut departure = 0.0;

        for (position, &node) in route.iter().enumerate() {
            let window = problem.node(node).time_window();
            let arrival = if position == 0 {
                window.ready()
            } else {
                window.earliest_start(departure + problem.travel_time(route[position - 1], node))
            };

            if !window.is_satisfied(arrival, FEASIBILITY_EPSILON) {
                return None;
            }

            departure = arrival + TimeWindowConstraint::dwell(problem, node, position, charge);
            arrivals.push(arrival);
        }

        Some(arrivals)
    }
}

impl RouteConstraint for TimeWindowConstraint {
    /// Time-only check, recharging takes no time.
    fn is_satisfied(&self, problem: &ElectricVehicleRoutingProblem, route: &[NodeIdx]) -> bool {
        TimeWindowConstraint::arrival_times(problem, route, None).is_some()
    }
}
