use crate::problem::{
    electric_vehicle_routing_problem::ElectricVehicleRoutingProblem,
    node::{NodeIdx, NodeKind},
};

use super::route_constraint::{FEASIBILITY_EPSILON, RouteConstraint};

/// State of charge on arrival and on departure at every position of a route.
#[derive(Debug, Clone, PartialEq)]
pub struct ChargeProfile {
    pub arrival: Vec<f64>,
    pub departure: Vec<f64>,
}

/// Battery never drops below zero, time ignored. The vehicle leaves the depot
/// full, and each station recharges exactly what is needed to reach the next
/// recharge point, bounded by the battery capacity.
pub struct EnergyConstraint;

impl EnergyConstraint {
    /// Distance from every position to the next station or depot-end.
    pub fn distance_to_next_recharge(
        problem: &ElectricVehicleRoutingProblem,
        route: &[NodeIdx],
    ) -> Vec<f64> {
        let mut remaining = vec![0.0; route.len()];

        for position in (0..route.len().saturating_sub(1)).rev() {
            let next = route[position + 1];
            let arc = problem.distance(route[position], next);

            remaining[position] = match problem.kind(next) {
                NodeKind::Station | NodeKind::DepotEnd => arc,
                _ => arc + remaining[position + 1],
            };
        }

        remaining
    }

    /// Unchecked propagation, arrival charges may be negative.
    pub fn propagate(problem: &ElectricVehicleRoutingProblem, route: &[NodeIdx]) -> ChargeProfile {
        let fleet = problem.fleet();
        let capacity = fleet.battery_capacity;
        let remaining = EnergyConstraint::distance_to_next_recharge(problem, route);

        let mut arrival = Vec::with_capacity(route.len());
        let mut departure = Vec::with_capacity(route.len());

        for (position, &node) in route.iter().enumerate() {
            let arrival_charge = if position == 0 {
                capacity
            } else {
                departure[position - 1]
                    - fleet.energy_for(problem.distance(route[position - 1], node))
            };

            let departure_charge = match problem.kind(node) {
                NodeKind::DepotStart => capacity,
                NodeKind::Station => arrival_charge
                    .max(fleet.energy_for(remaining[position]))
                    .min(capacity),
                NodeKind::Customer | NodeKind::DepotEnd => arrival_charge,
            };

            arrival.push(arrival_charge);
            departure.push(departure_charge);
        }

        ChargeProfile { arrival, departure }
    }

    /// Charge profile when no arrival charge is negative.
    pub fn charge_profile(
        problem: &ElectricVehicleRoutingProblem,
        route: &[NodeIdx],
    ) -> Option<ChargeProfile> {
        let profile = EnergyConstraint::propagate(problem, route);

        if profile
            .arrival
            .iter()
            .all(|&charge| charge >= -FEASIBILITY_EPSILON)
        {
            Some(profile)
        } else {
            None
        }
    }
}

impl RouteConstraint for EnergyConstraint {
    fn is_satisfied(&self, problem: &ElectricVehicleRoutingProblem, route: &[NodeIdx]) -> bool {
        EnergyConstraint::charge_profile(problem, route).is_some()
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        problem::fleet_params::FleetParams,
        test_utils::{self, TestNode},
    };

    use super::*;

    fn create_problem() -> ElectricVehicleRoutingProblem {
        test_utils::create_test_problem(
            vec![
                TestNode::customer(40.0, 0.0),
                TestNode::station(50.0, 0.0),
                TestNode::customer(80.0, 0.0),
            ],
            FleetParams {
                battery_capacity: 60.0,
                ..FleetParams::default()
            },
        )
    }

    #[test]
    fn test_distance_to_next_recharge() {
        let problem = create_problem();
        let route = test_utils::create_test_route(&problem, &[1, 2, 3]);

        assert_eq!(
            EnergyConstraint::distance_to_next_recharge(&problem, route.nodes()),
            vec![50.0, 10.0, 110.0, 80.0, 0.0]
        );
    }

    #[test]
    fn test_station_charges_to_reach_next_recharge_point() {
        let problem = test_utils::create_test_problem(
            vec![
                TestNode::customer(20.0, 0.0),
                TestNode::station(30.0, 0.0),
                TestNode::customer(50.0, 0.0),
            ],
            FleetParams {
                battery_capacity: 80.0,
                ..FleetParams::default()
            },
        );
        let route = test_utils::create_test_route(&problem, &[1, 2, 3]);

        let profile = EnergyConstraint::charge_profile(&problem, route.nodes()).unwrap();

        assert_eq!(profile.arrival, vec![80.0, 60.0, 50.0, 50.0, 0.0]);
        assert_eq!(profile.departure, vec![80.0, 60.0, 70.0, 50.0, 0.0]);
    }

    #[test]
    fn test_energy_infeasible_without_station() {
        let problem = create_problem();
        let route = test_utils::create_test_route(&problem, &[1, 3]);

        assert!(!EnergyConstraint.is_satisfied(&problem, route.nodes()));
    }

    #[test]
    fn test_energy_infeasible_when_station_cannot_cover_leg() {
        let problem = create_problem();
        let route = test_utils::create_test_route(&problem, &[1, 2, 3]);

        let profile = EnergyConstraint::propagate(&problem, route.nodes());

        assert_eq!(profile.departure[2], 60.0);
        assert!(profile.arrival[4] < 0.0);
        assert!(!EnergyConstraint.is_satisfied(&problem, route.nodes()));
    }
}
