use thiserror::Error;

use crate::problem::{
    electric_vehicle_routing_problem::ElectricVehicleRoutingProblem,
    node::{NodeIdx, NodeKind},
};

use super::{
    capacity_constraint::CapacityConstraint, energy_constraint::EnergyConstraint,
    route_constraint::RouteConstraint, route_profile::RouteProfile,
    schedule_constraint::ScheduleConstraint, time_window_constraint::TimeWindowConstraint,
};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum OracleInputError {
    #[error("cannot extract a profile from an infeasible route of {len} nodes")]
    InfeasibleRoute { len: usize },
}

/// Stateless feasibility checks and profile extraction over a single route.
#[derive(Clone, Copy)]
pub struct FeasibilityOracle<'a> {
    problem: &'a ElectricVehicleRoutingProblem,
}

impl<'a> FeasibilityOracle<'a> {
    pub fn new(problem: &'a ElectricVehicleRoutingProblem) -> Self {
        FeasibilityOracle { problem }
    }

    pub fn problem(&self) -> &'a ElectricVehicleRoutingProblem {
        self.problem
    }

    /// Exactly one depot-start at the head and one depot-end at the tail.
    pub fn has_valid_depots(&self, route: &[NodeIdx]) -> bool {
        let [first, inner @ .., last] = route else {
            return false;
        };

        self.problem.kind(*first) == NodeKind::DepotStart
            && self.problem.kind(*last) == NodeKind::DepotEnd
            && inner.iter().all(|&node| !self.problem.kind(node).is_depot())
    }

    pub fn is_capacity_feasible(&self, route: &[NodeIdx]) -> bool {
        CapacityConstraint.is_satisfied(self.problem, route)
    }

    /// Recharging is assumed instantaneous.
    pub fn is_time_feasible(&self, route: &[NodeIdx]) -> bool {
        TimeWindowConstraint.is_satisfied(self.problem, route)
    }

    /// Time windows are ignored.
    pub fn is_energy_feasible(&self, route: &[NodeIdx]) -> bool {
        EnergyConstraint.is_satisfied(self.problem, route)
    }

    pub fn is_feasible(&self, route: &[NodeIdx]) -> bool {
        self.evaluate(route).is_some()
    }

    fn evaluate(&self, route: &[NodeIdx]) -> Option<RouteProfile> {
        if !self.has_valid_depots(route) || !self.is_capacity_feasible(route) {
            return None;
        }

        let (charge, arrival_times) = ScheduleConstraint::schedule(self.problem, route)?;

        Some(RouteProfile::new(
            arrival_times,
            charge.arrival,
            charge.departure,
        ))
    }

    pub fn profile(&self, route: &[NodeIdx]) -> Result<RouteProfile, OracleInputError> {
        self.evaluate(route)
            .ok_or(OracleInputError::InfeasibleRoute { len: route.len() })
    }

    pub fn arrival_times(&self, route: &[NodeIdx]) -> Result<Vec<f64>, OracleInputError> {
        self.profile(route)
            .map(|profile| profile.into_parts().0)
    }

    pub fn arrival_charge(&self, route: &[NodeIdx]) -> Result<Vec<f64>, OracleInputError> {
        self.profile(route)
            .map(|profile| profile.into_parts().1)
    }

    pub fn departure_charge(&self, route: &[NodeIdx]) -> Result<Vec<f64>, OracleInputError> {
        self.profile(route)
            .map(|profile| profile.into_parts().2)
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
                TestNode::customer(20.0, 0.0).with_demand(10.0),
                TestNode::station(30.0, 0.0),
                TestNode::customer(50.0, 0.0)
                    .with_demand(10.0)
                    .with_time_window(0.0, 200.0),
            ],
            FleetParams {
                battery_capacity: 80.0,
                load_capacity: 30.0,
                inverse_recharge_rate: 1.0,
                ..FleetParams::default()
            },
        )
    }

    #[test]
    fn test_has_valid_depots() {
        let problem = create_problem();
        let oracle = FeasibilityOracle::new(&problem);
        let start = problem.depot_start();
        let end = problem.depot_end();

        assert!(oracle.has_valid_depots(&[start, end]));
        assert!(oracle.has_valid_depots(&[start, NodeIdx::new(1), end]));
        assert!(!oracle.has_valid_depots(&[start]));
        assert!(!oracle.has_valid_depots(&[end, start]));
        assert!(!oracle.has_valid_depots(&[start, start, end]));
        assert!(!oracle.has_valid_depots(&[start, end, end]));
    }

    #[test]
    fn test_degenerate_route_is_feasible() {
        let problem = create_problem();
        let oracle = FeasibilityOracle::new(&problem);

        assert!(oracle.is_feasible(&[problem.depot_start(), problem.depot_end()]));
    }

    #[test]
    fn test_profile_of_feasible_route() {
        let problem = create_problem();
        let oracle = FeasibilityOracle::new(&problem);
        let route = test_utils::create_test_route(&problem, &[1, 2, 3]);

        let profile = oracle.profile(route.nodes()).unwrap();

        assert_eq!(profile.arrival_charge(), &[80.0, 60.0, 50.0, 50.0, 0.0]);
        assert_eq!(profile.departure_charge(), &[80.0, 60.0, 70.0, 50.0, 0.0]);
        assert_eq!(profile.recharged_amount(2), 20.0);
        // The recharge at the station delays every later arrival by 20.
        assert_eq!(profile.arrival_times(), &[0.0, 20.0, 30.0, 70.0, 120.0]);
    }

    #[test]
    fn test_profile_of_infeasible_route() {
        let problem = create_problem();
        let oracle = FeasibilityOracle::new(&problem);
        let route = test_utils::create_test_route(&problem, &[1, 3]);

        assert!(!oracle.is_energy_feasible(route.nodes()));
        assert!(oracle.is_time_feasible(route.nodes()));
        assert!(oracle.is_capacity_feasible(route.nodes()));
        assert_eq!(
            oracle.arrival_times(route.nodes()),
            Err(OracleInputError::InfeasibleRoute { len: 4 })
        );
    }

    #[test]
    fn test_recharging_during_a_wait_keeps_route_feasible() {
        let problem = test_utils::create_test_problem(
            vec![
                TestNode::station(10.0, 0.0),
                TestNode::customer(20.0, 0.0).with_time_window(100.0, 1000.0),
                TestNode::station(30.0, 0.0),
                TestNode::customer(60.0, 0.0).with_time_window(0.0, 155.0),
            ],
            FleetParams::default(),
        );
        let oracle = FeasibilityOracle::new(&problem);
        let route = test_utils::create_test_route(&problem, &[1, 2, 3, 4]);

        assert!(oracle.is_feasible(route.nodes()));

        let profile = oracle.profile(route.nodes()).unwrap();
        assert_eq!(profile.recharged_amount(1), 10.0);
        assert_eq!(profile.recharged_amount(3), 10.0);
        assert_eq!(profile.arrival_times()[4], 150.0);
    }

    #[test]
    fn test_capacity_violation_is_infeasible() {
        let problem = test_utils::create_test_problem(
            vec![
                TestNode::customer(1.0, 0.0).with_demand(20.0),
                TestNode::customer(2.0, 0.0).with_demand(20.0),
            ],
            FleetParams {
                load_capacity: 30.0,
                ..FleetParams::default()
            },
        );
        let oracle = FeasibilityOracle::new(&problem);
        let route = test_utils::create_test_route(&problem, &[1, 2]);

        assert!(!oracle.is_feasible(route.nodes()));
        assert!(oracle.is_energy_feasible(route.nodes()));
    }
}
