use crate::problem::{
    electric_vehicle_routing_problem::ElectricVehicleRoutingProblem,
    node::{NodeIdx, NodeKind},
};

use super::{
    energy_constraint::ChargeProfile,
    route_constraint::{FEASIBILITY_EPSILON, RouteConstraint},
    time_window_constraint::TimeWindowConstraint,
};

/// Earliest start time at a position as a function of the charge held there:
/// `earliest + g * max(0, charge - free_charge)` for any charge in
/// `[min_charge, max_charge]`.
///
/// Below `free_charge` the charge was picked up at an earlier station while
/// the vehicle would have been waiting anyway.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ChargeWindow {
    earliest: f64,
    free_charge: f64,
    min_charge: f64,
    max_charge: f64,
}

impl ChargeWindow {
    fn full(start: f64, capacity: f64) -> Self {
        ChargeWindow {
            earliest: start,
            free_charge: capacity,
            min_charge: capacity,
            max_charge: capacity,
        }
    }

    fn start_time(&self, charge: f64, recharge_rate: f64) -> f64 {
        self.earliest + recharge_rate * (charge - self.free_charge).max(0.0)
    }

    fn travel(&self, duration: f64, energy: f64) -> Self {
        ChargeWindow {
            earliest: self.earliest + duration,
            free_charge: self.free_charge - energy,
            min_charge: (self.min_charge - energy).max(0.0),
            max_charge: self.max_charge - energy,
        }
    }

    fn wait_until(&mut self, ready: f64, recharge_rate: f64) {
        if self.earliest >= ready {
            return;
        }

        if recharge_rate > 0.0 {
            self.free_charge += (ready - self.earliest) / recharge_rate;
        }
        self.earliest = ready;
    }

    /// Drops the charges that would start after `due`.
    fn close_at(&mut self, due: f64, recharge_rate: f64) {
        if recharge_rate > 0.0 {
            let latest_charge = self.free_charge + (due - self.earliest) / recharge_rate;
            self.max_charge = self.max_charge.min(latest_charge).max(self.min_charge);
        }
    }

    /// Leaving a station, any charge up to the capacity can be reached.
    fn recharge(&self, capacity: f64) -> Self {
        ChargeWindow {
            earliest: self.earliest,
            free_charge: self.free_charge.min(self.max_charge),
            min_charge: self.min_charge,
            max_charge: capacity,
        }
    }

    fn delay(&self, duration: f64) -> Self {
        ChargeWindow {
            earliest: self.earliest + duration,
            ..*self
        }
    }
}

/// Time windows and energy together, with free partial recharging amounts.
///
/// A route passes when some choice of recharge amounts keeps every arrival
/// charge non-negative and every start within its window. Charging beyond the
/// minimum at a station is worthwhile when a later wait absorbs it.
pub struct ScheduleConstraint;

impl ScheduleConstraint {
    /// Charge windows on arrival at every position, `None` once no recharge
    /// plan reaches a position in time with a non-negative charge.
    fn arrival_windows(
        problem: &ElectricVehicleRoutingProblem,
        route: &[NodeIdx],
    ) -> Option<Vec<ChargeWindow>> {
        let fleet = problem.fleet();
        let rate = fleet.inverse_recharge_rate;
        let &first = route.first()?;

        let mut windows = Vec::with_capacity(route.len());
        let arrival = ChargeWindow::full(
            problem.node(first).time_window().ready(),
            fleet.battery_capacity,
        );
        windows.push(arrival);
        let mut departure = arrival.delay(problem.node(first).service_duration());

        for arc in route.windows(2) {
            let (from, to) = (arc[0], arc[1]);
            let mut arrival = departure.travel(
                problem.travel_time(from, to),
                fleet.energy_for(problem.distance(from, to)),
            );

            if arrival.max_charge < -FEASIBILITY_EPSILON {
                return None;
            }

            let window = problem.node(to).time_window();
            arrival.wait_until(window.ready(), rate);
            if !window.is_satisfied(arrival.start_time(arrival.min_charge, rate), FEASIBILITY_EPSILON)
            {
                return None;
            }
            arrival.close_at(window.due(), rate);

            departure = match problem.kind(to) {
                NodeKind::Station => arrival.recharge(fleet.battery_capacity),
                _ => arrival.delay(problem.node(to).service_duration()),
            };
            windows.push(arrival);
        }

        Some(windows)
    }

    /// Departure charge targets at every position, walking back from the
    /// lowest charge that reaches the depot. A station only carries in the
    /// charge that came free at earlier stations and tops up the rest itself,
    /// which is the minimal recharge whenever no wait is involved.
    fn departure_targets(
        problem: &ElectricVehicleRoutingProblem,
        route: &[NodeIdx],
        windows: &[ChargeWindow],
    ) -> Vec<f64> {
        let fleet = problem.fleet();
        let mut targets = vec![0.0; route.len()];
        let mut departure = windows.last().map_or(0.0, |window| window.min_charge);

        for position in (1..route.len()).rev() {
            targets[position] = departure;

            let arrival = match problem.kind(route[position]) {
                NodeKind::Station => {
                    let window = &windows[position];
                    window
                        .free_charge
                        .max(window.min_charge)
                        .min(departure.min(window.max_charge))
                }
                _ => departure,
            };
            departure = arrival + fleet.energy_for(problem.distance(route[position - 1], route[position]));
        }

        if let Some(first) = targets.first_mut() {
            *first = fleet.battery_capacity;
        }

        targets
    }

    fn charge_plan(
        problem: &ElectricVehicleRoutingProblem,
        route: &[NodeIdx],
        targets: &[f64],
    ) -> ChargeProfile {
        let fleet = problem.fleet();
        let mut arrival = Vec::with_capacity(route.len());
        let mut departure: Vec<f64> = Vec::with_capacity(route.len());

        for (position, &node) in route.iter().enumerate() {
            let arrival_charge = if position == 0 {
                fleet.battery_capacity
            } else {
                departure[position - 1]
                    - fleet.energy_for(problem.distance(route[position - 1], node))
            };

            let departure_charge = match problem.kind(node) {
                NodeKind::DepotStart => fleet.battery_capacity,
                NodeKind::Station => arrival_charge
                    .max(targets[position])
                    .min(fleet.battery_capacity),
                NodeKind::Customer | NodeKind::DepotEnd => arrival_charge,
            };

            arrival.push(arrival_charge);
            departure.push(departure_charge);
        }

        ChargeProfile { arrival, departure }
    }

    /// A recharge plan and the arrival times it leads to.
    pub fn schedule(
        problem: &ElectricVehicleRoutingProblem,
        route: &[NodeIdx],
    ) -> Option<(ChargeProfile, Vec<f64>)> {
        let windows = ScheduleConstraint::arrival_windows(problem, route)?;
        let targets = ScheduleConstraint::departure_targets(problem, route, &windows);
        let charge = ScheduleConstraint::charge_plan(problem, route, &targets);

        if charge
            .arrival
            .iter()
            .any(|&level| level < -FEASIBILITY_EPSILON)
        {
            return None;
        }

        let arrival_times = TimeWindowConstraint::arrival_times(problem, route, Some(&charge))?;

        Some((charge, arrival_times))
    }
}

impl RouteConstraint for ScheduleConstraint {
    fn is_satisfied(&self, problem: &ElectricVehicleRoutingProblem, route: &[NodeIdx]) -> bool {
        ScheduleConstraint::schedule(problem, route).is_some()
    }
}
