use crate::{
    problem::{electric_vehicle_routing_problem::ElectricVehicleRoutingProblem, node::NodeIdx},
    solver::{
        constraints::{feasibility_oracle::FeasibilityOracle, route_constraint::FEASIBILITY_EPSILON},
        solution::route::Route,
    },
};

/// How the forward scan looking for the first energy-negative node treats
/// existing stations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NegativeChargeLocator {
    /// A station refills the battery on arrival and is never reported.
    Classic,
    /// A station refills the battery on departure, so the station itself can
    /// be reached with a negative charge.
    Extended,
}

/// Backward station-insertion searches repairing a single energy-infeasible
/// route. Every search returns the route unchanged when it finds nothing.
#[derive(Clone, Copy)]
pub struct StationInsertion<'a> {
    oracle: FeasibilityOracle<'a>,
}

impl<'a> StationInsertion<'a> {
    pub fn new(problem: &'a ElectricVehicleRoutingProblem) -> Self {
        StationInsertion {
            oracle: FeasibilityOracle::new(problem),
        }
    }

    pub fn oracle(&self) -> FeasibilityOracle<'a> {
        self.oracle
    }

    fn problem(&self) -> &'a ElectricVehicleRoutingProblem {
        self.oracle.problem()
    }

    /// Position of the first node reached with a negative charge, assuming a
    /// full battery after every recharge point.
    pub fn first_negative_position(
        &self,
        route: &[NodeIdx],
        locator: NegativeChargeLocator,
    ) -> Option<usize> {
        let problem = self.problem();
        let fleet = problem.fleet();
        let mut departure = fleet.battery_capacity;

        for (offset, arc) in route.windows(2).enumerate() {
            let node = arc[1];
            let arrival = departure - fleet.energy_for(problem.distance(arc[0], node));
            let recharges = problem.kind(node).is_recharge_point();

            if recharges && locator == NegativeChargeLocator::Classic {
                departure = fleet.battery_capacity;
                continue;
            }

            if arrival < -FEASIBILITY_EPSILON {
                return Some(offset + 1);
            }

            departure = if recharges {
                fleet.battery_capacity
            } else {
                arrival
            };
        }

        None
    }

    fn is_recharge_point(&self, node: NodeIdx) -> bool {
        self.problem().kind(node).is_recharge_point()
    }

    /// Station with the smallest detour on the arc ending at `position`,
    /// feasibility ignored.
    pub fn cheapest_station(&self, route: &Route, position: usize) -> Option<NodeIdx> {
        self.cheapest_station_among(route, position, self.problem().stations().iter().copied())
    }

    fn cheapest_station_among(
        &self,
        route: &Route,
        position: usize,
        stations: impl Iterator<Item = NodeIdx>,
    ) -> Option<NodeIdx> {
        let problem = self.problem();
        stations
            .map(|station| (station, route.insertion_detour(problem, position, station)))
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(station, _)| station)
    }

    /// Cheapest feasible route obtained by inserting one station at `position`,
    /// with its detour.
    fn best_station_at(&self, route: &Route, position: usize) -> Option<(Route, f64)> {
        let problem = self.problem();

        problem
            .stations()
            .iter()
            .map(|&station| (station, route.insertion_detour(problem, position, station)))
            .filter(|&(station, _)| {
                self.oracle
                    .is_feasible(route.with_insertion(position, station).nodes())
            })
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(station, detour)| (route.with_insertion(position, station), detour))
    }

    fn cheapest_candidate(candidates: impl Iterator<Item = (Route, f64)>) -> Option<Route> {
        candidates
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(route, _)| route)
    }

    /// Walks back from the first negative node and takes the first arc where a
    /// station restores feasibility. Gives up at the first recharge point.
    pub fn first_feasible(&self, route: Route) -> Route {
        if self.oracle.is_feasible(route.nodes()) {
            return route;
        }

        let Some(negative) = self.first_negative_position(route.nodes(), NegativeChargeLocator::Classic)
        else {
            return route;
        };

        for position in (1..=negative).rev() {
            if self.is_recharge_point(route.node(position - 1)) {
                break;
            }

            if let Some((repaired, _)) = self.best_station_at(&route, position) {
                return repaired;
            }
        }

        route
    }

    /// Like [`StationInsertion::first_feasible`] but keeps scanning past the
    /// first success and returns the cheapest repair found before the first
    /// recharge point.
    pub fn best(&self, route: Route) -> Route {
        if self.oracle.is_feasible(route.nodes()) {
            return route;
        }

        let Some(negative) = self.first_negative_position(route.nodes(), NegativeChargeLocator::Classic)
        else {
            return route;
        };

        let candidates = (1..=negative)
            .rev()
            .take_while(|&position| !self.is_recharge_point(route.node(position - 1)))
            .filter_map(|position| self.best_station_at(&route, position));

        Self::cheapest_candidate(candidates).unwrap_or(route)
    }

    /// Compares the two arcs bracketing the node before the first negative one.
    pub fn compare_adjacent(&self, route: Route) -> Route {
        if self.oracle.is_feasible(route.nodes()) {
            return route;
        }

        let Some(negative) = self.first_negative_position(route.nodes(), NegativeChargeLocator::Classic)
        else {
            return route;
        };

        let problem = self.problem();
        let bracketed = negative >= 2
            && problem.is_customer(route.node(negative - 1))
            && problem.is_customer(route.node(negative - 2));

        if !bracketed {
            return self.first_feasible(route);
        }

        let with_cheapest = |position: usize| {
            self.cheapest_station(&route, position)
                .map(|station| route.with_insertion(position, station))
                .filter(|candidate| self.oracle.is_feasible(candidate.nodes()))
        };

        match (with_cheapest(negative), with_cheapest(negative - 1)) {
            (Some(last_arc), Some(previous_arc)) => {
                if last_arc.distance(problem) < previous_arc.distance(problem) {
                    last_arc
                } else {
                    previous_arc
                }
            }
            (Some(candidate), None) | (None, Some(candidate)) => candidate,
            (None, None) => self.first_feasible_extended(route),
        }
    }

    /// First-feasible search that looks through existing stations down to the
    /// depot.
    pub fn first_feasible_extended(&self, route: Route) -> Route {
        if self.oracle.is_feasible(route.nodes()) {
            return route;
        }

        let Some(negative) = self.first_negative_position(route.nodes(), NegativeChargeLocator::Extended)
        else {
            return route;
        };

        (1..=negative)
            .rev()
            .find_map(|position| self.best_station_at(&route, position))
            .map(|(repaired, _)| repaired)
            .unwrap_or(route)
    }

    /// Cheapest single-station repair over every arc up to the depot.
    pub fn best_extended(&self, route: Route) -> Route {
        if self.oracle.is_feasible(route.nodes()) {
            return route;
        }

        let Some(negative) = self.first_negative_position(route.nodes(), NegativeChargeLocator::Extended)
        else {
            return route;
        };

        let candidates = (1..=negative)
            .rev()
            .filter_map(|position| self.best_station_at(&route, position));

        Self::cheapest_candidate(candidates).unwrap_or(route)
    }

    /// Puts the station of smallest detour on every arc up to the depot and
    /// keeps the cheapest feasible outcome.
    pub fn compare_all(&self, route: Route) -> Route {
        if self.oracle.is_feasible(route.nodes()) {
            return route;
        }

        let Some(negative) = self.first_negative_position(route.nodes(), NegativeChargeLocator::Extended)
        else {
            return route;
        };

        let problem = self.problem();
        let candidates = (1..=negative).rev().filter_map(|position| {
            let station = self.cheapest_station(&route, position)?;
            let candidate = route.with_insertion(position, station);

            self.oracle
                .is_feasible(candidate.nodes())
                .then(|| (candidate, route.insertion_detour(problem, position, station)))
        });

        match Self::cheapest_candidate(candidates) {
            Some(repaired) => repaired,
            None => self.first_feasible_extended(route),
        }
    }

    /// Forces the cheapest station right before the first negative node. Next
    /// to a depot, stations sharing the depot location are skipped.
    pub(crate) fn force_station_before_negative(&self, route: &mut Route) -> bool {
        let Some(negative) = self.first_negative_position(route.nodes(), NegativeChargeLocator::Extended)
        else {
            return false;
        };

        let problem = self.problem();
        let next_to_depot = problem.kind(route.node(negative)).is_depot()
            || problem.kind(route.node(negative - 1)).is_depot();

        let stations = problem.stations().iter().copied().filter(|&station| {
            !next_to_depot || problem.distance(problem.depot_start(), station) > 0.0
        });

        match self.cheapest_station_among(route, negative, stations) {
            Some(station) => {
                route.insert(negative, station);
                true
            }
            None => false,
        }
    }
}
