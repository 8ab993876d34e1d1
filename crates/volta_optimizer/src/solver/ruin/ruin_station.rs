use rand::{Rng, seq::IndexedRandom};
use tracing::error;

use crate::solver::{
    constraints::{feasibility_oracle::FeasibilityOracle, route_constraint::FEASIBILITY_EPSILON},
    solution::{route_id::RouteIdx, working_solution::WorkingSolution},
};

use super::{
    ruin_context::RuinContext, ruin_solution::RuinStations, ruin_strategy::StationRuinStrategy,
    ruin_utils::removal_count,
};

/// Removes station visits. Worst-cost variants take exactly the `sigma` worst visits.
pub struct RuinStation {
    pub strategy: StationRuinStrategy,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct StationVisit {
    route_id: RouteIdx,
    position: usize,
    cost: f64,
}

impl RuinStation {
    fn station_visits(&self, solution: &WorkingSolution) -> Vec<StationVisit> {
        let problem = solution.problem();
        let oracle = FeasibilityOracle::new(problem);
        let mut visits = Vec::new();

        for (route_id, route) in solution.routes_iter_idx() {
            let positions = route.station_positions(problem);
            if positions.is_empty() {
                continue;
            }

            let profile = match self.strategy {
                StationRuinStrategy::WorstCharge | StationRuinStrategy::FullCharge => {
                    match oracle.profile(route.nodes()) {
                        Ok(profile) => Some(profile),
                        Err(err) => {
                            error!(error = %err, route = %route_id, "RuinStation: skipping route without profile");
                            continue;
                        }
                    }
                }
                _ => None,
            };

            for position in positions {
                let cost = match (self.strategy, &profile) {
                    (StationRuinStrategy::WorstDistance, _) => {
                        let nodes = route.nodes();
                        problem.distance(nodes[position - 1], nodes[position])
                            + problem.distance(nodes[position], nodes[position + 1])
                    }
                    (StationRuinStrategy::WorstCharge, Some(profile)) => {
                        profile.arrival_charge()[position]
                    }
                    (StationRuinStrategy::FullCharge, Some(profile)) => {
                        profile.departure_charge()[position]
                    }
                    _ => 0.0,
                };

                visits.push(StationVisit {
                    route_id,
                    position,
                    cost,
                });
            }
        }

        visits
    }
}

impl RuinStations for RuinStation {
    fn ruin_stations<R>(&self, solution: &mut WorkingSolution, context: RuinContext<R>) -> usize
    where
        R: Rng,
    {
        let mut visits = self.station_visits(solution);
        let count = removal_count(
            visits.len(),
            &context.params.removal_lower,
            &context.params.removal_upper,
            context.rng,
        );

        let removed: Vec<StationVisit> = match self.strategy {
            StationRuinStrategy::Random => {
                visits.choose_multiple(context.rng, count).copied().collect()
            }
            StationRuinStrategy::WorstDistance | StationRuinStrategy::WorstCharge => {
                visits.sort_by(|a, b| b.cost.total_cmp(&a.cost));
                visits.truncate(count);
                visits
            }
            StationRuinStrategy::FullCharge => {
                let battery_capacity = context.problem.fleet().battery_capacity;
                let full = visits
                    .into_iter()
                    .filter(|visit| visit.cost >= battery_capacity - FEASIBILITY_EPSILON)
                    .collect::<Vec<_>>();

                if full.len() <= count {
                    full
                } else {
                    full.choose_multiple(context.rng, count).copied().collect()
                }
            }
        };

        for route_index in 0..solution.num_routes() {
            let route_id = RouteIdx::new(route_index);
            let positions = removed
                .iter()
                .filter(|visit| visit.route_id == route_id)
                .map(|visit| visit.position)
                .collect::<Vec<_>>();

            if !positions.is_empty() {
                solution
                    .route_mut(route_id)
                    .retain_positions(|position, _| !positions.contains(&position));
            }
        }

        removed.len()
    }
}
