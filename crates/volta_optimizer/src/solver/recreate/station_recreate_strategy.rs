use std::fmt::Display;

use serde::Serialize;

use crate::solver::{
    alns_weights::AlnsOperator,
    solution::{route::Route, route_id::RouteIdx, working_solution::WorkingSolution},
};

use super::{
    recreate_context::RecreateContext, recreate_solution::RecreateStations,
    station_insertion::StationInsertion,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StationRecreateStrategy {
    FirstFeasible,
    CompareAdjacent,
    Best,
    FirstFeasibleExtended,
    BestExtended,
    CompareAll,
}

impl StationRecreateStrategy {
    pub fn recharge_route(&self, station_insertion: &StationInsertion, route: Route) -> Route {
        match self {
            Self::FirstFeasible => station_insertion.first_feasible(route),
            Self::CompareAdjacent => station_insertion.compare_adjacent(route),
            Self::Best => station_insertion.best(route),
            Self::FirstFeasibleExtended => station_insertion.first_feasible_extended(route),
            Self::BestExtended => station_insertion.best_extended(route),
            Self::CompareAll => station_insertion.compare_all(route),
        }
    }
}

impl Serialize for StationRecreateStrategy {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl Display for StationRecreateStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FirstFeasible => write!(f, "FirstFeasibleStation"),
            Self::CompareAdjacent => write!(f, "CompareAdjacentStation"),
            Self::Best => write!(f, "BestStation"),
            Self::FirstFeasibleExtended => write!(f, "FirstFeasibleStationExtended"),
            Self::BestExtended => write!(f, "BestStationExtended"),
            Self::CompareAll => write!(f, "CompareAllStation"),
        }
    }
}

impl AlnsOperator for StationRecreateStrategy {
    const COUNT: usize = 6;

    fn index(&self) -> usize {
        match self {
            Self::FirstFeasible => 0,
            Self::CompareAdjacent => 1,
            Self::Best => 2,
            Self::FirstFeasibleExtended => 3,
            Self::BestExtended => 4,
            Self::CompareAll => 5,
        }
    }
}

impl RecreateStations for StationRecreateStrategy {
    fn recreate_stations(&self, solution: &mut WorkingSolution, context: RecreateContext) {
        let station_insertion = context.station_insertion();

        for index in 0..solution.num_routes() {
            let route_id = RouteIdx::new(index);
            let route = solution.route(route_id).clone();
            solution.replace_route(route_id, self.recharge_route(&station_insertion, route));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::{
        problem::fleet_params::FleetParams,
        solver::recreate::recreate_params::RecreateParams,
        test_utils::{self, TestNode},
    };

    use super::*;

    #[test]
    fn test_recreate_stations_repairs_every_route() {
        let problem = Arc::new(test_utils::create_test_problem(
            vec![
                TestNode::customer(0.0, 30.0),
                TestNode::customer(30.0, 30.0),
                TestNode::station(15.0, 30.0),
            ],
            FleetParams {
                battery_capacity: 80.0,
                ..FleetParams::default()
            },
        ));
        let mut solution =
            test_utils::create_test_working_solution(problem.clone(), vec![vec![1, 2], vec![1]]);
        let params = RecreateParams::default();
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(1)
            .build()
            .unwrap();

        StationRecreateStrategy::Best.recreate_stations(
            &mut solution,
            RecreateContext {
                params: &params,
                problem: &problem,
                thread_pool: &thread_pool,
            },
        );

        assert_eq!(
            solution.route(0.into()),
            &test_utils::create_test_route(&problem, &[1, 3, 2])
        );
        assert_eq!(solution.route(1.into()), &test_utils::create_test_route(&problem, &[1]));
        assert!(solution.is_feasible());
    }

    #[test]
    fn test_index_is_dense() {
        let strategies = [
            StationRecreateStrategy::FirstFeasible,
            StationRecreateStrategy::CompareAdjacent,
            StationRecreateStrategy::Best,
            StationRecreateStrategy::FirstFeasibleExtended,
            StationRecreateStrategy::BestExtended,
            StationRecreateStrategy::CompareAll,
        ];

        let mut indices: Vec<_> = strategies.iter().map(|strategy| strategy.index()).collect();
        indices.sort_unstable();

        assert_eq!(indices, (0..StationRecreateStrategy::COUNT).collect::<Vec<_>>());
    }
}
