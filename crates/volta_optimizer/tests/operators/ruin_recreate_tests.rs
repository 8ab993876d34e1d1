use std::sync::Arc;

use volta_optimizer::solver::{
    recreate::{
        recreate_context::RecreateContext,
        recreate_params::RecreateParams,
        recreate_solution::{RecreateSolution, RecreateStations},
        recreate_strategy::RecreateStrategy,
        station_recreate_strategy::StationRecreateStrategy,
    },
    ruin::{
        ruin_context::RuinContext,
        ruin_params::RuinParams,
        ruin_solution::{RuinSolution, RuinStations},
        ruin_strategy::{
            AdjacentStation, CustomerRuinStrategy, Relatedness, RouteRuinStrategy,
            StationRuinStrategy,
        },
    },
};

use crate::{mock_rng::MockRng, test_utils};

fn thread_pool() -> rayon::ThreadPool {
    rayon::ThreadPoolBuilder::new()
        .num_threads(2)
        .build()
        .unwrap()
}

#[test]
fn test_customer_ruin_and_recreate_keep_every_customer() {
    let problem = Arc::new(test_utils::create_small_problem());
    let ruin_params = RuinParams::default();
    let recreate_params = RecreateParams::default();
    let thread_pool = thread_pool();

    let ruin_strategies = [
        CustomerRuinStrategy::Random(AdjacentStation::None),
        CustomerRuinStrategy::WorstDistance(AdjacentStation::Previous),
        CustomerRuinStrategy::Related(Relatedness::Shaw, AdjacentStation::Next),
        CustomerRuinStrategy::Zone(AdjacentStation::None),
    ];
    let recreate_strategies = [
        RecreateStrategy::GreedyInsertion,
        RecreateStrategy::RegretInsertion(2),
        RecreateStrategy::RegretInsertion(3),
    ];

    for ruin_strategy in ruin_strategies {
        for recreate_strategy in recreate_strategies {
            let mut solution = test_utils::create_working_solution(
                Arc::clone(&problem),
                vec![vec![1, 2], vec![3, 4], vec![5]],
            );
            let mut rng = MockRng::new(vec![u64::MAX / 3, u64::MAX / 7 * 5, 12_345]);

            let bank = ruin_strategy.ruin_solution(
                &mut solution,
                RuinContext {
                    params: &ruin_params,
                    problem: &problem,
                    rng: &mut rng,
                },
            );
            recreate_strategy.recreate_solution(
                &mut solution,
                bank,
                RecreateContext {
                    params: &recreate_params,
                    problem: &problem,
                    thread_pool: &thread_pool,
                },
            );

            assert!(
                solution.covers_all_customers(),
                "{ruin_strategy} then {recreate_strategy} lost a customer"
            );
            assert!(solution.is_feasible());
        }
    }
}

#[test]
fn test_route_ruin_empties_whole_routes() {
    let problem = Arc::new(test_utils::create_small_problem());
    let mut solution = test_utils::create_working_solution(
        Arc::clone(&problem),
        vec![vec![1, 2], vec![3, 4], vec![5]],
    );
    let mut rng = MockRng::new(vec![0]);

    let bank = RouteRuinStrategy::Random.ruin_solution(
        &mut solution,
        RuinContext {
            params: &RuinParams::default(),
            problem: &problem,
            rng: &mut rng,
        },
    );

    let served = solution.served_customers().len();
    assert_eq!(served + bank.len(), 5);
    assert!(!bank.is_empty());

    let original: [&[usize]; 3] = [&[1, 2], &[3, 4], &[5]];
    for route in solution.routes().iter().filter(|route| !route.is_degenerate()) {
        let customers: Vec<usize> = route.customers(&problem).map(|node| node.get()).collect();
        assert!(original.contains(&customers.as_slice()));
    }
}

#[test]
fn test_station_ruin_and_recreate_keep_every_customer() {
    let problem = Arc::new(test_utils::create_small_problem());
    let recreate_params = RecreateParams::default();
    let thread_pool = thread_pool();

    // S6 at (25, 0) between C1 and C2, S7 at (-20, 10) between C3 and C4.
    let mut solution = test_utils::create_working_solution(
        Arc::clone(&problem),
        vec![vec![1, 6, 2, 5], vec![3, 7, 4]],
    );
    assert!(solution.is_feasible());

    for (ruin_strategy, recreate_strategy) in [
        (StationRuinStrategy::Random, StationRecreateStrategy::FirstFeasible),
        (StationRuinStrategy::WorstDistance, StationRecreateStrategy::Best),
        (StationRuinStrategy::FullCharge, StationRecreateStrategy::CompareAdjacent),
    ] {
        let mut candidate = solution.clone();
        let mut rng = MockRng::new(vec![u64::MAX / 2]);

        ruin_strategy.ruin_stations(
            &mut candidate,
            RuinContext {
                params: &RuinParams::default(),
                problem: &problem,
                rng: &mut rng,
            },
        );
        recreate_strategy.recreate_stations(
            &mut candidate,
            RecreateContext {
                params: &recreate_params,
                problem: &problem,
                thread_pool: &thread_pool,
            },
        );

        assert!(candidate.covers_all_customers());
        solution = candidate;
    }

    assert!(solution.covers_all_customers());
}
