use volta_optimizer::{
    acceptor::{
        accept_solution::{AcceptSolution, AcceptSolutionContext, AcceptanceOutcome},
        simulated_annealing_acceptor::SimulatedAnnealingAcceptor,
    },
    parsers::{parser::DatasetParser, schneider::SchneiderParser},
    problem::fleet_params::FleetParams,
    solver::{
        error::SolverError,
        solution::solution_cost::SolutionCost,
        solver::Solver,
        solver_outcome::SolverOutcome,
        solver_params::{SolverParams, Threads},
    },
};

use crate::{mock_rng::MockRng, test_utils};

fn solve_small_problem(iterations: usize, seed: u64) -> SolverOutcome {
    let solver = Solver::new(
        test_utils::create_small_problem(),
        SolverParams {
            iterations,
            seed: Some(seed),
            ..SolverParams::default()
        },
    )
    .unwrap();

    solver.solve().unwrap()
}

#[test]
fn test_single_iteration_is_reproducible() {
    let first = solve_small_problem(1, 42);
    let second = solve_small_problem(1, 42);

    assert_eq!(first.distance, second.distance);
    assert_eq!(first.num_routes, second.num_routes);
    assert_eq!(first.routes, second.routes);
}

#[test]
fn test_best_routes_are_well_formed() {
    let outcome = solve_small_problem(300, 3);
    let problem = outcome.best_solution.problem();

    assert!(outcome.best_solution.is_feasible());
    assert!(outcome.best_solution.covers_all_customers());
    assert_eq!(outcome.routes.len(), outcome.num_routes);

    let mut distance = 0.0;
    for route in &outcome.routes {
        assert_eq!(route.first().map(String::as_str), Some("D0"));
        assert_eq!(route.last().map(String::as_str), Some("D0_end"));
        assert_eq!(route.iter().filter(|id| id.starts_with("D0")).count(), 2);

        let nodes: Vec<_> = route
            .iter()
            .map(|id| problem.find_node(id).unwrap())
            .collect();
        distance += nodes
            .windows(2)
            .map(|arc| problem.distance(arc[0], arc[1]))
            .sum::<f64>();
    }

    assert!((outcome.distance - distance).abs() < 1e-6);
    assert!(
        outcome.num_routes < outcome.initial_num_routes
            || outcome.distance <= outcome.initial_distance
    );
}

#[test]
fn test_fixture_instance_is_solved_with_parallel_insertion() {
    let problem = SchneiderParser
        .parse(test_utils::fixture_path("evrptw_5c3s.txt"))
        .unwrap();
    let solver = Solver::new(
        problem,
        SolverParams {
            iterations: 200,
            seed: Some(11),
            insertion_threads: Threads::Multi(2),
            ..SolverParams::default()
        },
    )
    .unwrap();

    let outcome = solver.solve().unwrap();

    assert!(outcome.best_solution.is_feasible());
    assert!(outcome.best_solution.covers_all_customers());
    assert_eq!(outcome.statistics.iterations, 200);
}

#[test]
fn test_unreachable_customer_fails_the_run() {
    // C2 needs a round trip of 120 with a battery of 100 and no station.
    let problem = test_utils::create_problem(
        &[(10.0, 0.0), (60.0, 0.0)],
        &[],
        FleetParams {
            battery_capacity: 100.0,
            ..FleetParams::default()
        },
    );

    let solver = Solver::new(problem, SolverParams::default()).unwrap();

    assert!(matches!(
        solver.solve(),
        Err(SolverError::UnreachableCustomer { external_id }) if external_id == "C2"
    ));
}

#[test]
fn test_fewer_routes_beat_shorter_distance() {
    let mut rng = MockRng::new(vec![u64::MAX]);
    let best = SolutionCost::new(3, 100.0);

    let outcome = SimulatedAnnealingAcceptor.accept(
        &SolutionCost::new(2, 10_000.0),
        &best,
        &best,
        AcceptSolutionContext {
            temperature: 1e-6,
            rng: &mut rng,
        },
    );

    assert_eq!(outcome, AcceptanceOutcome::NewBest);
}
