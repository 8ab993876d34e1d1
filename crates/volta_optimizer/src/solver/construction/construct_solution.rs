use std::sync::Arc;

use tracing::debug;

use crate::{
    problem::electric_vehicle_routing_problem::ElectricVehicleRoutingProblem,
    solver::{
        constraints::feasibility_oracle::FeasibilityOracle,
        error::SolverError,
        insertion::{best_augmented_insertion, best_direct_insertion},
        recreate::{station_insertion::StationInsertion, supplement_repair::SupplementRepair},
        solution::{
            removal_bank::RemovalBank, route::Route, route_id::RouteIdx,
            working_solution::WorkingSolution,
        },
        solver_params::SolverParams,
    },
};

/// Fails on the first customer that no dedicated route can serve, even after
/// station repair.
pub fn check_reachability(
    problem: &ElectricVehicleRoutingProblem,
    repair: &SupplementRepair,
) -> Result<(), SolverError> {
    for &customer in problem.customers() {
        let dedicated = Route::empty(problem).with_insertion(1, customer);
        if repair.repair(dedicated).is_err() {
            return Err(SolverError::UnreachableCustomer {
                external_id: problem.node(customer).external_id().to_owned(),
            });
        }
    }

    Ok(())
}

/// Nearest insertion into the last route. When nothing fits directly, a
/// station-augmented insertion is tried, then a new route is opened.
pub fn construct_solution(
    problem: &Arc<ElectricVehicleRoutingProblem>,
    params: &SolverParams,
    thread_pool: &rayon::ThreadPool,
) -> Result<WorkingSolution, SolverError> {
    debug!("Start construction heuristic");

    let oracle = FeasibilityOracle::new(problem);
    let station_insertion = StationInsertion::new(problem);
    let repair = SupplementRepair::new(station_insertion, params.recreate.supplement_repair_attempts);

    check_reachability(problem, &repair)?;

    let mut solution = WorkingSolution::new(Arc::clone(problem));
    solution.push_route(Route::empty(problem));

    let mut pending = RemovalBank::new(problem.num_nodes());
    pending.extend(problem.customers().iter().copied());

    while let Some(first_pending) = pending.first() {
        let route_id = RouteIdx::new(solution.num_routes() - 1);
        let route = solution.route(route_id);

        let direct =
            thread_pool.install(|| best_direct_insertion(oracle, route, pending.customers()));
        if let Some(insertion) = direct {
            solution
                .route_mut(route_id)
                .insert(insertion.position, insertion.customer);
            pending.remove(insertion.customer);
            continue;
        }

        let augmented = thread_pool.install(|| {
            best_augmented_insertion(oracle, route, pending.customers(), |candidate| {
                Some(station_insertion.first_feasible_extended(candidate))
            })
        });
        if let Some(insertion) = augmented {
            solution.replace_route(route_id, insertion.route);
            pending.remove(insertion.customer);
            continue;
        }

        if route.is_degenerate() {
            let dedicated = Route::empty(problem).with_insertion(1, first_pending);
            let route = repair
                .repair(dedicated)
                .map_err(|_| SolverError::UnreachableCustomer {
                    external_id: problem.node(first_pending).external_id().to_owned(),
                })?;

            solution.replace_route(route_id, route);
            pending.remove(first_pending);
        } else {
            debug!(routes = solution.num_routes(), "construction opens a new route");
            solution.push_route(Route::empty(problem));
        }
    }

    Ok(solution)
}
