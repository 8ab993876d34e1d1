use std::{path::PathBuf, sync::Arc};

use volta_optimizer::{
    problem::{
        electric_vehicle_routing_problem::{
            ElectricVehicleRoutingProblem, ElectricVehicleRoutingProblemBuilder,
        },
        fleet_params::FleetParams,
        location::Location,
        node::{NodeBuilder, NodeIdx, NodeKind},
    },
    solver::solution::{route::Route, working_solution::WorkingSolution},
};

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn node(id: &str, kind: NodeKind, (x, y): (f64, f64)) -> NodeBuilder {
    let mut builder = NodeBuilder::default();
    builder
        .set_external_id(id)
        .set_kind(kind)
        .set_location(Location::from_cartesian(x, y));
    builder
}

/// Depot at the origin with index 0, customers `1..=c`, stations after them
/// and the depot-end last.
pub fn create_problem(
    customers: &[(f64, f64)],
    stations: &[(f64, f64)],
    fleet: FleetParams,
) -> ElectricVehicleRoutingProblem {
    let mut nodes = vec![node("D0", NodeKind::DepotStart, (0.0, 0.0)).build()];

    for (index, &location) in customers.iter().enumerate() {
        nodes.push(node(&format!("C{}", index + 1), NodeKind::Customer, location).build());
    }

    for (index, &location) in stations.iter().enumerate() {
        nodes.push(node(&format!("S{}", index + 1), NodeKind::Station, location).build());
    }

    nodes.push(node("D0_end", NodeKind::DepotEnd, (0.0, 0.0)).build());

    let mut builder = ElectricVehicleRoutingProblemBuilder::default();
    builder.set_nodes(nodes);
    builder.set_fleet(fleet);

    builder.build().unwrap()
}

/// Five customers around the depot and two stations, `Q = 100`, `h = 1` and
/// no load limit.
pub fn create_small_problem() -> ElectricVehicleRoutingProblem {
    create_problem(
        &[
            (20.0, 5.0),
            (30.0, -10.0),
            (-15.0, 25.0),
            (-30.0, -5.0),
            (5.0, -35.0),
        ],
        &[(25.0, 0.0), (-20.0, 10.0)],
        FleetParams {
            battery_capacity: 100.0,
            consumption_rate: 1.0,
            load_capacity: f64::INFINITY,
            ..FleetParams::default()
        },
    )
}

pub fn create_working_solution(
    problem: Arc<ElectricVehicleRoutingProblem>,
    routes: Vec<Vec<usize>>,
) -> WorkingSolution {
    let routes = routes
        .iter()
        .map(|inner| {
            let mut nodes = vec![problem.depot_start()];
            nodes.extend(inner.iter().map(|&index| NodeIdx::new(index)));
            nodes.push(problem.depot_end());
            Route::from_nodes(nodes)
        })
        .collect();

    WorkingSolution::from_routes(problem, routes)
}
