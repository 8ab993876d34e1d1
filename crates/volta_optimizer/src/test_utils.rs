use std::sync::Arc;

use rand::RngCore;

use crate::{
    problem::{
        electric_vehicle_routing_problem::{
            ElectricVehicleRoutingProblem, ElectricVehicleRoutingProblemBuilder,
        },
        fleet_params::FleetParams,
        location::Location,
        node::{NodeBuilder, NodeIdx, NodeKind},
        time_window::TimeWindow,
    },
    solver::solution::{route::Route, working_solution::WorkingSolution},
};

pub struct TestNode {
    kind: NodeKind,
    x: f64,
    y: f64,
    demand: f64,
    time_window: TimeWindow,
    service_duration: f64,
}

impl TestNode {
    pub fn customer(x: f64, y: f64) -> Self {
        TestNode {
            kind: NodeKind::Customer,
            x,
            y,
            demand: 0.0,
            time_window: TimeWindow::UNBOUNDED,
            service_duration: 0.0,
        }
    }

    pub fn station(x: f64, y: f64) -> Self {
        TestNode {
            kind: NodeKind::Station,
            ..TestNode::customer(x, y)
        }
    }

    pub fn with_demand(mut self, demand: f64) -> Self {
        self.demand = demand;
        self
    }

    pub fn with_time_window(mut self, ready: f64, due: f64) -> Self {
        self.time_window = TimeWindow::new(ready, due);
        self
    }

    pub fn with_service_duration(mut self, service_duration: f64) -> Self {
        self.service_duration = service_duration;
        self
    }
}

/// Depot-start at the origin with index 0, the given nodes with indices
/// `1..=n`, and depot-end at the origin with index `n + 1`.
pub fn create_test_problem(nodes: Vec<TestNode>, fleet: FleetParams) -> ElectricVehicleRoutingProblem {
    let mut all_nodes = Vec::with_capacity(nodes.len() + 2);

    let mut depot_start = NodeBuilder::default();
    depot_start
        .set_external_id("D0")
        .set_kind(NodeKind::DepotStart);
    all_nodes.push(depot_start.build());

    for (index, node) in nodes.into_iter().enumerate() {
        let prefix = if node.kind == NodeKind::Station { "S" } else { "C" };
        let mut builder = NodeBuilder::default();
        builder
            .set_external_id(format!("{prefix}{}", index + 1))
            .set_kind(node.kind)
            .set_location(Location::from_cartesian(node.x, node.y))
            .set_demand(node.demand)
            .set_time_window(node.time_window)
            .set_service_duration(node.service_duration);
        all_nodes.push(builder.build());
    }

    let mut depot_end = NodeBuilder::default();
    depot_end
        .set_external_id("D0_end")
        .set_kind(NodeKind::DepotEnd);
    all_nodes.push(depot_end.build());

    let mut builder = ElectricVehicleRoutingProblemBuilder::default();
    builder.set_nodes(all_nodes);
    builder.set_fleet(fleet);

    builder.build().unwrap()
}

/// Customers on the x axis at `1..=n`, no stations.
pub fn create_line_problem(num_customers: usize, fleet: FleetParams) -> ElectricVehicleRoutingProblem {
    create_test_problem(
        (1..=num_customers)
            .map(|x| TestNode::customer(x as f64, 0.0))
            .collect(),
        fleet,
    )
}

/// Route from inner node indices, depots are added.
pub fn create_test_route(problem: &ElectricVehicleRoutingProblem, inner: &[usize]) -> Route {
    let mut nodes = Vec::with_capacity(inner.len() + 2);
    nodes.push(problem.depot_start());
    nodes.extend(inner.iter().map(|&index| NodeIdx::new(index)));
    nodes.push(problem.depot_end());

    Route::from_nodes(nodes)
}

pub fn create_test_working_solution(
    problem: Arc<ElectricVehicleRoutingProblem>,
    routes: Vec<Vec<usize>>,
) -> WorkingSolution {
    let routes = routes
        .iter()
        .map(|inner| create_test_route(&problem, inner))
        .collect();

    WorkingSolution::from_routes(problem, routes)
}

pub struct MockRng {
    data: Vec<u64>,
    index: usize,
}

impl MockRng {
    pub fn new(data: Vec<u64>) -> Self {
        MockRng { data, index: 0 }
    }

    /// Values spread over the whole `u64` range so that rejection loops
    /// eventually see every bucket.
    pub fn spread(len: u64) -> Self {
        let step = u64::MAX / len;
        MockRng::new((0..len).map(|i| i.wrapping_mul(step).wrapping_add(step / 3)).collect())
    }
}

impl RngCore for MockRng {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        let value = self.data[self.index % self.data.len()];
        self.index = (self.index + 1) % self.data.len();
        value
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for byte in dst.iter_mut() {
            *byte = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;

    #[test]
    fn test_mock_rng() {
        let data = vec![1, 2, 3, 4];
        let mut rng = MockRng::new(data.clone());

        for &expected in data.iter().cycle().take(8) {
            let value = rng.next_u64();
            assert_eq!(value, expected);
        }
    }

    #[test]
    fn test_random_bool() {
        let data = vec![
            (u64::MAX / 4),
            (u64::MAX / 4),
            (u64::MAX / 4),
            (u64::MAX / 4),
        ];
        let mut rng = MockRng::new(data);

        assert!(!rng.random_bool(0.20));
        assert!(rng.random_bool(0.26));
        assert!(rng.random_bool(0.6));
        assert!(!rng.random_bool(0.10));
    }

    #[test]
    fn test_create_test_problem_layout() {
        let problem = create_test_problem(
            vec![TestNode::customer(3.0, 4.0), TestNode::station(0.0, 1.0)],
            FleetParams::default(),
        );

        assert_eq!(problem.node(NodeIdx::new(1)).external_id(), "C1");
        assert_eq!(problem.node(NodeIdx::new(2)).external_id(), "S2");
        assert_eq!(problem.distance(problem.depot_start(), NodeIdx::new(1)), 5.0);
    }
}
