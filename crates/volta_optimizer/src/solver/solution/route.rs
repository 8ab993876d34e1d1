use crate::problem::{
    electric_vehicle_routing_problem::ElectricVehicleRoutingProblem,
    node::{NodeIdx, NodeKind},
};

/// Ordered node sequence from depot-start to depot-end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    nodes: Vec<NodeIdx>,
}

impl Route {
    pub fn empty(problem: &ElectricVehicleRoutingProblem) -> Self {
        Route {
            nodes: vec![problem.depot_start(), problem.depot_end()],
        }
    }

    pub fn from_nodes(nodes: Vec<NodeIdx>) -> Self {
        Route { nodes }
    }

    pub fn nodes(&self) -> &[NodeIdx] {
        &self.nodes
    }

    pub fn into_nodes(self) -> Vec<NodeIdx> {
        self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn node(&self, position: usize) -> NodeIdx {
        self.nodes[position]
    }

    /// Only the two depot endpoints are left.
    pub fn is_degenerate(&self) -> bool {
        self.nodes.len() <= 2
    }

    pub fn has_valid_depots(&self, problem: &ElectricVehicleRoutingProblem) -> bool {
        let [first, inner @ .., last] = self.nodes.as_slice() else {
            return false;
        };

        problem.kind(*first) == NodeKind::DepotStart
            && problem.kind(*last) == NodeKind::DepotEnd
            && inner.iter().all(|&node| !problem.kind(node).is_depot())
    }

    /// Inserts `node` before the node currently at `position`.
    pub fn insert(&mut self, position: usize, node: NodeIdx) {
        debug_assert!(position > 0 && position < self.nodes.len());
        self.nodes.insert(position, node);
    }

    pub fn with_insertion(&self, position: usize, node: NodeIdx) -> Route {
        let mut nodes = Vec::with_capacity(self.nodes.len() + 1);
        nodes.extend_from_slice(&self.nodes[..position]);
        nodes.push(node);
        nodes.extend_from_slice(&self.nodes[position..]);

        Route { nodes }
    }

    pub fn remove(&mut self, position: usize) -> NodeIdx {
        debug_assert!(position > 0 && position + 1 < self.nodes.len());
        self.nodes.remove(position)
    }

    /// Keeps the positions for which `keep` returns true.
    pub fn retain_positions<F>(&mut self, mut keep: F)
    where
        F: FnMut(usize, NodeIdx) -> bool,
    {
        let mut position = 0;
        self.nodes.retain(|&node| {
            let kept = keep(position, node);
            position += 1;
            kept
        });
    }

    pub fn position_of(&self, node: NodeIdx) -> Option<usize> {
        self.nodes.iter().position(|&candidate| candidate == node)
    }

    pub fn contains(&self, node: NodeIdx) -> bool {
        self.nodes.contains(&node)
    }

    pub fn distance(&self, problem: &ElectricVehicleRoutingProblem) -> f64 {
        self.nodes
            .windows(2)
            .map(|arc| problem.distance(arc[0], arc[1]))
            .sum()
    }

    pub fn customers<'a>(
        &'a self,
        problem: &'a ElectricVehicleRoutingProblem,
    ) -> impl Iterator<Item = NodeIdx> + 'a {
        self.nodes
            .iter()
            .copied()
            .filter(|&node| problem.is_customer(node))
    }

    pub fn customer_count(&self, problem: &ElectricVehicleRoutingProblem) -> usize {
        self.customers(problem).count()
    }

    /// Positions of the station visits.
    pub fn station_positions(&self, problem: &ElectricVehicleRoutingProblem) -> Vec<usize> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|&(_, &node)| problem.is_station(node))
            .map(|(position, _)| position)
            .collect()
    }

    /// Extra distance of visiting `node` between positions `position - 1` and `position`.
    pub fn insertion_detour(
        &self,
        problem: &ElectricVehicleRoutingProblem,
        position: usize,
        node: NodeIdx,
    ) -> f64 {
        self.insertion_detour_between(problem, self.nodes[position - 1], node, self.nodes[position])
    }

    /// Distance saved by skipping the node at `position`.
    pub fn removal_saving(&self, problem: &ElectricVehicleRoutingProblem, position: usize) -> f64 {
        self.insertion_detour_between(
            problem,
            self.nodes[position - 1],
            self.nodes[position],
            self.nodes[position + 1],
        )
    }

    fn insertion_detour_between(
        &self,
        problem: &ElectricVehicleRoutingProblem,
        previous: NodeIdx,
        node: NodeIdx,
        next: NodeIdx,
    ) -> f64 {
        problem.distance(previous, node) + problem.distance(node, next)
            - problem.distance(previous, next)
    }
}
