use rand::Rng;
use thiserror::Error;

use super::{
    arc_table::{ArcTable, Distance, Time},
    fleet_params::FleetParams,
    location::{Location, bounding_rect},
    node::{Node, NodeIdx, NodeKind},
};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProblemError {
    #[error("problem must contain exactly one {kind} node, found {count}")]
    DepotCount { kind: NodeKind, count: usize },

    #[error("node {external_id} has an empty time window [{ready}, {due}]")]
    InvalidTimeWindow {
        external_id: String,
        ready: f64,
        due: f64,
    },

    #[error("node {external_id} has a negative demand or service duration")]
    NegativeAttribute { external_id: String },

    #[error("invalid fleet parameters: {0:?}")]
    InvalidFleet(FleetParams),

    #[error("arc table has {actual} nodes, expected {expected}")]
    ArcTableSize { expected: usize, actual: usize },

    #[error("missing {0}")]
    Missing(&'static str),

    #[error("invalid travel time noise: {0}")]
    InvalidNoise(String),
}

/// Parameters of the stochastic travel-time perturbation.
#[derive(Debug, Clone, Copy)]
pub struct TravelTimeNoise {
    /// Probability that a given arc is perturbed.
    pub probability: f64,

    /// Standard deviation as a multiple of the standard deviation of the
    /// customers' time-window widths.
    pub deviation_factor: f64,
}

#[derive(Debug, Clone)]
pub struct ElectricVehicleRoutingProblem {
    nodes: Vec<Node>,
    arcs: ArcTable,
    fleet: FleetParams,
    depot_start: NodeIdx,
    depot_end: NodeIdx,
    customers: Vec<NodeIdx>,
    stations: Vec<NodeIdx>,
    bounds: geo::Rect,
}

impl ElectricVehicleRoutingProblem {
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    #[inline]
    pub fn node(&self, index: NodeIdx) -> &Node {
        &self.nodes[index]
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn kind(&self, index: NodeIdx) -> NodeKind {
        self.nodes[index].kind()
    }

    #[inline]
    pub fn is_customer(&self, index: NodeIdx) -> bool {
        self.kind(index) == NodeKind::Customer
    }

    #[inline]
    pub fn is_station(&self, index: NodeIdx) -> bool {
        self.kind(index) == NodeKind::Station
    }

    pub fn fleet(&self) -> &FleetParams {
        &self.fleet
    }

    pub fn arcs(&self) -> &ArcTable {
        &self.arcs
    }

    #[inline]
    pub fn distance(&self, from: NodeIdx, to: NodeIdx) -> Distance {
        self.arcs.distance(from, to)
    }

    #[inline]
    pub fn travel_time(&self, from: NodeIdx, to: NodeIdx) -> Time {
        self.arcs.travel_time(from, to)
    }

    pub fn depot_start(&self) -> NodeIdx {
        self.depot_start
    }

    pub fn depot_end(&self) -> NodeIdx {
        self.depot_end
    }

    pub fn customers(&self) -> &[NodeIdx] {
        &self.customers
    }

    pub fn stations(&self) -> &[NodeIdx] {
        &self.stations
    }

    /// Bounding box of every node location.
    pub fn bounds(&self) -> &geo::Rect {
        &self.bounds
    }

    pub fn find_node(&self, external_id: &str) -> Option<NodeIdx> {
        self.nodes
            .iter()
            .position(|node| node.external_id() == external_id)
            .map(NodeIdx::new)
    }

    /// Sample standard deviation of the customers' time-window widths.
    pub fn time_window_width_std(&self) -> f64 {
        let count = self.customers.len();
        if count < 2 {
            return 0.0;
        }

        let widths = self
            .customers
            .iter()
            .map(|&customer| self.node(customer).time_window().width())
            .collect::<Vec<_>>();
        let mean = widths.iter().sum::<f64>() / count as f64;
        let variance = widths
            .iter()
            .map(|width| (width - mean).powi(2))
            .sum::<f64>()
            / (count - 1) as f64;

        variance.sqrt()
    }

    /// Same problem with stochastically perturbed travel times.
    pub fn with_travel_time_noise<R>(
        &self,
        noise: TravelTimeNoise,
        rng: &mut R,
    ) -> Result<Self, ProblemError>
    where
        R: Rng,
    {
        if !(0.0..=1.0).contains(&noise.probability) {
            return Err(ProblemError::InvalidNoise(format!(
                "probability {} is outside [0, 1]",
                noise.probability
            )));
        }

        if !(noise.deviation_factor.is_finite() && noise.deviation_factor >= 0.0) {
            return Err(ProblemError::InvalidNoise(format!(
                "deviation factor {} must be finite and non-negative",
                noise.deviation_factor
            )));
        }

        let std_dev = noise.deviation_factor * self.time_window_width_std();
        let arcs = self
            .arcs
            .with_perturbed_travel_times(noise.probability, std_dev, rng)
            .map_err(|error| ProblemError::InvalidNoise(error.to_string()))?;

        Ok(ElectricVehicleRoutingProblem {
            arcs,
            ..self.clone()
        })
    }
}

#[derive(Default)]
pub struct ElectricVehicleRoutingProblemBuilder {
    nodes: Option<Vec<Node>>,
    fleet: Option<FleetParams>,
    arcs: Option<ArcTable>,
}

impl ElectricVehicleRoutingProblemBuilder {
    pub fn set_nodes(&mut self, nodes: Vec<Node>) -> &mut ElectricVehicleRoutingProblemBuilder {
        self.nodes = Some(nodes);
        self
    }

    pub fn set_fleet(&mut self, fleet: FleetParams) -> &mut ElectricVehicleRoutingProblemBuilder {
        self.fleet = Some(fleet);
        self
    }

    /// Overrides the Euclidean arc table computed from node locations.
    pub fn set_arcs(&mut self, arcs: ArcTable) -> &mut ElectricVehicleRoutingProblemBuilder {
        self.arcs = Some(arcs);
        self
    }

    pub fn build(self) -> Result<ElectricVehicleRoutingProblem, ProblemError> {
        let nodes = self.nodes.ok_or(ProblemError::Missing("nodes"))?;
        let fleet = self.fleet.ok_or(ProblemError::Missing("fleet parameters"))?;

        if !fleet.is_valid() {
            return Err(ProblemError::InvalidFleet(fleet));
        }

        for node in &nodes {
            let window = node.time_window();
            if !window.is_valid() {
                return Err(ProblemError::InvalidTimeWindow {
                    external_id: node.external_id().to_owned(),
                    ready: window.ready(),
                    due: window.due(),
                });
            }

            if node.demand() < 0.0 || node.service_duration() < 0.0 {
                return Err(ProblemError::NegativeAttribute {
                    external_id: node.external_id().to_owned(),
                });
            }
        }

        let depot_start = find_singleton(&nodes, NodeKind::DepotStart)?;
        let depot_end = find_singleton(&nodes, NodeKind::DepotEnd)?;

        let customers = nodes_of_kind(&nodes, NodeKind::Customer);
        let stations = nodes_of_kind(&nodes, NodeKind::Station);

        let arcs = match self.arcs {
            Some(arcs) => {
                if arcs.num_nodes() != nodes.len() {
                    return Err(ProblemError::ArcTableSize {
                        expected: nodes.len(),
                        actual: arcs.num_nodes(),
                    });
                }
                arcs
            }
            None => {
                let locations = nodes.iter().map(|node| *node.location()).collect::<Vec<_>>();
                ArcTable::from_euclidean(&locations, fleet.speed)
            }
        };

        let bounds = bounding_rect(nodes.iter().map(Node::location))
            .unwrap_or_else(|| geo::Rect::new(geo::Coord::zero(), geo::Coord::zero()));

        Ok(ElectricVehicleRoutingProblem {
            nodes,
            arcs,
            fleet,
            depot_start,
            depot_end,
            customers,
            stations,
            bounds,
        })
    }
}

fn find_singleton(nodes: &[Node], kind: NodeKind) -> Result<NodeIdx, ProblemError> {
    let matching = nodes_of_kind(nodes, kind);

    match matching.as_slice() {
        [index] => Ok(*index),
        _ => Err(ProblemError::DepotCount {
            kind,
            count: matching.len(),
        }),
    }
}

fn nodes_of_kind(nodes: &[Node], kind: NodeKind) -> Vec<NodeIdx> {
    nodes
        .iter()
        .enumerate()
        .filter(|(_, node)| node.kind() == kind)
        .map(|(index, _)| NodeIdx::new(index))
        .collect()
}

impl From<&ElectricVehicleRoutingProblem> for Vec<Location> {
    fn from(problem: &ElectricVehicleRoutingProblem) -> Self {
        problem.nodes.iter().map(|node| *node.location()).collect()
    }
}
