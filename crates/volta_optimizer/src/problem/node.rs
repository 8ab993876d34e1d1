use std::fmt::Display;

use serde::Serialize;

use crate::define_index_newtype;

use super::{location::Location, time_window::TimeWindow};

define_index_newtype!(NodeIdx, Node);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NodeKind {
    DepotStart,
    DepotEnd,
    Customer,
    Station,
}

impl NodeKind {
    /// Depot-start and stations refill the battery.
    pub fn is_recharge_point(&self) -> bool {
        matches!(self, NodeKind::DepotStart | NodeKind::Station)
    }

    pub fn is_depot(&self) -> bool {
        matches!(self, NodeKind::DepotStart | NodeKind::DepotEnd)
    }
}

impl Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DepotStart => write!(f, "DepotStart"),
            Self::DepotEnd => write!(f, "DepotEnd"),
            Self::Customer => write!(f, "Customer"),
            Self::Station => write!(f, "Station"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    external_id: String,
    kind: NodeKind,
    location: Location,
    demand: f64,
    time_window: TimeWindow,
    service_duration: f64,
}

impl Node {
    pub fn external_id(&self) -> &str {
        &self.external_id
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn demand(&self) -> f64 {
        self.demand
    }

    pub fn time_window(&self) -> &TimeWindow {
        &self.time_window
    }

    pub fn service_duration(&self) -> f64 {
        self.service_duration
    }

    pub fn is_customer(&self) -> bool {
        self.kind == NodeKind::Customer
    }

    pub fn is_station(&self) -> bool {
        self.kind == NodeKind::Station
    }
}

pub struct NodeBuilder {
    external_id: Option<String>,
    kind: NodeKind,
    location: Option<Location>,
    demand: f64,
    time_window: TimeWindow,
    service_duration: f64,
}

impl Default for NodeBuilder {
    fn default() -> Self {
        NodeBuilder {
            external_id: None,
            kind: NodeKind::Customer,
            location: None,
            demand: 0.0,
            time_window: TimeWindow::UNBOUNDED,
            service_duration: 0.0,
        }
    }
}

impl NodeBuilder {
    pub fn set_external_id(&mut self, external_id: impl Into<String>) -> &mut NodeBuilder {
        self.external_id = Some(external_id.into());
        self
    }

    pub fn set_kind(&mut self, kind: NodeKind) -> &mut NodeBuilder {
        self.kind = kind;
        self
    }

    pub fn set_location(&mut self, location: Location) -> &mut NodeBuilder {
        self.location = Some(location);
        self
    }

    pub fn set_demand(&mut self, demand: f64) -> &mut NodeBuilder {
        self.demand = demand;
        self
    }

    pub fn set_time_window(&mut self, time_window: TimeWindow) -> &mut NodeBuilder {
        self.time_window = time_window;
        self
    }

    pub fn set_service_duration(&mut self, service_duration: f64) -> &mut NodeBuilder {
        self.service_duration = service_duration;
        self
    }

    /// Missing ids default to the kind name, missing locations to the origin.
    pub fn build(self) -> Node {
        Node {
            external_id: self.external_id.unwrap_or_else(|| self.kind.to_string()),
            kind: self.kind,
            location: self
                .location
                .unwrap_or_else(|| Location::from_cartesian(0.0, 0.0)),
            demand: self.demand,
            time_window: self.time_window,
            service_duration: self.service_duration,
        }
    }
}
