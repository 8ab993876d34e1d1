use std::path::Path;

use fxhash::FxHashSet;

use crate::{
    parsers::parser::DatasetParser,
    problem::{
        electric_vehicle_routing_problem::{
            ElectricVehicleRoutingProblem, ElectricVehicleRoutingProblemBuilder,
        },
        fleet_params::FleetParams,
        location::Location,
        node::{NodeBuilder, NodeKind},
        time_window::TimeWindow,
    },
};

/// Parser for the EVRPTW text instances of Schneider, Stenger and Goeke.
pub struct SchneiderParser;

impl DatasetParser for SchneiderParser {
    fn parse<P: AsRef<Path>>(
        &self,
        file: P,
    ) -> Result<ElectricVehicleRoutingProblem, anyhow::Error> {
        let file_content = std::fs::read_to_string(file)?;
        let instance = parse(&file_content)?;

        instance.into_problem()
    }
}

#[derive(Debug, Clone)]
pub struct SchneiderRow {
    pub id: String,
    pub kind: NodeKind,
    pub x: f64,
    pub y: f64,
    pub demand: f64,
    pub ready_time: f64,
    pub due_date: f64,
    pub service_time: f64,
}

#[derive(Debug, Clone)]
pub struct SchneiderInstance {
    pub rows: Vec<SchneiderRow>,
    pub fleet: FleetParams,
}

impl SchneiderInstance {
    /// The depot row becomes the depot-start, a copy named `<id>_end` is
    /// appended as depot-end.
    pub fn into_problem(self) -> Result<ElectricVehicleRoutingProblem, anyhow::Error> {
        let depot = self
            .rows
            .iter()
            .find(|row| row.kind == NodeKind::DepotStart)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Missing depot row"))?;

        let depot_end = SchneiderRow {
            id: format!("{}_end", depot.id),
            kind: NodeKind::DepotEnd,
            ..depot
        };

        let nodes = self
            .rows
            .iter()
            .chain(std::iter::once(&depot_end))
            .map(|row| {
                let mut builder = NodeBuilder::default();
                builder
                    .set_external_id(row.id.clone())
                    .set_kind(row.kind)
                    .set_location(Location::from_cartesian(row.x, row.y))
                    .set_demand(row.demand)
                    .set_time_window(TimeWindow::new(row.ready_time, row.due_date))
                    .set_service_duration(row.service_time);
                builder.build()
            })
            .collect::<Vec<_>>();

        let mut builder = ElectricVehicleRoutingProblemBuilder::default();
        builder.set_nodes(nodes);
        builder.set_fleet(self.fleet);

        Ok(builder.build()?)
    }
}

fn parse_kind(value: &str) -> Result<NodeKind, anyhow::Error> {
    match value {
        "d" => Ok(NodeKind::DepotStart),
        "f" => Ok(NodeKind::Station),
        "c" => Ok(NodeKind::Customer),
        _ => Err(anyhow::anyhow!("Invalid node type: {}", value)),
    }
}

fn parse_number(value: &str, field: &str, line: &str) -> Result<f64, anyhow::Error> {
    value
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid {} '{}' on line: {}", field, value, line))
}

/// Value between the first pair of slashes, `Q Vehicle fuel tank capacity /77.75/`.
fn parse_parameter(line: &str) -> Result<f64, anyhow::Error> {
    let value = line
        .split('/')
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("Missing parameter value on line: {}", line))?;

    parse_number(value.trim(), "parameter", line)
}

pub fn parse(text: &str) -> Result<SchneiderInstance, anyhow::Error> {
    let mut battery_capacity: Option<f64> = None;
    let mut load_capacity: Option<f64> = None;
    let mut inverse_recharge_rate: Option<f64> = None;
    let mut consumption_rate: Option<f64> = None;
    let mut speed: Option<f64> = None;

    let mut rows = Vec::new();
    let mut ids = FxHashSet::default();
    let mut header_seen = false;

    for line in text.lines().map(|line| line.trim()) {
        if line.is_empty() {
            continue;
        }

        if line.starts_with("StringID") {
            header_seen = true;
            continue;
        }

        if line.starts_with("Q Vehicle fuel tank capacity") {
            battery_capacity = Some(parse_parameter(line)?);
            continue;
        }
        if line.starts_with("C Vehicle load capacity") {
            load_capacity = Some(parse_parameter(line)?);
            continue;
        }
        if line.starts_with("r fuel consumption rate") {
            consumption_rate = Some(parse_parameter(line)?);
            continue;
        }
        if line.starts_with("g inverse refueling rate") {
            inverse_recharge_rate = Some(parse_parameter(line)?);
            continue;
        }
        if line.starts_with("v average Velocity") {
            speed = Some(parse_parameter(line)?);
            continue;
        }

        if !header_seen {
            return Err(anyhow::anyhow!("Unexpected line before header: {}", line));
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() != 8 {
            return Err(anyhow::anyhow!(
                "Expected 8 columns, found {} on line: {}",
                parts.len(),
                line
            ));
        }

        let id = parts[0].to_owned();
        if !ids.insert(id.clone()) {
            return Err(anyhow::anyhow!("Duplicate node id: {}", id));
        }

        rows.push(SchneiderRow {
            id,
            kind: parse_kind(parts[1])?,
            x: parse_number(parts[2], "x coordinate", line)?,
            y: parse_number(parts[3], "y coordinate", line)?,
            demand: parse_number(parts[4], "demand", line)?,
            ready_time: parse_number(parts[5], "ready time", line)?,
            due_date: parse_number(parts[6], "due date", line)?,
            service_time: parse_number(parts[7], "service time", line)?,
        });
    }

    let fleet = FleetParams {
        battery_capacity: battery_capacity
            .ok_or_else(|| anyhow::anyhow!("Missing vehicle fuel tank capacity (Q)"))?,
        load_capacity: load_capacity
            .ok_or_else(|| anyhow::anyhow!("Missing vehicle load capacity (C)"))?,
        inverse_recharge_rate: inverse_recharge_rate
            .ok_or_else(|| anyhow::anyhow!("Missing inverse refueling rate (g)"))?,
        consumption_rate: consumption_rate
            .ok_or_else(|| anyhow::anyhow!("Missing fuel consumption rate (r)"))?,
        speed: speed.ok_or_else(|| anyhow::anyhow!("Missing average velocity (v)"))?,
    };

    Ok(SchneiderInstance { rows, fleet })
}

#[cfg(test)]
mod tests {
    use crate::problem::node::NodeIdx;

    use super::*;

    const SAMPLE: &str = r#"StringID   Type       x          y          demand     ReadyTime  DueDate    ServiceTime
D0         d          40.0       50.0       0.0        0.0        1236.0     0.0
S0         f          40.0       50.0       0.0        0.0        1236.0     0.0
S15        f          39.0       26.0       0.0        0.0        1236.0     0.0
C20        c          30.0       50.0       10.0       0.0        1136.0     90.0
C24        c          25.0       50.0       10.0       0.0        1131.0     90.0

Q Vehicle fuel tank capacity /77.75/
C Vehicle load capacity /200.0/
r fuel consumption rate /1.0/
g inverse refueling rate /3.47/
v average Velocity /1.0/
"#;

    #[test]
    fn test_parse() {
        let instance = parse(SAMPLE).unwrap();

        assert_eq!(instance.rows.len(), 5);
        assert_eq!(instance.rows[0].kind, NodeKind::DepotStart);
        assert_eq!(instance.rows[2].id, "S15");
        assert_eq!(instance.rows[3].service_time, 90.0);
        assert_eq!(instance.fleet.battery_capacity, 77.75);
        assert_eq!(instance.fleet.load_capacity, 200.0);
        assert_eq!(instance.fleet.consumption_rate, 1.0);
        assert_eq!(instance.fleet.inverse_recharge_rate, 3.47);
        assert_eq!(instance.fleet.speed, 1.0);
    }

    #[test]
    fn test_into_problem_appends_depot_end() {
        let problem = parse(SAMPLE).unwrap().into_problem().unwrap();

        assert_eq!(problem.num_nodes(), 6);
        assert_eq!(problem.depot_start(), NodeIdx::new(0));
        assert_eq!(problem.depot_end(), NodeIdx::new(5));
        assert_eq!(problem.node(problem.depot_end()).external_id(), "D0_end");
        assert_eq!(problem.stations().len(), 2);
        assert_eq!(problem.customers().len(), 2);
        assert_eq!(
            problem.distance(problem.depot_start(), problem.customers()[0]),
            10.0
        );
    }

    #[test]
    fn test_parse_missing_parameter() {
        let text = SAMPLE.replace("v average Velocity /1.0/", "");
        let error = parse(&text).unwrap_err();

        assert!(error.to_string().contains("average velocity"));
    }

    #[test]
    fn test_parse_invalid_type() {
        let text = SAMPLE.replace("C24        c", "C24        x");

        assert!(parse(&text).is_err());
    }

    #[test]
    fn test_parse_duplicate_id() {
        let text = SAMPLE.replace("C24", "C20");

        assert!(parse(&text).unwrap_err().to_string().contains("Duplicate"));
    }
}
