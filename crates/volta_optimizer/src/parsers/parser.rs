use std::path::Path;

use crate::problem::electric_vehicle_routing_problem::ElectricVehicleRoutingProblem;

pub trait DatasetParser {
    fn parse<P: AsRef<Path>>(&self, file: P)
    -> Result<ElectricVehicleRoutingProblem, anyhow::Error>;
}
