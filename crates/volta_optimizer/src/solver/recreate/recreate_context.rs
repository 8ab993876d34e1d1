use crate::{
    problem::electric_vehicle_routing_problem::ElectricVehicleRoutingProblem,
    solver::constraints::feasibility_oracle::FeasibilityOracle,
};

use super::{
    recreate_params::RecreateParams, station_insertion::StationInsertion,
    supplement_repair::SupplementRepair,
};

pub struct RecreateContext<'a> {
    pub params: &'a RecreateParams,
    pub problem: &'a ElectricVehicleRoutingProblem,
    pub thread_pool: &'a rayon::ThreadPool,
}

impl<'a> RecreateContext<'a> {
    pub fn oracle(&self) -> FeasibilityOracle<'a> {
        FeasibilityOracle::new(self.problem)
    }

    pub fn station_insertion(&self) -> StationInsertion<'a> {
        StationInsertion::new(self.problem)
    }

    pub fn supplement_repair(&self) -> SupplementRepair<'a> {
        SupplementRepair::new(self.station_insertion(), self.params.supplement_repair_attempts)
    }
}
