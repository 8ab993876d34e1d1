use rand::Rng;

use crate::{
    problem::electric_vehicle_routing_problem::ElectricVehicleRoutingProblem,
    solver::ruin::ruin_params::RuinParams,
};

pub struct RuinContext<'a, R>
where
    R: Rng,
{
    pub params: &'a RuinParams,
    pub problem: &'a ElectricVehicleRoutingProblem,
    pub rng: &'a mut R,
}
