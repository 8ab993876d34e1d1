pub mod ruin_context;
pub mod ruin_params;
pub mod ruin_random;
pub mod ruin_related;
pub mod ruin_route;
pub mod ruin_solution;
pub mod ruin_station;
pub mod ruin_strategy;
pub mod ruin_utils;
pub mod ruin_worst;
pub mod ruin_zone;
