pub mod removal_bank;
pub mod route;
pub mod route_id;
pub mod solution_cost;
pub mod working_solution;
