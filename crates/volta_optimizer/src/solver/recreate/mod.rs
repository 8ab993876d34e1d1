pub mod greedy_insertion;
pub mod recreate_context;
pub mod recreate_params;
pub mod recreate_solution;
pub mod recreate_strategy;
pub mod regret_insertion;
pub mod route_cursor;
pub mod station_insertion;
pub mod station_recreate_strategy;
pub mod supplement_repair;
