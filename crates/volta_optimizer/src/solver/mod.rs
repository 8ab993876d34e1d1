pub mod accepted_solution;
pub mod alns;
pub mod alns_weights;
pub mod constraints;
pub mod construction;
pub mod error;
pub mod insertion;
pub mod recreate;
pub mod ruin;
pub mod solution;
pub mod solver;
pub mod solver_outcome;
pub mod solver_params;
pub mod statistics;
