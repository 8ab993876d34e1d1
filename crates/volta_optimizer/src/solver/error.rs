use thiserror::Error;

use crate::problem::electric_vehicle_routing_problem::ProblemError;

#[derive(Error, Debug)]
pub enum SolverError {
    #[error("invalid solver parameters: {0}")]
    InvalidParams(String),

    #[error("customer {external_id} cannot be served even by a dedicated route")]
    UnreachableCustomer { external_id: String },

    #[error(transparent)]
    Problem(#[from] ProblemError),

    #[error("failed to build the insertion thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
