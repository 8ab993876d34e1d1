use std::sync::Arc;

use jiff::Timestamp;
use parking_lot::{MappedRwLockReadGuard, RwLock};
use serde::Serialize;

use crate::problem::electric_vehicle_routing_problem::ElectricVehicleRoutingProblem;

use super::{
    accepted_solution::AcceptedSolution,
    alns::{Alns, AlnsSearchWeights},
    error::SolverError,
    solver_outcome::SolverOutcome,
    solver_params::SolverParams,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum SolverStatus {
    Pending,
    Running,
    Completed,
}

pub struct Solver {
    search: Alns,
    status: RwLock<SolverStatus>,
    created_at: Timestamp,
}

impl Solver {
    pub fn new(
        problem: ElectricVehicleRoutingProblem,
        params: SolverParams,
    ) -> Result<Self, SolverError> {
        let search = Alns::new(params, Arc::new(problem))?;

        Ok(Solver {
            status: RwLock::new(SolverStatus::Pending),
            search,
            created_at: Timestamp::now(),
        })
    }

    pub fn on_best_solution<F>(&mut self, callback: F)
    where
        F: FnMut(&AcceptedSolution) + Send + Sync + 'static,
    {
        self.search.on_best_solution(callback);
    }

    pub fn solve(&self) -> Result<SolverOutcome, SolverError> {
        *self.status.write() = SolverStatus::Running;
        let outcome = self.search.run();
        *self.status.write() = SolverStatus::Completed;

        outcome
    }

    /// Makes a running search return its current best after the ongoing
    /// iteration.
    pub fn stop(&self) {
        self.search.stop();
    }

    pub fn status(&self) -> SolverStatus {
        *self.status.read()
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn problem(&self) -> &ElectricVehicleRoutingProblem {
        self.search.problem()
    }

    pub fn current_best_solution(&self) -> Option<MappedRwLockReadGuard<'_, AcceptedSolution>> {
        self.search.best_solution()
    }

    pub fn weights(&self) -> AlnsSearchWeights {
        self.search.weights_cloned()
    }
}
