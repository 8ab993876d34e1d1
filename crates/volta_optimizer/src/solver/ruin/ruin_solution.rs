use rand::Rng;

use crate::solver::solution::{removal_bank::RemovalBank, working_solution::WorkingSolution};

use super::ruin_context::RuinContext;

pub trait RuinSolution {
    /// Excises customers from `solution` and returns them for re-insertion.
    fn ruin_solution<R>(&self, solution: &mut WorkingSolution, context: RuinContext<R>) -> RemovalBank
    where
        R: Rng;
}

pub trait RuinStations {
    /// Excises station visits from `solution`, returns how many were removed.
    fn ruin_stations<R>(&self, solution: &mut WorkingSolution, context: RuinContext<R>) -> usize
    where
        R: Rng;
}
