use crate::solver::solution::{removal_bank::RemovalBank, working_solution::WorkingSolution};

use super::recreate_context::RecreateContext;

pub trait RecreateSolution {
    /// Inserts every banked customer back into `solution`.
    fn recreate_solution(
        &self,
        solution: &mut WorkingSolution,
        bank: RemovalBank,
        context: RecreateContext,
    );
}

pub trait RecreateStations {
    /// Repairs the energy feasibility of every route of `solution`.
    fn recreate_stations(&self, solution: &mut WorkingSolution, context: RecreateContext);
}
