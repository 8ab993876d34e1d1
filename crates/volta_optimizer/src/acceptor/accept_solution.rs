use rand::Rng;

use crate::solver::{alns_weights::ScoreTier, solution::solution_cost::SolutionCost};

pub struct AcceptSolutionContext<'a, R>
where
    R: Rng,
{
    pub temperature: f64,
    pub rng: &'a mut R,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceptanceOutcome {
    /// Replaces both the working and the best solution.
    NewBest,
    /// Replaces the working solution.
    Improved,
    AcceptedWorse,
    Rejected,
}

impl AcceptanceOutcome {
    pub fn score_tier(&self) -> Option<ScoreTier> {
        match self {
            AcceptanceOutcome::NewBest => Some(ScoreTier::NewBest),
            AcceptanceOutcome::Improved => Some(ScoreTier::Improved),
            AcceptanceOutcome::AcceptedWorse => Some(ScoreTier::AcceptedWorse),
            AcceptanceOutcome::Rejected => None,
        }
    }
}

pub trait AcceptSolution {
    /// Decides the fate of a feasible candidate.
    fn accept<R>(
        &self,
        candidate: &SolutionCost,
        working: &SolutionCost,
        best: &SolutionCost,
        context: AcceptSolutionContext<R>,
    ) -> AcceptanceOutcome
    where
        R: Rng;
}

/// Outcomes shared by every acceptor: a new best or a strict improvement of
/// the working solution at the same route count.
pub(crate) fn improving_outcome(
    candidate: &SolutionCost,
    working: &SolutionCost,
    best: &SolutionCost,
) -> Option<AcceptanceOutcome> {
    if candidate.is_better_than(best) {
        Some(AcceptanceOutcome::NewBest)
    } else if candidate.routes == working.routes && candidate.distance < working.distance {
        Some(AcceptanceOutcome::Improved)
    } else {
        None
    }
}
