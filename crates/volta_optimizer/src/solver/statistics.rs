use jiff::Timestamp;
use serde::Serialize;

use crate::acceptor::accept_solution::AcceptanceOutcome;

use super::solution::solution_cost::SolutionCost;

/// Which destroy and repair pair an iteration ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SearchTrack {
    Customer,
    Route,
    Station,
}

#[derive(Debug, Clone, Serialize)]
pub struct CostEvolutionRow {
    pub timestamp: Timestamp,
    pub iteration: usize,
    pub track: Option<SearchTrack>,
    pub cost: SolutionCost,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct OutcomeCounts {
    pub new_best: usize,
    pub improved: usize,
    pub accepted_worse: usize,
    pub rejected: usize,
    /// Candidates discarded before acceptance.
    pub infeasible: usize,
}

impl OutcomeCounts {
    pub fn total(&self) -> usize {
        self.new_best + self.improved + self.accepted_worse + self.rejected + self.infeasible
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchStatistics {
    pub iterations: usize,
    pub customer_track: OutcomeCounts,
    pub route_track: OutcomeCounts,
    pub station_track: OutcomeCounts,
    best_cost_evolution: Vec<CostEvolutionRow>,
}

impl SearchStatistics {
    pub fn add_best_cost(&mut self, iteration: usize, track: Option<SearchTrack>, cost: SolutionCost) {
        self.best_cost_evolution.push(CostEvolutionRow {
            timestamp: Timestamp::now(),
            iteration,
            track,
            cost,
        });
    }

    pub fn best_cost_evolution(&self) -> &[CostEvolutionRow] {
        &self.best_cost_evolution
    }

    /// `None` stands for a candidate that failed the feasibility check.
    pub fn add_outcome(&mut self, track: SearchTrack, outcome: Option<AcceptanceOutcome>) {
        let counts = match track {
            SearchTrack::Customer => &mut self.customer_track,
            SearchTrack::Route => &mut self.route_track,
            SearchTrack::Station => &mut self.station_track,
        };

        match outcome {
            Some(AcceptanceOutcome::NewBest) => counts.new_best += 1,
            Some(AcceptanceOutcome::Improved) => counts.improved += 1,
            Some(AcceptanceOutcome::AcceptedWorse) => counts.accepted_worse += 1,
            Some(AcceptanceOutcome::Rejected) => counts.rejected += 1,
            None => counts.infeasible += 1,
        }
    }
}
