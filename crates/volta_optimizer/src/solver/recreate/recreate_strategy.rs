use std::fmt::Display;

use serde::Serialize;

use crate::solver::{
    alns_weights::AlnsOperator,
    solution::{removal_bank::RemovalBank, working_solution::WorkingSolution},
};

use super::{
    greedy_insertion::GreedyInsertion, recreate_context::RecreateContext,
    recreate_solution::RecreateSolution, regret_insertion::RegretInsertion,
};

/// Largest supported regret depth.
pub const MAX_REGRET_K: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RecreateStrategy {
    GreedyInsertion,
    RegretInsertion(usize),
}

impl RecreateStrategy {
    pub fn is_valid(&self) -> bool {
        match self {
            Self::GreedyInsertion => true,
            Self::RegretInsertion(k) => (2..=MAX_REGRET_K).contains(k),
        }
    }
}

impl Serialize for RecreateStrategy {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl Display for RecreateStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GreedyInsertion => write!(f, "GreedyInsertion"),
            Self::RegretInsertion(k) => write!(f, "RegretInsertion({k})"),
        }
    }
}

impl AlnsOperator for RecreateStrategy {
    const COUNT: usize = MAX_REGRET_K;

    fn index(&self) -> usize {
        match self {
            Self::GreedyInsertion => 0,
            Self::RegretInsertion(k) => {
                debug_assert!(self.is_valid(), "unsupported regret depth {k}");
                k - 1
            }
        }
    }
}

impl RecreateSolution for RecreateStrategy {
    fn recreate_solution(
        &self,
        solution: &mut WorkingSolution,
        bank: RemovalBank,
        context: RecreateContext,
    ) {
        match self {
            RecreateStrategy::GreedyInsertion => {
                let strategy = GreedyInsertion;
                strategy.recreate_solution(solution, bank, context);
            }
            RecreateStrategy::RegretInsertion(k) => {
                let strategy = RegretInsertion::new(*k);
                strategy.recreate_solution(solution, bank, context);
            }
        }
    }
}
