use super::{
    recreate_strategy::RecreateStrategy, station_recreate_strategy::StationRecreateStrategy,
};

#[derive(Clone, Debug)]
pub struct RecreateParams {
    pub recreate_strategies: Vec<RecreateStrategy>,
    pub station_recreate_strategies: Vec<StationRecreateStrategy>,

    /// Attempts of the supplement repair before it gives up on a route.
    pub supplement_repair_attempts: usize,
}

impl Default for RecreateParams {
    fn default() -> Self {
        RecreateParams {
            recreate_strategies: vec![
                RecreateStrategy::GreedyInsertion,
                RecreateStrategy::RegretInsertion(2),
                RecreateStrategy::RegretInsertion(3),
            ],
            station_recreate_strategies: vec![
                StationRecreateStrategy::FirstFeasible,
                StationRecreateStrategy::CompareAdjacent,
                StationRecreateStrategy::Best,
                // StationRecreateStrategy::FirstFeasibleExtended,
                // StationRecreateStrategy::BestExtended,
                // StationRecreateStrategy::CompareAll,
            ],
            supplement_repair_attempts: 5,
        }
    }
}
