use serde::Serialize;

use super::ruin_strategy::{
    AdjacentStation, CustomerRuinStrategy, Relatedness, RouteRuinStrategy, StationRuinStrategy,
};

/// Weights of the relatedness measure between two customers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RelatednessWeights {
    pub distance: f64,
    pub ready_time: f64,
    /// Subtracted when both customers share a route, added otherwise.
    pub route: f64,
    pub demand: f64,
}

impl RelatednessWeights {
    pub const SHAW: RelatednessWeights = RelatednessWeights {
        distance: 0.5,
        ready_time: 13.0,
        route: 0.15,
        demand: 0.25,
    };

    pub const PROXIMITY: RelatednessWeights = RelatednessWeights {
        distance: 1.0,
        ready_time: 0.0,
        route: 0.0,
        demand: 0.0,
    };

    pub const TIME: RelatednessWeights = RelatednessWeights {
        distance: 0.0,
        ready_time: 1.0,
        route: 0.0,
        demand: 0.0,
    };

    pub const DEMAND: RelatednessWeights = RelatednessWeights {
        distance: 0.0,
        ready_time: 0.0,
        route: 0.0,
        demand: 1.0,
    };
}

/// Bounds of a removal count: `floor(min(ratio * n, cap))`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RemovalBound {
    pub ratio: f64,
    pub cap: f64,
}

impl RemovalBound {
    pub fn apply(&self, count: usize) -> f64 {
        (self.ratio * count as f64).min(self.cap).floor()
    }
}

#[derive(Clone, Debug)]
pub struct RuinParams {
    pub removal_lower: RemovalBound,
    pub removal_upper: RemovalBound,

    /// Bias exponent of the worst-distance, worst-time and worst-charge removals.
    pub worst_removal_bias: f64,

    /// Bias exponent of the relatedness removals.
    pub related_removal_bias: f64,

    /// Weights used by `Relatedness::Shaw`.
    pub relatedness_weights: RelatednessWeights,

    /// Number of cells per axis of the zone grid.
    pub zone_grid_size: usize,

    pub route_removal_lower_ratio: f64,
    pub route_removal_upper_ratio: f64,

    pub customer_ruin_strategies: Vec<CustomerRuinStrategy>,
    pub route_ruin_strategies: Vec<RouteRuinStrategy>,
    pub station_ruin_strategies: Vec<StationRuinStrategy>,
}

impl Default for RuinParams {
    fn default() -> Self {
        RuinParams {
            removal_lower: RemovalBound {
                ratio: 0.1,
                cap: 30.0,
            },
            removal_upper: RemovalBound {
                ratio: 0.4,
                cap: 60.0,
            },
            worst_removal_bias: 4.0,
            related_removal_bias: 12.0,
            relatedness_weights: RelatednessWeights::SHAW,
            zone_grid_size: 5,
            route_removal_lower_ratio: 0.1,
            route_removal_upper_ratio: 0.3,
            customer_ruin_strategies: vec![
                CustomerRuinStrategy::Random(AdjacentStation::None),
                CustomerRuinStrategy::WorstDistance(AdjacentStation::None),
                CustomerRuinStrategy::WorstTime(AdjacentStation::None),
                CustomerRuinStrategy::Related(Relatedness::Shaw, AdjacentStation::None),
                CustomerRuinStrategy::Related(Relatedness::Shaw, AdjacentStation::Previous),
                CustomerRuinStrategy::Related(Relatedness::Shaw, AdjacentStation::Next),
                CustomerRuinStrategy::Zone(AdjacentStation::None),
                CustomerRuinStrategy::Zone(AdjacentStation::Previous),
                CustomerRuinStrategy::Zone(AdjacentStation::Next),
                // CustomerRuinStrategy::WorstCharge(AdjacentStation::None),
            ],
            route_ruin_strategies: vec![
                RouteRuinStrategy::Random,
                // RouteRuinStrategy::Greedy,
            ],
            station_ruin_strategies: vec![
                StationRuinStrategy::Random,
                StationRuinStrategy::WorstDistance,
                StationRuinStrategy::WorstCharge,
                StationRuinStrategy::FullCharge,
            ],
        }
    }
}
