use std::fmt::Display;

use rand::Rng;
use serde::Serialize;

use crate::solver::{
    alns_weights::AlnsOperator,
    solution::{removal_bank::RemovalBank, working_solution::WorkingSolution},
};

use super::{
    ruin_context::RuinContext,
    ruin_params::RelatednessWeights,
    ruin_random::RuinRandom,
    ruin_related::RuinRelated,
    ruin_route::RuinRoute,
    ruin_solution::{RuinSolution, RuinStations},
    ruin_station::RuinStation,
    ruin_worst::{RuinWorst, WorstMetric},
    ruin_zone::RuinZone,
};

/// Station visit excised together with each removed customer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum AdjacentStation {
    #[default]
    None,
    Previous,
    Next,
}

impl AdjacentStation {
    fn index(&self) -> usize {
        match self {
            Self::None => 0,
            Self::Previous => 1,
            Self::Next => 2,
        }
    }
}

impl Display for AdjacentStation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => Ok(()),
            Self::Previous => write!(f, "Prev"),
            Self::Next => write!(f, "Next"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Relatedness {
    /// Configured weights, Shaw's measure by default.
    Shaw,
    Proximity,
    Time,
    Demand,
}

impl Relatedness {
    pub fn weights(&self, configured: &RelatednessWeights) -> RelatednessWeights {
        match self {
            Self::Shaw => *configured,
            Self::Proximity => RelatednessWeights::PROXIMITY,
            Self::Time => RelatednessWeights::TIME,
            Self::Demand => RelatednessWeights::DEMAND,
        }
    }

    fn index(&self) -> usize {
        match self {
            Self::Shaw => 0,
            Self::Proximity => 1,
            Self::Time => 2,
            Self::Demand => 3,
        }
    }
}

impl Display for Relatedness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Shaw => write!(f, "Shaw"),
            Self::Proximity => write!(f, "Proximity"),
            Self::Time => write!(f, "Time"),
            Self::Demand => write!(f, "Demand"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CustomerRuinStrategy {
    Random(AdjacentStation),
    WorstDistance(AdjacentStation),
    WorstTime(AdjacentStation),
    WorstCharge(AdjacentStation),
    Related(Relatedness, AdjacentStation),
    Zone(AdjacentStation),
}

impl CustomerRuinStrategy {
    pub fn adjacent_station(&self) -> AdjacentStation {
        match self {
            Self::Random(adjacent)
            | Self::WorstDistance(adjacent)
            | Self::WorstTime(adjacent)
            | Self::WorstCharge(adjacent)
            | Self::Related(_, adjacent)
            | Self::Zone(adjacent) => *adjacent,
        }
    }
}

impl Serialize for CustomerRuinStrategy {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl Display for CustomerRuinStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Random(adjacent) => write!(f, "Random{adjacent}"),
            Self::WorstDistance(adjacent) => write!(f, "WorstDistance{adjacent}"),
            Self::WorstTime(adjacent) => write!(f, "WorstTime{adjacent}"),
            Self::WorstCharge(adjacent) => write!(f, "WorstCharge{adjacent}"),
            Self::Related(relatedness, adjacent) => write!(f, "Related{relatedness}{adjacent}"),
            Self::Zone(adjacent) => write!(f, "Zone{adjacent}"),
        }
    }
}

impl AlnsOperator for CustomerRuinStrategy {
    const COUNT: usize = 27;

    fn index(&self) -> usize {
        let base = match self {
            Self::Random(_) => 0,
            Self::WorstDistance(_) => 1,
            Self::WorstTime(_) => 2,
            Self::WorstCharge(_) => 3,
            Self::Related(relatedness, _) => 4 + relatedness.index(),
            Self::Zone(_) => 8,
        };

        base * 3 + self.adjacent_station().index()
    }
}

impl RuinSolution for CustomerRuinStrategy {
    fn ruin_solution<R>(&self, solution: &mut WorkingSolution, context: RuinContext<R>) -> RemovalBank
    where
        R: Rng,
    {
        let adjacent = self.adjacent_station();

        match self {
            Self::Random(_) => RuinRandom { adjacent }.ruin_solution(solution, context),
            Self::WorstDistance(_) => RuinWorst {
                metric: WorstMetric::Distance,
                adjacent,
            }
            .ruin_solution(solution, context),
            Self::WorstTime(_) => RuinWorst {
                metric: WorstMetric::Time,
                adjacent,
            }
            .ruin_solution(solution, context),
            Self::WorstCharge(_) => RuinWorst {
                metric: WorstMetric::Charge,
                adjacent,
            }
            .ruin_solution(solution, context),
            Self::Related(relatedness, _) => RuinRelated {
                weights: relatedness.weights(&context.params.relatedness_weights),
                adjacent,
            }
            .ruin_solution(solution, context),
            Self::Zone(_) => RuinZone { adjacent }.ruin_solution(solution, context),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RouteRuinStrategy {
    Random,
    /// Routes with the fewest customers first.
    Greedy,
}

impl Serialize for RouteRuinStrategy {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl Display for RouteRuinStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Random => write!(f, "RandomRoute"),
            Self::Greedy => write!(f, "GreedyRoute"),
        }
    }
}

impl AlnsOperator for RouteRuinStrategy {
    const COUNT: usize = 2;

    fn index(&self) -> usize {
        match self {
            Self::Random => 0,
            Self::Greedy => 1,
        }
    }
}

impl RuinSolution for RouteRuinStrategy {
    fn ruin_solution<R>(&self, solution: &mut WorkingSolution, context: RuinContext<R>) -> RemovalBank
    where
        R: Rng,
    {
        RuinRoute { strategy: *self }.ruin_solution(solution, context)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StationRuinStrategy {
    Random,
    WorstDistance,
    WorstCharge,
    /// Stations left with a full battery.
    FullCharge,
}

impl Serialize for StationRuinStrategy {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl Display for StationRuinStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Random => write!(f, "RandomStation"),
            Self::WorstDistance => write!(f, "WorstDistanceStation"),
            Self::WorstCharge => write!(f, "WorstChargeStation"),
            Self::FullCharge => write!(f, "FullChargeStation"),
        }
    }
}

impl AlnsOperator for StationRuinStrategy {
    const COUNT: usize = 4;

    fn index(&self) -> usize {
        match self {
            Self::Random => 0,
            Self::WorstDistance => 1,
            Self::WorstCharge => 2,
            Self::FullCharge => 3,
        }
    }
}

impl RuinStations for StationRuinStrategy {
    fn ruin_stations<R>(&self, solution: &mut WorkingSolution, context: RuinContext<R>) -> usize
    where
        R: Rng,
    {
        RuinStation { strategy: *self }.ruin_stations(solution, context)
    }
}
