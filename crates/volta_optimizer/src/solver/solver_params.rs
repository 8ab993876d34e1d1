use crate::solver::{
    error::SolverError,
    recreate::{recreate_params::RecreateParams, recreate_strategy::RecreateStrategy},
    ruin::ruin_params::RuinParams,
};

#[derive(Clone, Debug)]
pub struct SolverParams {
    /// Total number of ALNS iterations (N).
    pub iterations: usize,

    /// Seed of the search random generator, drawn from the OS when `None`.
    pub seed: Option<u64>,

    pub acceptor: SolverAcceptorStrategy,

    pub ruin: RuinParams,
    pub recreate: RecreateParams,

    pub insertion_threads: Threads,

    /// Smoothing factor of the weight update (rho).
    pub alns_reaction_factor: f64,
    /// Reward of a candidate becoming the new best (sigma 1).
    pub alns_best_factor: f64,
    /// Reward of a candidate improving the working solution (sigma 2).
    pub alns_improvement_factor: f64,
    /// Reward of a worse candidate accepted anyway (sigma 3).
    pub alns_accepted_worst_factor: f64,

    /// Reweighting cadence of the customer and route operators (Nc).
    pub alns_customer_segment_iterations: usize,
    /// Reweighting cadence of the station operators (Ns).
    pub alns_station_segment_iterations: usize,

    /// Every `alns_route_track_interval` iterations the route track runs (NRR).
    pub alns_route_track_interval: usize,
    /// Every `alns_station_track_interval` iterations the station track runs (NSR).
    pub alns_station_track_interval: usize,
    /// Chained destroy and repair rounds of one route track (nRR).
    pub alns_route_track_repeats: usize,

    /// Cooling rate of the annealing temperature (epsilon).
    pub cooling_rate: f64,
    /// Scales the initial temperature from the initial solution cost (mu).
    pub initial_temperature_factor: f64,
}

#[derive(Clone, Debug)]
pub enum Threads {
    Single,
    Auto,
    Multi(usize),
}

impl Threads {
    pub fn number_of_threads(&self) -> usize {
        match self {
            Threads::Single => 1,
            Threads::Multi(num) => *num,
            Threads::Auto => std::thread::available_parallelism().map_or(1, |n| n.get()),
        }
    }
}

#[derive(Clone, Debug)]
pub enum SolverAcceptorStrategy {
    Greedy,
    SimulatedAnnealing,
}

impl Default for SolverParams {
    fn default() -> Self {
        Self {
            iterations: 2500,
            seed: None,
            acceptor: SolverAcceptorStrategy::SimulatedAnnealing,
            ruin: RuinParams::default(),
            recreate: RecreateParams::default(),
            insertion_threads: Threads::Single,

            alns_reaction_factor: 0.25,
            alns_best_factor: 25.0,
            alns_improvement_factor: 20.0,
            alns_accepted_worst_factor: 21.0,

            alns_customer_segment_iterations: 200,
            alns_station_segment_iterations: 400,
            alns_route_track_interval: 200,
            alns_station_track_interval: 100,
            alns_route_track_repeats: 50,

            cooling_rate: 0.9994,
            initial_temperature_factor: 0.4,
        }
    }
}

impl SolverParams {
    pub fn recreate_strategies(&self) -> &Vec<RecreateStrategy> {
        &self.recreate.recreate_strategies
    }

    pub fn validate(&self) -> Result<(), SolverError> {
        let invalid = |message: &str| Err(SolverError::InvalidParams(message.to_owned()));

        if !(0.0..=1.0).contains(&self.alns_reaction_factor) {
            return invalid("reaction factor must lie in [0, 1]");
        }

        if !(self.cooling_rate > 0.0 && self.cooling_rate <= 1.0) {
            return invalid("cooling rate must lie in (0, 1]");
        }

        if self.initial_temperature_factor <= 0.0 {
            return invalid("initial temperature factor must be positive");
        }

        if [
            self.alns_best_factor,
            self.alns_improvement_factor,
            self.alns_accepted_worst_factor,
        ]
        .iter()
        .any(|reward| *reward < 0.0)
        {
            return invalid("rewards must not be negative");
        }

        if [
            self.alns_customer_segment_iterations,
            self.alns_station_segment_iterations,
            self.alns_route_track_interval,
            self.alns_station_track_interval,
        ]
        .contains(&0)
        {
            return invalid("segment lengths and track intervals must be positive");
        }

        if self.insertion_threads.number_of_threads() == 0 {
            return invalid("at least one insertion thread is needed");
        }

        if self.ruin.customer_ruin_strategies.is_empty()
            || self.ruin.route_ruin_strategies.is_empty()
            || self.ruin.station_ruin_strategies.is_empty()
        {
            return invalid("every ruin family needs at least one strategy");
        }

        if self.recreate.recreate_strategies.is_empty()
            || self.recreate.station_recreate_strategies.is_empty()
        {
            return invalid("every recreate family needs at least one strategy");
        }

        if let Some(strategy) = self
            .recreate
            .recreate_strategies
            .iter()
            .find(|strategy| !strategy.is_valid())
        {
            return Err(SolverError::InvalidParams(format!(
                "unsupported recreate strategy {strategy}"
            )));
        }

        if self.recreate.supplement_repair_attempts == 0 {
            return invalid("supplement repair needs at least one attempt");
        }

        if self.ruin.zone_grid_size == 0 {
            return invalid("zone grid needs at least one cell per axis");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params_are_valid() {
        assert!(SolverParams::default().validate().is_ok());
    }

    #[test]
    fn test_regret_beyond_maximum_is_rejected() {
        let mut params = SolverParams::default();
        params
            .recreate
            .recreate_strategies
            .push(RecreateStrategy::RegretInsertion(7));

        let error = params.validate().unwrap_err();

        assert!(matches!(error, SolverError::InvalidParams(message) if message.contains("RegretInsertion(7)")));
    }

    #[test]
    fn test_empty_station_family_is_rejected() {
        let params = SolverParams {
            recreate: RecreateParams {
                station_recreate_strategies: vec![],
                ..RecreateParams::default()
            },
            ..SolverParams::default()
        };

        assert!(params.validate().is_err());
    }

    #[test]
    fn test_zero_track_interval_is_rejected() {
        let params = SolverParams {
            alns_station_track_interval: 0,
            ..SolverParams::default()
        };

        assert!(params.validate().is_err());
    }
}
