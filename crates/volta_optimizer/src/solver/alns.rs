use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use jiff::Timestamp;
use parking_lot::{MappedRwLockReadGuard, Mutex, RwLock, RwLockReadGuard};
use rand::{SeedableRng, rngs::SmallRng};
use serde::Serialize;
use tracing::{debug, info};

use crate::{
    acceptor::{
        accept_solution::{AcceptSolution, AcceptSolutionContext, AcceptanceOutcome},
        greedy_solution_acceptor::GreedySolutionAcceptor,
        simulated_annealing_acceptor::SimulatedAnnealingAcceptor,
        solution_acceptor::SolutionAcceptor,
        temperature::Temperature,
    },
    problem::electric_vehicle_routing_problem::ElectricVehicleRoutingProblem,
    solver::{
        alns_weights::{AlnsWeights, ScoreTier},
        recreate::station_recreate_strategy::StationRecreateStrategy,
        ruin::{
            ruin_solution::RuinStations,
            ruin_strategy::{CustomerRuinStrategy, RouteRuinStrategy, StationRuinStrategy},
        },
    },
    timer_debug,
    utils::time::elapsed_since,
};

use super::{
    accepted_solution::AcceptedSolution,
    construction::construct_solution::construct_solution,
    error::SolverError,
    recreate::{
        recreate_context::RecreateContext,
        recreate_solution::{RecreateSolution, RecreateStations},
        recreate_strategy::RecreateStrategy,
    },
    ruin::{ruin_context::RuinContext, ruin_solution::RuinSolution},
    solution::working_solution::WorkingSolution,
    solver_outcome::SolverOutcome,
    solver_params::{SolverAcceptorStrategy, SolverParams},
    statistics::{SearchStatistics, SearchTrack},
};

type BestSolutionHandler = Arc<Mutex<dyn FnMut(&AcceptedSolution) + Send + Sync + 'static>>;

/// One scoreboard per operator family.
#[derive(Debug, Clone, Serialize)]
pub struct AlnsSearchWeights {
    pub customer_ruin: AlnsWeights<CustomerRuinStrategy>,
    pub route_ruin: AlnsWeights<RouteRuinStrategy>,
    pub station_ruin: AlnsWeights<StationRuinStrategy>,
    pub recreate: AlnsWeights<RecreateStrategy>,
    pub station_recreate: AlnsWeights<StationRecreateStrategy>,
}

impl AlnsSearchWeights {
    pub fn new(params: &SolverParams) -> Self {
        AlnsSearchWeights {
            customer_ruin: AlnsWeights::new(params.ruin.customer_ruin_strategies.clone()),
            route_ruin: AlnsWeights::new(params.ruin.route_ruin_strategies.clone()),
            station_ruin: AlnsWeights::new(params.ruin.station_ruin_strategies.clone()),
            recreate: AlnsWeights::new(params.recreate.recreate_strategies.clone()),
            station_recreate: AlnsWeights::new(
                params.recreate.station_recreate_strategies.clone(),
            ),
        }
    }
}

struct SearchState {
    iteration: usize,
    working: AcceptedSolution,
    best: AcceptedSolution,
    temperature: Temperature,
    weights: AlnsSearchWeights,
    statistics: SearchStatistics,
}

pub struct Alns {
    problem: Arc<ElectricVehicleRoutingProblem>,
    params: SolverParams,
    solution_acceptor: SolutionAcceptor,
    best_solution: RwLock<Option<AcceptedSolution>>,
    weights: RwLock<AlnsSearchWeights>,
    on_best_solution_handler: Option<BestSolutionHandler>,
    is_stopped: AtomicBool,
}

impl Alns {
    pub fn new(
        params: SolverParams,
        problem: Arc<ElectricVehicleRoutingProblem>,
    ) -> Result<Self, SolverError> {
        params.validate()?;

        let solution_acceptor = match params.acceptor {
            SolverAcceptorStrategy::Greedy => SolutionAcceptor::Greedy(GreedySolutionAcceptor),
            SolverAcceptorStrategy::SimulatedAnnealing => {
                SolutionAcceptor::SimulatedAnnealing(SimulatedAnnealingAcceptor)
            }
        };

        Ok(Alns {
            problem,
            solution_acceptor,
            best_solution: RwLock::new(None),
            weights: RwLock::new(AlnsSearchWeights::new(&params)),
            on_best_solution_handler: None,
            is_stopped: AtomicBool::new(false),
            params,
        })
    }

    pub fn problem(&self) -> &ElectricVehicleRoutingProblem {
        &self.problem
    }

    pub fn params(&self) -> &SolverParams {
        &self.params
    }

    pub fn on_best_solution<F>(&mut self, callback: F)
    where
        F: FnMut(&AcceptedSolution) + Send + Sync + 'static,
    {
        self.on_best_solution_handler = Some(Arc::new(Mutex::new(callback)));
    }

    pub fn best_solution(&self) -> Option<MappedRwLockReadGuard<'_, AcceptedSolution>> {
        RwLockReadGuard::try_map(self.best_solution.read(), |solution| solution.as_ref()).ok()
    }

    /// Weights as of the last reweighting.
    pub fn weights_cloned(&self) -> AlnsSearchWeights {
        self.weights.read().clone()
    }

    pub fn stop(&self) {
        self.is_stopped.store(true, Ordering::Relaxed);
    }

    fn create_insertion_thread_pool(&self) -> Result<rayon::ThreadPool, SolverError> {
        Ok(rayon::ThreadPoolBuilder::new()
            .num_threads(self.params.insertion_threads.number_of_threads())
            .build()?)
    }

    fn create_rng(&self) -> SmallRng {
        match self.params.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        }
    }

    pub fn run(&self) -> Result<SolverOutcome, SolverError> {
        self.is_stopped.store(false, Ordering::Relaxed);

        let start = Timestamp::now();
        let mut rng = self.create_rng();
        let thread_pool = self.create_insertion_thread_pool()?;

        let initial_solution = timer_debug!(
            "Construction",
            construct_solution(&self.problem, &self.params, &thread_pool)
        )?;
        let initial = AcceptedSolution::new(initial_solution);

        info!(
            routes = initial.cost.routes,
            distance = initial.cost.distance,
            "Initial solution"
        );

        let mut state = SearchState {
            iteration: 0,
            temperature: Temperature::from_initial_cost(
                initial.cost.distance,
                self.params.initial_temperature_factor,
                self.params.cooling_rate,
            ),
            weights: AlnsSearchWeights::new(&self.params),
            statistics: SearchStatistics::default(),
            working: initial.clone(),
            best: initial.clone(),
        };

        state.statistics.add_best_cost(0, None, initial.cost);
        self.publish_best(&state.best);

        debug!(
            temperature = state.temperature.initial(),
            iterations = self.params.iterations,
            "Start search"
        );

        timer_debug!("Search", self.search(&mut state, &thread_pool, &mut rng));

        *self.weights.write() = state.weights.clone();

        let duration = elapsed_since(start);
        info!(
            routes = state.best.cost.routes,
            distance = state.best.cost.distance,
            iterations = state.statistics.iterations,
            elapsed = %duration,
            "Search done"
        );

        Ok(SolverOutcome {
            routes: state.best.solution.external_routes(),
            distance: state.best.cost.distance,
            num_routes: state.best.cost.routes,
            initial_distance: initial.cost.distance,
            initial_num_routes: initial.cost.routes,
            duration,
            statistics: state.statistics,
            best_solution: state.best.solution,
        })
    }

    fn search(&self, state: &mut SearchState, thread_pool: &rayon::ThreadPool, rng: &mut SmallRng) {
        for iteration in 1..=self.params.iterations {
            if self.is_stopped.load(Ordering::Relaxed) {
                info!(iteration, "Search stopped");
                break;
            }

            state.iteration = iteration;

            if iteration.is_multiple_of(self.params.alns_station_track_interval) {
                self.run_station_track(state, thread_pool, rng);
            } else if iteration.is_multiple_of(self.params.alns_route_track_interval) {
                for _ in 0..self.params.alns_route_track_repeats {
                    self.run_route_track(state, thread_pool, rng);
                }
            } else {
                self.run_customer_track(state, thread_pool, rng);
            }

            state.temperature.cool();
            state.working.solution.prune_degenerate_routes();
            state.best.solution.prune_degenerate_routes();
            state.statistics.iterations = iteration;

            self.update_weights(state);
        }
    }

    fn run_customer_track(
        &self,
        state: &mut SearchState,
        thread_pool: &rayon::ThreadPool,
        rng: &mut SmallRng,
    ) {
        let ruin_strategy = state.weights.customer_ruin.select_strategy(rng);
        let recreate_strategy = state.weights.recreate.select_strategy(rng);

        let mut candidate = state.working.solution.clone();
        let bank = ruin_strategy.ruin_solution(&mut candidate, self.ruin_context(rng));
        recreate_strategy.recreate_solution(&mut candidate, bank, self.recreate_context(thread_pool));

        let reward = self.update_solutions(candidate, SearchTrack::Customer, state, rng);
        state.weights.customer_ruin.record(ruin_strategy, reward);
        state.weights.recreate.record(recreate_strategy, reward);
    }

    fn run_route_track(
        &self,
        state: &mut SearchState,
        thread_pool: &rayon::ThreadPool,
        rng: &mut SmallRng,
    ) {
        let ruin_strategy = state.weights.route_ruin.select_strategy(rng);
        let recreate_strategy = state.weights.recreate.select_strategy(rng);

        let mut candidate = state.working.solution.clone();
        let bank = ruin_strategy.ruin_solution(&mut candidate, self.ruin_context(rng));
        recreate_strategy.recreate_solution(&mut candidate, bank, self.recreate_context(thread_pool));

        let reward = self.update_solutions(candidate, SearchTrack::Route, state, rng);
        state.weights.route_ruin.record(ruin_strategy, reward);
        state.weights.recreate.record(recreate_strategy, reward);
    }

    fn run_station_track(
        &self,
        state: &mut SearchState,
        thread_pool: &rayon::ThreadPool,
        rng: &mut SmallRng,
    ) {
        let ruin_strategy = state.weights.station_ruin.select_strategy(rng);
        let recreate_strategy = state.weights.station_recreate.select_strategy(rng);

        let mut candidate = state.working.solution.clone();
        let removed = ruin_strategy.ruin_stations(&mut candidate, self.ruin_context(rng));
        recreate_strategy.recreate_stations(&mut candidate, self.recreate_context(thread_pool));

        debug!(
            iteration = state.iteration,
            removed,
            ruin = %ruin_strategy,
            recreate = %recreate_strategy,
            "Station track"
        );

        let reward = self.update_solutions(candidate, SearchTrack::Station, state, rng);
        state.weights.station_ruin.record(ruin_strategy, reward);
        state.weights.station_recreate.record(recreate_strategy, reward);
    }

    fn ruin_context<'a>(&'a self, rng: &'a mut SmallRng) -> RuinContext<'a, SmallRng> {
        RuinContext {
            params: &self.params.ruin,
            problem: &self.problem,
            rng,
        }
    }

    fn recreate_context<'a>(&'a self, thread_pool: &'a rayon::ThreadPool) -> RecreateContext<'a> {
        RecreateContext {
            params: &self.params.recreate,
            problem: &self.problem,
            thread_pool,
        }
    }

    /// Runs the acceptance criterion on a repaired candidate and returns the
    /// reward earned by the operators that produced it.
    fn update_solutions(
        &self,
        mut candidate: WorkingSolution,
        track: SearchTrack,
        state: &mut SearchState,
        rng: &mut SmallRng,
    ) -> f64 {
        debug_assert!(candidate.covers_all_customers());

        if !candidate.is_feasible() {
            debug!(iteration = state.iteration, ?track, "Discarding infeasible candidate");
            state.statistics.add_outcome(track, None);
            return 0.0;
        }

        candidate.prune_degenerate_routes();
        let candidate = AcceptedSolution::new(candidate);

        let outcome = self.solution_acceptor.accept(
            &candidate.cost,
            &state.working.cost,
            &state.best.cost,
            AcceptSolutionContext {
                temperature: state.temperature.current(),
                rng,
            },
        );

        state.statistics.add_outcome(track, Some(outcome));

        match outcome {
            AcceptanceOutcome::NewBest => {
                info!(
                    iteration = state.iteration,
                    ?track,
                    routes = candidate.cost.routes,
                    distance = candidate.cost.distance,
                    "New best solution"
                );

                state
                    .statistics
                    .add_best_cost(state.iteration, Some(track), candidate.cost);
                state.best = candidate.clone();
                state.working = candidate;
                self.publish_best(&state.best);
            }
            AcceptanceOutcome::Improved | AcceptanceOutcome::AcceptedWorse => {
                state.working = candidate;
            }
            AcceptanceOutcome::Rejected => {}
        }

        outcome
            .score_tier()
            .map_or(0.0, |tier| self.reward(tier))
    }

    fn reward(&self, tier: ScoreTier) -> f64 {
        match tier {
            ScoreTier::NewBest => self.params.alns_best_factor,
            ScoreTier::Improved => self.params.alns_improvement_factor,
            ScoreTier::AcceptedWorse => self.params.alns_accepted_worst_factor,
        }
    }

    fn update_weights(&self, state: &mut SearchState) {
        let reaction_factor = self.params.alns_reaction_factor;
        let mut updated = false;

        if state
            .iteration
            .is_multiple_of(self.params.alns_customer_segment_iterations)
        {
            state.weights.customer_ruin.update_weights(reaction_factor);
            state.weights.route_ruin.update_weights(reaction_factor);
            state.weights.recreate.update_weights(reaction_factor);
            updated = true;

            debug!(
                iteration = state.iteration,
                "Customer ruin weights: {}{}{}",
                state.weights.customer_ruin,
                state.weights.route_ruin,
                state.weights.recreate
            );
        }

        if state
            .iteration
            .is_multiple_of(self.params.alns_station_segment_iterations)
        {
            state.weights.station_ruin.update_weights(reaction_factor);
            state.weights.station_recreate.update_weights(reaction_factor);
            updated = true;

            debug!(
                iteration = state.iteration,
                "Station weights: {}{}",
                state.weights.station_ruin,
                state.weights.station_recreate
            );
        }

        if updated {
            *self.weights.write() = state.weights.clone();
        }
    }

    fn publish_best(&self, best: &AcceptedSolution) {
        *self.best_solution.write() = Some(best.clone());

        if let Some(callback) = &self.on_best_solution_handler {
            callback.lock()(best);
        }
    }
}
