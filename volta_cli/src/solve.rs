use std::{
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
    sync::atomic::{AtomicBool, Ordering},
    thread,
    time::Duration,
};

use anyhow::Context;
use clap::Args;
use jiff::Timestamp;
use rand::{SeedableRng, rngs::SmallRng};
use tracing::info;
use volta_optimizer::{
    parsers::{parser::DatasetParser, schneider::SchneiderParser},
    problem::electric_vehicle_routing_problem::{ElectricVehicleRoutingProblem, TravelTimeNoise},
    solver::{
        error::SolverError,
        solver::Solver,
        solver_outcome::SolverOutcome,
        solver_params::{SolverParams, Threads},
    },
};

use crate::{parsers, summary};

/// Search options shared by the solve commands.
#[derive(Args, Clone)]
pub struct SearchArgs {
    #[arg(short = 'n', long, default_value_t = 2500)]
    iterations: usize,

    #[arg(short, long)]
    seed: Option<u64>,

    /// Threads evaluating insertion candidates
    #[arg(short, long, default_value_t = 1)]
    threads: u8,

    /// Stops the search early, e.g. "30s", "5m" or "PT1H". The initial
    /// construction always runs to completion, so the limit only bounds the
    /// improvement phase that follows it.
    #[arg(long, value_parser = parsers::parse_duration)]
    time_limit: Option<jiff::SignedDuration>,
}

impl SearchArgs {
    pub fn solver_params(&self) -> SolverParams {
        SolverParams {
            iterations: self.iterations,
            seed: self.seed,
            insertion_threads: match self.threads {
                0 => Threads::Auto,
                1 => Threads::Single,
                threads => Threads::Multi(threads as usize),
            },
            ..SolverParams::default()
        }
    }

    pub fn time_limit(&self) -> Option<jiff::SignedDuration> {
        self.time_limit
    }
}

#[derive(Args)]
pub struct SolveArgs {
    /// Instance file in the Schneider et al. format
    #[arg(short, long)]
    instance: PathBuf,

    #[command(flatten)]
    search: SearchArgs,

    /// Writes the outcome as JSON
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Perturbs travel times, "PROBABILITY:FACTOR"
    #[arg(long, value_parser = parsers::parse_travel_time_noise)]
    travel_time_noise: Option<TravelTimeNoise>,
}

pub fn load_instance(path: &Path) -> Result<ElectricVehicleRoutingProblem, anyhow::Error> {
    SchneiderParser
        .parse(path)
        .with_context(|| format!("Failed to load instance {}", path.display()))
}

/// Runs the solver, stopping it once `time_limit` elapsed. The stop is
/// only observed between search iterations, never during construction.
pub fn solve_with_time_limit(
    solver: &Solver,
    time_limit: Option<jiff::SignedDuration>,
) -> Result<SolverOutcome, SolverError> {
    let Some(time_limit) = time_limit else {
        return solver.solve();
    };

    let done = AtomicBool::new(false);
    let deadline = Timestamp::now() + time_limit;

    thread::scope(|s| {
        s.spawn(|| {
            while !done.load(Ordering::Relaxed) {
                // `solve` clears the stop flag when it starts.
                if Timestamp::now() >= deadline {
                    solver.stop();
                }
                thread::sleep(Duration::from_millis(10));
            }
        });

        let outcome = solver.solve();
        done.store(true, Ordering::Relaxed);
        outcome
    })
}

pub fn run(args: SolveArgs) -> anyhow::Result<()> {
    let mut problem = load_instance(&args.instance)?;

    if let Some(noise) = args.travel_time_noise {
        let mut rng = match args.search.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        problem = problem.with_travel_time_noise(noise, &mut rng)?;
        info!(
            probability = noise.probability,
            factor = noise.deviation_factor,
            "Perturbed travel times"
        );
    }

    info!(
        customers = problem.customers().len(),
        stations = problem.stations().len(),
        "Solving {}",
        args.instance.display()
    );

    let solver = Solver::new(problem, args.search.solver_params())?;
    let outcome = solve_with_time_limit(&solver, args.search.time_limit())?;

    let name = summary::instance_name(&args.instance);
    println!(
        "{}",
        summary::outcome_table(&[summary::InstanceSummary::new(name, &outcome)])
    );
    for (index, route) in outcome.routes.iter().enumerate() {
        println!("Route {}: {}", index + 1, route.join(" -> "));
    }

    if let Some(output) = args.output {
        if let Some(parent) = output.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let writer = BufWriter::new(File::create(&output)?);
        serde_json::to_writer_pretty(writer, &outcome)?;
        info!("Outcome written to {}", output.display());
    }

    Ok(())
}
