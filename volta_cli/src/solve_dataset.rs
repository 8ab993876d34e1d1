use std::{fs::File, io::BufWriter, path::PathBuf};

use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};
use volta_optimizer::solver::solver::Solver;

use crate::{
    file_utils::collect_instances,
    solve::{SearchArgs, load_instance, solve_with_time_limit},
    summary::{self, InstanceSummary},
};

#[derive(Args)]
pub struct SolveDatasetArgs {
    /// Instance file or folder of instances
    #[arg(short, long)]
    dataset: PathBuf,

    /// Extension of the instance files when solving a folder
    #[arg(long, default_value = "txt")]
    extension: String,

    #[command(flatten)]
    search: SearchArgs,

    /// Writes the per-instance summary as JSON
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn run(args: SolveDatasetArgs) -> Result<(), anyhow::Error> {
    info!("Solving dataset {:?}", args.dataset);
    let paths = if args.dataset.is_file() {
        vec![args.dataset]
    } else {
        collect_instances(&args.dataset, &args.extension)?
    };

    let bar = ProgressBar::new(paths.len() as u64);
    bar.set_style(ProgressStyle::default_bar().template("[{bar:40}] {pos}/{len} {msg}")?);

    let mut outcomes = Vec::with_capacity(paths.len());
    for path in &paths {
        let name = summary::instance_name(path);
        bar.set_message(name.clone());

        let problem = match load_instance(path) {
            Ok(problem) => problem,
            Err(err) => {
                warn!("Skipping {}: {err:#}", path.display());
                bar.inc(1);
                continue;
            }
        };

        let solver = Solver::new(problem, args.search.solver_params())?;
        match solve_with_time_limit(&solver, args.search.time_limit()) {
            Ok(outcome) => outcomes.push(InstanceSummary::new(name, &outcome)),
            Err(err) => warn!("Failed to solve {}: {err}", path.display()),
        }

        bar.inc(1);
    }

    bar.finish_and_clear();

    println!("{}", summary::outcome_table(&outcomes));

    if let Some(output) = args.output {
        let writer = BufWriter::new(File::create(&output)?);
        serde_json::to_writer_pretty(writer, &outcomes)?;
        info!("Summary written to {}", output.display());
    }

    Ok(())
}
