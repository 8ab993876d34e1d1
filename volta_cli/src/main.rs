use clap::{Parser, Subcommand};

#[cfg(not(feature = "dhat-heap"))]
use mimalloc::MiMalloc;

use crate::{solve::SolveArgs, solve_dataset::SolveDatasetArgs};

mod file_utils;
mod parsers;
mod solve;
mod solve_dataset;
mod summary;

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

#[cfg(not(feature = "dhat-heap"))]
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a single instance
    Solve {
        #[command(flatten)]
        args: SolveArgs,
    },
    /// Solve every instance of a folder
    SolveDataset {
        #[command(flatten)]
        args: SolveDatasetArgs,
    },
}

fn main() -> Result<(), anyhow::Error> {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    match cli.command {
        Some(Commands::Solve { args }) => solve::run(args)?,
        Some(Commands::SolveDataset { args }) => solve_dataset::run(args)?,
        None => {
            // Nothing to do without a subcommand
        }
    }

    Ok(())
}
