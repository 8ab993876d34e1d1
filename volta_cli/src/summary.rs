use std::path::Path;

use comfy_table::{Table, presets::UTF8_FULL};
use serde::Serialize;
use volta_optimizer::solver::solver_outcome::SolverOutcome;

pub fn instance_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// One row of a solve report.
#[derive(Debug, Clone, Serialize)]
pub struct InstanceSummary {
    pub instance: String,
    pub routes: usize,
    pub distance: f64,
    pub initial_routes: usize,
    pub initial_distance: f64,
    pub improvement: f64,
    pub iterations: usize,
    pub duration: jiff::SignedDuration,
}

impl InstanceSummary {
    pub fn new(instance: String, outcome: &SolverOutcome) -> Self {
        InstanceSummary {
            instance,
            routes: outcome.num_routes,
            distance: outcome.distance,
            initial_routes: outcome.initial_num_routes,
            initial_distance: outcome.initial_distance,
            improvement: outcome.improvement(),
            iterations: outcome.statistics.iterations,
            duration: outcome.duration,
        }
    }
}

pub fn outcome_table(rows: &[InstanceSummary]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "Instance",
        "Routes",
        "Distance",
        "Initial routes",
        "Initial distance",
        "Gain",
        "Iterations",
        "Duration",
    ]);

    for row in rows {
        table.add_row(vec![
            row.instance.clone(),
            row.routes.to_string(),
            format!("{:.2}", row.distance),
            row.initial_routes.to_string(),
            format!("{:.2}", row.initial_distance),
            format!("{:.2}%", row.improvement * 100.0),
            row.iterations.to_string(),
            format!("{:#}", row.duration),
        ]);
    }

    table
}
