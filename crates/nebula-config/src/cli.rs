//! Command-line argument parsing for the grid generator.

use std::path::PathBuf;

use clap::Parser;

use crate::{Config, NeighborMode};

/// Grid generator command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "gridgen", about = "Generate and inspect geodesic hex grids")]
pub struct CliArgs {
    /// Subdivision level (0-10).
    #[arg(long, allow_negative_numbers = true)]
    pub level: Option<i32>,

    /// Distance under which two points on the unit sphere are merged.
    #[arg(long)]
    pub merge_tolerance: Option<f64>,

    /// Neighbor resolution strategy.
    #[arg(long, value_enum)]
    pub neighbor_strategy: Option<NeighborMode>,

    /// Print the summary as JSON.
    #[arg(long)]
    pub json: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Direction to look up the nearest cells for, as `x,y,z`.
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    pub nearest: Option<Vec<f64>>,

    /// Number of cells returned by `--nearest`.
    #[arg(long)]
    pub k: Option<usize>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(level) = args.level {
            self.grid.level = level;
        }
        if let Some(tolerance) = args.merge_tolerance {
            self.grid.merge_tolerance = tolerance;
        }
        if let Some(strategy) = args.neighbor_strategy {
            self.grid.neighbor_strategy = strategy;
        }
        if args.json {
            self.output.json = true;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        if let Some(k) = args.k {
            self.query.nearest_count = k;
        }
    }
}
