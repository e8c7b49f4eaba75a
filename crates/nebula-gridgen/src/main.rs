//! Command-line host for the hex grid generator.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p nebula-gridgen -- --level 5` to build a level 5 grid,
//! or add `--nearest 0,0,1 --k 5` to look up cells around a direction.

mod query;
mod report;

use std::process::ExitCode;

use clap::Parser;
use nebula_config::{CliArgs, Config, NeighborMode};
use nebula_hexgrid::{GeneratorOptions, HexGrid, HexGridGenerator, NeighborStrategy};
use tracing::{error, info};

use crate::report::GridReport;

fn generator_options(config: &Config) -> GeneratorOptions {
    GeneratorOptions {
        merge_tolerance: config.grid.merge_tolerance,
        neighbor_strategy: match config.grid.neighbor_strategy {
            NeighborMode::Hashed => NeighborStrategy::Hashed,
            NeighborMode::Exhaustive => NeighborStrategy::Exhaustive,
        },
    }
}

/// Generate, report and optionally query. Returns false on any failure.
fn run(config: &Config, args: &CliArgs) -> bool {
    let generator = HexGridGenerator::new(generator_options(config));
    let grid: HexGrid = match generator.generate(i64::from(config.grid.level)) {
        Ok(grid) => grid,
        Err(err) => {
            error!(%err, "grid generation failed");
            eprintln!("error: {err}");
            for line in err.diagnostics() {
                eprintln!("  {line}");
            }
            return false;
        }
    };

    let report = GridReport::new(&grid);
    if config.output.json {
        match report.to_json() {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("error: failed to encode report: {err}");
                return false;
            }
        }
    } else {
        println!("{}", report.to_text());
    }

    if let Some(components) = &args.nearest {
        let direction = match query::parse_direction(components) {
            Ok(direction) => direction,
            Err(err) => {
                eprintln!("error: invalid --nearest: {err}");
                return false;
            }
        };
        info!(?direction, k = config.query.nearest_count, "nearest query");
        let nearest = query::nearest(
            &grid,
            direction,
            config.query.nearest_count,
            config.query.bucket_resolution,
        );
        if config.output.json {
            match serde_json::to_string_pretty(&nearest) {
                Ok(json) => println!("{json}"),
                Err(err) => {
                    eprintln!("error: failed to encode query result: {err}");
                    return false;
                }
            }
        } else {
            println!("{}", nearest.to_text());
        }
    }

    true
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    // Resolve config directory
    let config_dir = args.config.clone().unwrap_or_else(Config::default_dir);

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    nebula_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    if run(&config, &args) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
