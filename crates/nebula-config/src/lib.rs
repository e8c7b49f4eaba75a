//! Configuration for the hex grid generator.
//!
//! Settings persist to disk as RON files and can be overridden from the
//! command line via clap. Missing fields fall back to defaults so older
//! config files keep loading.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{Config, DebugConfig, GridConfig, NeighborMode, OutputConfig, QueryConfig};
pub use error::ConfigError;
