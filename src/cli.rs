//! Command-line argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Five-day weather forecast for a city
#[derive(Parser)]
#[command(name = "city-forecast")]
#[command(about = "Five-day weather forecast for a city, one table per day", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file (defaults to the user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print forecasts as JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch and show the forecast for one city
    Search {
        /// City name, e.g. "London" or "London,uk"
        city: String,
    },

    /// Read city names from stdin, one search per line
    Interactive,
}
