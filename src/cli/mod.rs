//! Command-line parsing for the trends query tool.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the derivation engine.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::{Metric, Mode};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "trends",
    version,
    about = "COVID-19 case/death trend derivation engine (NYT data)"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Derive and print one plottable series per region.
    Query(QueryArgs),
    /// Summarize the dataset and list selectable regions in registration order.
    Regions(DataArgs),
}

/// Dataset location and correction policy.
#[derive(Debug, Parser, Clone)]
pub struct DataArgs {
    /// Directory containing `us.csv`, `us-states.csv`, and `us-counties.csv`.
    #[arg(short = 'd', long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Anomaly-calendar JSON overriding the built-in 2020-21 season
    /// (`{"dates": ["2020-11-27", ...], "split": 0.5}`).
    #[arg(long)]
    pub calendar: Option<PathBuf>,

    /// Disable the holiday-split correction entirely.
    #[arg(long, conflicts_with = "calendar")]
    pub no_calendar: bool,
}

/// Options for `trends query`.
#[derive(Debug, Parser, Clone)]
pub struct QueryArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Region keys (`US`, `New Hampshire`, `Rockingham-New Hampshire`, ...).
    #[arg(required = true)]
    pub regions: Vec<String>,

    /// Base metric (`cases` or `deaths`).
    #[arg(short, long, default_value = "cases", value_parser = Metric::parse)]
    pub metric: Metric,

    /// Aggregation mode (`daily`, `total`, `7day`, `14day`).
    #[arg(long, default_value = "daily", value_parser = Mode::parse)]
    pub mode: Mode,

    /// Export the result to CSV instead of printing a table.
    #[arg(long)]
    pub export: Option<PathBuf>,
}
