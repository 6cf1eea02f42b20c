//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - installs the tracing subscriber
//! - parses CLI arguments
//! - loads the dataset and builds the derived arena
//! - runs queries and prints/exports the results

use clap::Parser;
use tracing::debug;

use crate::cli::{Cli, Command, DataArgs, QueryArgs};
use crate::dataset::Dataset;
use crate::domain::AnomalyCalendar;
use crate::error::Result;

/// Entry point for the `trends` binary.
pub fn run() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    match cli.command {
        Command::Query(args) => handle_query(args),
        Command::Regions(args) => handle_regions(args),
    }
}

/// `RUST_LOG` takes precedence; the fallback stays at `warn` so report
/// output on stdout remains clean.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_dataset(args: &DataArgs) -> Result<Dataset> {
    let calendar = if args.no_calendar {
        AnomalyCalendar::none()
    } else if let Some(path) = &args.calendar {
        AnomalyCalendar::from_json_file(path)?
    } else {
        AnomalyCalendar::default()
    };

    debug!(
        data_dir = %args.data_dir.display(),
        anomaly_dates = calendar.dates.len(),
        "loading dataset"
    );
    Dataset::load_dir(&args.data_dir, &calendar)
}

fn handle_query(args: QueryArgs) -> Result<()> {
    let dataset = load_dataset(&args.data)?;

    debug!(
        metric = args.metric.name(),
        mode = args.mode.name(),
        regions = args.regions.len(),
        "running query"
    );
    let results = dataset.query(&args.regions, args.metric, args.mode)?;

    if let Some(path) = &args.export {
        crate::io::export::write_series_csv(path, &results)?;
        println!("Wrote {} series to '{}'.", results.len(), path.display());
        return Ok(());
    }

    println!(
        "{}",
        crate::report::format_series_table(&results, args.metric, args.mode)
    );
    Ok(())
}

fn handle_regions(args: DataArgs) -> Result<()> {
    let dataset = load_dataset(&args)?;

    print!("{}", crate::report::format_dataset_summary(&dataset));
    println!();
    for (key, label) in dataset.catalog().list_selectable() {
        println!("{key}\t{label}");
    }
    Ok(())
}
