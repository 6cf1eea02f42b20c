//! Terminal formatting for dataset summaries and query output.
//!
//! We keep formatting code in one place so:
//! - the derivation engine stays clean and testable
//! - output changes are localized

use std::collections::BTreeMap;

use crate::dataset::{Dataset, NATION_KEY};
use crate::domain::{Metric, Mode, PlotSeries, RegionLevel};

/// Format a one-screen summary of the loaded dataset.
pub fn format_dataset_summary(dataset: &Dataset) -> String {
    let catalog = dataset.catalog();

    let mut states = 0usize;
    let mut counties = 0usize;
    for entry in catalog.iter() {
        match entry.level {
            RegionLevel::Nation => {}
            RegionLevel::State => states += 1,
            RegionLevel::County => counties += 1,
        }
    }

    let mut out = String::new();
    out.push_str("=== covid-trends dataset ===\n");
    out.push_str(&format!(
        "Regions: {} ({states} states, {counties} counties)\n",
        catalog.len()
    ));

    if let Ok(store) = catalog.resolve(NATION_KEY) {
        if let Some((first, last)) = store.date_span() {
            out.push_str(&format!(
                "US coverage: {first} to {last} ({} days)\n",
                store.len()
            ));
        }
    }

    out
}

/// Format query results as a plain-text table, one block per region.
pub fn format_series_table(
    results: &BTreeMap<String, PlotSeries>,
    metric: Metric,
    mode: Mode,
) -> String {
    let mut title = format!("{} {}", mode.display_name(), metric.display_name());
    if results.len() == 1 {
        if let Some(key) = results.keys().next() {
            title = format!("{key} - {title}");
        }
    }

    let mut out = String::new();
    out.push_str(&title);
    out.push('\n');

    for (key, series) in results {
        out.push_str(&format!("\n{key} (n={})\n", series.len()));
        for point in series.points() {
            out.push_str(&format!("{}  {:.2}\n", point.date, point.value));
        }
    }

    out
}
