//! Export query results to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream
//! scripts: one `region,date,value` row per observation, regions in key
//! order.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::PlotSeries;
use crate::error::{Result, TrendsError};

/// Write one CSV row per (region, date) observation.
pub fn write_series_csv(path: &Path, results: &BTreeMap<String, PlotSeries>) -> Result<()> {
    let io_err = |source| TrendsError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::create(path).map_err(io_err)?;
    writeln!(file, "region,date,value").map_err(io_err)?;

    for (key, series) in results {
        for point in series.points() {
            writeln!(file, "{key},{},{}", point.date, point.value).map_err(io_err)?;
        }
    }

    Ok(())
}
