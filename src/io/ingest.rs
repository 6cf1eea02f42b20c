//! CSV ingest for the three dataset shapes.
//!
//! The engine consumes daily cumulative counts at three geographic levels,
//! one file per level:
//!
//! - national: `date,cases,deaths`
//! - state: `date,state,fips,cases,deaths`
//! - county: `date,county,state,fips,cases,deaths`
//!
//! Columns are matched by header name, so order does not matter and the
//! optional `fips` column may be absent or empty. Any row that fails to
//! parse (bad date, non-numeric count, missing field) aborts the load with
//! `MalformedInput` carrying the file and 1-based line; a contract
//! violation, not something to skip past.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::error::{Result, TrendsError};
use crate::store::CumulativeRow;

/// One row of the national dataset.
#[derive(Debug, Clone, Deserialize)]
pub struct NationalRow {
    pub date: NaiveDate,
    pub cases: f64,
    pub deaths: f64,
}

/// One row of the per-state dataset.
#[derive(Debug, Clone, Deserialize)]
pub struct StateRow {
    pub date: NaiveDate,
    pub state: String,
    #[serde(default)]
    pub fips: Option<String>,
    pub cases: f64,
    pub deaths: f64,
}

/// One row of the per-county dataset.
#[derive(Debug, Clone, Deserialize)]
pub struct CountyRow {
    pub date: NaiveDate,
    pub county: String,
    pub state: String,
    #[serde(default)]
    pub fips: Option<String>,
    pub cases: f64,
    pub deaths: f64,
}

impl From<&NationalRow> for CumulativeRow {
    fn from(row: &NationalRow) -> Self {
        CumulativeRow {
            date: row.date,
            cases: row.cases,
            deaths: row.deaths,
        }
    }
}

/// Read the national dataset.
pub fn read_national(path: &Path) -> Result<Vec<NationalRow>> {
    read_rows(path)
}

/// Read the per-state dataset.
pub fn read_states(path: &Path) -> Result<Vec<StateRow>> {
    read_rows(path)
}

/// Read the per-county dataset.
pub fn read_counties(path: &Path) -> Result<Vec<CountyRow>> {
    read_rows(path)
}

fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file = File::open(path).map_err(|source| TrendsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let rows = rows_from_reader(file, path)?;
    debug!(path = %path.display(), rows = rows.len(), "read dataset");
    Ok(rows)
}

fn rows_from_reader<T: DeserializeOwned, R: Read>(reader: R, path: &Path) -> Result<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for result in reader.deserialize() {
        let row: T = result.map_err(|e| malformed(path, e))?;
        rows.push(row);
    }
    Ok(rows)
}

fn malformed(path: &Path, err: csv::Error) -> TrendsError {
    let line = err.position().map(|pos| pos.line());
    match line {
        Some(line) => {
            TrendsError::MalformedInput(format!("{} line {line}: {err}", path.display()))
        }
        None => TrendsError::MalformedInput(format!("{}: {err}", path.display())),
    }
}

/// Group state rows into per-state cumulative sequences.
///
/// Groups appear in first-appearance order; rows within a group keep their
/// file order (the dataset contract says dates are strictly increasing
/// within each state, which `RegionStore::load` enforces).
pub fn group_states(rows: &[StateRow]) -> Vec<(String, Vec<CumulativeRow>)> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<CumulativeRow>> = HashMap::new();

    for row in rows {
        if !groups.contains_key(&row.state) {
            order.push(row.state.clone());
        }
        groups
            .entry(row.state.clone())
            .or_default()
            .push(CumulativeRow {
                date: row.date,
                cases: row.cases,
                deaths: row.deaths,
            });
    }

    order
        .into_iter()
        .map(|state| {
            let rows = groups.remove(&state).unwrap_or_default();
            (state, rows)
        })
        .collect()
}

/// Group county rows into per-(state, county) cumulative sequences, in
/// first-appearance order.
pub fn group_counties(rows: &[CountyRow]) -> Vec<((String, String), Vec<CumulativeRow>)> {
    let mut order: Vec<(String, String)> = Vec::new();
    let mut groups: HashMap<(String, String), Vec<CumulativeRow>> = HashMap::new();

    for row in rows {
        let group = (row.state.clone(), row.county.clone());
        if !groups.contains_key(&group) {
            order.push(group.clone());
        }
        groups.entry(group).or_default().push(CumulativeRow {
            date: row.date,
            cases: row.cases,
            deaths: row.deaths,
        });
    }

    order
        .into_iter()
        .map(|group| {
            let rows = groups.remove(&group).unwrap_or_default();
            (group, rows)
        })
        .collect()
}
