//! Per-region raw series storage.
//!
//! A `RegionStore` owns the raw cumulative (date → count) sequences for one
//! region, both metrics. It is a pure data holder: populated once at
//! startup, read-only afterwards, no I/O. Reading the underlying files is
//! the ingestion layer's job (`io::ingest`), which also rejects absent or
//! non-numeric fields before rows ever reach `load`.

use chrono::NaiveDate;

use crate::domain::{Metric, RawSeries};
use crate::error::{Result, TrendsError};

/// One ordered (date, cumulative cases, cumulative deaths) input row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CumulativeRow {
    pub date: NaiveDate,
    pub cases: f64,
    pub deaths: f64,
}

/// Raw cumulative sequences for one region.
#[derive(Debug, Clone)]
pub struct RegionStore {
    dates: Vec<NaiveDate>,
    cases: Vec<f64>,
    deaths: Vec<f64>,
}

impl RegionStore {
    /// Build a store from ordered rows.
    ///
    /// Fails with `MalformedInput` if dates are not strictly increasing
    /// (duplicates included: each calendar day appears at most once).
    pub fn load(rows: &[CumulativeRow]) -> Result<Self> {
        let mut dates = Vec::with_capacity(rows.len());
        let mut cases = Vec::with_capacity(rows.len());
        let mut deaths = Vec::with_capacity(rows.len());

        for row in rows {
            if let Some(&prev) = dates.last() {
                if row.date <= prev {
                    return Err(TrendsError::MalformedInput(format!(
                        "dates not strictly increasing: {} follows {prev}",
                        row.date
                    )));
                }
            }
            dates.push(row.date);
            cases.push(row.cases);
            deaths.push(row.deaths);
        }

        Ok(Self {
            dates,
            cases,
            deaths,
        })
    }

    /// Borrowing view of the stored raw series for one base metric.
    pub fn raw_series(&self, metric: Metric) -> RawSeries<'_> {
        let values = match metric {
            Metric::Cases => &self.cases,
            Metric::Deaths => &self.deaths,
        };
        RawSeries {
            dates: &self.dates,
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// First and last observation dates, if any.
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((*self.dates.first()?, *self.dates.last()?))
    }
}
