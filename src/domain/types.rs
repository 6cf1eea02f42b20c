//! Shared domain types.
//!
//! These types are intentionally lightweight and serializable so they can be:
//!
//! - used in-memory by the derivation engine
//! - handed to a charting/rendering layer as plain `(dates, values)` pairs
//! - exported to CSV/JSON

use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TrendsError};

/// Base metric tracked for every region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Cases,
    Deaths,
}

impl Metric {
    /// Boundary token (`cases` / `deaths`).
    pub fn name(self) -> &'static str {
        match self {
            Metric::Cases => "cases",
            Metric::Deaths => "deaths",
        }
    }

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            Metric::Cases => "Cases",
            Metric::Deaths => "Deaths",
        }
    }

    /// Parse a boundary token. Never substitutes a default.
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "cases" => Ok(Metric::Cases),
            "deaths" => Ok(Metric::Deaths),
            other => Err(TrendsError::UnknownMetric(other.to_string())),
        }
    }
}

/// Aggregation mode selecting one of the four derived sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    #[serde(rename = "daily")]
    Daily,
    #[serde(rename = "total")]
    Total,
    #[serde(rename = "7day")]
    SevenDay,
    #[serde(rename = "14day")]
    FourteenDay,
}

impl Mode {
    /// Boundary token (`daily` / `total` / `7day` / `14day`).
    pub fn name(self) -> &'static str {
        match self {
            Mode::Daily => "daily",
            Mode::Total => "total",
            Mode::SevenDay => "7day",
            Mode::FourteenDay => "14day",
        }
    }

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            Mode::Daily => "Daily",
            Mode::Total => "Total",
            Mode::SevenDay => "7-Day Average",
            Mode::FourteenDay => "14-Day Average",
        }
    }

    /// Parse a boundary token. Never substitutes a default.
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "daily" => Ok(Mode::Daily),
            "total" => Ok(Mode::Total),
            "7day" => Ok(Mode::SevenDay),
            "14day" => Ok(Mode::FourteenDay),
            other => Err(TrendsError::UnknownMode(other.to_string())),
        }
    }
}

/// Where a region sits in the nation/state/county hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionLevel {
    Nation,
    State,
    County,
}

/// An immutable (date, value) observation with day-level granularity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimePoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Ordered-by-date cumulative counts for one region and one base metric.
///
/// Borrowing view over a `RegionStore` column. Dates are strictly increasing
/// with no duplicates; calendar gaps are NOT interpolated; the engine
/// operates positionally over the date-sorted sequence.
#[derive(Debug, Clone, Copy)]
pub struct RawSeries<'a> {
    pub dates: &'a [NaiveDate],
    pub values: &'a [f64],
}

impl RawSeries<'_> {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// The four same-length, date-aligned sequences derived from one raw series.
///
/// Computed once at load time and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedSeries {
    /// Shared date axis (identical for all four sequences).
    pub dates: Vec<NaiveDate>,
    /// First difference of the cumulative sequence, post-correction.
    pub daily: Vec<f64>,
    /// Trailing 7-point mean of `daily`, zero-padded at the series start.
    pub seven_day_avg: Vec<f64>,
    /// Trailing 14-point mean of `daily`, zero-padded at the series start.
    pub fourteen_day_avg: Vec<f64>,
    /// The raw cumulative sequence, unmodified.
    pub total: Vec<f64>,
}

impl DerivedSeries {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// The mode-selected value sequence.
    pub fn sequence(&self, mode: Mode) -> &[f64] {
        match mode {
            Mode::Daily => &self.daily,
            Mode::Total => &self.total,
            Mode::SevenDay => &self.seven_day_avg,
            Mode::FourteenDay => &self.fourteen_day_avg,
        }
    }
}

/// A plottable series: equal-length ordered `dates` and `values`, suitable
/// for direct hand-off to any charting layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotSeries {
    pub dates: Vec<NaiveDate>,
    pub values: Vec<f64>,
}

impl PlotSeries {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Iterate the series as (date, value) observations.
    pub fn points(&self) -> impl Iterator<Item = TimePoint> + '_ {
        self.dates
            .iter()
            .zip(self.values.iter())
            .map(|(&date, &value)| TimePoint { date, value })
    }
}

/// Holiday-reporting correction policy.
///
/// Certain reporting dates bundle two days of real-world activity into a
/// single reported day because the source agency does not report on major
/// holidays. For each configured date the deriver splits the inflated daily
/// value across the anomaly day and the silent preceding day.
///
/// The list is a seasonal, hand-maintained configuration input (versioned
/// data, not algorithm), so future seasons can be supplied as JSON without
/// touching the derivation code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnomalyCalendar {
    /// Reporting dates that carry two days of activity.
    pub dates: Vec<NaiveDate>,
    /// Fraction of the inflated value assigned to each of the two days.
    pub split: f64,
}

/// 2020-21 season: the source agency skipped reporting on Thanksgiving,
/// Christmas, and New Year's Day, so the following day carries both.
const SEASON_2020_21: [(i32, u32, u32); 3] = [(2020, 11, 27), (2020, 12, 26), (2021, 1, 2)];

impl Default for AnomalyCalendar {
    fn default() -> Self {
        Self {
            dates: SEASON_2020_21
                .iter()
                .filter_map(|&(y, m, d)| NaiveDate::from_ymd_opt(y, m, d))
                .collect(),
            split: 0.5,
        }
    }
}

impl AnomalyCalendar {
    /// An empty calendar: disables the correction entirely.
    pub fn none() -> Self {
        Self {
            dates: Vec::new(),
            split: 0.5,
        }
    }

    /// Load a calendar from a JSON file (`{"dates": [...], "split": 0.5}`).
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path).map_err(|source| TrendsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let calendar: AnomalyCalendar = serde_json::from_reader(file)?;
        Ok(calendar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_and_mode_tokens_round_trip() {
        for metric in [Metric::Cases, Metric::Deaths] {
            assert_eq!(Metric::parse(metric.name()).unwrap(), metric);
        }
        for mode in [Mode::Daily, Mode::Total, Mode::SevenDay, Mode::FourteenDay] {
            assert_eq!(Mode::parse(mode.name()).unwrap(), mode);
        }
    }

    #[test]
    fn unknown_tokens_are_rejected_not_defaulted() {
        assert!(matches!(
            Metric::parse("recoveries"),
            Err(TrendsError::UnknownMetric(_))
        ));
        assert!(matches!(
            Mode::parse("weekly"),
            Err(TrendsError::UnknownMode(_))
        ));
    }

    #[test]
    fn default_calendar_covers_the_2020_21_season() {
        let calendar = AnomalyCalendar::default();
        assert_eq!(calendar.dates.len(), 3);
        assert_eq!(calendar.split, 0.5);
        assert_eq!(
            calendar.dates[0],
            NaiveDate::from_ymd_opt(2020, 11, 27).unwrap()
        );
    }
}
