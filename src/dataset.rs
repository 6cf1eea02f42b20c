//! The immutable dataset arena and the query facade.
//!
//! A `Dataset` is built once at process start: the three input tables are
//! read, every region is registered in the catalog, and all derived series
//! are computed eagerly, not lazily per query. After construction nothing
//! is mutated, so the query path is plain reads and may be called
//! concurrently without synchronization.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use rayon::prelude::*;
use tracing::info;

use crate::catalog::{county_key, county_label, RegionCatalog};
use crate::derive::derive_series;
use crate::domain::{AnomalyCalendar, DerivedSeries, Metric, Mode, PlotSeries, RegionLevel};
use crate::error::{Result, TrendsError};
use crate::io::ingest;
use crate::store::{CumulativeRow, RegionStore};

/// Boundary key for the national series.
pub const NATION_KEY: &str = "US";
const NATION_LABEL: &str = "United States";

/// Both metrics' derived series for one region.
#[derive(Debug)]
struct RegionSeries {
    cases: DerivedSeries,
    deaths: DerivedSeries,
}

impl RegionSeries {
    fn metric(&self, metric: Metric) -> &DerivedSeries {
        match metric {
            Metric::Cases => &self.cases,
            Metric::Deaths => &self.deaths,
        }
    }
}

/// Catalog plus one precomputed `DerivedSeries` per (region, metric).
#[derive(Debug)]
pub struct Dataset {
    catalog: RegionCatalog,
    derived: HashMap<String, RegionSeries>,
}

impl Dataset {
    /// Load `us.csv`, `us-states.csv`, and `us-counties.csv` from `dir` and
    /// build the derived arena.
    ///
    /// Registration order is nation, then states, then counties, so the
    /// selectable listing mirrors the input tables.
    pub fn load_dir(dir: &Path, calendar: &AnomalyCalendar) -> Result<Self> {
        let national = ingest::read_national(&dir.join("us.csv"))?;
        let states = ingest::read_states(&dir.join("us-states.csv"))?;
        let counties = ingest::read_counties(&dir.join("us-counties.csv"))?;

        let mut catalog = RegionCatalog::new();

        let national_rows: Vec<CumulativeRow> = national.iter().map(CumulativeRow::from).collect();
        catalog.register(
            NATION_KEY,
            NATION_LABEL,
            RegionLevel::Nation,
            None,
            RegionStore::load(&national_rows)?,
        )?;

        for (state, rows) in ingest::group_states(&states) {
            let store = RegionStore::load(&rows)?;
            catalog.register(state.clone(), state, RegionLevel::State, Some(NATION_KEY), store)?;
        }

        for ((state, county), rows) in ingest::group_counties(&counties) {
            let store = RegionStore::load(&rows)?;
            catalog.register(
                county_key(&county, &state),
                county_label(&county, &state),
                RegionLevel::County,
                Some(state.as_str()),
                store,
            )?;
        }

        Self::from_catalog(catalog, calendar)
    }

    /// Eagerly derive every region's series from a populated catalog.
    ///
    /// Regions are independent: each derivation reads only its own store
    /// and fills only its own slot, so the computation fans out across
    /// regions with no locking beyond the final collect.
    pub fn from_catalog(catalog: RegionCatalog, calendar: &AnomalyCalendar) -> Result<Self> {
        let derived: HashMap<String, RegionSeries> = catalog
            .iter()
            .collect::<Vec<_>>()
            .into_par_iter()
            .map(|entry| {
                let store = entry.store();
                let cases = derive_series(&store.raw_series(Metric::Cases), calendar)?;
                let deaths = derive_series(&store.raw_series(Metric::Deaths), calendar)?;
                Ok((entry.key.clone(), RegionSeries { cases, deaths }))
            })
            .collect::<Result<_>>()?;

        info!(regions = derived.len(), "derived series for all regions");
        Ok(Self { catalog, derived })
    }

    pub fn catalog(&self) -> &RegionCatalog {
        &self.catalog
    }

    /// The query facade: one plottable series per requested region.
    ///
    /// Fails with `UnknownRegion` for an unregistered key and never silently
    /// substitutes a default. (Invalid metric/mode tokens are rejected at
    /// the string boundary by `Metric::parse` / `Mode::parse`.)
    ///
    /// Each returned series shares the date axis of its source raw series;
    /// regions with shorter history simply produce shorter series. No
    /// padding or alignment across regions.
    pub fn query<I, S>(
        &self,
        region_keys: I,
        metric: Metric,
        mode: Mode,
    ) -> Result<BTreeMap<String, PlotSeries>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out = BTreeMap::new();
        for key in region_keys {
            let key = key.as_ref();
            let series = self
                .derived
                .get(key)
                .ok_or_else(|| TrendsError::UnknownRegion(key.to_string()))?;
            let derived = series.metric(metric);
            out.insert(
                key.to_string(),
                PlotSeries {
                    dates: derived.dates.clone(),
                    values: derived.sequence(mode).to_vec(),
                },
            );
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn catalog_with_us(values: &[(f64, f64)]) -> RegionCatalog {
        let first = NaiveDate::from_ymd_opt(2020, 3, 1).unwrap();
        let rows: Vec<CumulativeRow> = values
            .iter()
            .enumerate()
            .map(|(i, &(cases, deaths))| CumulativeRow {
                date: first + chrono::Days::new(i as u64),
                cases,
                deaths,
            })
            .collect();

        let mut catalog = RegionCatalog::new();
        catalog
            .register(
                NATION_KEY,
                NATION_LABEL,
                RegionLevel::Nation,
                None,
                RegionStore::load(&rows).unwrap(),
            )
            .unwrap();
        catalog
    }

    #[test]
    fn total_mode_is_an_identity_passthrough() {
        let catalog = catalog_with_us(&[(10.0, 1.0), (15.0, 2.0), (13.0, 2.0), (20.0, 3.0)]);
        let dataset = Dataset::from_catalog(catalog, &AnomalyCalendar::none()).unwrap();

        let results = dataset.query(["US"], Metric::Cases, Mode::Total).unwrap();
        let series = &results["US"];
        // Element-for-element identical to the ingested cumulative column,
        // unmodified, even though daily was clamped at index 2.
        assert_eq!(series.values, vec![10.0, 15.0, 13.0, 20.0]);
        assert_eq!(series.dates.len(), series.values.len());
    }

    #[test]
    fn query_selects_metric_and_mode() {
        let catalog = catalog_with_us(&[(10.0, 1.0), (15.0, 2.0)]);
        let dataset = Dataset::from_catalog(catalog, &AnomalyCalendar::none()).unwrap();

        let daily_deaths = dataset.query(["US"], Metric::Deaths, Mode::Daily).unwrap();
        assert_eq!(daily_deaths["US"].values, vec![1.0, 1.0]);

        let avg = dataset
            .query(["US"], Metric::Cases, Mode::SevenDay)
            .unwrap();
        assert!((avg["US"].values[0] - 10.0 / 7.0).abs() < 1e-12);
    }

    #[test]
    fn unknown_region_fails_the_whole_query() {
        let catalog = catalog_with_us(&[(10.0, 1.0)]);
        let dataset = Dataset::from_catalog(catalog, &AnomalyCalendar::none()).unwrap();

        let err = dataset
            .query(["US", "Atlantis"], Metric::Cases, Mode::Daily)
            .unwrap_err();
        assert!(matches!(err, TrendsError::UnknownRegion(key) if key == "Atlantis"));
    }

    #[test]
    fn empty_region_fails_at_build_time_not_query_time() {
        let catalog = catalog_with_us(&[]);
        let err = Dataset::from_catalog(catalog, &AnomalyCalendar::none()).unwrap_err();
        assert!(matches!(err, TrendsError::InsufficientData));
    }
}
