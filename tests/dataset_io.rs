//! End-to-end tests: write the three dataset shapes to disk, load a
//! `Dataset`, and query it the way a presentation shell would.

use std::fs;
use std::path::Path;

use covid_trends::dataset::{Dataset, NATION_KEY};
use covid_trends::domain::{AnomalyCalendar, Metric, Mode};
use covid_trends::error::TrendsError;
use covid_trends::io::export::write_series_csv;
use tempfile::TempDir;

const US_CSV: &str = "\
date,cases,deaths
2020-11-24,100,10
2020-11-25,150,12
2020-11-26,160,12
2020-11-27,260,18
2020-11-28,280,19
";

const STATES_CSV: &str = "\
date,state,fips,cases,deaths
2020-11-24,Washington,53,50,5
2020-11-24,New Hampshire,33,30,2
2020-11-24,Maryland,24,90,9
2020-11-25,Washington,53,70,6
2020-11-25,New Hampshire,33,28,2
2020-11-25,Maryland,24,95,9
";

const COUNTIES_CSV: &str = "\
date,county,state,fips,cases,deaths
2020-11-24,Rockingham,New Hampshire,33015,10,1
2020-11-25,Rockingham,New Hampshire,33015,16,1
2020-11-24,Baltimore city,Maryland,24510,40,4
2020-11-25,Baltimore city,Maryland,24510,47,5
";

fn write_dataset(dir: &Path) {
    fs::write(dir.join("us.csv"), US_CSV).unwrap();
    fs::write(dir.join("us-states.csv"), STATES_CSV).unwrap();
    fs::write(dir.join("us-counties.csv"), COUNTIES_CSV).unwrap();
}

fn load(calendar: &AnomalyCalendar) -> (TempDir, Dataset) {
    let dir = TempDir::new().unwrap();
    write_dataset(dir.path());
    let dataset = Dataset::load_dir(dir.path(), calendar).unwrap();
    (dir, dataset)
}

#[test]
fn catalog_lists_nation_states_then_counties_in_input_order() {
    let (_dir, dataset) = load(&AnomalyCalendar::none());

    let listed: Vec<(String, String)> = dataset
        .catalog()
        .list_selectable()
        .map(|(k, l)| (k.to_string(), l.to_string()))
        .collect();

    assert_eq!(
        listed,
        vec![
            ("US".to_string(), "United States".to_string()),
            ("Washington".to_string(), "Washington".to_string()),
            ("New Hampshire".to_string(), "New Hampshire".to_string()),
            ("Maryland".to_string(), "Maryland".to_string()),
            (
                "Rockingham-New Hampshire".to_string(),
                "Rockingham, New Hampshire".to_string()
            ),
            (
                "Baltimore city-Maryland".to_string(),
                "Baltimore, Maryland".to_string()
            ),
        ]
    );
}

#[test]
fn national_total_matches_the_ingested_column_exactly() {
    let (_dir, dataset) = load(&AnomalyCalendar::default());

    let results = dataset
        .query([NATION_KEY], Metric::Cases, Mode::Total)
        .unwrap();
    assert_eq!(
        results[NATION_KEY].values,
        vec![100.0, 150.0, 160.0, 260.0, 280.0]
    );
}

#[test]
fn holiday_split_applies_end_to_end() {
    let (_dir, dataset) = load(&AnomalyCalendar::default());

    // Uncorrected daily is [100, 50, 10, 100, 20]; 2020-11-27 is the day
    // after Thanksgiving, so its 100 is split with the silent 2020-11-26.
    let results = dataset
        .query([NATION_KEY], Metric::Cases, Mode::Daily)
        .unwrap();
    assert_eq!(
        results[NATION_KEY].values,
        vec![100.0, 50.0, 50.0, 50.0, 20.0]
    );
}

#[test]
fn custom_calendar_json_overrides_the_season() {
    let dir = TempDir::new().unwrap();
    write_dataset(dir.path());

    let calendar_path = dir.path().join("calendar.json");
    fs::write(
        &calendar_path,
        r#"{"dates": ["2020-11-26"], "split": 0.5}"#,
    )
    .unwrap();

    let calendar = AnomalyCalendar::from_json_file(&calendar_path).unwrap();
    let dataset = Dataset::load_dir(dir.path(), &calendar).unwrap();

    let results = dataset
        .query([NATION_KEY], Metric::Cases, Mode::Daily)
        .unwrap();
    assert_eq!(
        results[NATION_KEY].values,
        vec![100.0, 5.0, 5.0, 100.0, 20.0]
    );
}

#[test]
fn downward_state_revision_is_clamped_uniformly() {
    // The corrected behavior applies to every region, not just `US`:
    // New Hampshire revises 30 -> 28, which clamps to zero.
    let (_dir, dataset) = load(&AnomalyCalendar::default());

    let results = dataset
        .query(["New Hampshire"], Metric::Cases, Mode::Daily)
        .unwrap();
    assert_eq!(results["New Hampshire"].values, vec![30.0, 0.0]);
}

#[test]
fn regions_keep_their_own_date_axes() {
    let (_dir, dataset) = load(&AnomalyCalendar::none());

    let results = dataset
        .query(
            [NATION_KEY, "Rockingham-New Hampshire"],
            Metric::Deaths,
            Mode::FourteenDay,
        )
        .unwrap();

    // Shorter history produces a shorter series; no cross-region padding.
    assert_eq!(results[NATION_KEY].len(), 5);
    assert_eq!(results["Rockingham-New Hampshire"].len(), 2);
    for series in results.values() {
        assert_eq!(series.dates.len(), series.values.len());
    }
}

#[test]
fn county_query_uses_the_composite_key_grammar() {
    let (_dir, dataset) = load(&AnomalyCalendar::none());

    let results = dataset
        .query(["Baltimore city-Maryland"], Metric::Cases, Mode::Daily)
        .unwrap();
    assert_eq!(results["Baltimore city-Maryland"].values, vec![40.0, 7.0]);
}

#[test]
fn export_writes_one_row_per_observation() {
    let (dir, dataset) = load(&AnomalyCalendar::none());

    let results = dataset
        .query([NATION_KEY], Metric::Deaths, Mode::Total)
        .unwrap();
    let out_path = dir.path().join("out.csv");
    write_series_csv(&out_path, &results).unwrap();

    let written = fs::read_to_string(&out_path).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines[0], "region,date,value");
    assert_eq!(lines[1], "US,2020-11-24,10");
    assert_eq!(lines.len(), 1 + 5);
}

#[test]
fn non_numeric_count_aborts_the_load() {
    let dir = TempDir::new().unwrap();
    write_dataset(dir.path());
    fs::write(
        dir.path().join("us.csv"),
        "date,cases,deaths\n2020-11-24,lots,10\n",
    )
    .unwrap();

    let err = Dataset::load_dir(dir.path(), &AnomalyCalendar::default()).unwrap_err();
    assert!(matches!(err, TrendsError::MalformedInput(_)));
}

#[test]
fn missing_file_surfaces_as_io_error() {
    let dir = TempDir::new().unwrap();
    // No files written at all.
    let err = Dataset::load_dir(dir.path(), &AnomalyCalendar::default()).unwrap_err();
    assert!(matches!(err, TrendsError::Io { .. }));
}
