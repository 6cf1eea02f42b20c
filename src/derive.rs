//! The series derivation core.
//!
//! `derive_series` turns one region's raw cumulative sequence into the four
//! aligned derived sequences. The policy is deliberately explicit and runs
//! in a fixed order, because later steps read the output of earlier ones:
//!
//! 1. first difference, with `total[-1]` defined as 0
//! 2. holiday-split correction (reads and rewrites `daily`)
//! 3. negativity clamp (lossy; the negative delta is discarded)
//! 4. trailing 7/14-point means with a fixed divisor
//! 5. `total` passes through untouched
//!
//! The fixed divisor means averages near the series start are computed as if
//! the missing history were zeros. Early values are therefore depressed;
//! that is accepted behavior, not something to silently fix.

use chrono::NaiveDate;

use crate::domain::{AnomalyCalendar, DerivedSeries, RawSeries};
use crate::error::{Result, TrendsError};

const SEVEN_DAY_WINDOW: usize = 7;
const FOURTEEN_DAY_WINDOW: usize = 14;

/// Derive the four aligned sequences from one raw cumulative series.
///
/// Pure: same input always yields the same output, and the input is never
/// mutated. Fails with `InsufficientData` on an empty series.
pub fn derive_series(raw: &RawSeries<'_>, calendar: &AnomalyCalendar) -> Result<DerivedSeries> {
    if raw.is_empty() {
        return Err(TrendsError::InsufficientData);
    }

    let mut daily = first_difference(raw.values);
    apply_holiday_split(&mut daily, raw.dates, calendar);
    clamp_negative(&mut daily);

    let seven_day_avg = trailing_mean(&daily, SEVEN_DAY_WINDOW);
    let fourteen_day_avg = trailing_mean(&daily, FOURTEEN_DAY_WINDOW);

    Ok(DerivedSeries {
        dates: raw.dates.to_vec(),
        daily,
        seven_day_avg,
        fourteen_day_avg,
        total: raw.values.to_vec(),
    })
}

/// `daily[t] = total[t] - total[t-1]`, with an implicit leading zero.
fn first_difference(values: &[f64]) -> Vec<f64> {
    let mut prev = 0.0;
    values
        .iter()
        .map(|&v| {
            let delta = v - prev;
            prev = v;
            delta
        })
        .collect()
}

/// Split each configured anomaly day's value across itself and the
/// positionally preceding (silent) day.
///
/// The previous value of `daily[t-1]` is discarded, not added to. An anomaly
/// date at position 0 has no predecessor and is left untouched. Must run
/// before the negativity clamp and the rolling averages, which both read the
/// corrected `daily`.
fn apply_holiday_split(daily: &mut [f64], dates: &[NaiveDate], calendar: &AnomalyCalendar) {
    for anomaly in &calendar.dates {
        let Ok(t) = dates.binary_search(anomaly) else {
            continue;
        };
        if t == 0 {
            continue;
        }
        let share = daily[t] * calendar.split;
        daily[t] = share;
        daily[t - 1] = share;
    }
}

/// Clamp downward revisions to zero. Irreversible: the negative delta is
/// not redistributed to neighboring days.
fn clamp_negative(daily: &mut [f64]) {
    for v in daily.iter_mut() {
        if *v < 0.0 {
            *v = 0.0;
        }
    }
}

/// Trailing mean over a fixed-width window ending at each index.
///
/// Indices before the series start contribute 0 and the divisor stays at
/// `window`, so the output is exactly as long as the input.
fn trailing_mean(values: &[f64], window: usize) -> Vec<f64> {
    let mut sum = 0.0;
    (0..values.len())
        .map(|t| {
            sum += values[t];
            if t >= window {
                sum -= values[t - window];
            }
            sum / window as f64
        })
        .collect()
}
