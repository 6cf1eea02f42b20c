//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - boundary enums (`Metric`, `Mode`, `RegionLevel`)
//! - series representations (`RawSeries`, `DerivedSeries`, `PlotSeries`)
//! - the holiday-correction policy (`AnomalyCalendar`)

pub mod types;

pub use types::*;
