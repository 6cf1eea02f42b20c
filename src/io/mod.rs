//! Input/output helpers.
//!
//! - CSV ingest + validation (`ingest`)
//! - query result exports (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
