//! Error types for the trends engine.
//!
//! Every variant marks a caller or data contract violation detected
//! synchronously at load time (the input group) or query time (the lookup
//! group). Nothing here is retried, and the engine performs no recovery
//! beyond the documented holiday-split and negativity-clamp corrections.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum TrendsError {
    /// Input rows violate the dataset contract: a missing or non-numeric
    /// field, an unparseable date, or dates that are not strictly increasing
    /// within one region.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("cannot derive series from an empty raw series")]
    InsufficientData,

    #[error("unknown region key `{0}`")]
    UnknownRegion(String),

    #[error("unknown metric `{0}` (expected `cases` or `deaths`)")]
    UnknownMetric(String),

    #[error("unknown mode `{0}` (expected `daily`, `total`, `7day`, or `14day`)")]
    UnknownMode(String),

    #[error("duplicate region key `{0}`")]
    DuplicateRegion(String),

    #[error("region `{key}` requires parent `{parent}` to be registered first")]
    UnknownParent { key: String, parent: String },

    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TrendsError {
    /// Process exit code for the `trends` binary.
    ///
    /// 2 = caller misuse (bad key/metric/mode), 3 = data contract violation,
    /// 4 = I/O or serialization failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            TrendsError::UnknownRegion(_)
            | TrendsError::UnknownMetric(_)
            | TrendsError::UnknownMode(_) => 2,
            TrendsError::MalformedInput(_)
            | TrendsError::InsufficientData
            | TrendsError::DuplicateRegion(_)
            | TrendsError::UnknownParent { .. } => 3,
            TrendsError::Io { .. } | TrendsError::Csv(_) | TrendsError::Json(_) => 4,
        }
    }
}

pub type Result<T> = std::result::Result<T, TrendsError>;
