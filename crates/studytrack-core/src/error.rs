//! Status source error types.
//!
//! Scoring itself never fails; these errors only cover fetching status
//! records from the data layer.

use thiserror::Error;

/// Errors that can occur when fetching status records.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The backing store does not exist (missing file, unknown table).
    #[error("status source not found: {0}")]
    NotFound(String),

    /// A page could not be decoded.
    #[error("malformed status records: {0}")]
    Malformed(String),

    /// The source could not be reached right now.
    #[error("status source unavailable: {0}")]
    Unavailable(String),
}

impl SourceError {
    /// Returns `true` if retrying the same fetch cannot succeed.
    pub fn is_permanent(&self) -> bool {
        matches!(self, SourceError::NotFound(_) | SourceError::Malformed(_))
    }
}
