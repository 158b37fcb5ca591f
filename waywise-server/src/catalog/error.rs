//! Catalog load error types.

use crate::domain::{Location, TravelMode};

/// Errors that make a catalog unusable.
///
/// These are data-integrity faults raised while loading, never outcomes of
/// a recommendation.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Reading the source failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV could not be read or a row could not be decoded
    #[error("CSV error{}: {message}", .row.map(|r| format!(" at row {r}")).unwrap_or_default())]
    Csv { row: Option<u64>, message: String },

    /// A row decoded but failed validation
    #[error("invalid row {row}: {reason}")]
    InvalidRow { row: usize, reason: String },

    /// Two rows describe the same mode for the same OD pair
    #[error("row {row}: duplicate {mode} option from {origin} to {destination}")]
    DuplicateMode {
        row: usize,
        origin: Location,
        destination: Location,
        mode: TravelMode,
    },

    /// The catalog has no rows
    #[error("catalog is empty")]
    Empty,
}

impl From<csv::Error> for CatalogError {
    fn from(err: csv::Error) -> Self {
        let row = err.position().map(|p| p.record());
        CatalogError::Csv {
            row,
            message: err.to_string(),
        }
    }
}
