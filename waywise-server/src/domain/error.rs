//! Domain error types.
//!
//! These errors represent validation failures when building catalog rows.
//! They are distinct from I/O and parse errors, which live with the loader.

use super::{CostField, Location};

/// Validation failures for a single travel option.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidOption {
    /// A cost was negative, NaN or infinite
    #[error("{} must be a non-negative finite number, got {value}", .field.column())]
    InvalidCost { field: CostField, value: f64 },

    /// Origin and destination are the same place
    #[error("origin and destination are both {0}")]
    SameEndpoints(Location),
}
