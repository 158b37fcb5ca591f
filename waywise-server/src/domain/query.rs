//! Structured travel queries.

use serde::{Deserialize, Serialize};

/// The structured `{origin, destination, priority}` triple a front end hands
/// to the recommender.
///
/// Fields are raw user text. Locations are resolved fuzzily and the
/// priority is parsed only once the route is known to exist.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TravelQuery {
    pub origin: String,
    pub destination: String,
    pub priority: String,
}

impl TravelQuery {
    /// Create a new query.
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        priority: impl Into<String>,
    ) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            priority: priority.into(),
        }
    }
}
