//! Domain types for the travel mode recommender.
//!
//! This module contains the core domain model types that represent
//! validated catalog data. All types enforce their invariants at
//! construction time, so code that receives these types can trust their
//! validity.

mod error;
mod location;
mod mode;
mod option;
mod priority;
mod query;

pub use error::InvalidOption;
pub use location::{InvalidLocation, Location};
pub use mode::{InvalidMode, TravelMode};
pub use option::{Costs, TravelOption};
pub use priority::{CostField, Priority, UnknownPriority};
pub use query::TravelQuery;
