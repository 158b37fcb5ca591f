//! Fuzzy location resolution.
//!
//! Maps free-form location text ("tims sqr", "central park") onto the
//! canonical names present in the catalog. Origins and destinations are
//! resolved against their own candidate sets.

mod resolver;
pub mod score;

pub use resolver::{
    DEFAULT_SUGGESTION_THRESHOLD, DEFAULT_THRESHOLD, LocationMatch, LocationResolver,
    ResolverConfig, resolve,
};
pub use score::similarity;
