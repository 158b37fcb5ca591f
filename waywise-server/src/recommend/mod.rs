//! Travel mode recommendation.
//!
//! Given raw origin/destination text and a priority, resolves both ends
//! against the catalog, filters to the exact OD pair, and picks the row
//! with the lowest value on the priority's cost field.

mod engine;
mod rank;

pub use engine::{Recommendation, RecommendError, RecommendationResult, Recommender};
pub use rank::{best_by, rank_by};
