//! Matching user text to catalog locations.

use serde::Serialize;
use tracing::debug;

use crate::domain::Location;

use super::score::similarity;

/// Default confidence a match must exceed to be accepted.
pub const DEFAULT_THRESHOLD: u8 = 70;

/// Default minimum score for autocomplete suggestions.
pub const DEFAULT_SUGGESTION_THRESHOLD: u8 = 50;

/// Configuration for location resolution.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// A match is accepted only if its score is strictly greater than this.
    pub threshold: u8,

    /// Suggestions scoring below this are not offered.
    pub suggestion_threshold: u8,
}

impl ResolverConfig {
    /// Create a config with the given acceptance threshold.
    pub fn new(threshold: u8) -> Self {
        Self {
            threshold,
            ..Self::default()
        }
    }

    /// Set the suggestion threshold.
    pub fn with_suggestion_threshold(mut self, threshold: u8) -> Self {
        self.suggestion_threshold = threshold;
        self
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            suggestion_threshold: DEFAULT_SUGGESTION_THRESHOLD,
        }
    }
}

/// A candidate location and how well it matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationMatch {
    pub location: Location,
    pub score: u8,
}

/// Resolves free-form location text against a candidate set.
#[derive(Debug, Clone, Default)]
pub struct LocationResolver {
    config: ResolverConfig,
}

impl LocationResolver {
    /// Create a resolver with the given configuration.
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Find the best-scoring candidate for `input`.
    ///
    /// Returns `None` if no candidate scores above the threshold. When
    /// several candidates share the best score, the first one in
    /// `candidates` wins.
    pub fn resolve(&self, input: &str, candidates: &[Location]) -> Option<LocationMatch> {
        let best = best_match(input, candidates)?;

        if best.score > self.config.threshold {
            debug!(input, matched = %best.location, score = best.score, "resolved location");
            Some(best)
        } else {
            debug!(
                input,
                closest = %best.location,
                score = best.score,
                threshold = self.config.threshold,
                "location below match threshold"
            );
            None
        }
    }

    /// Rank candidates against a partial query, best first.
    ///
    /// Only candidates at or above the suggestion threshold are returned.
    /// Equal scores keep candidate order.
    pub fn search(&self, query: &str, candidates: &[Location], limit: usize) -> Vec<LocationMatch> {
        let mut matches: Vec<LocationMatch> = candidates
            .iter()
            .map(|c| LocationMatch {
                location: c.clone(),
                score: similarity(query, c.as_str()),
            })
            .filter(|m| m.score >= self.config.suggestion_threshold)
            .collect();

        matches.sort_by(|a, b| b.score.cmp(&a.score));
        matches.truncate(limit);
        matches
    }
}

/// The highest-scoring candidate, first one on ties. A candidate spelled
/// exactly like the trimmed input wins outright. `None` only if
/// `candidates` is empty.
fn best_match(input: &str, candidates: &[Location]) -> Option<LocationMatch> {
    let exact = input.trim();
    if let Some(candidate) = candidates.iter().find(|c| c.as_str() == exact) {
        return Some(LocationMatch {
            location: candidate.clone(),
            score: 100,
        });
    }

    let mut best: Option<LocationMatch> = None;

    for candidate in candidates {
        let score = similarity(input, candidate.as_str());
        if best.as_ref().is_none_or(|b| score > b.score) {
            best = Some(LocationMatch {
                location: candidate.clone(),
                score,
            });
            if score == 100 {
                break;
            }
        }
    }

    best
}

/// Resolve with the default threshold.
pub fn resolve(input: &str, candidates: &[Location]) -> Option<LocationMatch> {
    LocationResolver::default().resolve(input, candidates)
}
