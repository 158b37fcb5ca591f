//! The in-memory catalog.

use std::collections::HashSet;

use crate::domain::{Location, TravelMode, TravelOption};

use super::error::CatalogError;

/// An immutable, ordered collection of travel options.
///
/// Built once at startup and only read afterwards. Construction checks that
/// no OD pair has two rows for the same mode, so the catalog can be shared
/// between request handlers behind an `Arc` without locking.
#[derive(Debug, Clone)]
pub struct Catalog {
    options: Vec<TravelOption>,
    origins: Vec<Location>,
    destinations: Vec<Location>,
}

impl Catalog {
    /// Build a catalog from rows in their original order.
    pub fn new(options: Vec<TravelOption>) -> Result<Self, CatalogError> {
        if options.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen: HashSet<(&Location, &Location, TravelMode)> = HashSet::new();
        for (i, option) in options.iter().enumerate() {
            if !seen.insert((option.origin(), option.destination(), option.mode())) {
                return Err(CatalogError::DuplicateMode {
                    row: i + 1,
                    origin: option.origin().clone(),
                    destination: option.destination().clone(),
                    mode: option.mode(),
                });
            }
        }

        let origins = distinct(options.iter().map(TravelOption::origin));
        let destinations = distinct(options.iter().map(TravelOption::destination));

        Ok(Self {
            options,
            origins,
            destinations,
        })
    }

    /// All rows, in catalog order.
    pub fn options(&self) -> &[TravelOption] {
        &self.options
    }

    /// Distinct origins, in order of first appearance.
    pub fn origins(&self) -> &[Location] {
        &self.origins
    }

    /// Distinct destinations, in order of first appearance.
    pub fn destinations(&self) -> &[Location] {
        &self.destinations
    }

    /// Every distinct location: origins first, then destinations that never
    /// appear as an origin.
    pub fn locations(&self) -> Vec<Location> {
        distinct(self.origins.iter().chain(&self.destinations))
    }

    /// Rows for exactly this OD pair, in catalog order.
    pub fn routes<'s, 'q>(
        &'s self,
        origin: &'q Location,
        destination: &'q Location,
    ) -> impl Iterator<Item = &'s TravelOption> {
        self.options
            .iter()
            .filter(move |o| o.serves(origin, destination))
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Whether the catalog has no rows.
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

/// Distinct values in first-appearance order.
fn distinct<'a>(locations: impl Iterator<Item = &'a Location>) -> Vec<Location> {
    let mut seen = HashSet::new();
    locations
        .filter(|l| seen.insert(*l))
        .cloned()
        .collect()
}
