//! The recommendation pipeline: resolve, filter, rank.

use serde::Serialize;
use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::domain::{Location, Priority, TravelOption, TravelQuery};
use crate::resolve::{LocationMatch, LocationResolver};

use super::rank::{best_by, rank_by};

/// Why a recommendation could not be made.
///
/// These are ordinary outcomes the user can fix by changing their input,
/// not faults.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecommendError {
    /// One or both locations matched nothing in the catalog.
    /// Holds the raw text of each side that failed.
    #[error("{}", describe_unresolved(.origin.as_deref(), .destination.as_deref()))]
    UnresolvedLocation {
        origin: Option<String>,
        destination: Option<String>,
    },

    /// Both locations matched, but the catalog has no rows for the pair
    #[error("no travel options are recorded from {origin} to {destination}")]
    NoRouteData {
        origin: Location,
        destination: Location,
    },

    /// The priority is not one of the four supported values
    #[error(
        "unknown priority {0:?}; choose one of lowest_cost, minimal_walking, shortest_time or least_environmental_cost"
    )]
    UnknownPriority(String),
}

fn describe_unresolved(origin: Option<&str>, destination: Option<&str>) -> String {
    match (origin, destination) {
        (Some(o), Some(d)) => {
            format!("couldn't match origin {o:?} or destination {d:?} to a known location")
        }
        (Some(o), None) => format!("couldn't match origin {o:?} to a known location"),
        (None, Some(d)) => format!("couldn't match destination {d:?} to a known location"),
        (None, None) => "couldn't match the locations to known places".to_string(),
    }
}

impl RecommendError {
    /// Stable machine-readable code for this error.
    pub fn reason(&self) -> &'static str {
        match self {
            RecommendError::UnresolvedLocation { .. } => "unresolved_location",
            RecommendError::NoRouteData { .. } => "no_route_data",
            RecommendError::UnknownPriority(_) => "unknown_priority",
        }
    }

    /// What the user can do next.
    pub fn hint(&self) -> &'static str {
        match self {
            RecommendError::UnresolvedLocation { .. } => {
                "Try rephrasing the location, or pick one from the suggestions."
            }
            RecommendError::NoRouteData { .. } => "Try a different origin or destination.",
            RecommendError::UnknownPriority(_) => {
                "Pick one of: lowest_cost, minimal_walking, shortest_time, least_environmental_cost."
            }
        }
    }
}

/// A successful recommendation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    /// The catalog origin the input resolved to.
    pub origin: LocationMatch,
    /// The catalog destination the input resolved to.
    pub destination: LocationMatch,
    pub priority: Priority,
    /// The best option for the priority.
    pub option: TravelOption,
    /// The other options for the same pair, best first.
    pub alternatives: Vec<TravelOption>,
}

/// Outcome of one recommendation call.
pub type RecommendationResult = Result<Recommendation, RecommendError>;

/// Recommends travel modes from a catalog.
///
/// Borrows the catalog and resolver; construct one per request.
pub struct Recommender<'a> {
    catalog: &'a Catalog,
    resolver: &'a LocationResolver,
}

impl<'a> Recommender<'a> {
    /// Create a recommender over the given catalog.
    pub fn new(catalog: &'a Catalog, resolver: &'a LocationResolver) -> Self {
        Self { catalog, resolver }
    }

    /// Recommend a mode for a raw query.
    ///
    /// Checks run in a fixed order: locations first, then route data, then
    /// the priority. A query with a bad priority and an unknown location
    /// therefore reports the location.
    pub fn recommend(&self, query: &TravelQuery) -> RecommendationResult {
        let (origin, destination, routes) = self.routes(&query.origin, &query.destination)?;

        let priority = Priority::parse(&query.priority).map_err(|e| {
            debug!(priority = %e.0, "unknown priority");
            RecommendError::UnknownPriority(e.0)
        })?;

        self.choose(origin, destination, routes, priority)
    }

    /// Recommend a mode for an already-parsed priority.
    pub fn recommend_with(
        &self,
        origin: &str,
        destination: &str,
        priority: Priority,
    ) -> RecommendationResult {
        let (origin, destination, routes) = self.routes(origin, destination)?;
        self.choose(origin, destination, routes, priority)
    }

    /// Resolve both ends and collect the rows for the pair.
    fn routes(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<(LocationMatch, LocationMatch, Vec<&'a TravelOption>), RecommendError> {
        let catalog: &'a Catalog = self.catalog;

        let origin_match = self.resolver.resolve(origin, catalog.origins());
        let destination_match = self.resolver.resolve(destination, catalog.destinations());

        let (origin_match, destination_match) = match (origin_match, destination_match) {
            (Some(o), Some(d)) => (o, d),
            (o, d) => {
                return Err(RecommendError::UnresolvedLocation {
                    origin: o.is_none().then(|| origin.to_string()),
                    destination: d.is_none().then(|| destination.to_string()),
                });
            }
        };

        let routes: Vec<&'a TravelOption> = catalog
            .routes(&origin_match.location, &destination_match.location)
            .collect();

        if routes.is_empty() {
            debug!(
                origin = %origin_match.location,
                destination = %destination_match.location,
                "no route data for pair"
            );
            return Err(RecommendError::NoRouteData {
                origin: origin_match.location,
                destination: destination_match.location,
            });
        }

        Ok((origin_match, destination_match, routes))
    }

    fn choose(
        &self,
        origin: LocationMatch,
        destination: LocationMatch,
        routes: Vec<&TravelOption>,
        priority: Priority,
    ) -> RecommendationResult {
        let Some(best) = best_by(routes.iter().copied(), priority) else {
            return Err(RecommendError::NoRouteData {
                origin: origin.location,
                destination: destination.location,
            });
        };

        let rest = routes.into_iter().filter(|o| !std::ptr::eq(*o, best)).collect();
        let alternatives: Vec<TravelOption> =
            rank_by(rest, priority).into_iter().cloned().collect();
        let option = best.clone();

        info!(
            origin = %origin.location,
            destination = %destination.location,
            priority = %priority,
            mode = %option.mode(),
            "recommended travel mode"
        );

        Ok(Recommendation {
            origin,
            destination,
            priority,
            option,
            alternatives,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Costs, TravelMode};

    fn loc(s: &str) -> Location {
        Location::parse(s).unwrap()
    }

    fn opt(
        origin: &str,
        destination: &str,
        mode: TravelMode,
        time: f64,
        fare: f64,
        co2: f64,
        energy: f64,
    ) -> TravelOption {
        TravelOption::new(
            loc(origin),
            loc(destination),
            mode,
            Costs::new(time, fare, co2, energy).unwrap(),
        )
        .unwrap()
    }

    /// Central_Park → Times_Square has Drive and Public_transit. Brooklyn_Bridge
    /// is only ever an origin and NYU_Tandon only a destination, and there is
    /// no Times_Square → NYU_Tandon row.
    fn catalog() -> Catalog {
        Catalog::new(vec![
            opt("Central_Park", "Times_Square", TravelMode::Drive, 20.0, 10.0, 18.0, 100.0),
            opt("Central_Park", "Times_Square", TravelMode::PublicTransit, 50.0, 3.0, 2.5, 900.0),
            opt("Times_Square", "Central_Park", TravelMode::CitiBike, 30.0, 4.0, 0.4, 600.0),
            opt("Brooklyn_Bridge", "NYU_Tandon", TravelMode::Drive, 15.0, 9.0, 12.0, 80.0),
        ])
        .unwrap()
    }

    fn recommend(query: TravelQuery) -> RecommendationResult {
        let catalog = catalog();
        let resolver = LocationResolver::default();
        Recommender::new(&catalog, &resolver).recommend(&query)
    }

    #[test]
    fn lowest_cost_picks_transit() {
        let rec = recommend(TravelQuery::new("Central_Park", "Times_Square", "lowest_cost")).unwrap();
        assert_eq!(rec.option.mode(), TravelMode::PublicTransit);
        assert_eq!(rec.priority, Priority::LowestCost);
        assert_eq!(rec.alternatives.len(), 1);
        assert_eq!(rec.alternatives[0].mode(), TravelMode::Drive);
    }

    #[test]
    fn shortest_time_picks_drive() {
        let rec =
            recommend(TravelQuery::new("Central_Park", "Times_Square", "shortest_time")).unwrap();
        assert_eq!(rec.option.mode(), TravelMode::Drive);
    }

    #[test]
    fn typo_resolves_before_ranking() {
        let rec = recommend(TravelQuery::new("central prk", "Tims Sqr", "minimal_walking")).unwrap();
        assert_eq!(rec.origin.location.as_str(), "Central_Park");
        assert_eq!(rec.destination.location.as_str(), "Times_Square");
        assert!(rec.destination.score > 70);
        assert_eq!(rec.option.mode(), TravelMode::Drive);
    }

    #[test]
    fn unresolved_origin() {
        let err = recommend(TravelQuery::new("Antarctica", "Times_Square", "lowest_cost")).unwrap_err();
        assert_eq!(
            err,
            RecommendError::UnresolvedLocation {
                origin: Some("Antarctica".into()),
                destination: None,
            }
        );
        assert_eq!(err.reason(), "unresolved_location");
    }

    #[test]
    fn unresolved_both() {
        let err = recommend(TravelQuery::new("Antarctica", "Atlantis", "lowest_cost")).unwrap_err();
        assert_eq!(
            err,
            RecommendError::UnresolvedLocation {
                origin: Some("Antarctica".into()),
                destination: Some("Atlantis".into()),
            }
        );
        assert!(err.to_string().contains("Antarctica"));
        assert!(err.to_string().contains("Atlantis"));
    }

    #[test]
    fn destination_resolves_against_destination_column() {
        // Brooklyn_Bridge is never a destination in this catalog
        let err =
            recommend(TravelQuery::new("Central_Park", "Brooklyn_Bridge", "lowest_cost")).unwrap_err();
        assert_eq!(
            err,
            RecommendError::UnresolvedLocation {
                origin: None,
                destination: Some("Brooklyn_Bridge".into()),
            }
        );
    }

    #[test]
    fn no_route_data() {
        let err = recommend(TravelQuery::new("Times_Square", "NYU_Tandon", "lowest_cost")).unwrap_err();
        assert_eq!(
            err,
            RecommendError::NoRouteData {
                origin: loc("Times_Square"),
                destination: loc("NYU_Tandon"),
            }
        );
        assert_eq!(err.reason(), "no_route_data");
    }

    #[test]
    fn unknown_priority() {
        let err = recommend(TravelQuery::new("Central_Park", "Times_Square", "fastest")).unwrap_err();
        assert_eq!(err, RecommendError::UnknownPriority("fastest".into()));
        assert_eq!(err.reason(), "unknown_priority");
    }

    #[test]
    fn location_errors_win_over_priority_errors() {
        let err = recommend(TravelQuery::new("Antarctica", "Times_Square", "fastest")).unwrap_err();
        assert_eq!(err.reason(), "unresolved_location");

        let err = recommend(TravelQuery::new("Times_Square", "NYU_Tandon", "fastest")).unwrap_err();
        assert_eq!(err.reason(), "no_route_data");
    }

    #[test]
    fn recommend_with_typed_priority() {
        let catalog = catalog();
        let resolver = LocationResolver::default();
        let recommender = Recommender::new(&catalog, &resolver);

        let rec = recommender
            .recommend_with("Times_Square", "Central_Park", Priority::LeastEnvironmentalCost)
            .unwrap();
        assert_eq!(rec.option.mode(), TravelMode::CitiBike);
        assert!(rec.alternatives.is_empty());
    }

    #[test]
    fn tied_rows_pick_first_in_catalog_order() {
        let catalog = Catalog::new(vec![
            opt("Central_Park", "Times_Square", TravelMode::Drive, 20.0, 0.0, 18.0, 100.0),
            opt("Central_Park", "Times_Square", TravelMode::CitiBike, 35.0, -0.0, 0.4, 600.0),
            opt("Central_Park", "Times_Square", TravelMode::PublicTransit, 50.0, 3.0, 2.5, 900.0),
        ])
        .unwrap();
        let resolver = LocationResolver::default();

        let rec = Recommender::new(&catalog, &resolver)
            .recommend_with("Central_Park", "Times_Square", Priority::LowestCost)
            .unwrap();
        assert_eq!(rec.option.mode(), TravelMode::Drive);

        let rest: Vec<TravelMode> = rec.alternatives.iter().map(TravelOption::mode).collect();
        assert_eq!(rest, vec![TravelMode::CitiBike, TravelMode::PublicTransit]);
    }

    #[test]
    fn repeated_calls_agree() {
        let query = TravelQuery::new("Central Park", "times square", "least_environmental_cost");
        assert_eq!(recommend(query.clone()), recommend(query));
    }

    #[test]
    fn error_display() {
        let err = RecommendError::NoRouteData {
            origin: loc("Times_Square"),
            destination: loc("NYU_Tandon"),
        };
        assert_eq!(
            err.to_string(),
            "no travel options are recorded from Times_Square to NYU_Tandon"
        );

        let err = RecommendError::UnresolvedLocation {
            origin: None,
            destination: Some("Mars".into()),
        };
        assert_eq!(
            err.to_string(),
            "couldn't match destination \"Mars\" to a known location"
        );

        let err = RecommendError::UnknownPriority("fastest".into());
        assert!(err.to_string().starts_with("unknown priority \"fastest\""));
        assert!(!err.hint().is_empty());
    }
}
