//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Costs, Priority, TravelMode, TravelOption, TravelQuery};
use crate::recommend::Recommendation;
use crate::resolve::LocationMatch;

/// Which candidate set a location search runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Origin,
    Destination,
}

/// Request to search locations.
#[derive(Debug, Deserialize)]
pub struct LocationSearchRequest {
    /// Partial location text
    pub q: String,

    /// Restrict to origins or destinations (both when absent)
    pub side: Option<Side>,

    /// Maximum number of suggestions
    pub limit: Option<usize>,
}

/// A suggested location.
#[derive(Debug, Serialize)]
pub struct LocationSuggestion {
    pub name: String,
    pub score: u8,
}

impl From<LocationMatch> for LocationSuggestion {
    fn from(m: LocationMatch) -> Self {
        Self {
            name: m.location.into(),
            score: m.score,
        }
    }
}

/// Response for location search.
#[derive(Debug, Serialize)]
pub struct LocationSearchResponse {
    pub locations: Vec<LocationSuggestion>,
}

/// Response listing every known location.
#[derive(Debug, Serialize)]
pub struct LocationsResponse {
    pub origins: Vec<String>,
    pub destinations: Vec<String>,
}

/// Query string for `GET /recommend`.
#[derive(Debug, Deserialize)]
pub struct RecommendParams {
    pub origin: String,
    pub destination: String,
    pub priority: String,
}

impl From<RecommendParams> for TravelQuery {
    fn from(p: RecommendParams) -> Self {
        TravelQuery::new(p.origin, p.destination, p.priority)
    }
}

/// One travel option in a response.
#[derive(Debug, Serialize)]
pub struct OptionResult {
    /// Catalog mode name (e.g. "Citi_bike")
    pub mode: TravelMode,

    /// Display label (e.g. "Citi Bike")
    pub label: &'static str,

    #[serde(flatten)]
    pub costs: Costs,
}

impl OptionResult {
    pub fn from_option(option: &TravelOption) -> Self {
        Self {
            mode: option.mode(),
            label: option.mode().label(),
            costs: *option.costs(),
        }
    }
}

/// Successful recommendation response.
#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    /// Always "success"
    pub status: &'static str,

    /// Catalog origin the input matched, with its score
    pub origin: LocationMatch,

    /// Catalog destination the input matched, with its score
    pub destination: LocationMatch,

    pub priority: Priority,

    /// The recommended option
    pub mode: OptionResult,

    /// Remaining options for the pair, best first
    pub alternatives: Vec<OptionResult>,
}

impl RecommendationResponse {
    pub fn from_recommendation(rec: &Recommendation) -> Self {
        Self {
            status: "success",
            origin: rec.origin.clone(),
            destination: rec.destination.clone(),
            priority: rec.priority,
            mode: OptionResult::from_option(&rec.option),
            alternatives: rec.alternatives.iter().map(OptionResult::from_option).collect(),
        }
    }
}

/// Request body for `POST /api/chat`.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Response for a chat message.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// The query extracted from the message
    pub intent: TravelQuery,

    /// Which extractor produced the intent
    pub extractor: &'static str,

    /// Plain-language answer
    pub reply: String,

    /// The model's comment on the recommendation, when a model is configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,

    #[serde(flatten)]
    pub recommendation: RecommendationResponse,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Always "error"
    pub status: &'static str,

    /// Stable machine-readable code
    pub reason: &'static str,

    /// Error message
    pub message: String,

    /// Suggested next step
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<&'static str>,
}

impl ErrorResponse {
    pub fn new(reason: &'static str, message: impl Into<String>) -> Self {
        Self {
            status: "error",
            reason,
            message: message.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: &'static str) -> Self {
        self.hint = Some(hint);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Location;

    fn recommendation() -> Recommendation {
        let origin = Location::parse("Central_Park").unwrap();
        let destination = Location::parse("Times_Square").unwrap();
        let option = |mode, time, fare| {
            TravelOption::new(
                origin.clone(),
                destination.clone(),
                mode,
                Costs::new(time, fare, 2.0, 300.0).unwrap(),
            )
            .unwrap()
        };

        Recommendation {
            origin: LocationMatch {
                location: origin.clone(),
                score: 100,
            },
            destination: LocationMatch {
                location: destination.clone(),
                score: 80,
            },
            priority: Priority::LowestCost,
            option: option(TravelMode::PublicTransit, 50.0, 3.0),
            alternatives: vec![option(TravelMode::Drive, 20.0, 10.0)],
        }
    }

    #[test]
    fn recommendation_response_shape() {
        let response = RecommendationResponse::from_recommendation(&recommendation());
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["status"], "success");
        assert_eq!(json["origin"]["location"], "Central_Park");
        assert_eq!(json["destination"]["score"], 80);
        assert_eq!(json["priority"], "lowest_cost");
        assert_eq!(json["mode"]["mode"], "Public_transit");
        assert_eq!(json["mode"]["label"], "Public transit");
        assert_eq!(json["mode"]["fare_cost"], 3.0);
        assert_eq!(json["alternatives"][0]["mode"], "Drive");
    }

    #[test]
    fn chat_response_flattens_recommendation() {
        let response = ChatResponse {
            intent: TravelQuery::new("central park", "tims sqr", "lowest_cost"),
            extractor: "keyword",
            reply: "Take the subway".into(),
            explanation: None,
            recommendation: RecommendationResponse::from_recommendation(&recommendation()),
        };
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["status"], "success");
        assert_eq!(json["intent"]["destination"], "tims sqr");
        assert_eq!(json["mode"]["mode"], "Public_transit");
        assert!(json.get("explanation").is_none());
    }

    #[test]
    fn error_response_shape() {
        let json = serde_json::to_value(ErrorResponse::new("no_route_data", "nothing")).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["reason"], "no_route_data");
        assert!(json.get("hint").is_none());

        let json =
            serde_json::to_value(ErrorResponse::new("x", "y").with_hint("try again")).unwrap();
        assert_eq!(json["hint"], "try again");
    }

    #[test]
    fn side_deserializes_lowercase() {
        let req: LocationSearchRequest =
            serde_json::from_str(r#"{"q":"park","side":"destination"}"#).unwrap();
        assert_eq!(req.side, Some(Side::Destination));
        assert!(req.limit.is_none());
    }
}
