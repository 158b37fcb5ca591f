//! Transport modes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown transport mode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown travel mode: {0:?}")]
pub struct InvalidMode(pub String);

/// The transport modes the catalog can describe.
///
/// The serialized names are the spellings used in the catalog CSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TravelMode {
    #[serde(rename = "Drive")]
    Drive,
    #[serde(rename = "Ride-hailing")]
    RideHailing,
    #[serde(rename = "Citi_bike")]
    CitiBike,
    #[serde(rename = "Public_transit")]
    PublicTransit,
}

impl TravelMode {
    /// All modes, in the order the dataset generator emits them.
    pub const ALL: [TravelMode; 4] = [
        TravelMode::Drive,
        TravelMode::RideHailing,
        TravelMode::CitiBike,
        TravelMode::PublicTransit,
    ];

    /// The catalog spelling of this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Drive => "Drive",
            TravelMode::RideHailing => "Ride-hailing",
            TravelMode::CitiBike => "Citi_bike",
            TravelMode::PublicTransit => "Public_transit",
        }
    }

    /// A human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            TravelMode::Drive => "Drive",
            TravelMode::RideHailing => "Ride-hailing",
            TravelMode::CitiBike => "Citi Bike",
            TravelMode::PublicTransit => "Public transit",
        }
    }

    /// Parse a mode name.
    ///
    /// Accepts the catalog spelling, and is lenient about case and about
    /// `-`, `_` and spaces being used interchangeably.
    pub fn parse(s: &str) -> Result<Self, InvalidMode> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        match key.as_str() {
            "drive" => Ok(TravelMode::Drive),
            "ridehailing" => Ok(TravelMode::RideHailing),
            "citibike" => Ok(TravelMode::CitiBike),
            "publictransit" => Ok(TravelMode::PublicTransit),
            _ => Err(InvalidMode(s.to_string())),
        }
    }
}

impl FromStr for TravelMode {
    type Err = InvalidMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TravelMode::parse(s)
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_catalog_spelling() {
        for mode in TravelMode::ALL {
            assert_eq!(TravelMode::parse(mode.as_str()), Ok(mode));
        }
    }

    #[test]
    fn parse_is_lenient() {
        assert_eq!(TravelMode::parse("ride hailing"), Ok(TravelMode::RideHailing));
        assert_eq!(TravelMode::parse("CITI-BIKE"), Ok(TravelMode::CitiBike));
        assert_eq!(TravelMode::parse(" public_Transit "), Ok(TravelMode::PublicTransit));
    }

    #[test]
    fn reject_unknown() {
        assert_eq!(
            TravelMode::parse("Teleport"),
            Err(InvalidMode("Teleport".to_string()))
        );
        assert!(TravelMode::parse("").is_err());
    }

    #[test]
    fn serde_uses_catalog_spelling() {
        let json = serde_json::to_string(&TravelMode::RideHailing).unwrap();
        assert_eq!(json, "\"Ride-hailing\"");
        let mode: TravelMode = serde_json::from_str("\"Public_transit\"").unwrap();
        assert_eq!(mode, TravelMode::PublicTransit);
    }
}
