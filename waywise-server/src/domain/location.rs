//! Location names.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid location name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid location: {reason}")]
pub struct InvalidLocation {
    reason: &'static str,
}

/// A canonical location name as it appears in the catalog.
///
/// Names are stored trimmed and are never empty. Matching against user
/// input is fuzzy (see [`crate::resolve`]); equality here is exact.
///
/// # Examples
///
/// ```
/// use waywise_server::domain::Location;
///
/// let park = Location::parse(" Central_Park ").unwrap();
/// assert_eq!(park.as_str(), "Central_Park");
///
/// assert!(Location::parse("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Location(String);

impl Location {
    /// Parse a location name, trimming surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidLocation> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(InvalidLocation {
                reason: "must not be empty",
            });
        }

        if trimmed.chars().any(char::is_control) {
            return Err(InvalidLocation {
                reason: "must not contain control characters",
            });
        }

        Ok(Location(trimmed.to_string()))
    }

    /// Returns the location name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Location {
    type Error = InvalidLocation;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Location::parse(&value)
    }
}

impl From<Location> for String {
    fn from(value: Location) -> Self {
        value.0
    }
}

impl fmt::Debug for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Location({})", self.0)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Surrounding whitespace never changes the parsed name
        #[test]
        fn padding_is_ignored(name in "[A-Za-z][A-Za-z_ ]{0,20}[A-Za-z]", pad in " {0,4}") {
            let padded = format!("{pad}{name}{pad}");
            let loc = Location::parse(&padded).unwrap();
            prop_assert_eq!(loc.as_str(), name.as_str());
        }
    }
}
