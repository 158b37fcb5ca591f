//! Ranking priorities and the cost fields they rank by.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::TravelOption;

/// Error returned when a priority name is not one of the four known values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown priority: {0:?}")]
pub struct UnknownPriority(pub String);

/// A numeric cost column of a [`TravelOption`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CostField {
    /// Travel time in minutes.
    Time,
    /// Fare in currency units.
    Fare,
    /// Emissions in kg CO2.
    Co2,
    /// Walking distance in meters.
    Energy,
}

impl CostField {
    /// The column name in the catalog CSV.
    pub fn column(&self) -> &'static str {
        match self {
            CostField::Time => "time_cost",
            CostField::Fare => "fare_cost",
            CostField::Co2 => "co2_cost",
            CostField::Energy => "energy_cost",
        }
    }

    /// Read this field from an option.
    pub fn of(&self, option: &TravelOption) -> f64 {
        let costs = option.costs();
        match self {
            CostField::Time => costs.time,
            CostField::Fare => costs.fare,
            CostField::Co2 => costs.co2,
            CostField::Energy => costs.energy,
        }
    }
}

/// What the traveller wants to minimise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    LowestCost,
    MinimalWalking,
    LeastEnvironmentalCost,
    ShortestTime,
}

impl Priority {
    /// All priorities, in the order they are offered to users.
    pub const ALL: [Priority; 4] = [
        Priority::LowestCost,
        Priority::MinimalWalking,
        Priority::ShortestTime,
        Priority::LeastEnvironmentalCost,
    ];

    /// Parse a priority from its wire name.
    ///
    /// Surrounding whitespace and case are ignored; nothing else is.
    pub fn parse(s: &str) -> Result<Self, UnknownPriority> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lowest_cost" => Ok(Priority::LowestCost),
            "minimal_walking" => Ok(Priority::MinimalWalking),
            "least_environmental_cost" => Ok(Priority::LeastEnvironmentalCost),
            "shortest_time" => Ok(Priority::ShortestTime),
            _ => Err(UnknownPriority(s.to_string())),
        }
    }

    /// The wire name of this priority.
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::LowestCost => "lowest_cost",
            Priority::MinimalWalking => "minimal_walking",
            Priority::LeastEnvironmentalCost => "least_environmental_cost",
            Priority::ShortestTime => "shortest_time",
        }
    }

    /// The cost field this priority ranks by.
    pub fn field(&self) -> CostField {
        match self {
            Priority::LowestCost => CostField::Fare,
            Priority::MinimalWalking => CostField::Energy,
            Priority::LeastEnvironmentalCost => CostField::Co2,
            Priority::ShortestTime => CostField::Time,
        }
    }

    /// The value of an option on this priority's field.
    pub fn cost_of(&self, option: &TravelOption) -> f64 {
        self.field().of(option)
    }

    /// Human-readable description for prompts and pages.
    pub fn description(&self) -> &'static str {
        match self {
            Priority::LowestCost => "Lowest fare",
            Priority::MinimalWalking => "Least walking",
            Priority::LeastEnvironmentalCost => "Lowest emissions",
            Priority::ShortestTime => "Shortest travel time",
        }
    }
}

impl FromStr for Priority {
    type Err = UnknownPriority;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Priority::parse(s)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Costs, Location, TravelMode};

    fn option() -> TravelOption {
        TravelOption::new(
            Location::parse("Central_Park").unwrap(),
            Location::parse("Times_Square").unwrap(),
            TravelMode::Drive,
            Costs::new(20.0, 10.0, 15.5, 120.0).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn parse_wire_names() {
        for priority in Priority::ALL {
            assert_eq!(Priority::parse(priority.as_str()), Ok(priority));
        }
        assert_eq!(Priority::parse(" Shortest_Time "), Ok(Priority::ShortestTime));
    }

    #[test]
    fn reject_unknown() {
        assert_eq!(
            Priority::parse("fastest"),
            Err(UnknownPriority("fastest".to_string()))
        );
        assert!(Priority::parse("lowest cost").is_err());
        assert!(Priority::parse("").is_err());
    }

    #[test]
    fn field_binding() {
        assert_eq!(Priority::LowestCost.field(), CostField::Fare);
        assert_eq!(Priority::MinimalWalking.field(), CostField::Energy);
        assert_eq!(Priority::LeastEnvironmentalCost.field(), CostField::Co2);
        assert_eq!(Priority::ShortestTime.field(), CostField::Time);
    }

    #[test]
    fn cost_of_reads_bound_field() {
        let opt = option();
        assert_eq!(Priority::LowestCost.cost_of(&opt), 10.0);
        assert_eq!(Priority::MinimalWalking.cost_of(&opt), 120.0);
        assert_eq!(Priority::LeastEnvironmentalCost.cost_of(&opt), 15.5);
        assert_eq!(Priority::ShortestTime.cost_of(&opt), 20.0);
    }

    #[test]
    fn column_names() {
        assert_eq!(CostField::Time.column(), "time_cost");
        assert_eq!(CostField::Fare.column(), "fare_cost");
        assert_eq!(CostField::Co2.column(), "co2_cost");
        assert_eq!(CostField::Energy.column(), "energy_cost");
    }

    #[test]
    fn serde_wire_names() {
        let json = serde_json::to_string(&Priority::LeastEnvironmentalCost).unwrap();
        assert_eq!(json, "\"least_environmental_cost\"");
    }
}
