//! Catalog rows.

use serde::Serialize;

use super::error::InvalidOption;
use super::{CostField, Location, TravelMode};

/// The four numeric costs of travelling one OD pair by one mode.
///
/// Every value is finite and non-negative. `-0.0` is stored as `0.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Costs {
    /// Minutes.
    #[serde(rename = "time_cost")]
    pub time: f64,
    /// Currency units.
    #[serde(rename = "fare_cost")]
    pub fare: f64,
    /// kg CO2.
    #[serde(rename = "co2_cost")]
    pub co2: f64,
    /// Walking distance in meters.
    #[serde(rename = "energy_cost")]
    pub energy: f64,
}

impl Costs {
    /// Validate and build a set of costs.
    pub fn new(time: f64, fare: f64, co2: f64, energy: f64) -> Result<Self, InvalidOption> {
        Ok(Self {
            time: check(CostField::Time, time)?,
            fare: check(CostField::Fare, fare)?,
            co2: check(CostField::Co2, co2)?,
            energy: check(CostField::Energy, energy)?,
        })
    }
}

fn check(field: CostField, value: f64) -> Result<f64, InvalidOption> {
    if value.is_finite() && value >= 0.0 {
        // -0.0 + 0.0 is +0.0
        Ok(value + 0.0)
    } else {
        Err(InvalidOption::InvalidCost { field, value })
    }
}

/// One row of the catalog: travelling from `origin` to `destination` by `mode`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TravelOption {
    origin: Location,
    destination: Location,
    mode: TravelMode,
    #[serde(flatten)]
    costs: Costs,
}

impl TravelOption {
    /// Create a new option. Origin and destination must differ.
    pub fn new(
        origin: Location,
        destination: Location,
        mode: TravelMode,
        costs: Costs,
    ) -> Result<Self, InvalidOption> {
        if origin == destination {
            return Err(InvalidOption::SameEndpoints(origin));
        }

        Ok(Self {
            origin,
            destination,
            mode,
            costs,
        })
    }

    pub fn origin(&self) -> &Location {
        &self.origin
    }

    pub fn destination(&self) -> &Location {
        &self.destination
    }

    pub fn mode(&self) -> TravelMode {
        self.mode
    }

    pub fn costs(&self) -> &Costs {
        &self.costs
    }

    /// Whether this option serves exactly the given OD pair.
    pub fn serves(&self, origin: &Location, destination: &Location) -> bool {
        &self.origin == origin && &self.destination == destination
    }
}
