//! Synthetic dataset generation.
//!
//! Produces a mock catalog that stands in for live routing data: four
//! Manhattan/Brooklyn landmarks, every ordered pair of distinct landmarks,
//! one row per mode. Each mode draws its costs from its own range so that
//! the modes have recognisable trade-offs (driving is fast and dirty,
//! transit is cheap and walk-heavy, and so on).
//!
//! Generation is deterministic for a given seed.

use std::ops::RangeInclusive;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::domain::{Costs, Location, TravelMode, TravelOption};

use super::error::CatalogError;
use super::store::Catalog;

/// Seed used when none is configured.
pub const DEFAULT_SEED: u64 = 1024;

/// The landmarks in the generated dataset.
pub const LOCATIONS: [&str; 4] = [
    "Central_Park",
    "Times_Square",
    "NYU_Tandon",
    "Brooklyn_Bridge",
];

/// Cost ranges for one mode.
struct ModeProfile {
    /// Minutes, whole numbers.
    time: RangeInclusive<u32>,
    /// Currency, rounded to cents.
    fare: RangeInclusive<f64>,
    /// kg CO2, rounded to two places.
    co2: RangeInclusive<f64>,
    /// Walking meters, whole numbers.
    energy: RangeInclusive<u32>,
}

fn profile(mode: TravelMode) -> ModeProfile {
    match mode {
        TravelMode::Drive => ModeProfile {
            time: 10..=40,
            fare: 5.0..=20.0,
            co2: 10.0..=30.0,
            energy: 50..=200,
        },
        TravelMode::RideHailing => ModeProfile {
            time: 15..=50,
            fare: 10.0..=40.0,
            co2: 5.0..=15.0,
            energy: 20..=80,
        },
        TravelMode::CitiBike => ModeProfile {
            time: 20..=60,
            fare: 3.5..=5.0,
            co2: 0.1..=1.0,
            energy: 200..=1000,
        },
        TravelMode::PublicTransit => ModeProfile {
            time: 25..=75,
            fare: 2.7..=5.0,
            co2: 1.0..=5.0,
            energy: 300..=1500,
        },
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

impl ModeProfile {
    fn sample(&self, rng: &mut ChaCha8Rng) -> Result<Costs, CatalogError> {
        let time = rng.gen_range(self.time.clone()) as f64;
        let fare = round2(rng.gen_range(self.fare.clone()));
        let co2 = round2(rng.gen_range(self.co2.clone()));
        let energy = rng.gen_range(self.energy.clone()) as f64;

        Costs::new(time, fare, co2, energy).map_err(|e| CatalogError::InvalidRow {
            row: 0,
            reason: e.to_string(),
        })
    }
}

/// Generate the synthetic catalog from a seed.
pub fn generate(seed: u64) -> Result<Catalog, CatalogError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let locations = LOCATIONS
        .iter()
        .map(|name| Location::parse(name))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| CatalogError::InvalidRow {
            row: 0,
            reason: e.to_string(),
        })?;

    let mut options = Vec::with_capacity(locations.len() * (locations.len() - 1) * 4);
    for origin in &locations {
        for destination in &locations {
            if origin == destination {
                continue;
            }
            for mode in TravelMode::ALL {
                let row = options.len() + 1;
                let costs = profile(mode).sample(&mut rng)?;
                let option = TravelOption::new(origin.clone(), destination.clone(), mode, costs)
                    .map_err(|e| CatalogError::InvalidRow {
                        row,
                        reason: e.to_string(),
                    })?;
                options.push(option);
            }
        }
    }

    Catalog::new(options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covers_every_ordered_pair_and_mode() {
        let catalog = generate(DEFAULT_SEED).unwrap();
        assert_eq!(catalog.len(), 4 * 3 * 4);
        assert_eq!(catalog.origins().len(), 4);
        assert_eq!(catalog.destinations().len(), 4);

        let park = Location::parse("Central_Park").unwrap();
        let bridge = Location::parse("Brooklyn_Bridge").unwrap();
        let modes: Vec<TravelMode> = catalog.routes(&park, &bridge).map(|o| o.mode()).collect();
        assert_eq!(modes, TravelMode::ALL.to_vec());
    }

    #[test]
    fn no_self_loops() {
        let catalog = generate(DEFAULT_SEED).unwrap();
        assert!(catalog.options().iter().all(|o| o.origin() != o.destination()));
    }

    #[test]
    fn same_seed_same_catalog() {
        let a = generate(7).unwrap();
        let b = generate(7).unwrap();
        assert_eq!(a.options(), b.options());
    }

    #[test]
    fn different_seed_different_catalog() {
        let a = generate(1).unwrap();
        let b = generate(2).unwrap();
        assert_ne!(a.options(), b.options());
    }

    #[test]
    fn origins_follow_landmark_order() {
        let catalog = generate(DEFAULT_SEED).unwrap();
        let names: Vec<&str> = catalog.origins().iter().map(|l| l.as_str()).collect();
        assert_eq!(names, LOCATIONS.to_vec());
    }
}
