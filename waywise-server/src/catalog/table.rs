//! CSV reading and writing.
//!
//! The table layout is
//! `origin,destination,mode,time_cost,fare_cost,co2_cost,energy_cost`,
//! one row per (OD pair, mode).

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::{Costs, Location, TravelMode, TravelOption};

use super::error::CatalogError;
use super::store::Catalog;

/// One raw CSV record, before validation.
#[derive(Debug, Deserialize, Serialize)]
struct Record {
    origin: String,
    destination: String,
    mode: String,
    time_cost: f64,
    fare_cost: f64,
    co2_cost: f64,
    energy_cost: f64,
}

impl Record {
    fn from_option(option: &TravelOption) -> Self {
        let costs = option.costs();
        Self {
            origin: option.origin().to_string(),
            destination: option.destination().to_string(),
            mode: option.mode().as_str().to_string(),
            time_cost: costs.time,
            fare_cost: costs.fare,
            co2_cost: costs.co2,
            energy_cost: costs.energy,
        }
    }

    /// Validate into a domain option. `row` is 1-based, excluding the header.
    fn into_option(self, row: usize) -> Result<TravelOption, CatalogError> {
        let invalid = |reason: String| CatalogError::InvalidRow { row, reason };

        let origin = Location::parse(&self.origin).map_err(|e| invalid(format!("origin: {e}")))?;
        let destination =
            Location::parse(&self.destination).map_err(|e| invalid(format!("destination: {e}")))?;
        let mode = TravelMode::parse(&self.mode).map_err(|e| invalid(e.to_string()))?;
        let costs = Costs::new(
            self.time_cost,
            self.fare_cost,
            self.co2_cost,
            self.energy_cost,
        )
        .map_err(|e| invalid(e.to_string()))?;

        TravelOption::new(origin, destination, mode, costs).map_err(|e| invalid(e.to_string()))
    }
}

/// Read a catalog from any CSV source with a header row.
pub fn read_csv<R: Read>(reader: R) -> Result<Catalog, CatalogError> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let mut options = Vec::new();
    for (i, record) in reader.deserialize::<Record>().enumerate() {
        let record = record?;
        options.push(record.into_option(i + 1)?);
    }

    debug!(rows = options.len(), "parsed catalog CSV");
    Catalog::new(options)
}

/// Load a catalog from a CSV file.
pub fn load_csv(path: impl AsRef<Path>) -> Result<Catalog, CatalogError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let catalog = read_csv(file)?;

    info!(
        path = %path.display(),
        rows = catalog.len(),
        origins = catalog.origins().len(),
        destinations = catalog.destinations().len(),
        "loaded catalog"
    );

    Ok(catalog)
}

/// Write a catalog as CSV, header first.
pub fn write_csv<W: Write>(catalog: &Catalog, writer: W) -> Result<(), CatalogError> {
    let mut writer = csv::Writer::from_writer(writer);
    for option in catalog.options() {
        writer.serialize(Record::from_option(option))?;
    }
    writer.flush()?;
    Ok(())
}

/// Save a catalog to a CSV file, replacing any existing file.
pub fn save_csv(catalog: &Catalog, path: impl AsRef<Path>) -> Result<(), CatalogError> {
    let file = File::create(path)?;
    write_csv(catalog, file)
}
