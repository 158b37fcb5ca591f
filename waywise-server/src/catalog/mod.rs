//! The travel option catalog.
//!
//! A catalog is a read-only table of [`TravelOption`](crate::domain::TravelOption)
//! rows, loaded once at startup either from a CSV file or from the
//! synthetic generator.

mod error;
mod generate;
mod store;
mod table;

pub use error::CatalogError;
pub use generate::{DEFAULT_SEED, LOCATIONS, generate};
pub use store::Catalog;
pub use table::{load_csv, read_csv, save_csv, write_csv};
