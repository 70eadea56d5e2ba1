//! Charging station catalog.
//!
//! Loads the station dataset from CSV and publishes it as an immutable
//! snapshot. Reloads replace the whole snapshot at once; a failed reload
//! keeps the previous one.

mod error;
mod source;
mod store;

pub use error::CatalogError;
pub use source::parse_stations;
pub use store::{CatalogSnapshot, StationCatalog};
