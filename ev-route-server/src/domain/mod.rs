//! Domain types for the charging-station route optimizer.
//!
//! All types enforce their invariants at construction time, so code that
//! receives a `Coordinate` or a `ChargingStation` can trust its validity.

mod coordinate;
mod station;

pub use coordinate::{Coordinate, InvalidCoordinate};
pub use station::{ChargingStation, RankedStation};
