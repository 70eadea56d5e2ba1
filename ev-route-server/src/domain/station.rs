//! Charging station records.

use super::Coordinate;

/// A charging station as loaded from the catalog.
///
/// Stations are immutable once loaded. Distances are never stored here;
/// they belong to a single range query (see [`RankedStation`]).
#[derive(Debug, Clone, PartialEq)]
pub struct ChargingStation {
    pub name: String,
    pub location: Coordinate,
    pub address: String,
    pub charger_type: String,
}

impl ChargingStation {
    pub fn new(
        name: impl Into<String>,
        location: Coordinate,
        address: impl Into<String>,
        charger_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            location,
            address: address.into(),
            charger_type: charger_type.into(),
        }
    }

    pub fn latitude(&self) -> f64 {
        self.location.latitude()
    }

    pub fn longitude(&self) -> f64 {
        self.location.longitude()
    }
}

/// A station paired with its distance from a query origin.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedStation {
    pub station: ChargingStation,
    /// Geodesic distance from the origin in kilometres.
    pub distance_km: f64,
}
