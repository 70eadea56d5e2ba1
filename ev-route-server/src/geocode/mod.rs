//! Place name geocoding.
//!
//! The optimizer depends only on the [`Geocoder`] trait. Production uses
//! [`NominatimClient`] (optionally behind [`CachedGeocoder`]); tests and
//! offline runs use [`StaticGeocoder`], a fixed name → coordinate table.
//!
//! Implementations make exactly one resolution attempt per call. Retrying
//! is the caller's decision.

mod cache;
mod client;
mod error;
mod mock;

use crate::domain::Coordinate;

pub use cache::{CachedGeocoder, GeocodeCacheConfig};
pub use client::{NominatimClient, NominatimConfig, parse_search_response};
pub use error::{GeocodeError, PlaceTableError};
pub use mock::StaticGeocoder;

/// Resolves free-text place names to coordinates.
pub trait Geocoder: Send + Sync {
    /// Resolve a place name.
    ///
    /// Fails with [`GeocodeError::NotFound`] when there is no match, and with
    /// one of the service variants when the upstream could not answer.
    fn resolve(
        &self,
        place_name: &str,
    ) -> impl Future<Output = Result<Coordinate, GeocodeError>> + Send;
}

/// Trim and collapse whitespace runs. No other correction is applied.
///
/// ```
/// use ev_route_server::geocode::normalize_place_name;
///
/// assert_eq!(normalize_place_name("  New   Delhi \t"), "New Delhi");
/// ```
pub fn normalize_place_name(place_name: &str) -> String {
    place_name.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Geocoder selected at startup.
pub enum GeocoderBackend {
    /// Live Nominatim lookups with an optional success cache
    Nominatim(CachedGeocoder<NominatimClient>),
    /// Offline lookups from a place table
    Static(StaticGeocoder),
}

impl Geocoder for GeocoderBackend {
    async fn resolve(&self, place_name: &str) -> Result<Coordinate, GeocodeError> {
        match self {
            GeocoderBackend::Nominatim(g) => g.resolve(place_name).await,
            GeocoderBackend::Static(g) => g.resolve(place_name).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_trims_and_collapses() {
        assert_eq!(normalize_place_name("Hyderabad"), "Hyderabad");
        assert_eq!(normalize_place_name("  Hyderabad  "), "Hyderabad");
        assert_eq!(normalize_place_name("Banjara\n  Hills"), "Banjara Hills");
        assert_eq!(normalize_place_name("   "), "");
    }

    #[test]
    fn normalize_keeps_case_and_spelling() {
        assert_eq!(normalize_place_name("hYDERABAD"), "hYDERABAD");
        assert_eq!(normalize_place_name("Hydrabad"), "Hydrabad");
    }
}
