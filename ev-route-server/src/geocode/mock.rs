//! Table-driven geocoder for tests and offline use.
//!
//! Resolves names from a fixed map instead of calling a live service, so
//! route queries are deterministic and need no network access.

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::Coordinate;

use super::error::{GeocodeError, PlaceTableError};
use super::{Geocoder, normalize_place_name};

/// Geocoder backed by a fixed name → coordinate table.
///
/// Lookups match the whitespace-normalized name exactly. Every call is
/// counted, which lets tests assert that geocoding was (or was not) invoked.
#[derive(Debug, Default)]
pub struct StaticGeocoder {
    places: HashMap<String, Coordinate>,
    /// When set, every call fails as if the service were down.
    unavailable: bool,
    calls: AtomicUsize,
}

impl StaticGeocoder {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a place to the table.
    pub fn with_place(mut self, name: &str, coordinate: Coordinate) -> Self {
        self.places.insert(normalize_place_name(name), coordinate);
        self
    }

    /// A geocoder whose every call fails with a service error.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// Load a table from a JSON file of the form `{"Name": [lat, lon], ...}`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, PlaceTableError> {
        let path = path.as_ref();
        let display = path.display().to_string();

        let json = std::fs::read_to_string(path).map_err(|source| PlaceTableError::Io {
            path: display.clone(),
            source,
        })?;

        let raw: HashMap<String, (f64, f64)> =
            serde_json::from_str(&json).map_err(|source| PlaceTableError::Json {
                path: display,
                source,
            })?;

        let mut geocoder = Self::new();
        for (name, (lat, lon)) in raw {
            let coordinate = match Coordinate::new(lat, lon) {
                Ok(coordinate) => coordinate,
                Err(source) => return Err(PlaceTableError::InvalidEntry { name, source }),
            };
            geocoder = geocoder.with_place(&name, coordinate);
        }

        Ok(geocoder)
    }

    /// Number of `resolve` calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of places in the table.
    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}

impl Geocoder for StaticGeocoder {
    async fn resolve(&self, place_name: &str) -> Result<Coordinate, GeocodeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.unavailable {
            return Err(GeocodeError::Api {
                status: 503,
                message: "geocoding service unavailable".to_string(),
            });
        }

        let place = normalize_place_name(place_name);
        self.places
            .get(&place)
            .copied()
            .ok_or(GeocodeError::NotFound { place })
    }
}
