//! Caching layer for geocoding results.
//!
//! Place coordinates rarely change, so a deployment may cache them to spare
//! the upstream service. Only successful lookups are cached: a `NotFound`
//! or a service failure is always reported fresh by the wrapped geocoder.

use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::domain::Coordinate;

use super::error::GeocodeError;
use super::{Geocoder, normalize_place_name};

/// Configuration for the geocode cache.
#[derive(Debug, Clone)]
pub struct GeocodeCacheConfig {
    /// TTL for cached entries. Zero disables caching.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl GeocodeCacheConfig {
    pub fn is_enabled(&self) -> bool {
        !self.ttl.is_zero() && self.max_capacity > 0
    }
}

impl Default for GeocodeCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(24 * 60 * 60),
            max_capacity: 10_000,
        }
    }
}

/// Geocoder with a success cache.
///
/// Wraps any `Geocoder`; cache keys are whitespace-normalized place names.
pub struct CachedGeocoder<G> {
    inner: G,
    cache: Option<MokaCache<String, Coordinate>>,
}

impl<G: Geocoder> CachedGeocoder<G> {
    /// Create a new cached geocoder. A disabled config passes every call through.
    pub fn new(inner: G, config: &GeocodeCacheConfig) -> Self {
        let cache = config.is_enabled().then(|| {
            MokaCache::builder()
                .time_to_live(config.ttl)
                .max_capacity(config.max_capacity)
                .build()
        });

        Self { inner, cache }
    }

    /// Access the wrapped geocoder.
    pub fn inner(&self) -> &G {
        &self.inner
    }

    /// Get cache statistics (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.cache.as_ref().map_or(0, |c| c.entry_count())
    }
}

impl<G: Geocoder> Geocoder for CachedGeocoder<G> {
    async fn resolve(&self, place_name: &str) -> Result<Coordinate, GeocodeError> {
        let Some(cache) = &self.cache else {
            return self.inner.resolve(place_name).await;
        };

        let key = normalize_place_name(place_name);

        if let Some(coordinate) = cache.get(&key).await {
            debug!(place = %key, "geocode cache hit");
            return Ok(coordinate);
        }

        let coordinate = self.inner.resolve(&key).await?;
        cache.insert(key, coordinate).await;

        Ok(coordinate)
    }
}
