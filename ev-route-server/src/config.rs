//! Application configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::geocode::{GeocodeCacheConfig, NominatimConfig};
use crate::optimizer::RouteLinks;

/// Default station dataset path.
const DEFAULT_CATALOG_PATH: &str = "data/stations.csv";

/// Error for an unusable configuration value.
#[derive(Debug, thiserror::Error)]
#[error("invalid value for {name}: {message}")]
pub struct ConfigError {
    name: &'static str,
    message: String,
}

impl ConfigError {
    fn new(name: &'static str, message: impl ToString) -> Self {
        Self {
            name,
            message: message.to_string(),
        }
    }
}

/// Everything `main` needs to build the server.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address to listen on (`BIND_ADDR`)
    pub bind_addr: SocketAddr,

    /// Station CSV file (`CATALOG_PATH`)
    pub catalog_path: PathBuf,

    /// How often to re-read the station file (`CATALOG_REFRESH_SECS`).
    /// `None` disables periodic refresh.
    pub catalog_refresh: Option<Duration>,

    /// Nominatim settings (`GEOCODER_BASE_URL`, `GEOCODER_USER_AGENT`,
    /// `GEOCODER_TIMEOUT_SECS`)
    pub geocoder: NominatimConfig,

    /// Geocode cache (`GEOCODE_CACHE_TTL_SECS`, `GEOCODE_CACHE_CAPACITY`)
    pub geocode_cache: GeocodeCacheConfig,

    /// Offline place table (`GEOCODER_PLACES`). When set, no live geocoding
    /// service is used.
    pub places_path: Option<PathBuf>,

    /// Maps deep-link builder (`MAPS_HOST`)
    pub route_links: RouteLinks,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    ///
    /// Unset and empty variables fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(addr) = var("BIND_ADDR") {
            config.bind_addr = addr
                .trim()
                .parse()
                .map_err(|e| ConfigError::new("BIND_ADDR", e))?;
        }

        if let Some(path) = var("CATALOG_PATH") {
            config.catalog_path = PathBuf::from(path);
        }

        if let Some(secs) = var("CATALOG_REFRESH_SECS") {
            let secs = parse_u64("CATALOG_REFRESH_SECS", &secs)?;
            config.catalog_refresh = (secs > 0).then(|| Duration::from_secs(secs));
        }

        if let Some(url) = var("GEOCODER_BASE_URL") {
            reqwest::Url::parse(&url).map_err(|e| ConfigError::new("GEOCODER_BASE_URL", e))?;
            config.geocoder = config.geocoder.with_base_url(url);
        }

        if let Some(agent) = var("GEOCODER_USER_AGENT") {
            config.geocoder.user_agent = agent;
        }

        if let Some(secs) = var("GEOCODER_TIMEOUT_SECS") {
            let secs = parse_u64("GEOCODER_TIMEOUT_SECS", &secs)?;
            if secs == 0 {
                return Err(ConfigError::new("GEOCODER_TIMEOUT_SECS", "must be positive"));
            }
            config.geocoder = config.geocoder.with_timeout(secs);
        }

        if let Some(secs) = var("GEOCODE_CACHE_TTL_SECS") {
            config.geocode_cache.ttl =
                Duration::from_secs(parse_u64("GEOCODE_CACHE_TTL_SECS", &secs)?);
        }

        if let Some(capacity) = var("GEOCODE_CACHE_CAPACITY") {
            config.geocode_cache.max_capacity = parse_u64("GEOCODE_CACHE_CAPACITY", &capacity)?;
        }

        if let Some(path) = var("GEOCODER_PLACES") {
            config.places_path = Some(PathBuf::from(path));
        }

        if let Some(host) = var("MAPS_HOST") {
            config.route_links =
                RouteLinks::new(host.trim()).map_err(|e| ConfigError::new("MAPS_HOST", e))?;
        }

        Ok(config)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
            catalog_refresh: None,
            geocoder: NominatimConfig::default(),
            geocode_cache: GeocodeCacheConfig::default(),
            places_path: None,
            route_links: RouteLinks::default(),
        }
    }
}

fn parse_u64(name: &'static str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim().parse().map_err(|e| ConfigError::new(name, e))
}
