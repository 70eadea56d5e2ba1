//! Nominatim (OpenStreetMap) HTTP geocoder.

use serde::Deserialize;
use tracing::debug;

use crate::domain::Coordinate;

use super::error::GeocodeError;
use super::{Geocoder, normalize_place_name};

/// Default base URL for the public Nominatim instance.
const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// Nominatim's usage policy requires an identifying User-Agent.
const DEFAULT_USER_AGENT: &str = "ev-route-optimizer/0.1";

/// One search hit. Nominatim encodes coordinates as strings.
#[derive(Debug, Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
}

/// Configuration for the Nominatim client.
#[derive(Debug, Clone)]
pub struct NominatimConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Value of the User-Agent header
    pub user_agent: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl NominatimConfig {
    /// Create a new config with the given User-Agent.
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: user_agent.into(),
            timeout_secs: 10,
        }
    }

    /// Set a custom base URL (self-hosted instance or testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self::new(DEFAULT_USER_AGENT)
    }
}

/// Client for the Nominatim `/search` endpoint.
#[derive(Debug, Clone)]
pub struct NominatimClient {
    http: reqwest::Client,
    base_url: String,
}

impl NominatimClient {
    /// Create a new Nominatim client.
    pub fn new(config: NominatimConfig) -> Result<Self, GeocodeError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn search(&self, place: &str) -> Result<Coordinate, GeocodeError> {
        let url = format!("{}/search", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[("q", place), ("format", "jsonv2"), ("limit", "1")])
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GeocodeError::Api {
                status: status.as_u16(),
                message: "rate limited by geocoding service".to_string(),
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeocodeError::Api {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        let body = response.text().await?;
        parse_search_response(place, &body)
    }
}

impl Geocoder for NominatimClient {
    async fn resolve(&self, place_name: &str) -> Result<Coordinate, GeocodeError> {
        let place = normalize_place_name(place_name);
        if place.is_empty() {
            return Err(GeocodeError::NotFound { place });
        }

        debug!(place = %place, "geocoding via nominatim");
        let coordinate = self.search(&place).await?;
        debug!(place = %place, %coordinate, "geocoded");

        Ok(coordinate)
    }
}

/// Interpret a Nominatim `/search` JSON body.
///
/// An empty result array means the place is unknown. The first hit wins.
pub fn parse_search_response(place: &str, body: &str) -> Result<Coordinate, GeocodeError> {
    let hits: Vec<SearchHit> = serde_json::from_str(body).map_err(|e| GeocodeError::Malformed {
        message: e.to_string(),
    })?;

    let Some(hit) = hits.into_iter().next() else {
        return Err(GeocodeError::NotFound {
            place: place.to_string(),
        });
    };

    let parse = |raw: &str, field: &str| {
        raw.trim().parse::<f64>().map_err(|_| GeocodeError::Malformed {
            message: format!("{field} \"{raw}\" is not a number"),
        })
    };

    let lat = parse(&hit.lat, "lat")?;
    let lon = parse(&hit.lon, "lon")?;

    Coordinate::new(lat, lon).map_err(|e| GeocodeError::Malformed {
        message: e.to_string(),
    })
}
