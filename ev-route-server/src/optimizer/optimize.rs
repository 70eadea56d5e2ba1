//! Route optimization pipeline.

use std::fmt;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::catalog::StationCatalog;
use crate::domain::{Coordinate, RankedStation};
use crate::geocode::{GeocodeError, Geocoder, normalize_place_name};

use super::range::{InvalidRange, stations_in_range, validate_range};
use super::route_link::RouteLinks;

/// Which of the two query places a failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    Start,
    Destination,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Start => f.write_str("start location"),
            Endpoint::Destination => f.write_str("destination location"),
        }
    }
}

/// Coarse classification of a failure, for callers choosing a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The caller sent something unusable
    BadInput,
    /// A place name has no match
    NotFound,
    /// The geocoding service failed; retrying later may help
    ServiceError,
    /// No charging station data is loaded
    NoData,
}

/// Error from route optimization.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    /// Catalog was never loaded or holds no stations
    #[error("no charging station data available")]
    NoCatalogLoaded,

    /// Range is not a positive number
    #[error(transparent)]
    InvalidRange(#[from] InvalidRange),

    /// One of the two places could not be resolved
    #[error("{endpoint} \"{place}\": {source}")]
    Geocode {
        endpoint: Endpoint,
        place: String,
        #[source]
        source: GeocodeError,
    },
}

impl RouteError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RouteError::NoCatalogLoaded => ErrorKind::NoData,
            RouteError::InvalidRange(_) => ErrorKind::BadInput,
            RouteError::Geocode { source, .. } if source.is_not_found() => ErrorKind::NotFound,
            RouteError::Geocode { .. } => ErrorKind::ServiceError,
        }
    }

    /// The place that failed to resolve, if this is a geocoding failure.
    pub fn endpoint(&self) -> Option<Endpoint> {
        match self {
            RouteError::Geocode { endpoint, .. } => Some(*endpoint),
            _ => None,
        }
    }
}

/// A route request.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteQuery {
    pub start_name: String,
    pub destination_name: String,
    /// Vehicle range in kilometres. Must be positive.
    pub range_km: f64,
}

impl RouteQuery {
    pub fn new(
        start_name: impl Into<String>,
        destination_name: impl Into<String>,
        range_km: f64,
    ) -> Self {
        Self {
            start_name: start_name.into(),
            destination_name: destination_name.into(),
            range_km,
        }
    }
}

/// Answer to a route request.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteResult {
    /// Stations reachable from the start, nearest first.
    pub stations: Vec<RankedStation>,
    /// Maps directions link from start to destination.
    pub route_url: String,
    pub origin: Coordinate,
    pub destination: Coordinate,
}

/// Orchestrates geocoding, range filtering and link building.
///
/// Holds a handle to the shared catalog; each query works against the
/// snapshot current when it starts, so a concurrent reload never affects a
/// query in flight.
pub struct RouteOptimizer<G> {
    catalog: StationCatalog,
    geocoder: G,
    links: RouteLinks,
}

impl<G: Geocoder> RouteOptimizer<G> {
    pub fn new(catalog: StationCatalog, geocoder: G, links: RouteLinks) -> Self {
        Self {
            catalog,
            geocoder,
            links,
        }
    }

    pub fn catalog(&self) -> &StationCatalog {
        &self.catalog
    }

    pub fn geocoder(&self) -> &G {
        &self.geocoder
    }

    /// Convenience wrapper around [`RouteOptimizer::optimize`].
    pub async fn optimize_route(
        &self,
        start_name: &str,
        destination_name: &str,
        range_km: f64,
    ) -> Result<RouteResult, RouteError> {
        self.optimize(&RouteQuery::new(start_name, destination_name, range_km))
            .await
    }

    /// Find stations in range of the start and a link to the destination.
    ///
    /// Checks run in this order: catalog loaded, range valid, both places
    /// resolved. Nothing is geocoded unless the first two pass. Zero
    /// stations in range is a successful result.
    pub async fn optimize(&self, query: &RouteQuery) -> Result<RouteResult, RouteError> {
        let snapshot = match self.catalog.snapshot().await {
            Some(snapshot) if !snapshot.is_empty() => snapshot,
            _ => {
                warn!("route requested with no charging station data loaded");
                return Err(RouteError::NoCatalogLoaded);
            }
        };

        let range_km = validate_range(query.range_km)?;

        debug!(
            start = %query.start_name,
            destination = %query.destination_name,
            range_km,
            "optimizing route"
        );

        let (start, destination) = futures::future::join(
            self.geocoder.resolve(&query.start_name),
            self.geocoder.resolve(&query.destination_name),
        )
        .await;

        let origin =
            start.map_err(|source| geocode_error(Endpoint::Start, &query.start_name, source))?;
        let destination = destination.map_err(|source| {
            geocode_error(Endpoint::Destination, &query.destination_name, source)
        })?;

        let stations = stations_in_range(origin, range_km, snapshot.stations())?;
        let route_url = self.links.directions(origin, destination);

        info!(
            stations = stations.len(),
            catalog = snapshot.len(),
            range_km,
            "route optimized"
        );

        Ok(RouteResult {
            stations,
            route_url,
            origin,
            destination,
        })
    }
}

fn geocode_error(endpoint: Endpoint, place: &str, source: GeocodeError) -> RouteError {
    warn!(%endpoint, place, error = %source, "geocoding failed");
    RouteError::Geocode {
        endpoint,
        place: normalize_place_name(place),
        source,
    }
}

#[cfg(test)]
#[path = "optimize_tests.rs"]
mod tests;
