//! Maps deep links for the suggested route.

use crate::domain::Coordinate;

/// Default mapping service host.
const DEFAULT_MAPS_HOST: &str = "www.google.com";

/// Error returned for a maps host that cannot form a valid URL.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid maps host: {0:?}")]
pub struct InvalidMapsHost(pub String);

/// Builds directions links of the form
/// `https://<host>/maps/dir/?api=1&origin=<lat>,<lon>&destination=<lat>,<lon>`.
///
/// The query parameter names are fixed by the mapping service's deep-link
/// format. No travel mode is requested, so the service picks its default
/// (fastest) route.
///
/// # Examples
///
/// ```
/// use ev_route_server::domain::Coordinate;
/// use ev_route_server::optimizer::RouteLinks;
///
/// let links = RouteLinks::default();
/// let from = Coordinate::new(17.385, 78.4867).unwrap();
/// let to = Coordinate::new(17.9689, 79.5941).unwrap();
/// assert_eq!(
///     links.directions(from, to),
///     "https://www.google.com/maps/dir/?api=1&origin=17.385,78.4867&destination=17.9689,79.5941"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct RouteLinks {
    host: String,
}

impl RouteLinks {
    /// Create a link builder for the given host (e.g. `maps.example.com:8443`).
    pub fn new(host: impl Into<String>) -> Result<Self, InvalidMapsHost> {
        let host = host.into();

        if host.is_empty()
            || host.contains(['/', '?', '#', '@'])
            || host.contains(char::is_whitespace)
        {
            return Err(InvalidMapsHost(host));
        }

        if reqwest::Url::parse(&format!("https://{host}/")).is_err() {
            return Err(InvalidMapsHost(host));
        }

        Ok(Self { host })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Directions link from `origin` to `destination`.
    pub fn directions(&self, origin: Coordinate, destination: Coordinate) -> String {
        format!(
            "https://{}/maps/dir/?api=1&origin={origin}&destination={destination}",
            self.host
        )
    }
}

impl Default for RouteLinks {
    fn default() -> Self {
        Self {
            host: DEFAULT_MAPS_HOST.to_string(),
        }
    }
}
