//! Geocoding error types.

use crate::domain::InvalidCoordinate;

/// Errors from resolving a place name.
///
/// `NotFound` means the service answered but had no match, which the user
/// can fix by changing the input. Every other variant is a service failure.
#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    /// The service returned no match for the place name
    #[error("could not geocode location: {place}")]
    NotFound { place: String },

    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Service returned an error status
    #[error("geocoding service error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response could not be understood
    #[error("malformed geocoding response: {message}")]
    Malformed { message: String },
}

impl GeocodeError {
    /// Whether this is a "no such place" answer rather than a service failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, GeocodeError::NotFound { .. })
    }
}

/// Errors loading an offline place table from disk.
#[derive(Debug, thiserror::Error)]
pub enum PlaceTableError {
    /// The file could not be read
    #[error("failed to read place table {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a `{"Name": [lat, lon]}` object
    #[error("failed to parse place table {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// An entry has coordinates outside the valid ranges
    #[error("place table entry {name:?}: {source}")]
    InvalidEntry {
        name: String,
        #[source]
        source: InvalidCoordinate,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = GeocodeError::NotFound {
            place: "Atlantis".into(),
        };
        assert_eq!(err.to_string(), "could not geocode location: Atlantis");
        assert!(err.is_not_found());

        let err = GeocodeError::Api {
            status: 503,
            message: "Service Unavailable".into(),
        };
        assert_eq!(err.to_string(), "geocoding service error 503: Service Unavailable");
        assert!(!err.is_not_found());

        let err = GeocodeError::Malformed {
            message: "expected array".into(),
        };
        assert!(err.to_string().contains("expected array"));
        assert!(!err.is_not_found());
    }
}
