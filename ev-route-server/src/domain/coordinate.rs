//! Latitude/longitude pairs.

use std::fmt;

/// Error returned when constructing a coordinate outside the valid ranges.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid coordinate: {reason}")]
pub struct InvalidCoordinate {
    reason: &'static str,
}

/// A validated WGS-84 coordinate in decimal degrees.
///
/// Latitude is always within [-90, 90] and longitude within [-180, 180].
///
/// # Examples
///
/// ```
/// use ev_route_server::domain::Coordinate;
///
/// let hyd = Coordinate::new(17.385, 78.4867).unwrap();
/// assert_eq!(hyd.to_string(), "17.385,78.4867");
///
/// assert!(Coordinate::new(91.0, 0.0).is_err());
/// assert!(Coordinate::new(0.0, f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    /// Create a coordinate, rejecting non-finite or out-of-range values.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinate> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(InvalidCoordinate {
                reason: "latitude and longitude must be finite numbers",
            });
        }

        if !(-90.0..=90.0).contains(&latitude) {
            return Err(InvalidCoordinate {
                reason: "latitude must be within [-90, 90]",
            });
        }

        if !(-180.0..=180.0).contains(&longitude) {
            return Err(InvalidCoordinate {
                reason: "longitude must be within [-180, 180]",
            });
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Convert to a `geo` point (x = longitude, y = latitude).
    pub fn to_point(self) -> geo::Point<f64> {
        geo::Point::new(self.longitude, self.latitude)
    }
}

/// Formats as `lat,lon`, the form used in maps deep links.
impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_boundaries() {
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
        assert!(Coordinate::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn rejects_out_of_range_latitude() {
        assert!(Coordinate::new(90.0001, 0.0).is_err());
        assert!(Coordinate::new(-91.0, 0.0).is_err());
    }

    #[test]
    fn rejects_out_of_range_longitude() {
        assert!(Coordinate::new(0.0, 180.5).is_err());
        assert!(Coordinate::new(0.0, -200.0).is_err());
    }

    #[test]
    fn rejects_non_finite() {
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
        assert!(Coordinate::new(0.0, f64::INFINITY).is_err());
        assert!(Coordinate::new(f64::NEG_INFINITY, 0.0).is_err());
    }

    #[test]
    fn display_is_lat_comma_lon() {
        let c = Coordinate::new(17.4, -78.5).unwrap();
        assert_eq!(c.to_string(), "17.4,-78.5");
    }

    #[test]
    fn point_uses_lon_as_x() {
        let p = Coordinate::new(17.4, 78.5).unwrap().to_point();
        assert_eq!(p.x(), 78.5);
        assert_eq!(p.y(), 17.4);
    }
}
