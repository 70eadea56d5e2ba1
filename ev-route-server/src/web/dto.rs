//! Data transfer objects for web requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{ChargingStation, RankedStation};
use crate::optimizer::{RouteQuery, RouteResult};

/// Request to optimize a route.
#[derive(Debug, Deserialize)]
pub struct OptimizeRouteRequest {
    /// Free-text start place name
    pub start_location: String,

    /// Free-text destination place name
    pub destination_location: String,

    /// Vehicle range in kilometres
    pub range: f64,
}

impl From<OptimizeRouteRequest> for RouteQuery {
    fn from(req: OptimizeRouteRequest) -> Self {
        RouteQuery::new(req.start_location, req.destination_location, req.range)
    }
}

/// A station reachable from the start.
#[derive(Debug, Serialize)]
pub struct StationInRange {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    pub charger_type: String,

    /// Distance from the start in kilometres
    pub distance: f64,
}

impl From<RankedStation> for StationInRange {
    fn from(ranked: RankedStation) -> Self {
        let station = ranked.station;
        Self {
            latitude: station.latitude(),
            longitude: station.longitude(),
            name: station.name,
            address: station.address,
            charger_type: station.charger_type,
            distance: ranked.distance_km,
        }
    }
}

/// Response for route optimization.
#[derive(Debug, Serialize)]
pub struct OptimizeRouteResponse {
    /// Reachable stations, nearest first
    pub stations_in_range: Vec<StationInRange>,

    /// Maps directions link from start to destination
    pub fastest_route_url: String,
}

impl From<RouteResult> for OptimizeRouteResponse {
    fn from(result: RouteResult) -> Self {
        Self {
            stations_in_range: result.stations.into_iter().map(Into::into).collect(),
            fastest_route_url: result.route_url,
        }
    }
}

/// A catalog entry.
#[derive(Debug, Serialize)]
pub struct StationView {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    pub charger_type: String,
}

impl From<&ChargingStation> for StationView {
    fn from(station: &ChargingStation) -> Self {
        Self {
            name: station.name.clone(),
            latitude: station.latitude(),
            longitude: station.longitude(),
            address: station.address.clone(),
            charger_type: station.charger_type.clone(),
        }
    }
}

/// Response listing the current catalog.
#[derive(Debug, Serialize)]
pub struct StationListResponse {
    pub count: usize,

    /// When the current data was loaded (absent if nothing is loaded)
    pub loaded_at: Option<DateTime<Utc>>,

    /// Where the current data came from
    pub source: Option<String>,

    pub stations: Vec<StationView>,
}

/// Response after replacing the catalog.
#[derive(Debug, Serialize)]
pub struct CatalogLoadResponse {
    /// Number of stations now loaded
    pub loaded: usize,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable message
    pub error: String,

    /// Machine-readable classification
    pub kind: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Coordinate;

    fn station() -> ChargingStation {
        ChargingStation::new(
            "Banjara Hills EV Hub",
            Coordinate::new(17.4126, 78.4392).unwrap(),
            "Banjara Hills",
            "CCS2",
        )
    }

    #[test]
    fn request_accepts_integer_range() {
        let req: OptimizeRouteRequest = serde_json::from_str(
            r#"{"start_location": "Hyderabad", "destination_location": "Warangal", "range": 50}"#,
        )
        .unwrap();
        let query = RouteQuery::from(req);
        assert_eq!(query.start_name, "Hyderabad");
        assert_eq!(query.destination_name, "Warangal");
        assert_eq!(query.range_km, 50.0);
    }

    #[test]
    fn request_requires_range() {
        let result: Result<OptimizeRouteRequest, _> = serde_json::from_str(
            r#"{"start_location": "Hyderabad", "destination_location": "Warangal"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn response_field_names() {
        let result = RouteResult {
            stations: vec![RankedStation {
                station: station(),
                distance_km: 5.9,
            }],
            route_url: "https://www.google.com/maps/dir/?api=1&origin=1,2&destination=3,4".into(),
            origin: Coordinate::new(1.0, 2.0).unwrap(),
            destination: Coordinate::new(3.0, 4.0).unwrap(),
        };

        let json = serde_json::to_value(OptimizeRouteResponse::from(result)).unwrap();

        assert_eq!(
            json["fastest_route_url"],
            "https://www.google.com/maps/dir/?api=1&origin=1,2&destination=3,4"
        );
        let s = &json["stations_in_range"][0];
        assert_eq!(s["name"], "Banjara Hills EV Hub");
        assert_eq!(s["latitude"], 17.4126);
        assert_eq!(s["longitude"], 78.4392);
        assert_eq!(s["address"], "Banjara Hills");
        assert_eq!(s["charger_type"], "CCS2");
        assert_eq!(s["distance"], 5.9);
    }

    #[test]
    fn station_view_from_station() {
        let view = StationView::from(&station());
        assert_eq!(view.name, "Banjara Hills EV Hub");
        assert_eq!(view.charger_type, "CCS2");
    }
}
