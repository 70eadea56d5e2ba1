//! Range filtering and distance ranking.

use geo::GeodesicDistance;

use crate::domain::{ChargingStation, Coordinate, RankedStation};

/// A range that is not a positive, finite number of kilometres.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("range must be a positive number of kilometres, got {0}")]
pub struct InvalidRange(pub f64);

/// Check that a range is usable for filtering.
pub fn validate_range(range_km: f64) -> Result<f64, InvalidRange> {
    if range_km.is_finite() && range_km > 0.0 {
        Ok(range_km)
    } else {
        Err(InvalidRange(range_km))
    }
}

/// Geodesic distance between two coordinates in kilometres.
///
/// Uses Karney's algorithm on the WGS-84 ellipsoid.
pub fn geodesic_distance_km(a: Coordinate, b: Coordinate) -> f64 {
    a.to_point().geodesic_distance(&b.to_point()) / 1000.0
}

/// Stations within `range_km` of `origin`, nearest first.
///
/// The boundary is inclusive. Stations at exactly equal distance keep their
/// relative order from `stations`. An empty result is not an error; a
/// non-positive range is.
pub fn stations_in_range(
    origin: Coordinate,
    range_km: f64,
    stations: &[ChargingStation],
) -> Result<Vec<RankedStation>, InvalidRange> {
    let range_km = validate_range(range_km)?;

    let mut ranked: Vec<RankedStation> = stations
        .iter()
        .filter_map(|station| {
            let distance_km = geodesic_distance_km(origin, station.location);
            (distance_km <= range_km).then(|| RankedStation {
                station: station.clone(),
                distance_km,
            })
        })
        .collect();

    // Stable sort
    ranked.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));

    Ok(ranked)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    fn station(name: &str, lat: f64, lon: f64) -> ChargingStation {
        ChargingStation::new(name, coord(lat, lon), "Addr", "CCS2")
    }

    #[test]
    fn one_degree_of_latitude_at_equator() {
        let d = geodesic_distance_km(coord(0.0, 0.0), coord(1.0, 0.0));
        assert!((d - 110.574).abs() < 0.01, "got {d}");
    }

    #[test]
    fn hyderabad_to_warangal_is_about_134_km() {
        let d = geodesic_distance_km(coord(17.385, 78.4867), coord(17.9689, 79.5941));
        assert!((125.0..145.0).contains(&d), "got {d}");
    }

    #[test]
    fn both_nearby_stations_returned_in_distance_order() {
        let catalog = [station("A", 17.38, 78.48), station("B", 17.40, 78.50)];
        let origin = coord(17.39, 78.49);

        let ranked = stations_in_range(origin, 5.0, &catalog).unwrap();

        assert_eq!(ranked.len(), 2);
        assert!(ranked[0].distance_km <= ranked[1].distance_km);
        for r in &ranked {
            let expected = geodesic_distance_km(origin, r.station.location);
            assert_eq!(r.distance_km, expected);
            assert!(r.distance_km < 2.0);
        }
    }

    #[test]
    fn filters_out_far_stations() {
        let catalog = [
            station("Far", 17.9784, 79.5941),
            station("Near", 17.4126, 78.4392),
        ];
        let ranked = stations_in_range(coord(17.385, 78.4867), 10.0, &catalog).unwrap();

        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].station.name, "Near");
    }

    #[test]
    fn boundary_is_inclusive() {
        let origin = coord(17.385, 78.4867);
        let s = station("Edge", 17.4126, 78.4392);
        let exact = geodesic_distance_km(origin, s.location);

        let ranked = stations_in_range(origin, exact, std::slice::from_ref(&s)).unwrap();
        assert_eq!(ranked.len(), 1);
    }

    #[test]
    fn station_at_origin_has_zero_distance() {
        let origin = coord(17.385, 78.4867);
        let ranked = stations_in_range(origin, 1.0, &[station("Here", 17.385, 78.4867)]).unwrap();
        assert!(ranked[0].distance_km < 1e-9);
    }

    #[test]
    fn ties_keep_catalog_order() {
        let catalog = [
            station("Second", 17.50, 78.50),
            station("Twin 1", 17.40, 78.50),
            station("Twin 2", 17.40, 78.50),
            station("Twin 3", 17.40, 78.50),
        ];
        let ranked = stations_in_range(coord(17.39, 78.50), 50.0, &catalog).unwrap();

        let names: Vec<_> = ranked.iter().map(|r| r.station.name.as_str()).collect();
        assert_eq!(names, ["Twin 1", "Twin 2", "Twin 3", "Second"]);
    }

    #[test]
    fn empty_result_is_ok() {
        let ranked = stations_in_range(coord(0.0, 0.0), 1.0, &[station("A", 10.0, 10.0)]).unwrap();
        assert!(ranked.is_empty());

        let ranked = stations_in_range(coord(0.0, 0.0), 1.0, &[]).unwrap();
        assert!(ranked.is_empty());
    }

    #[test]
    fn rejects_bad_ranges() {
        let catalog = [station("A", 0.0, 0.0)];
        for bad in [0.0, -0.0, -5.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(stations_in_range(coord(0.0, 0.0), bad, &catalog).is_err());
        }
    }

    #[test]
    fn crosses_antimeridian() {
        let ranked =
            stations_in_range(coord(0.0, 179.99), 5.0, &[station("East", 0.0, -179.99)]).unwrap();
        assert_eq!(ranked.len(), 1);
        assert!(ranked[0].distance_km < 3.0);
    }

    #[test]
    fn invalid_range_display() {
        assert_eq!(
            InvalidRange(-1.0).to_string(),
            "range must be a positive number of kilometres, got -1"
        );
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_coordinate() -> impl Strategy<Value = Coordinate> {
        (-89.0..89.0f64, -179.0..179.0f64).prop_map(|(lat, lon)| Coordinate::new(lat, lon).unwrap())
    }

    /// Stations scattered within a couple of degrees of a centre point.
    fn arb_catalog(centre: Coordinate) -> impl Strategy<Value = Vec<ChargingStation>> {
        prop::collection::vec((-2.0..2.0f64, -2.0..2.0f64), 0..40).prop_map(move |offsets| {
            offsets
                .into_iter()
                .enumerate()
                .map(|(i, (dlat, dlon))| {
                    let lat = (centre.latitude() + dlat).clamp(-90.0, 90.0);
                    let lon = (centre.longitude() + dlon).clamp(-180.0, 180.0);
                    ChargingStation::new(
                        format!("S{i}"),
                        Coordinate::new(lat, lon).unwrap(),
                        "Addr",
                        "CCS2",
                    )
                })
                .collect()
        })
    }

    fn arb_scenario() -> impl Strategy<Value = (Coordinate, Vec<ChargingStation>)> {
        arb_coordinate().prop_flat_map(|origin| (Just(origin), arb_catalog(origin)))
    }

    proptest! {
        #[test]
        fn results_within_range_and_sorted(
            (origin, catalog) in arb_scenario(),
            range_km in 0.1..300.0f64,
        ) {
            let ranked = stations_in_range(origin, range_km, &catalog).unwrap();

            for r in &ranked {
                prop_assert!(r.distance_km <= range_km);
                prop_assert!(r.distance_km >= 0.0);
            }
            for pair in ranked.windows(2) {
                prop_assert!(pair[0].distance_km <= pair[1].distance_km);
            }
        }

        #[test]
        fn nothing_in_range_is_dropped(
            (origin, catalog) in arb_scenario(),
            range_km in 0.1..300.0f64,
        ) {
            let ranked = stations_in_range(origin, range_km, &catalog).unwrap();
            let expected = catalog
                .iter()
                .filter(|s| geodesic_distance_km(origin, s.location) <= range_km)
                .count();
            prop_assert_eq!(ranked.len(), expected);
        }

        #[test]
        fn non_positive_range_always_fails(
            (origin, catalog) in arb_scenario(),
            range_km in -1000.0..=0.0f64,
        ) {
            prop_assert_eq!(
                stations_in_range(origin, range_km, &catalog),
                Err(InvalidRange(range_km))
            );
        }
    }
}
