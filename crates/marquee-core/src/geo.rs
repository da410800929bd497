//! Great-circle distance between coordinates.

use serde::{Deserialize, Serialize};

use crate::theater::format_one_decimal;

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A WGS84 latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Distance to `other` formatted as kilometers with one decimal.
    #[must_use]
    pub fn distance_to(&self, other: &Coordinate) -> String {
        distance_km(self.latitude, self.longitude, other.latitude, other.longitude)
    }
}

/// Haversine distance in kilometers.
#[must_use]
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Haversine distance formatted with exactly one fractional digit, e.g. `"3.4"`.
#[must_use]
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> String {
    format_one_decimal(haversine_km(lat1, lon1, lat2, lon2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_point_is_zero() {
        assert_eq!(distance_km(40.0, -73.0, 40.0, -73.0), "0.0");
        assert_eq!(distance_km(-33.8688, 151.2093, -33.8688, 151.2093), "0.0");
    }

    #[test]
    fn distance_is_symmetric() {
        let pairs = [
            ((40.7128, -74.0060), (34.0522, -118.2437)),
            ((51.5074, -0.1278), (48.8566, 2.3522)),
            ((-6.2088, 106.8456), (-6.9175, 107.6191)),
            ((0.0, 179.9), (0.0, -179.9)),
        ];
        for ((a_lat, a_lon), (b_lat, b_lon)) in pairs {
            assert_eq!(
                distance_km(a_lat, a_lon, b_lat, b_lon),
                distance_km(b_lat, b_lon, a_lat, a_lon),
                "asymmetric for ({a_lat},{a_lon}) <-> ({b_lat},{b_lon})"
            );
        }
    }

    #[test]
    fn new_york_to_los_angeles_is_about_3936_km() {
        let d = haversine_km(40.7128, -74.0060, 34.0522, -118.2437);
        assert!((d - 3935.7).abs() < 5.0, "got {d}");
    }

    #[test]
    fn one_degree_of_latitude_is_about_111_km() {
        assert_eq!(distance_km(0.0, 0.0, 1.0, 0.0), "111.2");
    }

    #[test]
    fn antimeridian_crossing_is_short() {
        let d = haversine_km(0.0, 179.9, 0.0, -179.9);
        assert!(d < 25.0, "got {d}");
    }

    #[test]
    fn output_always_has_one_fractional_digit() {
        for s in [
            distance_km(10.0, 10.0, 10.0001, 10.0),
            distance_km(10.0, 10.0, 20.0, 20.0),
            distance_km(-45.0, 0.0, 45.0, 180.0),
        ] {
            let (_, frac) = s.split_once('.').expect("decimal point");
            assert_eq!(frac.len(), 1, "unexpected format: {s}");
        }
    }

    #[test]
    fn coordinate_distance_to_matches_free_function() {
        let a = Coordinate::new(51.5074, -0.1278);
        let b = Coordinate::new(48.8566, 2.3522);
        assert_eq!(
            a.distance_to(&b),
            distance_km(51.5074, -0.1278, 48.8566, 2.3522)
        );
    }
}
