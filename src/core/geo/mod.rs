//! Great-circle distance on a sphere (the haversine formula).
//!
//! Used by the radius query only. Pure computation, no failure modes beyond
//! ordinary floating point; the square-root argument is clamped to absorb
//! rounding error for near-antipodal or near-identical points.

use serde::{Deserialize, Serialize};

/// Sphere radius used for all distance computations, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6372.8;

/// A geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Great-circle distance from `self` to `other`, in kilometres.
    #[must_use]
    pub fn distance_km(self, other: Self) -> f64 {
        haversine_km(self, other)
    }
}

/// Great-circle distance between two points, in kilometres.
///
/// `haversine_km(p, p)` is exactly `0.0` for any point.
#[must_use]
pub fn haversine_km(from: GeoPoint, to: GeoPoint) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let lon1 = from.longitude.to_radians();
    let lon2 = to.longitude.to_radians();

    let half_dlat = (lat2 - lat1) / 2.0;
    let half_dlon = (lon2 - lon1) / 2.0;
    let a = half_dlat.sin();
    let b = half_dlon.sin();

    // Clamp before the square root: floating-point error can push the
    // haversine term a hair outside [0, 1].
    let h = a.mul_add(a, lat1.cos() * lat2.cos() * b * b).clamp(0.0, 1.0);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

#[cfg(test)]
mod tests {
    use super::{haversine_km, GeoPoint, EARTH_RADIUS_KM};
    use approx::assert_relative_eq;

    #[test]
    fn zero_distance_for_identical_points() {
        let p = GeoPoint::new(40.7484, -73.9857);
        assert_eq!(haversine_km(p, p), 0.0);
        assert_eq!(GeoPoint::default().distance_km(GeoPoint::default()), 0.0);
    }

    #[test]
    fn symmetric_in_its_arguments() {
        let a = GeoPoint::new(40.7484, -73.9857);
        let b = GeoPoint::new(40.6892, -74.0445);
        assert_relative_eq!(haversine_km(a, b), haversine_km(b, a), max_relative = 1e-12);
    }

    #[test]
    fn one_degree_of_latitude_on_the_sphere() {
        // 1 degree of latitude along a meridian is exactly R * pi / 180.
        let expected = EARTH_RADIUS_KM * std::f64::consts::PI / 180.0;
        let d = haversine_km(GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 0.0));
        assert_relative_eq!(d, expected, max_relative = 1e-12);
    }

    #[test]
    fn empire_state_to_statue_of_liberty() {
        let empire_state = GeoPoint::new(40.7484, -73.9857);
        let liberty = GeoPoint::new(40.6892, -74.0445);
        let d = haversine_km(empire_state, liberty);
        assert_relative_eq!(d, 8.24, max_relative = 0.02);
    }
}
