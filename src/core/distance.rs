use crate::models::{Coordinate, Listing};

/// Earth's radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculate the Haversine distance between two points in kilometers
///
/// # Arguments
/// * `lat1` - Latitude of first point in degrees
/// * `lng1` - Longitude of first point in degrees
/// * `lat2` - Latitude of second point in degrees
/// * `lng2` - Longitude of second point in degrees
///
/// # Returns
/// Great-circle distance in kilometers, never negative
#[inline]
pub fn haversine_distance(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lng = (lng2 - lng1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    // Rounding can push `a` a hair outside [0, 1] for near-antipodal points
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

impl Coordinate {
    /// Great-circle distance to another coordinate in kilometers
    #[inline]
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        haversine_distance(self.lat, self.lng, other.lat, other.lng)
    }
}

/// Distance from `origin` to a listing, `None` when the listing has no coordinates
#[inline]
pub fn distance_to_listing(origin: &Coordinate, listing: &Listing) -> Option<f64> {
    listing
        .coordinates()
        .map(|coordinates| origin.distance_to(&coordinates))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_distance() {
        // MG Road to Whitefield, Bangalore (approximately 16 km)
        let distance = haversine_distance(12.9756, 77.6050, 12.9698, 77.7500);
        assert!((distance - 15.7).abs() < 1.5, "Distance should be ~15.7km, got {}", distance);
    }

    #[test]
    fn test_haversine_zero_for_identical_points() {
        assert_eq!(haversine_distance(12.97, 77.59, 12.97, 77.59), 0.0);
    }

    #[test]
    fn test_haversine_symmetric() {
        let pairs = [
            ((12.97, 77.59), (28.61, 77.21)),
            ((-33.86, 151.21), (51.51, -0.13)),
            ((89.9, 10.0), (-89.9, -170.0)),
            ((0.0, 179.9), (0.0, -179.9)),
        ];

        for ((lat1, lng1), (lat2, lng2)) in pairs {
            let forward = haversine_distance(lat1, lng1, lat2, lng2);
            let backward = haversine_distance(lat2, lng2, lat1, lng1);
            assert!((forward - backward).abs() < 1e-9);
            assert!(forward >= 0.0);
        }
    }

    #[test]
    fn test_haversine_across_antimeridian() {
        // 0.2 degrees of longitude on the equator is ~22 km, not ~40000 km
        let distance = haversine_distance(0.0, 179.9, 0.0, -179.9);
        assert!((distance - 22.2).abs() < 0.5, "got {}", distance);
    }

    #[test]
    fn test_antipodal_points() {
        let distance = haversine_distance(0.0, 0.0, 0.0, 180.0);
        let half_circumference = std::f64::consts::PI * EARTH_RADIUS_KM;
        assert!((distance - half_circumference).abs() < 1e-6);
    }
}
