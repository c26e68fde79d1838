//! Spatial math for distances, travel times and synthetic positions.

use crate::models::Coordinate;

/// Mean Earth radius used by the haversine formula, in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Calculate distance between two points in meters using Haversine formula.
///
/// This is the standard formula for calculating great-circle distance
/// between two points on a sphere given their latitudes and longitudes.
///
/// # Arguments
/// * `lat1`, `lon1` - First point coordinates in decimal degrees
/// * `lat2`, `lon2` - Second point coordinates in decimal degrees
///
/// # Returns
/// Distance in meters
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let dphi = (lat2 - lat1).to_radians();
    let dlambda = (lon2 - lon1).to_radians();
    let a = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Great-circle distance between two coordinates in meters.
pub fn distance(a: Coordinate, b: Coordinate) -> f64 {
    haversine_distance(a.lat, a.lng, b.lat, b.lng)
}

/// Seconds needed to cover `distance_m` at `speed_kmh`.
///
/// The caller guarantees a strictly positive speed; a zero speed yields an
/// infinite duration.
pub fn travel_time_secs(distance_m: f64, speed_kmh: f64) -> f64 {
    let speed_mps = speed_kmh * 1000.0 / 3600.0;
    distance_m / speed_mps
}

/// Sum of consecutive sample distances along `path` between two indices.
///
/// Indices past the end of the path are clamped, so an out-of-range request
/// only covers the samples that exist.
pub fn path_distance(path: &[Coordinate], from: usize, to: usize) -> f64 {
    let end = to.min(path.len().saturating_sub(1));
    if from >= end {
        return 0.0;
    }
    path[from..=end]
        .windows(2)
        .map(|pair| distance(pair[0], pair[1]))
        .sum()
}

/// Offset a position by distance and bearing.
///
/// # Arguments
/// * `origin` - Starting position in degrees
/// * `distance_m` - Distance in meters
/// * `bearing_rad` - Bearing in radians (0 = north, π/2 = east)
pub fn offset_by_bearing(origin: Coordinate, distance_m: f64, bearing_rad: f64) -> Coordinate {
    if distance_m.abs() <= f64::EPSILON {
        return origin;
    }

    let lat1 = origin.lat.to_radians();
    let lon1 = origin.lng.to_radians();
    let angular_distance = distance_m / EARTH_RADIUS_M;

    let sin_lat1 = lat1.sin();
    let cos_lat1 = lat1.cos();
    let sin_ad = angular_distance.sin();
    let cos_ad = angular_distance.cos();

    let sin_lat2 = sin_lat1 * cos_ad + cos_lat1 * sin_ad * bearing_rad.cos();
    let lat2 = sin_lat2.clamp(-1.0, 1.0).asin();

    let y = bearing_rad.sin() * sin_ad * cos_lat1;
    let x = cos_ad - sin_lat1 * sin_lat2;
    let mut lon2 = lon1 + y.atan2(x);
    lon2 =
        (lon2 + std::f64::consts::PI).rem_euclid(2.0 * std::f64::consts::PI) - std::f64::consts::PI;

    Coordinate::new(lat2.to_degrees(), lon2.to_degrees())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_known_distance() {
        // ~111km between these points (1 degree latitude)
        let dist = haversine_distance(0.0, 0.0, 1.0, 0.0);
        assert!((dist - 111_194.0).abs() < 100.0);
    }

    #[test]
    fn test_haversine_same_point() {
        let dist = haversine_distance(33.6846, -117.8265, 33.6846, -117.8265);
        assert!(dist < 0.001);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Coordinate::new(33.6846, -117.8265);
        let b = Coordinate::new(33.70, -117.80);
        assert!((distance(a, b) - distance(b, a)).abs() < 1e-9);
    }

    #[test]
    fn distance_grows_with_separation() {
        let origin = Coordinate::new(0.0, 0.0);
        let near = distance(origin, Coordinate::new(0.0, 0.01));
        let far = distance(origin, Coordinate::new(0.0, 0.02));
        assert!(near > 0.0);
        assert!(far > near);
    }

    #[test]
    fn travel_time_converts_kmh_to_seconds() {
        // 1 km at 60 km/h takes one minute.
        assert!((travel_time_secs(1000.0, 60.0) - 60.0).abs() < 1e-9);
        // 400 m at 40 km/h is 36 seconds.
        assert!((travel_time_secs(400.0, 40.0) - 36.0).abs() < 1e-9);
    }

    #[test]
    fn path_distance_sums_consecutive_samples() {
        let path = vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(0.0, 0.01),
            Coordinate::new(0.01, 0.01),
        ];
        let expected = distance(path[0], path[1]) + distance(path[1], path[2]);
        assert!((path_distance(&path, 0, 2) - expected).abs() < 1e-9);
        assert_eq!(path_distance(&path, 2, 2), 0.0);
        assert_eq!(path_distance(&path, 2, 0), 0.0);
        assert!((path_distance(&path, 1, 99) - distance(path[1], path[2])).abs() < 1e-9);
    }

    #[test]
    fn offset_by_bearing_round_trips_distance() {
        let origin = Coordinate::new(33.0, -117.0);
        let moved = offset_by_bearing(origin, 300.0, 90.0_f64.to_radians());
        assert!((distance(origin, moved) - 300.0).abs() < 0.5);
        assert!(moved.lng > origin.lng);
        assert_eq!(offset_by_bearing(origin, 0.0, 1.0), origin);
    }
}
