//! Great-circle distance between two coordinates.
//!
//! Used both for edge weights in the preference graph and for the raw
//! distance reported next to each ranked café.

/// Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two (lat, lng) points in kilometers.
pub fn haversine_km(from: (f64, f64), to: (f64, f64)) -> f64 {
    let (lat1, lng1) = from;
    let (lat2, lng2) = to;

    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lng = (lng2 - lng1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_same_point() {
        let dist = haversine_km((-12.1211, -77.0297), (-12.1211, -77.0297));
        assert_eq!(dist, 0.0, "Same point should have zero distance");
    }

    #[test]
    fn test_haversine_symmetric() {
        let miraflores = (-12.1211, -77.0297);
        let barranco = (-12.1490, -77.0219);
        assert_eq!(
            haversine_km(miraflores, barranco),
            haversine_km(barranco, miraflores),
            "Distance should be symmetric"
        );
    }

    #[test]
    fn test_one_degree_longitude_at_equator() {
        let dist = haversine_km((0.0, 0.0), (0.0, 1.0));
        assert!((dist - 111.19).abs() < 0.01, "expected ~111.19 km, got {}", dist);
    }

    #[test]
    fn test_haversine_known_distance() {
        // Lima (-12.0464, -77.0428) to Bogotá (4.7110, -74.0721), ~1880 km
        let dist = haversine_km((-12.0464, -77.0428), (4.7110, -74.0721));
        assert!(dist > 1850.0 && dist < 1910.0, "Lima to Bogotá should be ~1880km, got {}", dist);
    }
}
