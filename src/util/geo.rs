use geo_types::Coord;
use std::f64::consts::PI;

pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

pub struct GeoUtils;

impl GeoUtils {
    // Great circle distance in meters. Coordinates are x = longitude, y = latitude
    pub fn distance(p1: Coord, p2: Coord) -> f64 {
        let lat1 = GeoUtils::deg2rad(p1.y);
        let lat2 = GeoUtils::deg2rad(p2.y);
        let d_lat = lat2 - lat1;
        let d_long = GeoUtils::deg2rad(p2.x - p1.x);

        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_long / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_M * c
    }

    pub fn deg2rad(deg: f64) -> f64 {
        deg * PI / 180.0
    }

    pub fn rad2deg(rad: f64) -> f64 {
        rad * 180.0 / PI
    }

    // Sum of the distances between consecutive coordinates
    pub fn path_length(coords: &[Coord]) -> f64 {
        coords
            .windows(2)
            .map(|pair| GeoUtils::distance(pair[0], pair[1]))
            .sum()
    }
}
