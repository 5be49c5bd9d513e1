//! Great-circle helpers shared by route selection, clue generation and guess checking.
use serde::{Deserialize, Serialize};

use crate::constants::EARTH_RADIUS_KM;

/// Haversine distance between two points, in kilometers.
#[must_use]
pub fn distance_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lng = (lng2 - lng1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Initial bearing from the first point towards the second, normalized to `[0, 360)`.
#[must_use]
pub fn bearing_degrees(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lng = (lng2 - lng1).to_radians();

    let y = delta_lng.sin() * lat2_rad.cos();
    let x = lat1_rad.cos() * lat2_rad.sin() - lat1_rad.sin() * lat2_rad.cos() * delta_lng.cos();
    let bearing = y.atan2(x).to_degrees().rem_euclid(360.0);
    // rem_euclid can return exactly 360.0 for tiny negative inputs
    if bearing >= 360.0 { 0.0 } else { bearing }
}

/// Resolution used when reducing a bearing to a compass label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompassRose {
    EightPoint,
    SixteenPoint,
}

const EIGHT_POINTS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];
const SIXTEEN_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

impl CompassRose {
    /// Label for the sector containing `bearing`.
    #[must_use]
    pub fn label(self, bearing: f64) -> &'static str {
        let points: &[&'static str] = match self {
            Self::EightPoint => &EIGHT_POINTS,
            Self::SixteenPoint => &SIXTEEN_POINTS,
        };
        let sector = 360.0 / crate::numbers::usize_to_f64(points.len());
        let shifted = (bearing.rem_euclid(360.0) + sector / 2.0).rem_euclid(360.0);
        let idx = crate::numbers::floor_f64_to_usize(shifted / sector) % points.len();
        points[idx]
    }
}
