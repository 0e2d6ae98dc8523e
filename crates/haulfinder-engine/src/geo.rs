//! Great-circle distance math.
//!
//! Distances are computed at full `f64` precision and only rounded to one
//! decimal place when they are assembled into a response, so rounding can
//! never flip the ranked order.

use haulfinder_core::LatLng;

/// Mean Earth radius in miles, matching the ranking contract.
pub const EARTH_RADIUS_MILES: f64 = 3958.8;

/// Haversine distance between two points, in miles.
#[must_use]
pub fn haversine_miles(a: LatLng, b: LatLng) -> f64 {
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lng = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_MILES * h.sqrt().asin()
}

/// Round a distance to one decimal place for display.
#[must_use]
pub fn display_miles(distance: f64) -> f64 {
    (distance * 10.0).round() / 10.0
}
