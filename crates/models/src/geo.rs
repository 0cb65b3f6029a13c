//! Coordinate helpers used by the responder view.

use crate::sos::Location;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Default map centre when no position is available (Manila).
pub const FALLBACK_LOCATION: Location = Location { lat: 14.5995, lng: 120.9842 };

/// Great-circle distance in kilometres (haversine).
pub fn distance_km(a: &Location, b: &Location) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// `"14.5995°, 120.9842°"`; non-finite input renders as unknown.
pub fn format_coordinates(loc: &Location) -> String {
    if !(loc.lat.is_finite() && loc.lng.is_finite()) {
        return "Unknown location".to_string();
    }
    format!("{:.4}°, {:.4}°", loc.lat, loc.lng)
}
