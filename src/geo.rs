//! Great-circle distance on a spherical Earth model.
//!
//! Used as the fallback when the network-distance table has no entry for a
//! pair of sites. Distances are in meters.

/// Mean Earth radius in meters (spherical model).
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Haversine distance in meters between two latitude/longitude points.
///
/// Coordinates are in degrees. The formula is numerically stable for small
/// separations, which dominate here since sites within one study area are
/// rarely more than a few hundred kilometers apart.
///
/// # Examples
///
/// ```
/// use u_locate::geo::haversine_m;
///
/// // One degree of longitude at the equator is ~111.2 km.
/// let d = haversine_m(0.0, 0.0, 0.0, 1.0);
/// assert!((d - 111_195.0).abs() < 10.0);
/// ```
pub fn haversine_m(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();
    let a = (dlat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_M * c
}
