use serde::{Deserialize, Serialize};

/// Spherical earth radius used by the Web Mercator tile grid (meters).
pub const EARTH_RADIUS: f64 = 6_378_137.0;

/// Degrees to radians factor.
pub const RADIAN: f64 = std::f64::consts::PI / 180.0;

/// Edge length of one Web Mercator tile at zoom 0 (pixels).
pub const TILE_SIZE: f64 = 256.0;

/// Geographic coordinates in degrees.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    pub lat: f64,
    pub lng: f64,
}

impl GeoCoordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

/// Ground distance covered by one pixel (meters per pixel) at `lat_deg`
/// for the given zoom level.
pub fn ground_resolution(lat_deg: f64, zoom: f64) -> f64 {
    (lat_deg * RADIAN).cos() * 2.0 * std::f64::consts::PI * EARTH_RADIUS
        / (TILE_SIZE * 2f64.powf(zoom))
}

/// Shift `origin` by a pixel displacement at the given ground resolution.
///
/// `dy_px` grows northwards and `dx_px` eastwards. The longitude step is
/// scaled by `1 / cos(lat)` and diverges near the poles.
pub fn translate_gps_coord(
    dx_px: f64,
    dy_px: f64,
    meters_per_pixel: f64,
    origin: GeoCoordinate,
) -> GeoCoordinate {
    let dx_m = dx_px * meters_per_pixel;
    let dy_m = dy_px * meters_per_pixel;

    let d_lat = (dy_m / EARTH_RADIUS).to_degrees();
    let d_lng = (dx_m / EARTH_RADIUS).to_degrees() / (origin.lat * RADIAN).cos();

    GeoCoordinate::new(origin.lat + d_lat, origin.lng + d_lng)
}
