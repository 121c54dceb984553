use super::{GeoCoordinate, translate_gps_coord};

/// Horizontal pixel offset of each face center from the middle of a strip of
/// faces laid out edge-to-edge.
///
/// Faces left of the midpoint get negative offsets, faces right of it positive
/// ones, growing by one face width per step away from the middle.
pub fn face_offsets(face_widths: &[f64]) -> Vec<f64> {
    let total: f64 = face_widths.iter().sum();
    let mut left_edge = -total / 2.0;

    face_widths
        .iter()
        .map(|width| {
            let offset = left_edge + width / 2.0;
            left_edge += width;
            offset
        })
        .collect()
}

/// Geographic center of each face of a horizontal strip centered on `origin`.
pub fn face_centers(
    origin: GeoCoordinate,
    meters_per_pixel: f64,
    face_widths: &[f64],
) -> Vec<GeoCoordinate> {
    face_offsets(face_widths)
        .into_iter()
        .map(|offset| translate_gps_coord(offset, 0.0, meters_per_pixel, origin))
        .collect()
}
