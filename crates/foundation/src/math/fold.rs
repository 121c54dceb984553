use super::RADIAN;

/// Horizontal pixel shortfall of a pair of faces of `face_width` once each is
/// rotated out of plane by `fold_angle_deg`.
pub fn folding_gap(face_width: f64, fold_angle_deg: f64) -> f64 {
    let projected_width = face_width * (fold_angle_deg * RADIAN).cos();
    2.0 * face_width - 2.0 * projected_width
}

/// Out-of-plane rotation of the face at `face_index`.
///
/// The sign alternates starting with `-angle`, so neighbouring faces fold
/// against each other like an accordion.
pub fn face_fold_angle(angle_deg: f64, face_index: usize) -> f64 {
    if face_index % 2 == 0 { -angle_deg } else { angle_deg }
}

/// Horizontal translation that pulls pair `pair_index` towards the middle of
/// the strip to close the folding gap.
pub fn pair_translation(gap: f64, pair_count: usize, pair_index: usize) -> f64 {
    let steps = pair_count as f64 - (2 * pair_index + 1) as f64;
    gap * steps / 2.0
}
