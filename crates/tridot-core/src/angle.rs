//! Angle utilities used by the heading math.

/// Normalizes an angle in degrees into the half-open range (-180, 180].
///
/// Exactly ±180 maps to +180.
#[inline]
pub fn normalize_deg_signed(deg: f32) -> f32 {
    let wrapped = deg.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Signed rotation in degrees that carries direction `from` onto `to`
/// (both in radians), normalized into (-180, 180].
#[inline]
pub fn signed_angle_deg(from: f32, to: f32) -> f32 {
    normalize_deg_signed((to - from).to_degrees())
}
