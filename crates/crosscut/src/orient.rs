//! Orientation math: locator rotation to cutting-plane normal.
//!
//! A locator's rotation is Tait-Bryan in degrees. The cutting-plane
//! normal starts at the reference `(0,0,1)` and is rotated about the
//! Y axis first, then about the X axis. The order is fixed and
//! non-commutative. Rotation about Z spins the plane in place and
//! leaves the normal unchanged, so `rz` is accepted but unused.

use nalgebra::{Rotation3, Vector3};

const NEAR_ZERO: f64 = 1e-9;

/// Compute the unit cutting-plane normal for a locator rotation.
///
/// Angles are in degrees and may be any real value. Falls back to
/// `(0,0,1)` if the rotated vector degenerates to near-zero length,
/// which cannot happen for a pure rotation of a unit vector but is
/// guarded regardless.
pub fn plane_normal(rx_deg: f64, ry_deg: f64, _rz_deg: f64) -> Vector3<f64> {
    let rot_y = Rotation3::from_axis_angle(&Vector3::y_axis(), ry_deg.to_radians());
    let rot_x = Rotation3::from_axis_angle(&Vector3::x_axis(), rx_deg.to_radians());

    // Y first, then X. Swapping the order changes the result.
    let normal = rot_x * (rot_y * Vector3::z());

    let norm = normal.norm();
    if norm > NEAR_ZERO {
        normal / norm
    } else {
        Vector3::z()
    }
}

/// Compute the camera "up" vector for framing a cross-section.
///
/// Used only for camera orientation, never for geometry. Normals
/// parallel to ±Z get `(0,1,0)`, normals parallel to ±Y get
/// `(0,0,1)`, anything else gets the normalized cross product with
/// the Z axis.
pub fn camera_up(normal: &Vector3<f64>) -> Vector3<f64> {
    if axis_parallel(normal, &Vector3::z()) {
        return Vector3::y();
    }
    if axis_parallel(normal, &Vector3::y()) {
        return Vector3::z();
    }

    let up = normal.cross(&Vector3::z());
    let norm = up.norm();
    if norm > NEAR_ZERO {
        up / norm
    } else {
        // Z-aligned normals were handled above; defensive fallback.
        Vector3::y()
    }
}

fn axis_parallel(v: &Vector3<f64>, axis: &Vector3<f64>) -> bool {
    (v - axis).norm() < NEAR_ZERO || (v + axis).norm() < NEAR_ZERO
}
