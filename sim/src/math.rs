//! Angle and vector kernels shared by the whole crate.
//!
//! Conventions:
//! - World up is +Y; "horizontal" means the XZ plane.
//! - Yaw is a scalar angle in radians, wrapped to `[-PI, PI]`, measured so
//!   that `yaw = atan2(dir.x, dir.z)` for a horizontal direction `dir`.
//!   Yaw 0 therefore faces +Z.
//! - Distances are in meters, time in seconds.

use nalgebra as na;
use std::f32::consts::{PI, TAU};

/// Common math aliases for clarity and consistency.
pub type Vec3 = na::Vector3<f32>;
pub type Vec2 = na::Vector2<f32>;
pub type Quat = na::UnitQuaternion<f32>;
pub type Iso = na::Isometry3<f32>;

/// Standard gravity magnitude used to express lateral acceleration in g (m/s^2).
pub const G_EARTH: f32 = 9.81;

/// Minimum squared planar motion required to derive a yaw from a direction.
pub const YAW_EPS: f32 = 1.0e-6;

/// Wraps an angle into `[-PI, PI]`.
#[inline]
pub fn wrap_angle(a: f32) -> f32 {
    let mut w = a % TAU;
    if w > PI {
        w -= TAU;
    } else if w < -PI {
        w += TAU;
    }
    w
}

/// Signed shortest-arc difference `to - from`, in `[-PI, PI]`.
///
/// Safe across the `±PI` seam: the result is the smallest rotation that takes
/// `from` onto `to`.
#[inline]
pub fn shortest_arc(from: f32, to: f32) -> f32 {
    wrap_angle(to - from)
}

/// Projects a vector onto the horizontal (XZ) plane.
#[inline]
pub fn horizontal(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

/// Speed of the horizontal component (m/s).
#[inline]
pub fn horizontal_speed(v: Vec3) -> f32 {
    (v.x * v.x + v.z * v.z).sqrt()
}

/// Horizontal forward direction for a yaw angle. Unit length.
#[inline]
pub fn yaw_to_forward(yaw: f32) -> Vec3 {
    Vec3::new(yaw.sin(), 0.0, yaw.cos())
}

/// Horizontal right direction for a yaw angle. Unit length, orthogonal to
/// [`yaw_to_forward`], chosen so that `forward x right = up`.
#[inline]
pub fn yaw_to_right(yaw: f32) -> Vec3 {
    Vec3::new(yaw.cos(), 0.0, -yaw.sin())
}

/// Yaw for a (mostly) horizontal direction, or `None` when the planar motion
/// is too small to define one.
#[inline]
pub fn yaw_from_direction(v: Vec3) -> Option<f32> {
    if v.x * v.x + v.z * v.z > YAW_EPS {
        return Some(v.x.atan2(v.z));
    }
    None
}

/// True when every component is finite.
#[inline]
pub fn is_finite(v: Vec3) -> bool {
    v.x.is_finite() && v.y.is_finite() && v.z.is_finite()
}
