//! Smoothing and interpolation helpers.
//!
//! `smooth_mix` is the frame-rate-independent exponential blend used wherever
//! a value chases a target without a full spring (acceleration tilt, smoothed
//! locomotion speed). The blend factor `1 - e^(-rate * dt)` attenuates the
//! remaining distance at a fixed exponential rate regardless of step size.

use crate::math::Vec3;

/// Exponentially blend `current` toward `target` at `rate` (1/s).
#[inline]
pub fn smooth_mix(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    let t = 1.0 - (-rate.max(0.0) * dt.max(0.0)).exp();
    current + (target - current) * t
}

/// Vector form of [`smooth_mix`].
#[inline]
pub fn smooth_mix_vec3(current: Vec3, target: Vec3, rate: f32, dt: f32) -> Vec3 {
    let t = 1.0 - (-rate.max(0.0) * dt.max(0.0)).exp();
    current + (target - current) * t
}

/// Cubic smoothstep: 0 below `edge0`, 1 above `edge1`, `3t^2 - 2t^3` between.
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    if edge1 <= edge0 {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Cubic Hermite between `p0` and `p1` with tangents `m0`, `m1`, `t` in [0, 1].
#[inline]
pub fn hermite(p0: f32, p1: f32, m0: f32, m1: f32, t: f32) -> f32 {
    let t2 = t * t;
    let t3 = t2 * t;
    (2.0 * t3 - 3.0 * t2 + 1.0) * p0
        + (t3 - 2.0 * t2 + t) * m0
        + (-2.0 * t3 + 3.0 * t2) * p1
        + (t3 - t2) * m1
}

/// Hermite ease with zero end tangents, remapping `t` for keyframe blending.
///
/// This is the curve the gait cycle uses between pass and reach poses: it
/// starts and ends with zero velocity so the pose "settles" at each keyframe.
#[inline]
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smooth_mix_is_frame_rate_independent() {
        // Reaching the same wall-clock time through different step counts must
        // land (almost) on the same value.
        let rate = 6.0;
        let total = 0.5;

        let mut coarse = 0.0f32;
        for _ in 0..5 {
            coarse = smooth_mix(coarse, 1.0, rate, total / 5.0);
        }

        let mut fine = 0.0f32;
        for _ in 0..500 {
            fine = smooth_mix(fine, 1.0, rate, total / 500.0);
        }

        assert!((coarse - fine).abs() < 1.0e-4, "{coarse} vs {fine}");
        // Both match the closed form 1 - e^(-rate * total).
        let exact = 1.0 - (-rate * total).exp();
        assert!((coarse - exact).abs() < 1.0e-4);
    }

    #[test]
    fn smoothstep_clamps_and_interpolates() {
        assert_eq!(smoothstep(2.0, 4.0, 1.0), 0.0);
        assert_eq!(smoothstep(2.0, 4.0, 5.0), 1.0);
        assert!((smoothstep(2.0, 4.0, 3.0) - 0.5).abs() < 1.0e-6);
    }

    #[test]
    fn hermite_hits_endpoints() {
        assert!((hermite(1.0, 5.0, 0.3, -0.7, 0.0) - 1.0).abs() < 1.0e-6);
        assert!((hermite(1.0, 5.0, 0.3, -0.7, 1.0) - 5.0).abs() < 1.0e-6);
    }

    #[test]
    fn ease_in_out_matches_zero_tangent_hermite() {
        for &t in &[0.0f32, 0.25, 0.5, 0.75, 1.0] {
            let direct = hermite(0.0, 1.0, 0.0, 0.0, t);
            assert!((ease_in_out(t) - direct).abs() < 1.0e-6);
        }
    }

    #[test]
    fn ease_in_out_has_flat_ends() {
        // Finite-difference slope near the endpoints should be tiny.
        let h = 1.0e-3;
        assert!((ease_in_out(h) - ease_in_out(0.0)) / h < 0.01);
        assert!((ease_in_out(1.0) - ease_in_out(1.0 - h)) / h < 0.01);
    }
}
