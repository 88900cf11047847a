//! Landing spring and acceleration tilt.
//!
//! Landing: on the airborne -> grounded transition the vertical impact speed
//! is injected into a spring as a downward impulse; the spring position is a
//! vertical visual offset that dips and recovers.
//!
//! Acceleration tilt: the horizontal input acceleration, rotated into the
//! character's visual frame, drives a smoothed pitch/roll pair so the body
//! leans into acceleration. Magnitude scales up with speed.

use crate::{
    easing::smooth_mix,
    math::{Quat, Vec3},
    spring::Spring,
};

#[derive(Clone, Copy, Debug)]
pub struct LandingSystem {
    spring: Spring,
    /// Impulse per m/s of impact speed.
    pub impulse_scale: f32,
    /// Tilt amplitude at rest (radians); doubles at max speed.
    pub tilt_magnitude: f32,
    /// Exponential smoothing rate for the tilt pair (1/s).
    pub tilt_smoothing: f32,

    was_grounded: bool,
    tilt_pitch: f32,
    tilt_roll: f32,
}

impl LandingSystem {
    pub fn new(stiffness: f32, impulse_scale: f32) -> Self {
        Self {
            spring: Spring::new(stiffness),
            impulse_scale,
            tilt_magnitude: 0.25,
            tilt_smoothing: 8.0,
            was_grounded: false,
            tilt_pitch: 0.0,
            tilt_roll: 0.0,
        }
    }

    /// Vertical visual offset (meters, negative = crouched).
    #[inline]
    pub fn vertical_offset(&self) -> f32 {
        self.spring.position
    }

    #[inline]
    pub fn tilt_pitch(&self) -> f32 {
        self.tilt_pitch
    }

    #[inline]
    pub fn tilt_roll(&self) -> f32 {
        self.tilt_roll
    }

    #[inline]
    pub fn stiffness(&self) -> f32 {
        self.spring.stiffness()
    }

    pub fn set_stiffness(&mut self, stiffness: f32) {
        self.spring.set_stiffness(stiffness);
    }

    /// Advance one tick.
    ///
    /// - `is_grounded` / `vertical_speed_before_contact` come straight from
    ///   the controller after its collision step.
    /// - `accel_h` is the horizontal input acceleration (intent * accel).
    /// - `speed_ratio` is `|v_h| / max_speed`, pre-clamp not required.
    pub fn update(
        &mut self,
        is_grounded: bool,
        vertical_speed_before_contact: f32,
        accel_h: Vec3,
        orientation_yaw: f32,
        speed_ratio: f32,
        dt: f32,
    ) {
        // Landing edge: inject the impact as a downward velocity impulse.
        if is_grounded && !self.was_grounded {
            self.spring
                .add_impulse(-vertical_speed_before_contact.abs() * self.impulse_scale);
        }
        self.was_grounded = is_grounded;
        self.spring.update(0.0, dt);

        // Acceleration tilt in the character's visual frame.
        let local = Quat::from_axis_angle(&Vec3::y_axis(), -orientation_yaw) * accel_h;
        let planar = (local.x * local.x + local.z * local.z).sqrt();
        let (target_pitch, target_roll) = if planar > 1.0e-4 {
            let magnitude = self.tilt_magnitude * (0.5 + speed_ratio.clamp(0.0, 1.0));
            // Lean into the acceleration: forward accel pitches nose-down,
            // rightward accel rolls right.
            (
                local.z / planar * magnitude,
                -local.x / planar * magnitude,
            )
        } else {
            (0.0, 0.0)
        };

        self.tilt_pitch = smooth_mix(self.tilt_pitch, target_pitch, self.tilt_smoothing, dt);
        self.tilt_roll = smooth_mix(self.tilt_roll, target_roll, self.tilt_smoothing, dt);
    }

    pub fn reset(&mut self) {
        self.spring.snap_to(0.0);
        self.was_grounded = false;
        self.tilt_pitch = 0.0;
        self.tilt_roll = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn landing_edge_injects_scaled_impulse() {
        let mut l = LandingSystem::new(120.0, 0.05);
        // Airborne frame first so the edge is observable.
        l.update(false, -7.0, Vec3::zeros(), 0.0, 0.0, DT);
        assert_eq!(l.vertical_offset(), 0.0);

        // Scenario 4: first grounded frame after a fall at ~7 m/s.
        l.update(true, -7.0, Vec3::zeros(), 0.0, 0.0, DT);
        // One spring step after an impulse of -0.35: the offset dips by
        // roughly velocity * dt (damping eats some of it within the step).
        assert!(l.vertical_offset() < -1.0e-3);
        assert!(l.vertical_offset() > -0.35 * DT - 1.0e-3);
    }

    #[test]
    fn staying_grounded_does_not_reinject() {
        let mut l = LandingSystem::new(120.0, 0.05);
        l.update(false, -7.0, Vec3::zeros(), 0.0, 0.0, DT);
        l.update(true, -7.0, Vec3::zeros(), 0.0, 0.0, DT);

        // Let the spring recover, impact value still nonzero on input.
        for _ in 0..1200 {
            l.update(true, -7.0, Vec3::zeros(), 0.0, 0.0, DT);
        }
        assert!(l.vertical_offset().abs() < 1.0e-3);
    }

    #[test]
    fn acceleration_tilt_leans_into_forward_accel() {
        let mut l = LandingSystem::new(120.0, 0.05);
        // Forward (+Z) acceleration at yaw 0, half speed.
        for _ in 0..600 {
            l.update(true, 0.0, Vec3::new(0.0, 0.0, 5.0), 0.0, 0.5, DT);
        }
        let expected = l.tilt_magnitude * (0.5 + 0.5);
        assert!((l.tilt_pitch() - expected).abs() < 1.0e-2);
        assert!(l.tilt_roll().abs() < 1.0e-3);
    }

    #[test]
    fn tilt_decays_to_zero_without_acceleration() {
        let mut l = LandingSystem::new(120.0, 0.05);
        for _ in 0..120 {
            l.update(true, 0.0, Vec3::new(3.0, 0.0, 0.0), 0.0, 1.0, DT);
        }
        assert!(l.tilt_roll().abs() > 0.05);

        for _ in 0..600 {
            l.update(true, 0.0, Vec3::zeros(), 0.0, 1.0, DT);
        }
        assert!(l.tilt_pitch().abs() < 1.0e-3);
        assert!(l.tilt_roll().abs() < 1.0e-3);
    }

    #[test]
    fn tilt_respects_orientation_frame() {
        // World +X acceleration with yaw = PI/2 (facing +X) is locally
        // forward, so it should pitch rather than roll.
        let mut l = LandingSystem::new(120.0, 0.05);
        for _ in 0..600 {
            l.update(
                true,
                0.0,
                Vec3::new(5.0, 0.0, 0.0),
                std::f32::consts::FRAC_PI_2,
                0.0,
                DT,
            );
        }
        assert!(l.tilt_pitch() > 0.05);
        assert!(l.tilt_roll().abs() < 1.0e-2);
    }
}
