//! Lean and pitch springs.
//!
//! Lean (roll about the local forward axis) tracks lateral g-force; pitch
//! tracks forward acceleration estimated by finite-differencing velocity.
//! Both are critically damped so hard cornering settles without wobble.

use crate::{
    math::{Iso, Quat, Vec3, yaw_to_forward},
    spring::Spring,
};
use nalgebra as na;

#[derive(Clone, Copy, Debug)]
pub struct TiltSystem {
    lean_spring: Spring,
    pitch_spring: Spring,
    /// Roll per unit of lateral g (radians).
    pub lean_multiplier: f32,
    /// Pitch per m/s^2 of forward acceleration (radians).
    pub pitch_multiplier: f32,
    prev_velocity: Vec3,
}

impl TiltSystem {
    pub fn new(stiffness: f32, lean_multiplier: f32, pitch_multiplier: f32) -> Self {
        Self {
            lean_spring: Spring::new(stiffness),
            pitch_spring: Spring::new(stiffness),
            lean_multiplier,
            pitch_multiplier,
            prev_velocity: Vec3::zeros(),
        }
    }

    #[inline]
    pub fn lean(&self) -> f32 {
        self.lean_spring.position
    }

    #[inline]
    pub fn pitch(&self) -> f32 {
        self.pitch_spring.position
    }

    #[inline]
    pub fn lean_stiffness(&self) -> f32 {
        self.lean_spring.stiffness()
    }

    #[inline]
    pub fn pitch_stiffness(&self) -> f32 {
        self.pitch_spring.stiffness()
    }

    pub fn set_lean_stiffness(&mut self, stiffness: f32) {
        self.lean_spring.set_stiffness(stiffness);
    }

    pub fn set_pitch_stiffness(&mut self, stiffness: f32) {
        self.pitch_spring.set_stiffness(stiffness);
    }

    /// Advance both springs from the current frame's physics state.
    ///
    /// `orientation_yaw` is the displayed yaw (the tilt axes live in the
    /// visual frame, not the physics heading).
    pub fn update(&mut self, lateral_g: f32, velocity: Vec3, orientation_yaw: f32, dt: f32) {
        let lean_target = lateral_g * self.lean_multiplier;

        let forward = yaw_to_forward(orientation_yaw);
        let accel = (velocity - self.prev_velocity) / dt;
        let forward_accel = accel.dot(&forward);
        let pitch_target = -forward_accel * self.pitch_multiplier;

        self.lean_spring.update(lean_target, dt);
        self.pitch_spring.update(pitch_target, dt);
        self.prev_velocity = velocity;
    }

    /// Composed visual transform: `T(position) * R_y(yaw) * R_z(lean) * R_x(pitch)`.
    pub fn visual_transform(&self, position: Vec3, orientation_yaw: f32) -> Iso {
        let rotation = Quat::from_axis_angle(&Vec3::y_axis(), orientation_yaw)
            * Quat::from_axis_angle(&Vec3::z_axis(), self.lean())
            * Quat::from_axis_angle(&Vec3::x_axis(), self.pitch());
        Iso::from_parts(
            na::Translation3::new(position.x, position.y, position.z),
            rotation,
        )
    }

    pub fn reset(&mut self) {
        self.lean_spring.snap_to(0.0);
        self.pitch_spring.snap_to(0.0);
        self.prev_velocity = Vec3::zeros();
    }
}
