//! Spring-damped display yaw.
//!
//! The physics heading can snap and wrap; the displayed facing chases a
//! target yaw derived from a reference direction (velocity or intent)
//! through a critically damped spring. The target is unwrapped onto the
//! spring's current position via the shortest signed arc before stepping,
//! so the output never jumps by 2*PI between consecutive frames.

use crate::{
    math::{Vec3, shortest_arc, wrap_angle, yaw_from_direction},
    spring::Spring,
};

/// Reference direction below this horizontal speed does not update the
/// spring (prevents chatter at rest).
const REST_DEADBAND: f32 = 0.01;

#[derive(Clone, Copy, Debug)]
pub struct OrientationSystem {
    spring: Spring,
}

impl OrientationSystem {
    pub fn new(stiffness: f32) -> Self {
        Self {
            spring: Spring::new(stiffness),
        }
    }

    /// Displayed yaw, wrapped to [-PI, PI].
    #[inline]
    pub fn yaw(&self) -> f32 {
        wrap_angle(self.spring.position)
    }

    #[inline]
    pub fn stiffness(&self) -> f32 {
        self.spring.stiffness()
    }

    #[inline]
    pub fn set_stiffness(&mut self, stiffness: f32) {
        self.spring.set_stiffness(stiffness);
    }

    /// Force the display yaw (used on reset; bypasses the spring).
    pub fn snap_to(&mut self, yaw: f32) {
        self.spring.snap_to(wrap_angle(yaw));
    }

    /// Chase the yaw of `reference` (a horizontal velocity or intent vector).
    pub fn update(&mut self, reference: Vec3, dt: f32) {
        if reference.x * reference.x + reference.z * reference.z < REST_DEADBAND * REST_DEADBAND {
            return;
        }
        let Some(target) = yaw_from_direction(reference) else {
            return;
        };

        // Unwrap the target next to the spring position so the spring always
        // takes the short way around.
        let target = self.spring.position + shortest_arc(self.spring.position, target);
        self.spring.update(target, dt);

        // Re-center the internal angle so it cannot grow without bound. The
        // shift is a whole number of turns and does not disturb the dynamics.
        let wrapped = wrap_angle(self.spring.position);
        self.spring.position = wrapped;
    }
}
