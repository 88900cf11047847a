//! Spring-lag secondary motion.
//!
//! Elbows and knees carry a scalar lag angle around a fixed tracking axis
//! (shoulders swing about Y, hips about X). Each frame the parent joint's
//! model-space rotation delta is projected onto that axis and injected into
//! the lag spring as an opposing velocity impulse, so fast pose changes
//! overshoot and settle instead of teleporting.
//!
//! Tick order matters: apply the base pose, update globals, run this pass,
//! then update globals again so the lag is visible downstream.

use crate::math::{Quat, Vec3};
use crate::spring::critical_damping;
use super::skeleton::{JointId, Skeleton};
use nalgebra as na;

/// Rotation deltas whose axis projects onto the tracking axis below this
/// fraction are treated as off-axis and folded in at full magnitude.
const AXIS_ALIGNMENT_EPS: f32 = 0.1;

#[derive(Clone, Copy, Debug)]
struct LagJoint {
    parent: JointId,
    child: JointId,
    track_axis: na::Unit<Vec3>,
    offset: f32,
    velocity: f32,
    prev_parent_rotation: Quat,
}

impl LagJoint {
    fn new(parent: JointId, child: JointId, track_axis: na::Unit<Vec3>) -> Self {
        Self {
            parent,
            child,
            track_axis,
            offset: 0.0,
            velocity: 0.0,
            prev_parent_rotation: Quat::identity(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct SecondaryMotion {
    joints: Vec<LagJoint>,
    /// Spring constant pulling the lag back to zero.
    pub stiffness: f32,
    /// 1.0 is critically damped; below 1.0 allows visible oscillation.
    pub damping_ratio: f32,
    /// Velocity injected per radian of parent rotation delta (1/s).
    pub response_scale: f32,
}

impl SecondaryMotion {
    /// The standard four lag joints: elbows tracking shoulder swing about Y,
    /// knees tracking hip swing about X.
    pub fn new() -> Self {
        Self {
            joints: vec![
                LagJoint::new(JointId::ShoulderL, JointId::ElbowL, Vec3::y_axis()),
                LagJoint::new(JointId::ShoulderR, JointId::ElbowR, Vec3::y_axis()),
                LagJoint::new(JointId::HipL, JointId::KneeL, Vec3::x_axis()),
                LagJoint::new(JointId::HipR, JointId::KneeR, Vec3::x_axis()),
            ],
            stiffness: 60.0,
            damping_ratio: 0.6,
            response_scale: 12.0,
        }
    }

    /// Sum of |lag| across all joints, for the debug overlay.
    pub fn total_deflection(&self) -> f32 {
        self.joints.iter().map(|j| j.offset.abs()).sum()
    }

    /// Measure parent rotation deltas and advance the lag springs, then
    /// compose each lag onto its child's local rotation. The skeleton's
    /// model transforms must be current on entry and are stale on exit.
    pub fn update(&mut self, skeleton: &mut Skeleton, dt: f32) {
        debug_assert!(dt > 0.0);
        let damping = critical_damping(self.stiffness) * self.damping_ratio;

        for lag in &mut self.joints {
            let now = skeleton.joint(lag.parent).model.rotation;
            let delta = now * lag.prev_parent_rotation.inverse();
            lag.prev_parent_rotation = now;

            if let Some((axis, angle)) = delta.axis_angle() {
                let alignment = axis.dot(&lag.track_axis);
                // Off-axis motion still reads as movement; fold it in with
                // its sign rather than dropping it.
                let injected = if alignment.abs() > AXIS_ALIGNMENT_EPS {
                    angle * alignment
                } else {
                    angle * alignment.signum()
                };
                lag.velocity -= injected * self.response_scale;
            }

            let accel = -self.stiffness * lag.offset - damping * lag.velocity;
            lag.velocity += accel * dt;
            lag.offset += lag.velocity * dt;

            let base = skeleton.joint(lag.child).local.rotation;
            skeleton.joint_mut(lag.child).local.rotation =
                Quat::from_axis_angle(&lag.track_axis, lag.offset) * base;
        }
    }

    pub fn reset(&mut self, skeleton: &Skeleton) {
        for lag in &mut self.joints {
            lag.offset = 0.0;
            lag.velocity = 0.0;
            lag.prev_parent_rotation = skeleton.joint(lag.parent).model.rotation;
        }
    }
}

impl Default for SecondaryMotion {
    fn default() -> Self {
        Self::new()
    }
}
