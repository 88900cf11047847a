//! Named keyframe poses.
//!
//! A pose is a table of local rotations for the eight gait joints (shoulders,
//! elbows, hips, knees). Application always starts from the bind pose so the
//! result depends only on the pose being applied, never on the previous one.
//!
//! Conventions (character faces +Z, arms bind along X):
//! - hips and knees swing about the local X axis, negative = forward
//! - shoulders and elbows swing about the local Y axis; a positive angle
//!   carries the left arm forward and the right arm backward

use crate::math::{Quat, Vec3};
use super::skeleton::{JointId, Skeleton};
use nalgebra as na;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PoseId {
    TPose,
    StepLeft,
    Neutral,
    StepRight,
}

/// Local rotations for the gait joints.
#[derive(Clone, Copy, Debug)]
pub struct GaitPose {
    pub shoulder_l: Quat,
    pub shoulder_r: Quat,
    pub elbow_l: Quat,
    pub elbow_r: Quat,
    pub hip_l: Quat,
    pub hip_r: Quat,
    pub knee_l: Quat,
    pub knee_r: Quat,
}

#[inline]
fn swing_x(angle: f32) -> Quat {
    Quat::from_axis_angle(&Vec3::x_axis(), angle)
}

#[inline]
fn swing_y(angle: f32) -> Quat {
    Quat::from_axis_angle(&Vec3::y_axis(), angle)
}

impl GaitPose {
    pub fn identity() -> Self {
        Self {
            shoulder_l: Quat::identity(),
            shoulder_r: Quat::identity(),
            elbow_l: Quat::identity(),
            elbow_r: Quat::identity(),
            hip_l: Quat::identity(),
            hip_r: Quat::identity(),
            knee_l: Quat::identity(),
            knee_r: Quat::identity(),
        }
    }

    /// Relaxed stand: slight elbow bend, knees barely unlocked.
    pub fn neutral() -> Self {
        Self {
            shoulder_l: swing_y(0.0),
            shoulder_r: swing_y(0.0),
            elbow_l: swing_y(0.25),
            elbow_r: swing_y(0.25),
            hip_l: swing_x(0.0),
            hip_r: swing_x(0.0),
            knee_l: swing_x(0.08),
            knee_r: swing_x(0.08),
        }
    }

    /// Left foot planted forward, right arm swung forward.
    pub fn step_left(reach: f32) -> Self {
        Self {
            shoulder_l: swing_y(-0.8 * reach),
            shoulder_r: swing_y(-0.8 * reach),
            elbow_l: swing_y(0.3 * reach + 0.1),
            elbow_r: swing_y(-0.3 * reach + 0.1),
            hip_l: swing_x(-1.1 * reach),
            hip_r: swing_x(0.9 * reach),
            knee_l: swing_x(0.15 * reach),
            knee_r: swing_x(1.0 * reach),
        }
    }

    /// Legs passing under the body mid-stride.
    pub fn pass() -> Self {
        Self {
            shoulder_l: swing_y(0.0),
            shoulder_r: swing_y(0.0),
            elbow_l: swing_y(0.15),
            elbow_r: swing_y(0.15),
            hip_l: swing_x(0.0),
            hip_r: swing_x(-0.1),
            knee_l: swing_x(0.1),
            knee_r: swing_x(0.6),
        }
    }

    /// Reflect across the sagittal plane: sides swap, Y rotations flip sign,
    /// X rotations are preserved. For a unit quaternion that reflection is
    /// `(w, x, y, z) -> (w, x, -y, -z)`.
    pub fn mirrored(&self) -> Self {
        #[inline]
        fn m(q: Quat) -> Quat {
            Quat::new_unchecked(na::Quaternion::new(q.w, q.i, -q.j, -q.k))
        }
        Self {
            shoulder_l: m(self.shoulder_r),
            shoulder_r: m(self.shoulder_l),
            elbow_l: m(self.elbow_r),
            elbow_r: m(self.elbow_l),
            hip_l: m(self.hip_r),
            hip_r: m(self.hip_l),
            knee_l: m(self.knee_r),
            knee_r: m(self.knee_l),
        }
    }

    /// Per-joint spherical interpolation. `t` is expected pre-eased.
    pub fn slerp(&self, other: &Self, t: f32) -> Self {
        Self {
            shoulder_l: self.shoulder_l.slerp(&other.shoulder_l, t),
            shoulder_r: self.shoulder_r.slerp(&other.shoulder_r, t),
            elbow_l: self.elbow_l.slerp(&other.elbow_l, t),
            elbow_r: self.elbow_r.slerp(&other.elbow_r, t),
            hip_l: self.hip_l.slerp(&other.hip_l, t),
            hip_r: self.hip_r.slerp(&other.hip_r, t),
            knee_l: self.knee_l.slerp(&other.knee_l, t),
            knee_r: self.knee_r.slerp(&other.knee_r, t),
        }
    }

    pub fn keyed(&self) -> [(JointId, Quat); 8] {
        [
            (JointId::ShoulderL, self.shoulder_l),
            (JointId::ShoulderR, self.shoulder_r),
            (JointId::ElbowL, self.elbow_l),
            (JointId::ElbowR, self.elbow_r),
            (JointId::HipL, self.hip_l),
            (JointId::HipR, self.hip_r),
            (JointId::KneeL, self.knee_l),
            (JointId::KneeR, self.knee_r),
        ]
    }
}

fn pose_table(id: PoseId) -> GaitPose {
    match id {
        PoseId::TPose => GaitPose::identity(),
        PoseId::Neutral => GaitPose::neutral(),
        PoseId::StepLeft => GaitPose::step_left(0.6),
        PoseId::StepRight => GaitPose::step_left(0.6).mirrored(),
    }
}

/// Reset to bind pose, then write `pose`'s rotations into the gait joints.
pub fn apply_gait_pose(skeleton: &mut Skeleton, pose: &GaitPose) {
    skeleton.reset_pose();
    for (id, rotation) in pose.keyed() {
        skeleton.joint_mut(id).local.rotation = rotation;
    }
}

/// Apply a named pose. Idempotent: the previous pose never leaks through.
pub fn apply_pose(skeleton: &mut Skeleton, id: PoseId) {
    apply_gait_pose(skeleton, &pose_table(id));
}

/// Apply a named pose, then compose per-joint overrides on top of it:
/// `final = override * base`.
pub fn apply_pose_with_overrides(
    skeleton: &mut Skeleton,
    id: PoseId,
    overrides: &[(JointId, Quat)],
) {
    apply_pose(skeleton, id);
    for &(joint, rotation) in overrides {
        let base = skeleton.joint(joint).local.rotation;
        skeleton.joint_mut(joint).local.rotation = rotation * base;
    }
}
