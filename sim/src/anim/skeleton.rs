//! Flat humanoid skeleton.
//!
//! Joints live in a single array ordered so that every parent index is
//! smaller than its children. Global (model-space) transforms are therefore
//! computable in one forward pass without recursion.

use crate::math::{Iso, Quat, Vec3};
use nalgebra as na;

/// Named joint indices into [`Skeleton::joints`].
///
/// The discriminants are the array positions; the order is topological.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(usize)]
pub enum JointId {
    Root = 0,
    Spine = 1,
    Head = 2,
    ShoulderL = 3,
    ElbowL = 4,
    HandL = 5,
    ShoulderR = 6,
    ElbowR = 7,
    HandR = 8,
    HipL = 9,
    KneeL = 10,
    FootL = 11,
    HipR = 12,
    KneeR = 13,
    FootR = 14,
}

impl JointId {
    pub const COUNT: usize = 15;

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(Clone, Debug)]
pub struct Joint {
    pub name: &'static str,
    /// Index of the parent joint; `None` only for the root.
    pub parent: Option<usize>,
    /// Transform relative to the parent joint.
    pub local: Iso,
    /// Model-space transform, valid after [`Skeleton::update_global_transforms`].
    pub model: Iso,
}

#[derive(Clone, Debug)]
pub struct Skeleton {
    joints: Vec<Joint>,
    /// Bind-pose local translations, used by [`Skeleton::reset_pose`].
    bind_translations: Vec<Vec3>,
}

fn joint(name: &'static str, parent: Option<JointId>, offset: Vec3) -> Joint {
    Joint {
        name,
        parent: parent.map(JointId::index),
        local: Iso::from_parts(
            na::Translation3::new(offset.x, offset.y, offset.z),
            Quat::identity(),
        ),
        model: Iso::identity(),
    }
}

impl Skeleton {
    /// Build the standard humanoid in a T-pose, facing +Z with arms along X.
    pub fn humanoid() -> Self {
        use JointId::*;
        let joints = vec![
            joint("root", None, Vec3::new(0.0, 1.0, 0.0)),
            joint("spine", Some(Root), Vec3::new(0.0, 0.35, 0.0)),
            joint("head", Some(Spine), Vec3::new(0.0, 0.30, 0.0)),
            joint("shoulder_l", Some(Spine), Vec3::new(-0.22, 0.22, 0.0)),
            joint("elbow_l", Some(ShoulderL), Vec3::new(-0.26, 0.0, 0.0)),
            joint("hand_l", Some(ElbowL), Vec3::new(-0.24, 0.0, 0.0)),
            joint("shoulder_r", Some(Spine), Vec3::new(0.22, 0.22, 0.0)),
            joint("elbow_r", Some(ShoulderR), Vec3::new(0.26, 0.0, 0.0)),
            joint("hand_r", Some(ElbowR), Vec3::new(0.24, 0.0, 0.0)),
            joint("hip_l", Some(Root), Vec3::new(-0.12, 0.0, 0.0)),
            joint("knee_l", Some(HipL), Vec3::new(0.0, -0.45, 0.0)),
            joint("foot_l", Some(KneeL), Vec3::new(0.0, -0.45, 0.0)),
            joint("hip_r", Some(Root), Vec3::new(0.12, 0.0, 0.0)),
            joint("knee_r", Some(HipR), Vec3::new(0.0, -0.45, 0.0)),
            joint("foot_r", Some(KneeR), Vec3::new(0.0, -0.45, 0.0)),
        ];
        debug_assert_eq!(joints.len(), JointId::COUNT);
        let bind_translations = joints.iter().map(|j| j.local.translation.vector).collect();
        Self {
            joints,
            bind_translations,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.joints.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    #[inline]
    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    #[inline]
    pub fn joint(&self, id: JointId) -> &Joint {
        &self.joints[id.index()]
    }

    #[inline]
    pub fn joint_mut(&mut self, id: JointId) -> &mut Joint {
        &mut self.joints[id.index()]
    }

    /// Place the skeleton in the world. The root's local transform is the
    /// character's visual transform composed with the bind-pose pelvis offset.
    pub fn set_root(&mut self, world: Iso) {
        let pelvis = na::Translation3::from(self.bind_translations[JointId::Root.index()]);
        self.joints[JointId::Root.index()].local = world * Iso::from_parts(pelvis, Quat::identity());
    }

    /// Recompute all model transforms in one forward pass.
    pub fn update_global_transforms(&mut self) {
        for i in 0..self.joints.len() {
            self.joints[i].model = match self.joints[i].parent {
                Some(p) => {
                    debug_assert!(p < i, "joint order must be topological");
                    self.joints[p].model * self.joints[i].local
                }
                None => self.joints[i].local,
            };
        }
    }

    /// Restore every non-root joint to its bind-pose local transform. The
    /// root (world placement) is left untouched.
    pub fn reset_pose(&mut self) {
        for (i, j) in self.joints.iter_mut().enumerate().skip(1) {
            j.local = Iso::from_parts(
                na::Translation3::from(self.bind_translations[i]),
                Quat::identity(),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn humanoid_is_topologically_ordered() {
        let s = Skeleton::humanoid();
        for (i, j) in s.joints().iter().enumerate() {
            match j.parent {
                Some(p) => assert!(p < i, "{} has parent after itself", j.name),
                None => assert_eq!(i, 0),
            }
        }
    }

    #[test]
    fn global_pass_chains_parent_transforms() {
        let mut s = Skeleton::humanoid();
        s.update_global_transforms();

        // Left hand in T-pose: pelvis + spine + shoulder + elbow + hand.
        let hand = s.joint(JointId::HandL).model.translation.vector;
        assert!((hand - Vec3::new(-0.72, 1.57, 0.0)).norm() < 1.0e-5);

        // Feet hang straight down from the hips.
        let foot = s.joint(JointId::FootR).model.translation.vector;
        assert!((foot - Vec3::new(0.12, 0.1, 0.0)).norm() < 1.0e-5);
    }

    #[test]
    fn set_root_carries_rotation_into_children() {
        let mut s = Skeleton::humanoid();
        let world = Iso::from_parts(
            na::Translation3::new(3.0, 0.0, -2.0),
            Quat::from_axis_angle(&Vec3::y_axis(), std::f32::consts::FRAC_PI_2),
        );
        s.set_root(world);
        s.update_global_transforms();

        // Facing +X now, so the head sits above the rotated pelvis.
        let head = s.joint(JointId::Head).model.translation.vector;
        assert!((head - Vec3::new(3.0, 1.65, -2.0)).norm() < 1.0e-5);
        // The left hand (bind -X) points toward -Z after a +90 degree yaw.
        let hand = s.joint(JointId::HandL).model.translation.vector;
        assert!((hand - Vec3::new(3.0, 1.57, -2.0 + 0.72)).norm() < 1.0e-4);
    }

    #[test]
    fn reset_pose_clears_rotations_but_not_root() {
        let mut s = Skeleton::humanoid();
        let world = Iso::from_parts(na::Translation3::new(5.0, 0.0, 0.0), Quat::identity());
        s.set_root(world);
        s.joint_mut(JointId::HipL).local.rotation = Quat::from_axis_angle(&Vec3::x_axis(), 0.7);

        s.reset_pose();
        assert_eq!(
            s.joint(JointId::HipL).local.rotation,
            Quat::identity()
        );
        // Root placement survives.
        assert!(
            (s.joint(JointId::Root).local.translation.vector - Vec3::new(5.0, 1.0, 0.0)).norm()
                < 1.0e-6
        );
    }
}
