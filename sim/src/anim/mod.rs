/*!
Procedural skeletal animation.

- skeleton:   flat, topologically ordered joint array with a single-pass
              global transform update
- pose:       named quaternion keyframes and pose application
- locomotion: distance-phased gait (walk/run blend, pass/reach keyframes)
- secondary:  spring-lag follow-through on child joints
*/

pub mod locomotion;
pub mod pose;
pub mod secondary;
pub mod skeleton;

pub use locomotion::{GaitKeyframes, LocomotionSystem};
pub use pose::{GaitPose, PoseId, apply_gait_pose, apply_pose, apply_pose_with_overrides};
pub use secondary::SecondaryMotion;
pub use skeleton::{Joint, JointId, Skeleton};
