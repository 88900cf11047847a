//! Distance-phased gait.
//!
//! The cycle phase advances with distance covered (`speed * dt / stride`), so
//! footfalls stay planted at any speed instead of sliding. A full cycle is
//! pass -> reach-left -> pass -> reach-right; half-cycles reuse the same two
//! keyframes with the second half mirrored. Walk and run are separate
//! keyframe sets blended by smoothed speed.

use crate::easing::{ease_in_out, smooth_mix, smoothstep};
use super::pose::{GaitPose, PoseId};

/// One gait's keyframes plus the distance covered per full cycle.
#[derive(Clone, Copy, Debug)]
pub struct GaitKeyframes {
    /// Legs passing under the body.
    pub pass: GaitPose,
    /// Left-side extreme; the right side is this pose mirrored.
    pub reach: GaitPose,
    /// Meters per full cycle. Non-positive disables phase advance.
    pub stride_length: f32,
}

impl GaitKeyframes {
    pub fn walk() -> Self {
        Self {
            pass: GaitPose::pass(),
            reach: GaitPose::step_left(0.5),
            stride_length: 1.4,
        }
    }

    pub fn run() -> Self {
        Self {
            pass: GaitPose::pass(),
            reach: GaitPose::step_left(1.0),
            stride_length: 2.6,
        }
    }

    /// Keyframe pose at `phase` in [0, 1).
    fn pose_at(&self, phase: f32) -> GaitPose {
        let quarter = (phase * 4.0).floor() as usize % 4;
        let t = ease_in_out((phase * 4.0).fract());
        let reach_l = self.reach;
        let reach_r = self.reach.mirrored();
        let pass_a = self.pass;
        let pass_b = self.pass.mirrored();
        match quarter {
            0 => pass_a.slerp(&reach_l, t),
            1 => reach_l.slerp(&pass_b, t),
            2 => pass_b.slerp(&reach_r, t),
            _ => reach_r.slerp(&pass_a, t),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct LocomotionSystem {
    pub walk: GaitKeyframes,
    pub run: GaitKeyframes,
    /// Smoothed speed at which the walk gait is fully expressed (m/s).
    pub walk_speed_threshold: f32,
    /// Smoothed speed at which the run gait is fully expressed (m/s).
    pub run_speed_threshold: f32,
    /// Exponential smoothing rate for the blend-driving speed (1/s).
    pub speed_smoothing: f32,
    /// When set, [`LocomotionSystem::select_pose`] returns this instead of
    /// the phase-derived pose.
    pub manual_pose: Option<PoseId>,

    phase: f32,
    smoothed_speed: f32,
}

impl LocomotionSystem {
    pub fn new() -> Self {
        Self {
            walk: GaitKeyframes::walk(),
            run: GaitKeyframes::run(),
            walk_speed_threshold: 2.0,
            run_speed_threshold: 6.0,
            speed_smoothing: 6.0,
            manual_pose: None,
            phase: 0.0,
            smoothed_speed: 0.0,
        }
    }

    /// Cycle phase in [0, 1).
    #[inline]
    pub fn phase(&self) -> f32 {
        self.phase
    }

    #[inline]
    pub fn smoothed_speed(&self) -> f32 {
        self.smoothed_speed
    }

    /// Walk -> run blend weight in [0, 1].
    #[inline]
    pub fn run_blend(&self) -> f32 {
        smoothstep(
            self.walk_speed_threshold,
            self.run_speed_threshold,
            self.smoothed_speed,
        )
    }

    /// Stride length of the blended gait (meters per cycle).
    #[inline]
    pub fn blended_stride(&self) -> f32 {
        let w = self.run_blend();
        self.walk.stride_length * (1.0 - w) + self.run.stride_length * w
    }

    /// Advance the cycle. `speed` is the planar speed actually covered this
    /// frame (raw, for distance phasing); the gait blend uses its smoothed
    /// counterpart. Airborne frames freeze the phase.
    pub fn update(&mut self, speed: f32, grounded: bool, dt: f32) {
        debug_assert!(dt > 0.0);
        self.smoothed_speed = smooth_mix(self.smoothed_speed, speed, self.speed_smoothing, dt);

        let stride = self.blended_stride();
        if stride <= 0.0 {
            self.phase = 0.0;
            return;
        }
        if grounded {
            self.phase = (self.phase + speed * dt / stride).rem_euclid(1.0);
        }
    }

    /// Continuous blended pose for the current phase and speed.
    pub fn blended_pose(&self) -> GaitPose {
        let walk = self.walk.pose_at(self.phase);
        let run = self.run.pose_at(self.phase);
        walk.slerp(&run, self.run_blend())
    }

    /// Discrete pose selection at quarter-phase granularity.
    pub fn select_pose(&self) -> PoseId {
        if let Some(forced) = self.manual_pose {
            return forced;
        }
        match (self.phase * 4.0).floor() as usize % 4 {
            0 => PoseId::StepLeft,
            1 => PoseId::Neutral,
            2 => PoseId::StepRight,
            _ => PoseId::Neutral,
        }
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
        self.smoothed_speed = 0.0;
    }
}

impl Default for LocomotionSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn phase_advances_with_distance() {
        let mut l = LocomotionSystem::new();
        // Slow enough that the blend stays fully in the walk gait.
        let speed = 1.0;
        for _ in 0..60 {
            l.update(speed, true, DT);
        }
        // One second at 1 m/s with a 1.4 m stride.
        assert!((l.phase() - 1.0 / 1.4).abs() < 1.0e-3, "{}", l.phase());
    }

    #[test]
    fn phase_freezes_while_airborne() {
        let mut l = LocomotionSystem::new();
        for _ in 0..30 {
            l.update(1.0, true, DT);
        }
        let before = l.phase();
        for _ in 0..30 {
            l.update(1.0, false, DT);
        }
        assert_eq!(l.phase(), before);
    }

    #[test]
    fn phase_wraps_into_unit_interval() {
        let mut l = LocomotionSystem::new();
        for _ in 0..2000 {
            l.update(7.0, true, DT);
            assert!((0.0..1.0).contains(&l.phase()));
        }
    }

    #[test]
    fn non_positive_stride_resets_phase() {
        let mut l = LocomotionSystem::new();
        for _ in 0..30 {
            l.update(1.0, true, DT);
        }
        assert!(l.phase() > 0.0);
        l.walk.stride_length = 0.0;
        l.run.stride_length = 0.0;
        l.update(1.0, true, DT);
        assert_eq!(l.phase(), 0.0);
    }

    #[test]
    fn run_blend_follows_speed_thresholds() {
        let mut l = LocomotionSystem::new();
        for _ in 0..600 {
            l.update(1.0, true, DT);
        }
        assert!(l.run_blend() < 1.0e-3);
        for _ in 0..600 {
            l.update(8.0, true, DT);
        }
        assert!((l.run_blend() - 1.0).abs() < 1.0e-3);
    }

    #[test]
    fn blend_speed_is_smoothed_not_instant() {
        let mut l = LocomotionSystem::new();
        l.update(8.0, true, DT);
        assert!(l.smoothed_speed() < 2.0);
        assert!(l.run_blend() < 0.05);
    }

    #[test]
    fn blended_pose_is_continuous_at_keyframes() {
        let mut l = LocomotionSystem::new();
        for _ in 0..600 {
            l.update(1.0, true, DT);
        }
        // Sample just either side of the quarter boundary.
        l.phase = 0.25 - 1.0e-4;
        let a = l.blended_pose();
        l.phase = 0.25 + 1.0e-4;
        let b = l.blended_pose();
        assert!(a.hip_l.angle_to(&b.hip_l) < 1.0e-2);
        assert!(a.shoulder_r.angle_to(&b.shoulder_r) < 1.0e-2);
    }

    #[test]
    fn select_pose_steps_through_quarters() {
        let mut l = LocomotionSystem::new();
        l.phase = 0.1;
        assert_eq!(l.select_pose(), PoseId::StepLeft);
        l.phase = 0.3;
        assert_eq!(l.select_pose(), PoseId::Neutral);
        l.phase = 0.6;
        assert_eq!(l.select_pose(), PoseId::StepRight);
        l.phase = 0.9;
        assert_eq!(l.select_pose(), PoseId::Neutral);
    }

    #[test]
    fn forced_pose_is_stable_across_the_cycle() {
        // The host applies the discrete selection whenever a pose is forced;
        // the phase must not bleed through.
        let mut l = LocomotionSystem::new();
        l.manual_pose = Some(PoseId::Neutral);
        for phase in [0.0, 0.2, 0.5, 0.9] {
            l.phase = phase;
            assert_eq!(l.select_pose(), PoseId::Neutral);
        }
    }

    #[test]
    fn manual_pose_overrides_selection() {
        let mut l = LocomotionSystem::new();
        l.phase = 0.1;
        l.manual_pose = Some(PoseId::TPose);
        assert_eq!(l.select_pose(), PoseId::TPose);
        l.manual_pose = None;
        assert_eq!(l.select_pose(), PoseId::StepLeft);
    }
}
