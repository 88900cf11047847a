//! Live tuning metadata and command application.
//!
//! The GUI never holds `&mut` simulation state. It renders from read-only
//! views and emits [`Command`]s; the host applies them through
//! [`apply_command`] at the head of the next tick. Out-of-range values are
//! clamped to the parameter's metadata bounds; writes that would break a
//! coupled invariant (camera min/max distance, walk/run thresholds) are
//! rejected whole and surfaced to the panel.

use crate::{
    anim::{LocomotionSystem, SecondaryMotion},
    camera::OrbitRig,
    controller::Controller,
    visuals::{FovSystem, LandingSystem, OrientationSystem, TiltSystem},
};

/// Panel-facing description of one tunable.
#[derive(Clone, Copy, Debug)]
pub struct ParamMeta {
    pub label: &'static str,
    pub units: &'static str,
    pub min: f32,
    pub max: f32,
}

/// Every live-tunable parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Param {
    Accel,
    MaxSpeed,
    Weight,
    TurnRate,
    SteeringReduction,
    MaxSlopeDeg,
    BrakeRate,

    OrientationStiffness,
    TiltStiffness,
    LeanMultiplier,
    PitchMultiplier,
    LandingStiffness,
    LandingImpulseScale,
    AccelTiltMagnitude,
    FovBase,
    FovRange,
    FovGMultiplier,

    WalkSpeedThreshold,
    RunSpeedThreshold,
    WalkStride,
    RunStride,
    SecondaryStiffness,
    SecondaryDampingRatio,
    SecondaryResponse,

    CameraMinDistance,
    CameraMaxDistance,
    CameraHeightOffset,
}

impl Param {
    /// Panel iteration order.
    pub const ALL: [Param; 27] = [
        Param::Accel,
        Param::MaxSpeed,
        Param::Weight,
        Param::TurnRate,
        Param::SteeringReduction,
        Param::MaxSlopeDeg,
        Param::BrakeRate,
        Param::OrientationStiffness,
        Param::TiltStiffness,
        Param::LeanMultiplier,
        Param::PitchMultiplier,
        Param::LandingStiffness,
        Param::LandingImpulseScale,
        Param::AccelTiltMagnitude,
        Param::FovBase,
        Param::FovRange,
        Param::FovGMultiplier,
        Param::WalkSpeedThreshold,
        Param::RunSpeedThreshold,
        Param::WalkStride,
        Param::RunStride,
        Param::SecondaryStiffness,
        Param::SecondaryDampingRatio,
        Param::SecondaryResponse,
        Param::CameraMinDistance,
        Param::CameraMaxDistance,
        Param::CameraHeightOffset,
    ];

    pub fn meta(self) -> ParamMeta {
        use Param::*;
        match self {
            Accel => ParamMeta { label: "accel", units: "m/s^2", min: 0.0, max: 50.0 },
            MaxSpeed => ParamMeta { label: "max speed", units: "m/s", min: 0.1, max: 40.0 },
            Weight => ParamMeta { label: "weight", units: "m/s^2", min: -50.0, max: 0.0 },
            TurnRate => ParamMeta { label: "turn rate", units: "rad/s", min: 0.0, max: 10.0 },
            SteeringReduction => ParamMeta { label: "steering reduction", units: "", min: 0.0, max: 1.0 },
            MaxSlopeDeg => ParamMeta { label: "max slope", units: "deg", min: 0.0, max: 89.0 },
            BrakeRate => ParamMeta { label: "handbrake rate", units: "1/s", min: 0.0, max: 20.0 },

            OrientationStiffness => ParamMeta { label: "facing stiffness", units: "1/s^2", min: 1.0, max: 400.0 },
            TiltStiffness => ParamMeta { label: "tilt stiffness", units: "1/s^2", min: 1.0, max: 400.0 },
            LeanMultiplier => ParamMeta { label: "lean per g", units: "rad", min: 0.0, max: 1.5 },
            PitchMultiplier => ParamMeta { label: "pitch per m/s^2", units: "rad", min: 0.0, max: 0.2 },
            LandingStiffness => ParamMeta { label: "landing stiffness", units: "1/s^2", min: 1.0, max: 600.0 },
            LandingImpulseScale => ParamMeta { label: "landing impulse", units: "", min: 0.0, max: 0.5 },
            AccelTiltMagnitude => ParamMeta { label: "accel tilt", units: "rad", min: 0.0, max: 1.0 },
            FovBase => ParamMeta { label: "fov base", units: "deg", min: 30.0, max: 110.0 },
            FovRange => ParamMeta { label: "fov range", units: "deg", min: 0.0, max: 40.0 },
            FovGMultiplier => ParamMeta { label: "fov per g", units: "deg", min: 0.0, max: 15.0 },

            WalkSpeedThreshold => ParamMeta { label: "walk speed", units: "m/s", min: 0.0, max: 20.0 },
            RunSpeedThreshold => ParamMeta { label: "run speed", units: "m/s", min: 0.0, max: 30.0 },
            WalkStride => ParamMeta { label: "walk stride", units: "m", min: 0.1, max: 4.0 },
            RunStride => ParamMeta { label: "run stride", units: "m", min: 0.1, max: 6.0 },
            SecondaryStiffness => ParamMeta { label: "lag stiffness", units: "1/s^2", min: 1.0, max: 400.0 },
            SecondaryDampingRatio => ParamMeta { label: "lag damping", units: "", min: 0.05, max: 2.0 },
            SecondaryResponse => ParamMeta { label: "lag response", units: "1/s", min: 0.0, max: 40.0 },

            CameraMinDistance => ParamMeta { label: "camera min dist", units: "m", min: 0.5, max: 50.0 },
            CameraMaxDistance => ParamMeta { label: "camera max dist", units: "m", min: 0.5, max: 50.0 },
            CameraHeightOffset => ParamMeta { label: "camera height", units: "m", min: 0.0, max: 5.0 },
        }
    }
}

/// One panel edit.
#[derive(Clone, Copy, Debug)]
pub struct Command {
    pub param: Param,
    pub value: f32,
}

/// Result of applying a [`Command`], surfaced back to the panel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CommandOutcome {
    Applied,
    /// Value was out of the metadata bounds; the clamped value was applied.
    Clamped(f32),
    /// Nothing was written.
    Rejected(&'static str),
}

/// Mutable views over everything the panel can tune, borrowed for the
/// duration of command application only.
pub struct TuningTargets<'a> {
    pub controller: &'a mut Controller,
    pub orientation: &'a mut OrientationSystem,
    pub tilt: &'a mut TiltSystem,
    pub landing: &'a mut LandingSystem,
    pub fov: &'a mut FovSystem,
    pub locomotion: &'a mut LocomotionSystem,
    pub secondary: &'a mut SecondaryMotion,
    pub rig: &'a mut OrbitRig,
}

/// Apply one command: clamp into bounds, check coupled invariants, write.
/// Spring stiffness writes re-derive damping internally.
pub fn apply_command(t: &mut TuningTargets<'_>, cmd: Command) -> CommandOutcome {
    if !cmd.value.is_finite() {
        return CommandOutcome::Rejected("non-finite value");
    }

    let meta = cmd.param.meta();
    let value = cmd.value.clamp(meta.min, meta.max);

    // Coupled invariants reject the whole write, they never partially apply.
    match cmd.param {
        Param::CameraMinDistance if value > t.rig.max_distance => {
            return CommandOutcome::Rejected("min distance above max distance");
        }
        Param::CameraMaxDistance if value < t.rig.min_distance => {
            return CommandOutcome::Rejected("max distance below min distance");
        }
        Param::WalkSpeedThreshold if value > t.locomotion.run_speed_threshold => {
            return CommandOutcome::Rejected("walk threshold above run threshold");
        }
        Param::RunSpeedThreshold if value < t.locomotion.walk_speed_threshold => {
            return CommandOutcome::Rejected("run threshold below walk threshold");
        }
        _ => {}
    }

    match cmd.param {
        Param::Accel => t.controller.params.accel = value,
        Param::MaxSpeed => t.controller.params.max_speed = value,
        Param::Weight => t.controller.params.weight = value,
        Param::TurnRate => t.controller.params.turn_rate = value,
        Param::SteeringReduction => t.controller.params.steering_reduction_factor = value,
        Param::MaxSlopeDeg => t.controller.params.max_slope_deg = value,
        Param::BrakeRate => t.controller.params.handbrake.brake_rate = value,

        Param::OrientationStiffness => t.orientation.set_stiffness(value),
        Param::TiltStiffness => {
            t.tilt.set_lean_stiffness(value);
            t.tilt.set_pitch_stiffness(value);
        }
        Param::LeanMultiplier => t.tilt.lean_multiplier = value,
        Param::PitchMultiplier => t.tilt.pitch_multiplier = value,
        Param::LandingStiffness => t.landing.set_stiffness(value),
        Param::LandingImpulseScale => t.landing.impulse_scale = value,
        Param::AccelTiltMagnitude => t.landing.tilt_magnitude = value,
        Param::FovBase => t.fov.base_deg = value,
        Param::FovRange => t.fov.range_deg = value,
        Param::FovGMultiplier => t.fov.g_multiplier = value,

        Param::WalkSpeedThreshold => t.locomotion.walk_speed_threshold = value,
        Param::RunSpeedThreshold => t.locomotion.run_speed_threshold = value,
        Param::WalkStride => t.locomotion.walk.stride_length = value,
        Param::RunStride => t.locomotion.run.stride_length = value,
        Param::SecondaryStiffness => t.secondary.stiffness = value,
        Param::SecondaryDampingRatio => t.secondary.damping_ratio = value,
        Param::SecondaryResponse => t.secondary.response_scale = value,

        Param::CameraMinDistance => {
            t.rig.min_distance = value;
            t.rig.clamp_state();
        }
        Param::CameraMaxDistance => {
            t.rig.max_distance = value;
            t.rig.clamp_state();
        }
        Param::CameraHeightOffset => t.rig.height_offset = value,
    }

    if (value - cmd.value).abs() > f32::EPSILON * cmd.value.abs().max(1.0) {
        CommandOutcome::Clamped(value)
    } else {
        CommandOutcome::Applied
    }
}
