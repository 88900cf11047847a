//! Live tuning panel.
//!
//! The panel is strictly read-only over simulation state: sliders render
//! against a copied value and emit [`sim::Command`]s into
//! [`PendingCommands`], which the player tick applies before the next
//! frame's input. Rejections surface back here through `last_warning`.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPlugin, EguiPrimaryContextPass, egui};

use sim::{
    Command, OrbitRig, Param,
    anim::PoseId,
};

use crate::{camera_rig::CameraRigState, player::{PendingCommands, SimState}};

pub(super) fn plugin(app: &mut App) {
    app.add_plugins(EguiPlugin::default());
    app.add_systems(EguiPrimaryContextPass, tuning_panel_ui);
}

/// Read the live value a slider should display. Mirrors the write side in
/// `sim::tuning::apply_command`.
fn current_value(param: Param, sim: &SimState, rig: &OrbitRig) -> f32 {
    let c = &sim.controller.params;
    match param {
        Param::Accel => c.accel,
        Param::MaxSpeed => c.max_speed,
        Param::Weight => c.weight,
        Param::TurnRate => c.turn_rate,
        Param::SteeringReduction => c.steering_reduction_factor,
        Param::MaxSlopeDeg => c.max_slope_deg,
        Param::BrakeRate => c.handbrake.brake_rate,

        Param::OrientationStiffness => sim.orientation.stiffness(),
        Param::TiltStiffness => sim.tilt.lean_stiffness(),
        Param::LeanMultiplier => sim.tilt.lean_multiplier,
        Param::PitchMultiplier => sim.tilt.pitch_multiplier,
        Param::LandingStiffness => sim.landing.stiffness(),
        Param::LandingImpulseScale => sim.landing.impulse_scale,
        Param::AccelTiltMagnitude => sim.landing.tilt_magnitude,
        Param::FovBase => sim.fov.base_deg,
        Param::FovRange => sim.fov.range_deg,
        Param::FovGMultiplier => sim.fov.g_multiplier,

        Param::WalkSpeedThreshold => sim.locomotion.walk_speed_threshold,
        Param::RunSpeedThreshold => sim.locomotion.run_speed_threshold,
        Param::WalkStride => sim.locomotion.walk.stride_length,
        Param::RunStride => sim.locomotion.run.stride_length,
        Param::SecondaryStiffness => sim.secondary.stiffness,
        Param::SecondaryDampingRatio => sim.secondary.damping_ratio,
        Param::SecondaryResponse => sim.secondary.response_scale,

        Param::CameraMinDistance => rig.min_distance,
        Param::CameraMaxDistance => rig.max_distance,
        Param::CameraHeightOffset => rig.height_offset,
    }
}

/// Section grouping for the panel, in display order.
const SECTIONS: &[(&str, &[Param])] = &[
    (
        "Controller",
        &[
            Param::Accel,
            Param::MaxSpeed,
            Param::Weight,
            Param::TurnRate,
            Param::SteeringReduction,
            Param::MaxSlopeDeg,
            Param::BrakeRate,
        ],
    ),
    (
        "Visuals",
        &[
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
        ],
    ),
    (
        "Animation",
        &[
            Param::WalkSpeedThreshold,
            Param::RunSpeedThreshold,
            Param::WalkStride,
            Param::RunStride,
            Param::SecondaryStiffness,
            Param::SecondaryDampingRatio,
            Param::SecondaryResponse,
        ],
    ),
    (
        "Camera",
        &[
            Param::CameraMinDistance,
            Param::CameraMaxDistance,
            Param::CameraHeightOffset,
        ],
    ),
];

fn param_slider(
    ui: &mut egui::Ui,
    param: Param,
    sim: &SimState,
    rig: &OrbitRig,
    pending: &mut PendingCommands,
) {
    let meta = param.meta();
    let mut value = current_value(param, sim, rig);
    let label = if meta.units.is_empty() {
        meta.label.to_string()
    } else {
        format!("{} ({})", meta.label, meta.units)
    };
    if ui
        .add(egui::Slider::new(&mut value, meta.min..=meta.max).text(label))
        .changed()
    {
        pending.queue.push(Command { param, value });
    }
}

fn tuning_panel_ui(
    mut contexts: EguiContexts,
    sim_state: Res<SimState>,
    rig_state: Res<CameraRigState>,
    mut pending: ResMut<PendingCommands>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let sim = &*sim_state;
    let rig = &rig_state.rig;

    egui::Window::new("Locomotion Tuning")
        .default_pos([10.0, 10.0])
        .default_width(320.0)
        .collapsible(true)
        .show(ctx, |ui| {
            if let Some(warning) = pending.last_warning.clone() {
                ui.horizontal(|ui| {
                    ui.colored_label(egui::Color32::YELLOW, warning);
                    if ui.small_button("x").clicked() {
                        pending.last_warning = None;
                    }
                });
                ui.separator();
            }

            ui.heading("State");
            let c = &sim.controller;
            ui.monospace(format!(
                "speed    {:>6.2} m/s   {}",
                c.horizontal_speed(),
                if c.is_grounded() { "grounded" } else { "airborne" },
            ));
            ui.monospace(format!(
                "heading  {:>6.2} rad   facing {:>6.2} rad",
                c.heading_yaw(),
                sim.orientation.yaw(),
            ));
            ui.monospace(format!(
                "slip     {:>+6.2} rad   lat g  {:>+6.2}",
                c.slip_angle(),
                c.lateral_g_force(),
            ));
            ui.monospace(format!(
                "gait     {:>6.2} phase  blend  {:>6.2}",
                sim.locomotion.phase(),
                sim.locomotion.run_blend(),
            ));
            ui.monospace(format!("fov      {:>6.1} deg", sim.fov.current()));
            ui.separator();

            for (title, params) in SECTIONS {
                egui::CollapsingHeader::new(*title)
                    .default_open(*title == "Controller")
                    .show(ui, |ui| {
                        for &param in *params {
                            param_slider(ui, param, sim, rig, &mut pending);
                        }
                    });
            }

            ui.separator();
            ui.horizontal(|ui| {
                ui.label("Pose override:");
                let current = sim.locomotion.manual_pose;
                for (name, pose) in [
                    ("off", None),
                    ("T", Some(PoseId::TPose)),
                    ("L", Some(PoseId::StepLeft)),
                    ("N", Some(PoseId::Neutral)),
                    ("R", Some(PoseId::StepRight)),
                ] {
                    if ui.selectable_label(current == pose, name).clicked() {
                        pending.pose_override = Some(pose);
                    }
                }
            });
        });
}
