//! Orbit camera control and follow.
//!
//! The rig math lives in `sim::camera::OrbitRig`; this module feeds it mouse
//! input, follows the character with a smooth nudge, and writes the dynamic
//! FOV into the perspective projection each frame.

use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::prelude::*;
use leafwing_input_manager::prelude::ActionState;
use sim::OrbitRig;

use crate::{
    input::InputAction,
    player::{SimState, to_bevy},
};

const CAMERA_DECAY_RATE: f32 = 24.0;

#[derive(Resource)]
pub struct CameraRigState {
    pub rig: OrbitRig,
}

pub(super) fn plugin(app: &mut App) {
    app.insert_resource(CameraRigState {
        rig: OrbitRig::default(),
    });
    app.add_systems(Startup, add_camera);
    app.add_systems(Update, orbit_input);
    app.add_systems(PostUpdate, follow_player);
}

fn add_camera(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: 60.0_f32.to_radians(),
            ..default()
        }),
        Transform::from_xyz(0.0, 4.0, -8.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

fn orbit_input(
    actions: Res<ActionState<InputAction>>,
    buttons: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: MessageReader<MouseMotion>,
    mut mouse_wheel: MessageReader<MouseWheel>,
    mut rig_state: ResMut<CameraRigState>,
) {
    if actions.just_pressed(&InputAction::ToggleCameraLock) {
        rig_state.rig.lock_behind = !rig_state.rig.lock_behind;
        info!(
            "camera: {}",
            if rig_state.rig.lock_behind { "locked behind" } else { "free orbit" }
        );
    }

    let mut delta = Vec2::ZERO;
    for motion in mouse_motion.read() {
        delta += motion.delta;
    }
    if buttons.pressed(MouseButton::Right) {
        rig_state.rig.orbit(delta.x, delta.y);
    }

    for wheel in mouse_wheel.read() {
        rig_state.rig.zoom(wheel.y);
    }
}

fn follow_player(
    time: Res<Time>,
    sim_state: Res<SimState>,
    rig_state: Res<CameraRigState>,
    mut camera_query: Query<(&mut Transform, &mut Projection), With<Camera3d>>,
) {
    let Ok((mut transform, mut projection)) = camera_query.single_mut() else {
        return;
    };

    let target = sim_state.controller.position();
    let heading = sim_state.controller.heading_yaw();
    let eye = to_bevy(rig_state.rig.eye_position(target, heading));
    let focus = to_bevy(rig_state.rig.focus(target));

    transform
        .translation
        .smooth_nudge(&eye, CAMERA_DECAY_RATE, time.delta_secs());
    transform.look_at(focus, Vec3::Y);

    if let Projection::Perspective(perspective) = &mut *projection {
        perspective.fov = sim_state.fov.current().to_radians();
    }
}
