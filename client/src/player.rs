//! Simulation ownership and the per-frame tick.
//!
//! All sim state lives in one [`SimState`] resource. The tick runs as a
//! chained system triple in `Update`: pending tuning commands first, then
//! the physics/visual/animation step, then transform write-back. The egui
//! panel only ever reads `SimState` and pushes into [`PendingCommands`].

use bevy::prelude::*;
use leafwing_input_manager::prelude::ActionState;

use sim::{
    Controller, ControllerInput, ControllerParams, DebugPrimitives, MoveBasis, TuningTargets,
    anim::{LocomotionSystem, SecondaryMotion, Skeleton, apply_gait_pose, apply_pose},
    apply_command,
    math::{Quat as SimQuat, Vec2 as SimVec2, Vec3 as SimVec3},
    tuning::CommandOutcome,
    visuals::{FovSystem, LandingSystem, OrientationSystem, TiltSystem},
};

use crate::{
    camera_rig::CameraRigState,
    input::{ControlScheme, HandbrakeLatch, InputAction},
    world::StaticWorld,
};

/// Spiral-of-death guard: a hitch longer than this is simulated as this.
const MAX_TICK_DT: f32 = 0.1;

/// Below this horizontal speed the facing chases input intent instead of
/// velocity (velocity direction is noise when pinned against geometry).
const FACING_FROM_VELOCITY_SPEED: f32 = 0.1;

#[derive(Resource)]
pub struct SimState {
    pub controller: Controller,
    pub orientation: OrientationSystem,
    pub tilt: TiltSystem,
    pub landing: LandingSystem,
    pub fov: FovSystem,
    pub locomotion: LocomotionSystem,
    pub secondary: SecondaryMotion,
    pub skeleton: Skeleton,
    pub debug: DebugPrimitives,
}

impl SimState {
    fn new() -> Self {
        let mut controller = Controller::new(ControllerParams::default());
        controller.reset(SimVec3::new(0.0, 0.5, 0.0));
        Self {
            controller,
            orientation: OrientationSystem::new(80.0),
            tilt: TiltSystem::new(100.0, 0.35, 0.02),
            landing: LandingSystem::new(120.0, 0.05),
            fov: FovSystem::new(60.0, 15.0, 4.0),
            locomotion: LocomotionSystem::new(),
            secondary: SecondaryMotion::new(),
            skeleton: Skeleton::humanoid(),
            debug: DebugPrimitives::default(),
        }
    }
}

/// Commands emitted by the panel this frame, applied at the head of the next
/// tick. `last_warning` carries rejection text back to the panel.
#[derive(Resource, Default)]
pub struct PendingCommands {
    pub queue: Vec<sim::Command>,
    /// `Some(override)` requests a manual-pose change; `Some(None)` clears it.
    pub pose_override: Option<Option<sim::anim::PoseId>>,
    pub last_warning: Option<String>,
}

/// Marker for the character's visual root entity.
#[derive(Component)]
pub struct PlayerBody;

pub(super) fn plugin(app: &mut App) {
    app.insert_resource(SimState::new());
    app.init_resource::<PendingCommands>();
    app.add_systems(Startup, spawn_player_body);
    app.add_systems(
        Update,
        (apply_pending_commands, tick_sim, write_back_transform).chain(),
    );
}

#[inline]
pub(crate) fn to_bevy(v: SimVec3) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

#[inline]
pub(crate) fn to_bevy_quat(q: SimQuat) -> Quat {
    let c = q.as_ref().coords;
    Quat::from_xyzw(c.x, c.y, c.z, c.w)
}

fn spawn_player_body(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands
        .spawn((
            PlayerBody,
            Mesh3d(meshes.add(Mesh::from(Capsule3d {
                radius: 0.3,
                half_length: 0.45,
            }))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: Color::linear_rgb(0.2, 0.9, 0.8),
                ..default()
            })),
            Transform::from_xyz(0.0, 1.0, 0.0),
        ))
        .with_children(|parent| {
            // Eyes: small white spheres marking the facing (+Z is forward).
            let eye_mesh = meshes.add(Mesh::from(Sphere { radius: 0.08 }));
            let eye_mat = materials.add(StandardMaterial {
                base_color: Color::srgb(1.0, 1.0, 1.0),
                ..default()
            });

            parent.spawn((
                Name::new("LeftEye"),
                Mesh3d(eye_mesh.clone()),
                MeshMaterial3d(eye_mat.clone()),
                Transform::from_xyz(-0.12, 0.55, 0.28),
            ));
            parent.spawn((
                Name::new("RightEye"),
                Mesh3d(eye_mesh),
                MeshMaterial3d(eye_mat),
                Transform::from_xyz(0.12, 0.55, 0.28),
            ));
        });
}

fn apply_pending_commands(
    mut pending: ResMut<PendingCommands>,
    mut sim_state: ResMut<SimState>,
    mut rig_state: ResMut<CameraRigState>,
) {
    if let Some(pose) = pending.pose_override.take() {
        sim_state.locomotion.manual_pose = pose;
    }
    if pending.queue.is_empty() {
        return;
    }
    let commands = std::mem::take(&mut pending.queue);

    let SimState {
        controller,
        orientation,
        tilt,
        landing,
        fov,
        locomotion,
        secondary,
        ..
    } = &mut *sim_state;
    let mut targets = TuningTargets {
        controller,
        orientation,
        tilt,
        landing,
        fov,
        locomotion,
        secondary,
        rig: &mut rig_state.rig,
    };

    for cmd in commands {
        match apply_command(&mut targets, cmd) {
            CommandOutcome::Applied => {}
            CommandOutcome::Clamped(v) => {
                debug!("{:?} clamped to {v}", cmd.param);
            }
            CommandOutcome::Rejected(reason) => {
                warn!("{:?} rejected: {reason}", cmd.param);
                pending.last_warning = Some(format!("{:?}: {reason}", cmd.param));
            }
        }
    }
}

fn tick_sim(
    time: Res<Time>,
    actions: Res<ActionState<InputAction>>,
    scheme: Res<ControlScheme>,
    handbrake: Res<HandbrakeLatch>,
    world: Res<StaticWorld>,
    mut sim_state: ResMut<SimState>,
) {
    let dt = time.delta_secs().min(MAX_TICK_DT);
    if dt <= 0.0 {
        return;
    }

    let SimState {
        controller,
        orientation,
        tilt,
        landing,
        fov,
        locomotion,
        secondary,
        skeleton,
        debug,
    } = &mut *sim_state;

    // 1) Input snapshot.
    let pressed = |a: InputAction| actions.pressed(&a) as i32 as f32;
    let turn = pressed(InputAction::SteerRight) - pressed(InputAction::SteerLeft);
    let longitudinal = pressed(InputAction::Forward) - pressed(InputAction::Backward);
    let lateral = if scheme.free_strafe { turn } else { 0.0 };
    let mut move_axis = SimVec2::new(lateral, longitudinal);
    if move_axis.norm() > 1.0 {
        move_axis /= move_axis.norm();
    }
    let input = ControllerInput {
        move_axis,
        turn,
        handbrake: handbrake.engaged,
    };

    // 2) Physics.
    let basis = MoveBasis::from_yaw(controller.heading_yaw());
    controller.apply_input(&input, &basis, dt);
    controller.update(&world.collision, dt);

    // 3) Reactive visuals, all read-only over controller state.
    let velocity = controller.velocity();
    let speed = controller.horizontal_speed();
    let facing_reference = if speed > FACING_FROM_VELOCITY_SPEED {
        velocity
    } else {
        controller.input_direction()
    };
    orientation.update(facing_reference, dt);

    let lateral_g = controller.lateral_g_force();
    tilt.update(lateral_g, velocity, orientation.yaw(), dt);

    let accel_h = controller.input_direction() * controller.params.accel;
    let speed_ratio = if controller.params.max_speed > 0.0 {
        speed / controller.params.max_speed
    } else {
        0.0
    };
    landing.update(
        controller.is_grounded(),
        controller.vertical_speed_before_contact(),
        accel_h,
        orientation.yaw(),
        speed_ratio,
        dt,
    );
    fov.update(speed, controller.params.max_speed, lateral_g, dt);

    // 4) Animation: root placement, gait pose, secondary lag.
    locomotion.update(speed, controller.is_grounded(), dt);

    let root_position = controller.position()
        + SimVec3::new(0.0, landing.vertical_offset() - controller.params.radius, 0.0);
    let mut root = tilt.visual_transform(root_position, orientation.yaw());
    root.rotation = root.rotation
        * SimQuat::from_axis_angle(&SimVec3::x_axis(), landing.tilt_pitch())
        * SimQuat::from_axis_angle(&SimVec3::z_axis(), landing.tilt_roll());
    skeleton.set_root(root);

    // Discrete selection (quarter-phase buckets, manual override included)
    // when a pose is forced; the continuous blend otherwise.
    if locomotion.manual_pose.is_some() {
        apply_pose(skeleton, locomotion.select_pose());
    } else {
        apply_gait_pose(skeleton, &locomotion.blended_pose());
    }
    skeleton.update_global_transforms();
    secondary.update(skeleton, dt);
    skeleton.update_global_transforms();

    // 5) Debug primitives for the overlay.
    debug.populate(controller, orientation, locomotion, &world.collision);
}

fn write_back_transform(
    sim_state: Res<SimState>,
    mut q: Query<&mut Transform, With<PlayerBody>>,
) {
    let Ok(mut transform) = q.single_mut() else {
        return;
    };
    let root = &sim_state
        .skeleton
        .joint(sim::anim::skeleton::JointId::Root)
        .model;
    transform.translation = to_bevy(root.translation.vector);
    transform.rotation = to_bevy_quat(root.rotation);
}
