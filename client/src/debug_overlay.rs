//! Gizmo rendering of the sim's debug primitive list and skeleton.
//!
//! Toggled with F3. Spheres and the floor grid are drawn through the sim's
//! own wireframe factories so the overlay shows exactly the collision shapes
//! the resolver sees, not an approximation.

use bevy::prelude::*;
use leafwing_input_manager::prelude::ActionState;
use sim::mesh::{self, Wireframe};

use crate::{
    input::InputAction,
    player::{SimState, to_bevy},
};

#[derive(Resource)]
pub struct DebugOverlayState {
    pub enabled: bool,
}

/// Wireframes built once and re-posed every frame.
#[derive(Resource)]
struct OverlayMeshes {
    unit_sphere: Wireframe,
    grid: Wireframe,
}

pub(super) fn plugin(app: &mut App) {
    app.insert_resource(DebugOverlayState { enabled: true });
    app.insert_resource(OverlayMeshes {
        unit_sphere: mesh::sphere(1.0, 6, 12),
        grid: mesh::grid(24.0, 24),
    });
    app.add_systems(Update, (toggle, draw).chain());
}

fn toggle(actions: Res<ActionState<InputAction>>, mut state: ResMut<DebugOverlayState>) {
    if actions.just_pressed(&InputAction::ToggleDebug) {
        state.enabled = !state.enabled;
    }
}

fn color(c: sim::debug_draw::Color) -> Color {
    Color::srgba(c[0], c[1], c[2], c[3])
}

fn draw_wireframe(gizmos: &mut Gizmos, wire: &Wireframe, origin: Vec3, scale: f32, c: Color) {
    for edge in &wire.edges {
        let a = to_bevy(wire.vertices[edge[0] as usize]) * scale + origin;
        let b = to_bevy(wire.vertices[edge[1] as usize]) * scale + origin;
        gizmos.line(a, b, c);
    }
}

fn draw(
    state: Res<DebugOverlayState>,
    meshes: Res<OverlayMeshes>,
    sim_state: Res<SimState>,
    mut gizmos: Gizmos,
) {
    if !state.enabled {
        return;
    }

    draw_wireframe(
        &mut gizmos,
        &meshes.grid,
        Vec3::new(0.0, 0.01, 0.0),
        1.0,
        Color::srgba(0.3, 0.3, 0.3, 0.6),
    );

    let debug = &sim_state.debug;
    for s in &debug.spheres {
        draw_wireframe(
            &mut gizmos,
            &meshes.unit_sphere,
            to_bevy(s.center),
            s.radius,
            color(s.color),
        );
    }
    for l in &debug.lines {
        gizmos.line(to_bevy(l.start), to_bevy(l.end), color(l.color));
    }
    for a in &debug.arrows {
        gizmos.arrow(to_bevy(a.start), to_bevy(a.end), color(a.color));
    }
    for b in &debug.boxes {
        let center = to_bevy((b.min + b.max) * 0.5);
        let size = to_bevy(b.max - b.min);
        gizmos.cuboid(
            Transform::from_translation(center).with_scale(size),
            color(b.color),
        );
    }

    // Skeleton: bones as lines, joints as small points.
    let joints = sim_state.skeleton.joints();
    for joint in joints {
        let here = to_bevy(joint.model.translation.vector);
        if let Some(parent) = joint.parent {
            let there = to_bevy(joints[parent].model.translation.vector);
            gizmos.line(there, here, Color::srgb(0.95, 0.95, 0.3));
        }
        gizmos.sphere(Isometry3d::from_translation(here), 0.02, Color::WHITE);
    }
}
