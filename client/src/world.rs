//! Static test arena: the collision world plus matching render geometry.
//!
//! The sim only sees `StaticWorld.collision`; the cuboid meshes are spawned
//! from the same table so what you see is exactly what you collide with.

use bevy::prelude::*;
use sim::{CollisionWorld, SurfaceKind};

#[derive(Resource)]
pub struct StaticWorld {
    pub collision: CollisionWorld,
}

struct ArenaBox {
    center: [f32; 3],
    half_extents: [f32; 3],
    kind: SurfaceKind,
}

/// Authoring table. Floor top face sits at y = 0.
const ARENA: &[ArenaBox] = &[
    // Ground slab.
    ArenaBox {
        center: [0.0, -0.5, 0.0],
        half_extents: [24.0, 0.5, 24.0],
        kind: SurfaceKind::Floor,
    },
    // Boundary walls.
    ArenaBox {
        center: [0.0, 2.0, 24.5],
        half_extents: [25.0, 2.0, 0.5],
        kind: SurfaceKind::Wall,
    },
    ArenaBox {
        center: [0.0, 2.0, -24.5],
        half_extents: [25.0, 2.0, 0.5],
        kind: SurfaceKind::Wall,
    },
    ArenaBox {
        center: [24.5, 2.0, 0.0],
        half_extents: [0.5, 2.0, 25.0],
        kind: SurfaceKind::Wall,
    },
    ArenaBox {
        center: [-24.5, 2.0, 0.0],
        half_extents: [0.5, 2.0, 25.0],
        kind: SurfaceKind::Wall,
    },
    // Raised platforms in a loose staircase.
    ArenaBox {
        center: [8.0, 0.4, 6.0],
        half_extents: [2.5, 0.4, 2.5],
        kind: SurfaceKind::Platform,
    },
    ArenaBox {
        center: [13.0, 0.9, 6.0],
        half_extents: [2.5, 0.9, 2.5],
        kind: SurfaceKind::Platform,
    },
    ArenaBox {
        center: [13.0, 1.5, 11.5],
        half_extents: [2.5, 1.5, 2.5],
        kind: SurfaceKind::Platform,
    },
    // Slalom obstacles.
    ArenaBox {
        center: [-8.0, 1.0, -4.0],
        half_extents: [0.6, 1.0, 3.0],
        kind: SurfaceKind::Wall,
    },
    ArenaBox {
        center: [-13.0, 1.0, 4.0],
        half_extents: [0.6, 1.0, 3.0],
        kind: SurfaceKind::Wall,
    },
    // Low overhang for the ceiling rule.
    ArenaBox {
        center: [0.0, 2.6, -12.0],
        half_extents: [4.0, 0.4, 3.0],
        kind: SurfaceKind::Generic,
    },
];

pub(super) fn plugin(app: &mut App) {
    let mut collision = CollisionWorld::new();
    for b in ARENA {
        let center = sim::Vec3::new(b.center[0], b.center[1], b.center[2]);
        let half = sim::Vec3::new(b.half_extents[0], b.half_extents[1], b.half_extents[2]);
        collision.push(
            sim::Aabb::from_center_half_extents(center, half),
            b.kind,
        );
    }
    app.insert_resource(StaticWorld { collision });

    app.add_systems(Startup, setup);
}

fn surface_color(kind: SurfaceKind) -> Color {
    match kind {
        SurfaceKind::Floor => Color::linear_rgb(0.2, 0.3, 0.25),
        SurfaceKind::Wall => Color::linear_rgb(0.45, 0.4, 0.35),
        SurfaceKind::Platform => Color::linear_rgb(0.3, 0.35, 0.55),
        SurfaceKind::Generic => Color::linear_rgb(0.5, 0.3, 0.3),
    }
}

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for b in ARENA {
        commands.spawn((
            Mesh3d(meshes.add(Cuboid::new(
                b.half_extents[0] * 2.0,
                b.half_extents[1] * 2.0,
                b.half_extents[2] * 2.0,
            ))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: surface_color(b.kind),
                perceptual_roughness: 1.0,
                metallic: 0.0,
                ..default()
            })),
            Transform::from_xyz(b.center[0], b.center[1], b.center[2]),
        ));
    }

    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            illuminance: 8_000.0,
            ..default()
        },
        Transform::from_xyz(10.0, 20.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.spawn((
        PointLight {
            shadows_enabled: false,
            intensity: 2_000_000.0,
            range: 60.0,
            ..default()
        },
        Transform::from_xyz(-6.0, 12.0, -6.0),
    ));
}
