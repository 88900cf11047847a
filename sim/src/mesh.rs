//! Pure wireframe factories.
//!
//! Everything here returns a [`Wireframe`]: a vertex list plus index pairs.
//! No graphics types leak in; the host turns edges into whatever line
//! primitive its renderer wants. Shapes are built in canonical local space
//! (unit axes, centered) and transformed by the caller.

use crate::math::Vec3;
use std::f32::consts::TAU;

#[derive(Clone, Debug, Default)]
pub struct Wireframe {
    pub vertices: Vec<Vec3>,
    /// Index pairs into `vertices`.
    pub edges: Vec<[u32; 2]>,
}

impl Wireframe {
    fn with_capacity(vertices: usize, edges: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            edges: Vec::with_capacity(edges),
        }
    }

    /// Append a polyline through the given points, optionally closing it.
    fn polyline(&mut self, points: impl IntoIterator<Item = Vec3>, closed: bool) {
        let first = self.vertices.len() as u32;
        for p in points {
            self.vertices.push(p);
        }
        let last = self.vertices.len() as u32;
        for i in first..last.saturating_sub(1) {
            self.edges.push([i, i + 1]);
        }
        if closed && last - first >= 3 {
            self.edges.push([last - 1, first]);
        }
    }
}

/// Latitude/longitude sphere. `rings` >= 2, `segments` >= 3.
pub fn sphere(radius: f32, rings: u32, segments: u32) -> Wireframe {
    let rings = rings.max(2);
    let segments = segments.max(3);
    let mut w = Wireframe::default();

    // Horizontal rings, poles excluded.
    for r in 1..rings {
        let phi = (r as f32 / rings as f32) * std::f32::consts::PI;
        let y = radius * phi.cos();
        let ring_radius = radius * phi.sin();
        w.polyline(
            (0..segments).map(|s| {
                let theta = s as f32 / segments as f32 * TAU;
                Vec3::new(ring_radius * theta.cos(), y, ring_radius * theta.sin())
            }),
            true,
        );
    }

    // Meridians from pole to pole.
    for s in 0..segments {
        let theta = s as f32 / segments as f32 * TAU;
        w.polyline(
            (0..=rings).map(|r| {
                let phi = (r as f32 / rings as f32) * std::f32::consts::PI;
                Vec3::new(
                    radius * phi.sin() * theta.cos(),
                    radius * phi.cos(),
                    radius * phi.sin() * theta.sin(),
                )
            }),
            false,
        );
    }
    w
}

/// Axis-aligned box outline, centered at the origin.
pub fn box_frame(half_extents: Vec3) -> Wireframe {
    let h = half_extents;
    let mut w = Wireframe::with_capacity(8, 12);
    for &y in &[-h.y, h.y] {
        for &z in &[-h.z, h.z] {
            for &x in &[-h.x, h.x] {
                w.vertices.push(Vec3::new(x, y, z));
            }
        }
    }
    // Bottom face, top face, verticals.
    w.edges.extend_from_slice(&[
        [0, 1], [1, 3], [3, 2], [2, 0],
        [4, 5], [5, 7], [7, 6], [6, 4],
        [0, 4], [1, 5], [2, 6], [3, 7],
    ]);
    w
}

/// Square grid in the XZ plane, `divisions` cells per side.
pub fn grid(half_size: f32, divisions: u32) -> Wireframe {
    let divisions = divisions.max(1);
    let mut w = Wireframe::default();
    for i in 0..=divisions {
        let t = -half_size + (i as f32 / divisions as f32) * 2.0 * half_size;
        w.polyline([Vec3::new(t, 0.0, -half_size), Vec3::new(t, 0.0, half_size)], false);
        w.polyline([Vec3::new(-half_size, 0.0, t), Vec3::new(half_size, 0.0, t)], false);
    }
    w
}

/// Unit-ish arrow along +Z: a shaft of `length` with four head barbs.
pub fn arrow(length: f32, head_size: f32) -> Wireframe {
    let tip = Vec3::new(0.0, 0.0, length);
    let base = tip - Vec3::new(0.0, 0.0, head_size);
    let mut w = Wireframe::with_capacity(6, 5);
    w.polyline([Vec3::zeros(), tip], false);
    for (dx, dy) in [(1.0, 0.0), (-1.0, 0.0), (0.0, 1.0), (0.0, -1.0)] {
        w.polyline(
            [tip, base + Vec3::new(dx * head_size * 0.5, dy * head_size * 0.5, 0.0)],
            false,
        );
    }
    w
}

/// Horizontal circle in the XZ plane.
pub fn circle(radius: f32, segments: u32) -> Wireframe {
    let segments = segments.max(3);
    let mut w = Wireframe::default();
    w.polyline(
        (0..segments).map(|s| {
            let theta = s as f32 / segments as f32 * TAU;
            Vec3::new(radius * theta.cos(), 0.0, radius * theta.sin())
        }),
        true,
    );
    w
}

/// Vertical helix rising along +Y.
pub fn helix(radius: f32, height: f32, turns: f32, segments: u32) -> Wireframe {
    let segments = segments.max(8);
    let mut w = Wireframe::default();
    w.polyline(
        (0..=segments).map(|s| {
            let t = s as f32 / segments as f32;
            let theta = t * turns * TAU;
            Vec3::new(radius * theta.cos(), t * height, radius * theta.sin())
        }),
        false,
    );
    w
}
