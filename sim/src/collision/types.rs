/*!
Core collision data types.

This module intentionally contains no algorithms. It defines the data
exchanged between the resolver and the controller:

- world authoring types (Aabb, SurfaceKind, WorldBox, CollisionWorld)
- query types (Sphere, Contact)
*/

use crate::math::Vec3;

/// The moving collision proxy: a sphere centered on the controller position.
#[derive(Clone, Copy, Debug)]
pub struct Sphere {
    /// World-space center (meters).
    pub center: Vec3,
    /// Radius (meters).
    pub radius: f32,
}

/// Static tag assigned when authoring world geometry.
///
/// Controller logic derives floor/wall from the contact normal instead; the
/// tag exists for authoring intent and debug coloring.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfaceKind {
    Floor,
    Wall,
    Platform,
    Generic,
}

/// Axis-aligned box in world space.
#[derive(Clone, Copy, Debug)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    #[inline]
    pub fn new(min: Vec3, max: Vec3) -> Self {
        debug_assert!(min.x <= max.x && min.y <= max.y && min.z <= max.z);
        Self { min, max }
    }

    #[inline]
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Closest point on (or in) the box to `p`.
    #[inline]
    pub fn closest_point(&self, p: Vec3) -> Vec3 {
        Vec3::new(
            p.x.clamp(self.min.x, self.max.x),
            p.y.clamp(self.min.y, self.max.y),
            p.z.clamp(self.min.z, self.max.z),
        )
    }

    /// True when `p` is strictly inside the box.
    #[inline]
    pub fn contains(&self, p: Vec3) -> bool {
        p.x > self.min.x
            && p.x < self.max.x
            && p.y > self.min.y
            && p.y < self.max.y
            && p.z > self.min.z
            && p.z < self.max.z
    }
}

/// One authored box of world geometry.
#[derive(Clone, Copy, Debug)]
pub struct WorldBox {
    pub aabb: Aabb,
    pub kind: SurfaceKind,
}

/// A single sphere-vs-box contact.
#[derive(Clone, Copy, Debug)]
pub struct Contact {
    /// World-space unit normal pointing out of the box, toward the sphere.
    pub normal: Vec3,
    /// Overlap depth along the normal (meters, > 0).
    pub penetration: f32,
}

/// The static world: a flat set of tagged boxes.
///
/// The world always contains at least one floor box in practice; there is no
/// implicit ground plane.
#[derive(Clone, Debug, Default)]
pub struct CollisionWorld {
    boxes: Vec<WorldBox>,
}

impl CollisionWorld {
    pub fn new() -> Self {
        Self { boxes: Vec::new() }
    }

    #[inline]
    pub fn boxes(&self) -> &[WorldBox] {
        &self.boxes
    }

    pub fn push(&mut self, aabb: Aabb, kind: SurfaceKind) {
        self.boxes.push(WorldBox { aabb, kind });
    }

    /// Convenience: a floor slab centered at `center` with the given extents.
    pub fn push_floor(&mut self, center: Vec3, half_extents: Vec3) {
        self.push(
            Aabb::from_center_half_extents(center, half_extents),
            SurfaceKind::Floor,
        );
    }

    /// Convenience: a wall slab centered at `center` with the given extents.
    pub fn push_wall(&mut self, center: Vec3, half_extents: Vec3) {
        self.push(
            Aabb::from_center_half_extents(center, half_extents),
            SurfaceKind::Wall,
        );
    }

    /// Convenience: a raised platform.
    pub fn push_platform(&mut self, center: Vec3, half_extents: Vec3) {
        self.push(
            Aabb::from_center_half_extents(center, half_extents),
            SurfaceKind::Platform,
        );
    }
}
