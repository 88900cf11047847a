/*!
Sphere-vs-AABB penetration resolution and contact classification.

Algorithm per box:
- Closest point on the box to the sphere center; if the separation is less
  than the radius, push the sphere out along the unit separation vector by
  the penetration depth.
- Degenerate case (center inside the box): push out along the axis with the
  smallest distance to a face, signed by the center offset.

World sweep:
- Iterate all boxes, resolving position against each in turn.
- Project velocity against every contact normal (`v <- v - min(0, v.n) * n`,
  removing only the component into the surface).
- Accumulate the highest-priority floor contact (largest `normal.y`) and
  report it in the aggregated outcome.

Classification is slope-derived: a contact is a floor iff
`normal.y >= max_slope_cos`. Ceiling contacts (`normal.y <= -max_slope_cos`)
follow wall rules but additionally zero any upward velocity.
*/

use crate::math::Vec3;

use super::{
    settings::CONTACT_EPS,
    types::{Aabb, CollisionWorld, Contact, Sphere},
};

/// Slope-derived contact classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContactClass {
    Floor,
    Wall,
    Ceiling,
}

/// Classify a contact normal against the walkable-slope cosine.
#[inline]
pub fn classify_contact(normal: Vec3, max_slope_cos: f32) -> ContactClass {
    if normal.y >= max_slope_cos {
        ContactClass::Floor
    } else if normal.y <= -max_slope_cos {
        ContactClass::Ceiling
    } else {
        ContactClass::Wall
    }
}

/// Aggregated result of resolving a sphere against the whole world.
#[derive(Clone, Copy, Debug, Default)]
pub struct ResolveOutcome {
    /// Whether any box was touched this step.
    pub hit: bool,
    /// Normal of the reported contact (floor-priority, else deepest).
    pub normal: Vec3,
    /// Penetration of the reported contact (meters, before push-out).
    pub penetration: f32,
    /// Whether at least one contact classified as a floor.
    pub contacted_floor: bool,
}

/// Single sphere-vs-AABB depenetration test.
///
/// Returns the contact if the sphere overlaps the box. The returned normal
/// points out of the box toward the sphere center.
pub fn resolve_sphere_aabb(sphere: &Sphere, aabb: &Aabb) -> Option<Contact> {
    if aabb.contains(sphere.center) {
        // Center inside the box: find the nearest face and push through it.
        let to_min = sphere.center - aabb.min;
        let to_max = aabb.max - sphere.center;

        // (distance to face, outward normal) per candidate face.
        let faces = [
            (to_min.x, Vec3::new(-1.0, 0.0, 0.0)),
            (to_max.x, Vec3::new(1.0, 0.0, 0.0)),
            (to_min.y, Vec3::new(0.0, -1.0, 0.0)),
            (to_max.y, Vec3::new(0.0, 1.0, 0.0)),
            (to_min.z, Vec3::new(0.0, 0.0, -1.0)),
            (to_max.z, Vec3::new(0.0, 0.0, 1.0)),
        ];

        let mut best = faces[0];
        for f in &faces[1..] {
            if f.0 < best.0 {
                best = *f;
            }
        }

        return Some(Contact {
            normal: best.1,
            // Push past the face, plus the radius to fully separate.
            penetration: best.0 + sphere.radius,
        });
    }

    let closest = aabb.closest_point(sphere.center);
    let separation = sphere.center - closest;
    let dist_sq = separation.norm_squared();

    if dist_sq >= sphere.radius * sphere.radius {
        return None;
    }

    let dist = dist_sq.sqrt();
    if dist > CONTACT_EPS {
        Some(Contact {
            normal: separation / dist,
            penetration: sphere.radius - dist,
        })
    } else {
        // Center exactly on the surface: push straight up as a safe default.
        Some(Contact {
            normal: Vec3::new(0.0, 1.0, 0.0),
            penetration: sphere.radius,
        })
    }
}

/// Resolve a sphere against every box in the world, mutating position and
/// velocity in place.
///
/// `max_slope_cos` is `cos(max_slope_angle)`; it drives floor/wall/ceiling
/// classification for the velocity rules and the grounding flag.
pub fn resolve_world(
    world: &CollisionWorld,
    position: &mut Vec3,
    velocity: &mut Vec3,
    radius: f32,
    max_slope_cos: f32,
) -> ResolveOutcome {
    let mut outcome = ResolveOutcome::default();
    let mut best_floor_y = f32::NEG_INFINITY;
    let mut deepest = 0.0f32;

    for world_box in world.boxes() {
        let sphere = Sphere {
            center: *position,
            radius,
        };
        let Some(contact) = resolve_sphere_aabb(&sphere, &world_box.aabb) else {
            continue;
        };

        // Push the sphere out of the box.
        *position += contact.normal * contact.penetration;

        // Remove only the velocity component moving into the surface.
        let into = velocity.dot(&contact.normal).min(0.0);
        *velocity -= contact.normal * into;

        let class = classify_contact(contact.normal, max_slope_cos);
        if class == ContactClass::Ceiling && velocity.y > 0.0 {
            velocity.y = 0.0;
        }

        outcome.hit = true;
        if class == ContactClass::Floor {
            outcome.contacted_floor = true;
            // Floor contacts take reporting priority, best-aligned first.
            if contact.normal.y > best_floor_y {
                best_floor_y = contact.normal.y;
                outcome.normal = contact.normal;
                outcome.penetration = contact.penetration;
            }
        } else if !outcome.contacted_floor && contact.penetration > deepest {
            deepest = contact.penetration;
            outcome.normal = contact.normal;
            outcome.penetration = contact.penetration;
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::types::SurfaceKind;

    const SLOPE_45_COS: f32 = std::f32::consts::FRAC_1_SQRT_2;

    fn floor_world() -> CollisionWorld {
        let mut w = CollisionWorld::new();
        // Slab with its top face at y = 0.
        w.push_floor(Vec3::new(0.0, -0.5, 0.0), Vec3::new(10.0, 0.5, 10.0));
        w
    }

    #[test]
    fn separated_sphere_reports_no_contact() {
        let b = Aabb::from_center_half_extents(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0));
        let s = Sphere {
            center: Vec3::new(0.0, 3.0, 0.0),
            radius: 0.5,
        };
        assert!(resolve_sphere_aabb(&s, &b).is_none());
    }

    #[test]
    fn overlap_from_above_pushes_up() {
        let b = Aabb::from_center_half_extents(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0));
        let s = Sphere {
            center: Vec3::new(0.0, 1.3, 0.0),
            radius: 0.5,
        };
        let c = resolve_sphere_aabb(&s, &b).unwrap();
        assert!((c.normal - Vec3::new(0.0, 1.0, 0.0)).norm() < 1.0e-6);
        assert!((c.penetration - 0.2).abs() < 1.0e-5);
    }

    #[test]
    fn center_inside_box_exits_along_shortest_axis() {
        let b = Aabb::from_center_half_extents(Vec3::zeros(), Vec3::new(2.0, 1.0, 2.0));
        // Closest face is +Y (0.3 away), so the push must be upward.
        let s = Sphere {
            center: Vec3::new(0.5, 0.7, -0.5),
            radius: 0.25,
        };
        let c = resolve_sphere_aabb(&s, &b).unwrap();
        assert!((c.normal - Vec3::new(0.0, 1.0, 0.0)).norm() < 1.0e-6);
        assert!((c.penetration - (0.3 + 0.25)).abs() < 1.0e-5);

        // Applying the push separates the sphere.
        let pushed = Sphere {
            center: s.center + c.normal * c.penetration,
            radius: s.radius,
        };
        assert!(resolve_sphere_aabb(&pushed, &b).is_none());
    }

    #[test]
    fn resolve_world_ends_outside_all_boxes() {
        let world = floor_world();
        // A grid of initial states overlapping the floor slab.
        for ix in -3..=3 {
            for iy in 0..4 {
                let mut pos = Vec3::new(ix as f32 * 2.0, -0.4 + iy as f32 * 0.2, 1.0);
                let mut vel = Vec3::new(1.0, -3.0, 0.0);
                let out = resolve_world(&world, &mut pos, &mut vel, 0.5, SLOPE_45_COS);
                if out.hit {
                    // Post-resolve, the sphere rests on or outside the slab.
                    let s = Sphere {
                        center: pos,
                        radius: 0.5 - 1.0e-4,
                    };
                    assert!(resolve_sphere_aabb(&s, &world.boxes()[0].aabb).is_none());
                }
            }
        }
    }

    #[test]
    fn landing_on_floor_grounds_and_kills_downward_velocity() {
        let world = floor_world();
        let mut pos = Vec3::new(0.0, 0.3, 0.0); // sphere r=0.5 overlaps top face
        let mut vel = Vec3::new(2.0, -5.0, 0.0);
        let out = resolve_world(&world, &mut pos, &mut vel, 0.5, SLOPE_45_COS);

        assert!(out.hit);
        assert!(out.contacted_floor);
        assert!(vel.y >= 0.0);
        // Horizontal motion survives a pure floor contact.
        assert!((vel.x - 2.0).abs() < 1.0e-6);
        assert!((pos.y - 0.5).abs() < 1.0e-5);
    }

    #[test]
    fn wall_contact_slides_without_grounding() {
        let mut world = CollisionWorld::new();
        world.push_wall(Vec3::new(2.0, 1.0, 0.0), Vec3::new(0.5, 2.0, 5.0));

        let mut pos = Vec3::new(1.2, 1.0, 0.0); // overlaps the -X face (at x=1.5)
        let mut vel = Vec3::new(3.0, 0.0, 1.5);
        let out = resolve_world(&world, &mut pos, &mut vel, 0.5, SLOPE_45_COS);

        assert!(out.hit);
        assert!(!out.contacted_floor);
        // Into-wall component removed, tangential preserved.
        assert!(vel.x.abs() < 1.0e-6);
        assert!((vel.z - 1.5).abs() < 1.0e-6);
    }

    #[test]
    fn ceiling_contact_zeroes_upward_velocity() {
        let mut world = CollisionWorld::new();
        world.push(
            Aabb::from_center_half_extents(Vec3::new(0.0, 3.0, 0.0), Vec3::new(5.0, 0.5, 5.0)),
            SurfaceKind::Generic,
        );

        let mut pos = Vec3::new(0.0, 2.2, 0.0); // overlaps the bottom face (at y=2.5)
        let mut vel = Vec3::new(0.5, 4.0, 0.0);
        let out = resolve_world(&world, &mut pos, &mut vel, 0.5, SLOPE_45_COS);

        assert!(out.hit);
        assert!(!out.contacted_floor);
        assert_eq!(vel.y, 0.0);
    }

    #[test]
    fn floor_contact_takes_reporting_priority_over_wall() {
        let mut world = CollisionWorld::new();
        // Corner: floor slab plus a wall the sphere also clips.
        world.push_floor(Vec3::new(0.0, -0.5, 0.0), Vec3::new(10.0, 0.5, 10.0));
        world.push_wall(Vec3::new(0.9, 1.0, 0.0), Vec3::new(0.5, 2.0, 5.0));

        let mut pos = Vec3::new(0.05, 0.3, 0.0);
        let mut vel = Vec3::new(1.0, -1.0, 0.0);
        let out = resolve_world(&world, &mut pos, &mut vel, 0.5, SLOPE_45_COS);

        assert!(out.contacted_floor);
        assert!((out.normal - Vec3::new(0.0, 1.0, 0.0)).norm() < 1.0e-6);
    }

    #[test]
    fn no_overlap_means_no_grounding() {
        let world = floor_world();
        let mut pos = Vec3::new(0.0, 5.0, 0.0);
        let mut vel = Vec3::new(0.0, -1.0, 0.0);
        let out = resolve_world(&world, &mut pos, &mut vel, 0.5, SLOPE_45_COS);
        assert!(!out.hit);
        assert!(!out.contacted_floor);
    }
}
