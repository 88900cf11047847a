//! Debug primitive generation.
//!
//! A retained list of plain-data draw primitives, cleared and repopulated
//! every tick from simulation state. The renderer consumes the list by value
//! each frame and never holds references into the simulation.

use crate::{
    anim::LocomotionSystem,
    collision::CollisionWorld,
    controller::Controller,
    math::{Vec3, yaw_to_forward},
    visuals::OrientationSystem,
};

pub type Color = [f32; 4];

pub const COLOR_BODY: Color = [0.3, 0.9, 0.4, 1.0];
pub const COLOR_VELOCITY: Color = [0.95, 0.85, 0.2, 1.0];
pub const COLOR_INTENT: Color = [0.3, 0.6, 1.0, 1.0];
pub const COLOR_HEADING: Color = [1.0, 0.4, 0.3, 1.0];
pub const COLOR_FACING: Color = [0.8, 0.3, 0.9, 1.0];
pub const COLOR_CONTACT: Color = [1.0, 0.2, 0.2, 1.0];
pub const COLOR_WORLD: Color = [0.5, 0.5, 0.55, 1.0];

#[derive(Clone, Copy, Debug)]
pub struct DebugSphere {
    pub center: Vec3,
    pub radius: f32,
    pub color: Color,
}

#[derive(Clone, Copy, Debug)]
pub struct DebugLine {
    pub start: Vec3,
    pub end: Vec3,
    pub color: Color,
}

/// A line the renderer draws with a head at `end`.
#[derive(Clone, Copy, Debug)]
pub struct DebugArrow {
    pub start: Vec3,
    pub end: Vec3,
    pub color: Color,
}

#[derive(Clone, Copy, Debug)]
pub struct DebugBox {
    pub min: Vec3,
    pub max: Vec3,
    pub color: Color,
}

#[derive(Clone, Debug)]
pub struct DebugText {
    pub position: Vec3,
    pub text: String,
    pub color: Color,
}

#[derive(Clone, Debug, Default)]
pub struct DebugPrimitives {
    pub spheres: Vec<DebugSphere>,
    pub lines: Vec<DebugLine>,
    pub arrows: Vec<DebugArrow>,
    pub boxes: Vec<DebugBox>,
    pub texts: Vec<DebugText>,
}

impl DebugPrimitives {
    /// Empty the list, keeping allocations for the next tick.
    pub fn clear(&mut self) {
        self.spheres.clear();
        self.lines.clear();
        self.arrows.clear();
        self.boxes.clear();
        self.texts.clear();
    }

    /// Rebuild the full primitive set from this tick's state.
    pub fn populate(
        &mut self,
        controller: &Controller,
        orientation: &OrientationSystem,
        locomotion: &LocomotionSystem,
        world: &CollisionWorld,
    ) {
        self.clear();

        let p = controller.position();
        let sphere = controller.collision_sphere();
        self.spheres.push(DebugSphere {
            center: sphere.center,
            radius: sphere.radius,
            color: COLOR_BODY,
        });

        // Velocity and movement intent, scaled for readability.
        let v = controller.velocity();
        if v.norm() > 1.0e-3 {
            self.arrows.push(DebugArrow {
                start: p,
                end: p + v * 0.3,
                color: COLOR_VELOCITY,
            });
        }
        let intent = controller.input_direction();
        if intent.norm() > 1.0e-3 {
            self.arrows.push(DebugArrow {
                start: p,
                end: p + intent * 1.5,
                color: COLOR_INTENT,
            });
        }

        // Physics heading vs displayed facing.
        self.arrows.push(DebugArrow {
            start: p,
            end: p + yaw_to_forward(controller.heading_yaw()) * 1.2,
            color: COLOR_HEADING,
        });
        self.arrows.push(DebugArrow {
            start: p,
            end: p + yaw_to_forward(orientation.yaw()) * 1.0,
            color: COLOR_FACING,
        });

        // Aggregated contact normal.
        let contact = controller.last_contact();
        if contact.hit {
            self.arrows.push(DebugArrow {
                start: p,
                end: p + contact.normal * 0.8,
                color: COLOR_CONTACT,
            });
        }

        for b in world.boxes() {
            self.boxes.push(DebugBox {
                min: b.aabb.min,
                max: b.aabb.max,
                color: COLOR_WORLD,
            });
        }

        self.texts.push(DebugText {
            position: p + Vec3::new(0.0, sphere.radius + 1.2, 0.0),
            text: format!(
                "v {:.2} m/s  slip {:+.2}  g {:+.2}\nphase {:.2}  {}",
                controller.horizontal_speed(),
                controller.slip_angle(),
                controller.lateral_g_force(),
                locomotion.phase(),
                if controller.is_grounded() { "grounded" } else { "airborne" },
            ),
            color: COLOR_BODY,
        });
    }
}
