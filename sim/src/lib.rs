/*!
Simulation core for the locomotion lab.

Pure, deterministic, single-threaded. Everything in this crate is driven by
the host's per-frame tick and reads/writes plain state; there is no I/O, no
logging, and no graphics dependency. The `client` crate owns presentation.

Module layers (leaves first):

- math / spring / easing:  scalar and vector kernels
- collision:               sphere-vs-AABB world resolution
- friction / controller:   kinematic integration and steering
- visuals:                 read-only reactive systems (orientation, tilt,
                           landing, fov) driven by controller state
- anim:                    skeleton, keyframed poses, distance-phased
                           locomotion, secondary motion
- camera:                  orbit rig math
- tuning:                  parameter metadata + command application
- debug_draw / mesh:       primitive list generation and wireframe factories
*/

pub mod anim;
pub mod camera;
pub mod collision;
pub mod controller;
pub mod debug_draw;
pub mod easing;
pub mod friction;
pub mod math;
pub mod mesh;
pub mod spring;
pub mod tuning;
pub mod visuals;

pub use camera::OrbitRig;
pub use collision::{Aabb, CollisionWorld, Contact, ResolveOutcome, Sphere, SurfaceKind, WorldBox};
pub use controller::{Controller, ControllerInput, ControllerParams, MoveBasis};
pub use debug_draw::DebugPrimitives;
pub use math::{G_EARTH, Vec3, shortest_arc, wrap_angle};
pub use spring::Spring;
pub use tuning::{Command, CommandOutcome, Param, TuningTargets, apply_command};
