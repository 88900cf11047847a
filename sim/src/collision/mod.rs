/*!
Collision root module.

Sphere-vs-AABB world resolution for the kinematic controller. The code is
split for clarity:

- types:    shared data types (Sphere, Aabb, WorldBox, Contact, ...)
- settings: tolerance constants and slope defaults
- resolve:  depenetration, velocity projection, floor/wall classification

The world is a flat set of axis-aligned boxes. Each carries a static
`SurfaceKind` tag, but controller logic classifies contacts from the contact
normal instead (a contact is a floor iff `normal.y >= cos(max_slope_angle)`);
the tag is informational for world authoring and debug display.
*/

pub mod resolve;
pub mod settings;
pub mod types;

pub use resolve::{ContactClass, ResolveOutcome, classify_contact, resolve_sphere_aabb, resolve_world};
pub use types::{Aabb, CollisionWorld, Contact, Sphere, SurfaceKind, WorldBox};
