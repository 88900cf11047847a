/*!
Reactive visual systems.

Read-only consumers of controller state. Every system here takes the
current frame's controller output plus `dt` and produces presentation
values (angles, offsets, FOV); none of them ever mutates physics. The
host ticks them after `Controller::update` in a fixed order.

- orientation: spring-damped display yaw
- tilt:        lean and pitch springs from lateral g / forward accel
- landing:     landing spring impulses + acceleration tilt smoothing
- fov:         speed- and g-driven field of view
*/

pub mod fov;
pub mod landing;
pub mod orientation;
pub mod tilt;

pub use fov::FovSystem;
pub use landing::LandingSystem;
pub use orientation::OrientationSystem;
pub use tilt::TiltSystem;
