/*!
Collision and controller tolerances.

These constants centralize the parameters used by depenetration, grounding
and the controller's rest clamp. Keeping them together makes tuning easier
and keeps behavior consistent across modules.

Notes
- Distances are in meters, time in seconds, angles in degrees where named so.
- Favor practical world-space tolerances over machine epsilon.
*/

/// Horizontal speed below which the controller may snap to rest (m/s).
/// Paired with [`REST_ACCEL_EPS`]: both must hold before velocity is zeroed,
/// so active input can still accumulate arbitrarily small speeds.
pub const REST_SPEED_EPS: f32 = 0.01;

/// Horizontal acceleration below which input is considered absent (m/s^2).
pub const REST_ACCEL_EPS: f32 = 0.01;

/// Drag coefficient below which the closed-form integrator would divide by
/// ~zero; the controller falls back to explicit Euler under this.
pub const MIN_DRAG: f32 = 1.0e-6;

/// Separation distance treated as "touching" during depenetration (meters).
pub const CONTACT_EPS: f32 = 1.0e-6;

/// Default steepest walkable slope (degrees from horizontal).
/// A contact normal within this cone of +Y counts as a floor.
pub const DEFAULT_MAX_SLOPE_DEG: f32 = 45.0;
