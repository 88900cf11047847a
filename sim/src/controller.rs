/*!
Kinematic vehicle controller.

Authoritative physics state for the prototype. One `apply_input` +
`update` pair per tick:

- `apply_input` integrates the heading from steering input (with
  speed-dependent steering reduction), derives the wrap-safe angular
  velocity, and converts the 2D move vector into a world-space acceleration
  through the caller-supplied basis.
- `update` integrates velocity with the closed-form exponential-drag
  solution, steps the vertical channel with semi-implicit Euler under weight
  only, integrates position, and resolves collision against the world.

The exponential integrator is the core time-independence property: at full
throttle the equilibrium speed is exactly `max_speed`, and trajectories match
across any fixed or variable `dt` within numerical precision.

Contract: `dt` must be positive and finite, inputs finite, the move vector
at most unit length. Violations are bugs and assert in debug builds.
*/

use crate::{
    collision::{
        CollisionWorld, ResolveOutcome, Sphere, resolve_world,
        settings::{DEFAULT_MAX_SLOPE_DEG, MIN_DRAG, REST_ACCEL_EPS, REST_SPEED_EPS},
    },
    friction::{Handbrake, total_drag},
    math::{
        G_EARTH, Vec2, Vec3, horizontal, horizontal_speed, is_finite, shortest_arc, wrap_angle,
        yaw_to_forward,
    },
};

/// Per-frame control sample, already mapped from raw device input.
#[derive(Clone, Copy, Debug, Default)]
pub struct ControllerInput {
    /// Movement intent: `x` lateral, `y` longitudinal. `|move_axis| <= 1`
    /// (caller guarantees normalized or zero).
    pub move_axis: Vec2,
    /// Steering input in [-1, 1]. Positive steers right (negative yaw).
    pub turn: f32,
    /// Handbrake engaged this frame.
    pub handbrake: bool,
}

/// Orthonormal horizontal basis the move vector is expressed in.
///
/// Camera-relative or heading-relative; the controller does not decide which.
#[derive(Clone, Copy, Debug)]
pub struct MoveBasis {
    pub forward: Vec3,
    pub right: Vec3,
}

impl MoveBasis {
    /// Basis aligned with a yaw angle (heading-relative driving).
    #[inline]
    pub fn from_yaw(yaw: f32) -> Self {
        Self {
            forward: yaw_to_forward(yaw),
            right: crate::math::yaw_to_right(yaw),
        }
    }
}

/// Tunable controller parameters. All fields are live-tunable through the
/// command pipeline.
#[derive(Clone, Copy, Debug)]
pub struct ControllerParams {
    /// Input acceleration magnitude (m/s^2).
    pub accel: f32,
    /// Equilibrium speed at full throttle (m/s).
    pub max_speed: f32,
    /// Vertical acceleration, negative = downward (m/s^2).
    pub weight: f32,
    /// Steering rate at standstill (rad/s).
    pub turn_rate: f32,
    /// How much steering fades with speed, in [0, 1].
    /// 0 = full steering at any speed, 1 = no steering at max speed.
    pub steering_reduction_factor: f32,
    /// Steepest walkable slope (degrees from horizontal).
    pub max_slope_deg: f32,
    /// Collision sphere radius (meters).
    pub radius: f32,
    /// Handbrake drag source.
    pub handbrake: Handbrake,
}

impl Default for ControllerParams {
    fn default() -> Self {
        Self {
            accel: 5.0,
            max_speed: 8.0,
            weight: -9.8,
            turn_rate: 3.0,
            steering_reduction_factor: 0.7,
            max_slope_deg: DEFAULT_MAX_SLOPE_DEG,
            radius: 0.5,
            handbrake: Handbrake::default(),
        }
    }
}

/// Kinematic controller state.
#[derive(Clone, Debug)]
pub struct Controller {
    pub params: ControllerParams,

    position: Vec3,
    velocity: Vec3,
    /// Accumulated this frame by `apply_input`, consumed and reset by `update`.
    acceleration: Vec3,
    /// Movement intent; preserved even when movement is blocked.
    input_direction: Vec3,

    heading_yaw: f32,
    previous_heading_yaw: f32,
    angular_velocity: f32,

    is_grounded: bool,
    /// Vertical speed entering the collision step; the landing system reads
    /// this on the airborne -> grounded edge.
    vertical_speed_before_contact: f32,
    /// Last aggregated contact, kept for debug visualization.
    last_contact: ResolveOutcome,
}

impl Controller {
    pub fn new(params: ControllerParams) -> Self {
        Self {
            params,
            position: Vec3::zeros(),
            velocity: Vec3::zeros(),
            acceleration: Vec3::zeros(),
            input_direction: Vec3::zeros(),
            heading_yaw: 0.0,
            previous_heading_yaw: 0.0,
            angular_velocity: 0.0,
            is_grounded: false,
            vertical_speed_before_contact: 0.0,
            last_contact: ResolveOutcome::default(),
        }
    }

    /// Reset all kinematic state, keeping parameters.
    pub fn reset(&mut self, position: Vec3) {
        self.position = position;
        self.velocity = Vec3::zeros();
        self.acceleration = Vec3::zeros();
        self.input_direction = Vec3::zeros();
        self.heading_yaw = 0.0;
        self.previous_heading_yaw = 0.0;
        self.angular_velocity = 0.0;
        self.is_grounded = false;
        self.vertical_speed_before_contact = 0.0;
        self.last_contact = ResolveOutcome::default();
    }

    // --- read-only observation -------------------------------------------

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[inline]
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    #[inline]
    pub fn input_direction(&self) -> Vec3 {
        self.input_direction
    }

    #[inline]
    pub fn heading_yaw(&self) -> f32 {
        self.heading_yaw
    }

    #[inline]
    pub fn angular_velocity(&self) -> f32 {
        self.angular_velocity
    }

    #[inline]
    pub fn is_grounded(&self) -> bool {
        self.is_grounded
    }

    #[inline]
    pub fn vertical_speed_before_contact(&self) -> f32 {
        self.vertical_speed_before_contact
    }

    #[inline]
    pub fn last_contact(&self) -> &ResolveOutcome {
        &self.last_contact
    }

    #[inline]
    pub fn collision_sphere(&self) -> Sphere {
        Sphere {
            center: self.position,
            radius: self.params.radius,
        }
    }

    #[inline]
    pub fn horizontal_speed(&self) -> f32 {
        horizontal_speed(self.velocity)
    }

    // --- derived quantities ----------------------------------------------

    /// Steering multiplier at a given speed:
    /// `1 - clamp(speed / max_speed, 0, 1) * steering_reduction_factor`.
    #[inline]
    pub fn steering_multiplier(&self, speed: f32) -> f32 {
        let ratio = if self.params.max_speed > 0.0 {
            (speed / self.params.max_speed).clamp(0.0, 1.0)
        } else {
            0.0
        };
        1.0 - ratio * self.params.steering_reduction_factor
    }

    /// Signed angle between horizontal velocity and the heading forward
    /// vector (radians). Zero when nearly stationary.
    pub fn slip_angle(&self) -> f32 {
        let v = horizontal(self.velocity);
        let speed = v.norm();
        if speed < REST_SPEED_EPS {
            return 0.0;
        }
        let f = yaw_to_forward(self.heading_yaw);
        let v = v / speed;
        // y component of f x v gives the signed sine.
        let cross_y = f.z * v.x - f.x * v.z;
        cross_y.atan2(f.dot(&v))
    }

    /// Dimensionless centripetal acceleration: `speed * angular_velocity / g`.
    #[inline]
    pub fn lateral_g_force(&self) -> f32 {
        self.horizontal_speed() * self.angular_velocity / G_EARTH
    }

    // --- per-tick operations ---------------------------------------------

    /// Apply one frame of control input.
    pub fn apply_input(&mut self, input: &ControllerInput, basis: &MoveBasis, dt: f32) {
        debug_assert!(dt.is_finite() && dt > 0.0, "apply_input: bad dt {dt}");
        debug_assert!(input.move_axis.x.is_finite() && input.move_axis.y.is_finite());
        debug_assert!(input.turn.is_finite() && input.turn.abs() <= 1.0 + 1.0e-3);
        debug_assert!(is_finite(basis.forward) && is_finite(basis.right));
        debug_assert!(
            (0.0..=1.0).contains(&self.params.steering_reduction_factor),
            "steering_reduction_factor out of range"
        );

        // 1) Speed-dependent steering authority.
        let steering = self.steering_multiplier(self.horizontal_speed());

        // 2) Integrate heading. Positive turn input steers right, which is a
        //    negative yaw in this basis.
        self.previous_heading_yaw = self.heading_yaw;
        self.heading_yaw =
            wrap_angle(self.heading_yaw - input.turn * self.params.turn_rate * steering * dt);

        // 3) Wrap-safe angular velocity.
        self.angular_velocity = shortest_arc(self.previous_heading_yaw, self.heading_yaw) / dt;

        // 4) Movement intent and acceleration through the supplied basis.
        self.input_direction = basis.forward * input.move_axis.y + basis.right * input.move_axis.x;
        self.acceleration = self.input_direction * self.params.accel;

        // 5) Handbrake state.
        self.params.handbrake.active = input.handbrake;
    }

    /// Integrate physics and resolve collision for one tick.
    pub fn update(&mut self, world: &CollisionWorld, dt: f32) {
        debug_assert!(dt.is_finite() && dt > 0.0, "update: bad dt {dt}");

        // 1) Weight acts on the vertical channel only.
        self.acceleration.y += self.params.weight;

        // 2) Single additive drag coefficient.
        let k = total_drag(
            self.params.accel,
            self.params.max_speed,
            &self.params.handbrake,
        );

        // 3) Horizontal velocity: exact solution of dv/dt = a - k*v.
        let a_h = horizontal(self.acceleration);
        let mut v_h = horizontal(self.velocity);
        if k >= MIN_DRAG {
            let decay = (-k * dt).exp();
            v_h = v_h * decay + (a_h / k) * (1.0 - decay);
        } else {
            v_h += a_h * dt;
        }

        // 4) Vertical velocity: semi-implicit Euler, weight only (no drag on Y).
        let v_y = self.velocity.y + self.acceleration.y * dt;

        // 5) Rest clamp: only when both speed and input are negligible, so
        //    active input can still accumulate arbitrarily small speeds.
        if v_h.norm() < REST_SPEED_EPS && a_h.norm() < REST_ACCEL_EPS {
            v_h = Vec3::zeros();
        }

        self.velocity = Vec3::new(v_h.x, v_y, v_h.z);

        // 6) Integrate position, reset per-frame acceleration, resolve.
        self.position += self.velocity * dt;
        self.acceleration = Vec3::zeros();
        self.vertical_speed_before_contact = self.velocity.y;

        let max_slope_cos = self.params.max_slope_deg.to_radians().cos();
        let outcome = resolve_world(
            world,
            &mut self.position,
            &mut self.velocity,
            self.params.radius,
            max_slope_cos,
        );
        self.is_grounded = outcome.contacted_floor;
        self.last_contact = outcome;

        debug_assert!(is_finite(self.position) && is_finite(self.velocity));
    }
}

/// Convenience for building the camera-relative move basis from a camera yaw.
#[inline]
pub fn basis_from_camera_yaw(yaw: f32) -> MoveBasis {
    MoveBasis::from_yaw(yaw)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn flat_world() -> CollisionWorld {
        let mut w = CollisionWorld::new();
        w.push_floor(Vec3::new(0.0, -0.5, 0.0), Vec3::new(100.0, 0.5, 100.0));
        w
    }

    fn grounded_controller() -> Controller {
        let mut c = Controller::new(ControllerParams::default());
        c.reset(Vec3::new(0.0, 0.5, 0.0)); // resting on the floor, r = 0.5
        c
    }

    fn forward_basis() -> MoveBasis {
        MoveBasis {
            forward: Vec3::new(0.0, 0.0, 1.0),
            right: Vec3::new(1.0, 0.0, 0.0),
        }
    }

    fn full_throttle() -> ControllerInput {
        ControllerInput {
            move_axis: Vec2::new(0.0, 1.0),
            turn: 0.0,
            handbrake: false,
        }
    }

    fn run(c: &mut Controller, world: &CollisionWorld, input: &ControllerInput, frames: usize) {
        let basis = forward_basis();
        for _ in 0..frames {
            c.apply_input(input, &basis, DT);
            c.update(world, DT);
        }
    }

    #[test]
    fn full_throttle_reaches_max_speed() {
        // Scenario 1: accel = 5, max_speed = 8, 600 frames at 1/60.
        let world = flat_world();
        let mut c = grounded_controller();
        run(&mut c, &world, &full_throttle(), 600);

        assert!(
            (c.horizontal_speed() - 8.0).abs() < 0.08,
            "speed = {}",
            c.horizontal_speed()
        );
        assert_eq!(c.heading_yaw(), 0.0);
    }

    #[test]
    fn speed_follows_exponential_closed_form() {
        // v(t) = max_speed * (1 - e^(-(accel/max_speed) * t)), within 0.5%.
        let world = flat_world();
        let mut c = grounded_controller();
        let k = 5.0 / 8.0;

        for frame in 1..=300 {
            let basis = forward_basis();
            c.apply_input(&full_throttle(), &basis, DT);
            c.update(&world, DT);

            let t = frame as f32 * DT;
            let expected = 8.0 * (1.0 - (-k * t).exp());
            let got = c.horizontal_speed();
            assert!(
                (got - expected).abs() <= expected.max(0.05) * 0.005 + 1.0e-3,
                "frame {frame}: got {got}, expected {expected}"
            );
        }
    }

    #[test]
    fn final_speed_is_step_size_independent() {
        // Simulating the same wall-clock duration at different step sizes must
        // agree within 1%.
        let world = flat_world();
        let total = 10.0f32;

        let speeds: Vec<f32> = [1.0 / 240.0, 1.0 / 60.0, 1.0 / 30.0, 0.05]
            .iter()
            .map(|&dt| {
                let mut c = grounded_controller();
                let basis = forward_basis();
                let frames = (total / dt).round() as usize;
                for _ in 0..frames {
                    c.apply_input(&full_throttle(), &basis, dt);
                    c.update(&world, dt);
                }
                c.horizontal_speed()
            })
            .collect();

        for pair in speeds.windows(2) {
            assert!(
                (pair[0] - pair[1]).abs() <= 8.0 * 0.01,
                "speeds diverge: {speeds:?}"
            );
        }
        assert!((speeds[0] - 8.0).abs() <= 8.0 * 0.01);
    }

    #[test]
    fn zero_input_decays_exponentially_and_snaps_to_rest() {
        // Scenario 5: v_h = 8, zero input => after 1 s, |v_h| = 8 * e^(-5/8).
        let world = flat_world();
        let mut c = grounded_controller();
        run(&mut c, &world, &full_throttle(), 3000); // settle at max speed

        let coast = ControllerInput::default();
        let mut prev = c.horizontal_speed();
        for _ in 0..60 {
            let basis = forward_basis();
            c.apply_input(&coast, &basis, DT);
            c.update(&world, DT);
            let s = c.horizontal_speed();
            assert!(s <= prev * 1.01, "speed increased while coasting");
            prev = s;
        }
        let expected = 8.0 * (-5.0f32 / 8.0).exp();
        assert!(
            (c.horizontal_speed() - expected).abs() <= expected * 0.005,
            "got {}, expected {expected}",
            c.horizontal_speed()
        );

        // Keep coasting: once below the rest epsilon the clamp zeroes it exactly.
        run(&mut c, &world, &coast, 3600);
        assert_eq!(c.horizontal_speed(), 0.0);
    }

    #[test]
    fn handbrake_collapses_steady_state_speed() {
        // Scenario 6: k_total = 0.625 + 4 = 4.625, steady state = 5 / 4.625.
        let world = flat_world();
        let mut c = grounded_controller();
        let input = ControllerInput {
            move_axis: Vec2::new(0.0, 1.0),
            turn: 0.0,
            handbrake: true,
        };
        run(&mut c, &world, &input, 600);

        let expected = 5.0 / 4.625;
        assert!(
            (c.horizontal_speed() - expected).abs() < 0.02,
            "got {}",
            c.horizontal_speed()
        );
    }

    #[test]
    fn pure_turn_integrates_heading() {
        // Scenario 2: turn_rate = 3, full right turn, 60 frames from rest.
        // At rest the steering multiplier is 1, so yaw = -3 rad.
        let world = flat_world();
        let mut c = grounded_controller();
        let input = ControllerInput {
            move_axis: Vec2::zeros(),
            turn: 1.0,
            handbrake: false,
        };
        run(&mut c, &world, &input, 60);

        assert!(
            (c.heading_yaw() - wrap_angle(-3.0)).abs() < 1.0e-4,
            "yaw = {}",
            c.heading_yaw()
        );
        assert!((c.angular_velocity() + 3.0).abs() < 1.0e-3);
    }

    #[test]
    fn heading_stays_wrapped_for_long_input_sequences() {
        let world = flat_world();
        let mut c = grounded_controller();
        let basis = forward_basis();
        // Alternate hard turns with throttle; yaw must never leave [-PI, PI].
        for frame in 0..2000 {
            let input = ControllerInput {
                move_axis: Vec2::new(0.0, 1.0),
                turn: if frame % 3 == 0 { 1.0 } else { -0.6 },
                handbrake: frame % 7 == 0,
            };
            c.apply_input(&input, &basis, DT);
            c.update(&world, DT);
            assert!(
                c.heading_yaw().abs() <= std::f32::consts::PI + 1.0e-5,
                "yaw escaped wrap: {}",
                c.heading_yaw()
            );
        }
    }

    #[test]
    fn steering_multiplier_matches_reduction_factor() {
        // Scenario 3: at speed == max_speed with factor 0.7, multiplier = 0.3.
        let c = grounded_controller();
        let m = c.steering_multiplier(c.params.max_speed);
        assert!((m - 0.3).abs() < 1.0e-6);
        assert!((c.steering_multiplier(0.0) - 1.0).abs() < 1.0e-6);
    }

    #[test]
    fn falling_sphere_lands_and_grounds() {
        // Scenario 4 setup: drop from y = 3 onto the floor at y = 0.
        let world = flat_world();
        let mut c = Controller::new(ControllerParams::default());
        c.reset(Vec3::new(0.0, 3.0, 0.0));

        let coast = ControllerInput::default();
        let basis = forward_basis();
        let mut impact_speed = 0.0;
        for _ in 0..240 {
            c.apply_input(&coast, &basis, DT);
            c.update(&world, DT);
            if c.is_grounded() {
                impact_speed = c.vertical_speed_before_contact();
                break;
            }
        }

        assert!(c.is_grounded());
        assert!(c.velocity().y >= 0.0);
        // Fell ~2.5 m: v = sqrt(2 * 9.8 * 2.5) ~ 7 m/s, recorded as negative.
        assert!(impact_speed < -6.0, "impact speed = {impact_speed}");
        assert!((c.position().y - 0.5).abs() < 0.02);
    }

    #[test]
    fn airborne_controller_is_not_grounded() {
        let world = flat_world();
        let mut c = Controller::new(ControllerParams::default());
        c.reset(Vec3::new(0.0, 10.0, 0.0));
        let basis = forward_basis();
        c.apply_input(&ControllerInput::default(), &basis, DT);
        c.update(&world, DT);
        assert!(!c.is_grounded());
    }

    #[test]
    fn blocked_input_preserves_intent() {
        // Driving straight into a wall: velocity is projected out, but the
        // recorded input direction still points at the wall.
        let mut world = flat_world();
        world.push_wall(Vec3::new(0.0, 1.0, 2.0), Vec3::new(5.0, 2.0, 0.5));

        let mut c = grounded_controller();
        run(&mut c, &world, &full_throttle(), 300);

        assert!((c.input_direction() - Vec3::new(0.0, 0.0, 1.0)).norm() < 1.0e-5);
        assert!(c.velocity().z.abs() < 1.0e-3);
        // Pinned against the wall face at z = 1.5 minus the radius.
        assert!((c.position().z - 1.0).abs() < 0.02);
    }

    #[test]
    fn slip_angle_is_signed_and_zero_at_rest() {
        let mut c = grounded_controller();
        assert_eq!(c.slip_angle(), 0.0);

        // Heading +Z, velocity toward +X: velocity is 90 degrees to the right.
        c.velocity = Vec3::new(3.0, 0.0, 0.0);
        let slip = c.slip_angle();
        assert!((slip.abs() - std::f32::consts::FRAC_PI_2).abs() < 1.0e-4);

        // Mirror the velocity: the sign must flip.
        c.velocity = Vec3::new(-3.0, 0.0, 0.0);
        assert!((c.slip_angle() + slip).abs() < 1.0e-5);
    }
}
