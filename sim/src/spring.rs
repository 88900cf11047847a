//! Scalar second-order spring-damper.
//!
//! Every reactive visual in this crate (orientation yaw, lean, pitch,
//! landing offset, FOV smoothing, secondary-motion lag) is one of these.
//! Integration is semi-implicit Euler, which is stable for the stiffness
//! range we tune at variable `dt` up to ~100 ms.
//!
//! Damping is *derived*: callers tune stiffness only, and the spring keeps
//! itself critically damped (`c = 2 * sqrt(k)`). This is the invariant the
//! tuning layer relies on -- there is no independent damping knob.

/// Critical damping coefficient for a unit-mass spring of stiffness `k`.
#[inline]
pub fn critical_damping(k: f32) -> f32 {
    2.0 * k.max(0.0).sqrt()
}

/// A critically damped scalar spring.
#[derive(Clone, Copy, Debug)]
pub struct Spring {
    /// Current position (output).
    pub position: f32,
    /// Current velocity (units/s).
    pub velocity: f32,
    stiffness: f32,
    damping: f32,
}

impl Spring {
    /// Spring at rest at zero with the given stiffness, critically damped.
    #[inline]
    pub fn new(stiffness: f32) -> Self {
        Self {
            position: 0.0,
            velocity: 0.0,
            stiffness: stiffness.max(0.0),
            damping: critical_damping(stiffness),
        }
    }

    #[inline]
    pub fn stiffness(&self) -> f32 {
        self.stiffness
    }

    #[inline]
    pub fn damping(&self) -> f32 {
        self.damping
    }

    /// Retune stiffness; damping is recomputed to stay critical.
    #[inline]
    pub fn set_stiffness(&mut self, stiffness: f32) {
        self.stiffness = stiffness.max(0.0);
        self.damping = critical_damping(self.stiffness);
    }

    /// Advance one step toward `target`.
    #[inline]
    pub fn update(&mut self, target: f32, dt: f32) {
        debug_assert!(dt.is_finite() && dt > 0.0, "spring dt must be positive");
        let accel = self.stiffness * (target - self.position) - self.damping * self.velocity;
        self.velocity += accel * dt;
        self.position += self.velocity * dt;
    }

    /// Inject an instantaneous velocity change (e.g. a landing impulse).
    #[inline]
    pub fn add_impulse(&mut self, velocity: f32) {
        self.velocity += velocity;
    }

    /// Snap to a position and kill all velocity.
    #[inline]
    pub fn snap_to(&mut self, position: f32) {
        self.position = position;
        self.velocity = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn damping_tracks_stiffness() {
        let mut s = Spring::new(100.0);
        assert!((s.damping() - 20.0).abs() < 1.0e-6);

        s.set_stiffness(400.0);
        assert!((s.damping() - 40.0).abs() < 1.0e-6);
    }

    #[test]
    fn released_from_rest_never_overshoots() {
        // Critical damping: approach the target monotonically, never pass it.
        for &k in &[1.0f32, 10.0, 50.0, 100.0, 400.0] {
            let mut s = Spring::new(k);
            let target = 1.0;
            let mut prev = s.position;
            for _ in 0..3000 {
                s.update(target, DT);
                assert!(
                    s.position <= target + 1.0e-4,
                    "k = {k}: overshot to {}",
                    s.position
                );
                assert!(
                    s.position >= prev - 1.0e-4,
                    "k = {k}: moved away from target"
                );
                prev = s.position;
            }
            // And it actually converges.
            assert!((s.position - target).abs() < 1.0e-2, "k = {k}");
        }
    }

    #[test]
    fn impulse_decays_back_to_rest() {
        let mut s = Spring::new(60.0);
        s.add_impulse(-3.0);
        for _ in 0..600 {
            s.update(0.0, DT);
        }
        assert!(s.position.abs() < 1.0e-3);
        assert!(s.velocity.abs() < 1.0e-3);
    }

    #[test]
    fn snap_clears_velocity() {
        let mut s = Spring::new(50.0);
        s.add_impulse(10.0);
        s.update(1.0, DT);
        s.snap_to(0.25);
        assert_eq!(s.position, 0.25);
        assert_eq!(s.velocity, 0.0);
    }

    #[test]
    fn zero_stiffness_spring_is_inert() {
        let mut s = Spring::new(0.0);
        s.update(5.0, DT);
        assert_eq!(s.position, 0.0);
    }
}
