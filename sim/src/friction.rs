//! Drag composition for the exponential integrator.
//!
//! All drag sources combine additively into a single coefficient `k` that
//! enters the closed-form solution of `dv/dt = a - k*v`. Keeping the
//! composition additive preserves the exact-integration property when new
//! sources (surface, drift, wind) are added later.
//!
//! The base term `accel / max_speed` makes `max_speed` the exact equilibrium
//! speed at full throttle.

/// Handbrake drag source. `brake_rate` is tunable; `active` is per-frame
/// input state.
#[derive(Clone, Copy, Debug)]
pub struct Handbrake {
    /// Additional drag coefficient while braking (1/s).
    pub brake_rate: f32,
    /// Whether the brake is engaged this frame.
    pub active: bool,
}

impl Default for Handbrake {
    fn default() -> Self {
        Self {
            brake_rate: 4.0,
            active: false,
        }
    }
}

/// Total drag coefficient (1/s) for the current frame.
#[inline]
pub fn total_drag(accel: f32, max_speed: f32, handbrake: &Handbrake) -> f32 {
    let base = if max_speed > 0.0 { accel / max_speed } else { 0.0 };
    let brake = if handbrake.active {
        handbrake.brake_rate
    } else {
        0.0
    };
    base + brake
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_drag_is_accel_over_max_speed() {
        let hb = Handbrake {
            brake_rate: 4.0,
            active: false,
        };
        let k = total_drag(5.0, 8.0, &hb);
        assert!((k - 0.625).abs() < 1.0e-6);
    }

    #[test]
    fn handbrake_adds_on_top() {
        let hb = Handbrake {
            brake_rate: 4.0,
            active: true,
        };
        let k = total_drag(5.0, 8.0, &hb);
        assert!((k - 4.625).abs() < 1.0e-6);
    }

    #[test]
    fn zero_max_speed_does_not_divide_by_zero() {
        let hb = Handbrake::default();
        assert_eq!(total_drag(5.0, 0.0, &hb), 0.0);
    }
}
