//! Dynamic field of view.
//!
//! Maps speed and lateral g onto a widened FOV:
//! `fov = clamp(base + saturate(speed / max_speed) * range + |g| * g_mult,
//!              base, base + range)`.
//! The output can be spring-smoothed so FOV changes do not pump on
//! frame-to-frame speed noise.

use crate::spring::Spring;

#[derive(Clone, Copy, Debug)]
pub struct FovSystem {
    /// FOV at rest (degrees).
    pub base_deg: f32,
    /// Maximum widening above base (degrees).
    pub range_deg: f32,
    /// Extra degrees per unit of |lateral g|.
    pub g_multiplier: f32,
    /// Whether the output chases the target through the spring.
    pub smoothed: bool,
    spring: Spring,
}

impl FovSystem {
    pub fn new(base_deg: f32, range_deg: f32, g_multiplier: f32) -> Self {
        let mut spring = Spring::new(40.0);
        spring.snap_to(base_deg);
        Self {
            base_deg,
            range_deg,
            g_multiplier,
            smoothed: true,
            spring,
        }
    }

    /// Unsmoothed target for the current state (degrees).
    #[inline]
    pub fn target(&self, speed: f32, max_speed: f32, lateral_g: f32) -> f32 {
        let ratio = if max_speed > 0.0 {
            (speed / max_speed).clamp(0.0, 1.0)
        } else {
            0.0
        };
        (self.base_deg + ratio * self.range_deg + lateral_g.abs() * self.g_multiplier)
            .clamp(self.base_deg, self.base_deg + self.range_deg)
    }

    /// Advance and return the presented FOV (degrees).
    pub fn update(&mut self, speed: f32, max_speed: f32, lateral_g: f32, dt: f32) -> f32 {
        let target = self.target(speed, max_speed, lateral_g);
        if self.smoothed {
            self.spring.update(target, dt);
            self.spring.position
        } else {
            self.spring.snap_to(target);
            target
        }
    }

    #[inline]
    pub fn current(&self) -> f32 {
        self.spring.position
    }
}
