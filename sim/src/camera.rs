//! Orbit camera rig math.
//!
//! Pure spherical-coordinate bookkeeping; the host owns the actual camera
//! entity and smoothing. Latitude is clamped short of the poles so the up
//! vector never degenerates, and distance is clamped to `[min, max]`.

use crate::math::{Vec3, wrap_angle};
use std::f32::consts::PI;

#[derive(Clone, Copy, Debug)]
pub struct OrbitRig {
    /// Eye distance from the focus point (meters).
    pub distance: f32,
    /// Elevation above the horizontal plane (radians, positive = above).
    pub latitude: f32,
    /// Azimuth around the focus (radians, wrapped to [-PI, PI]).
    pub longitude: f32,
    /// Focus point height above the followed position (meters).
    pub height_offset: f32,

    pub min_distance: f32,
    pub max_distance: f32,
    pub min_latitude: f32,
    pub max_latitude: f32,
    /// Radians per input unit for [`OrbitRig::orbit`].
    pub orbit_sensitivity: f32,
    /// Meters per scroll unit for [`OrbitRig::zoom`].
    pub zoom_sensitivity: f32,
    /// When set, the azimuth tracks the character's heading so the camera
    /// stays behind it; manual orbit input is ignored.
    pub lock_behind: bool,
}

impl Default for OrbitRig {
    fn default() -> Self {
        Self {
            distance: 6.0,
            latitude: 0.35,
            longitude: PI,
            height_offset: 1.5,
            min_distance: 2.0,
            max_distance: 20.0,
            min_latitude: -1.45,
            max_latitude: 1.45,
            orbit_sensitivity: 0.005,
            zoom_sensitivity: 0.8,
            lock_behind: false,
        }
    }
}

impl OrbitRig {
    /// Maya-style orbit: horizontal input pans the azimuth, vertical input
    /// tilts the elevation. No-op while locked behind the character.
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        if self.lock_behind {
            return;
        }
        self.longitude = wrap_angle(self.longitude - dx * self.orbit_sensitivity);
        self.latitude = (self.latitude + dy * self.orbit_sensitivity)
            .clamp(self.min_latitude, self.max_latitude);
    }

    /// Scroll zoom; positive input moves the eye closer.
    pub fn zoom(&mut self, scroll: f32) {
        self.distance =
            (self.distance - scroll * self.zoom_sensitivity).clamp(self.min_distance, self.max_distance);
    }

    /// Re-apply all clamps. Called after tuning writes the bounds directly.
    pub fn clamp_state(&mut self) {
        self.distance = self.distance.clamp(self.min_distance, self.max_distance);
        self.latitude = self.latitude.clamp(self.min_latitude, self.max_latitude);
        self.longitude = wrap_angle(self.longitude);
    }

    /// The point the camera looks at.
    #[inline]
    pub fn focus(&self, target: Vec3) -> Vec3 {
        target + Vec3::new(0.0, self.height_offset, 0.0)
    }

    /// Eye position for the current spherical state. When `lock_behind` is
    /// set, `heading_yaw` replaces the stored azimuth so the eye sits behind
    /// the character's facing.
    pub fn eye_position(&self, target: Vec3, heading_yaw: f32) -> Vec3 {
        let longitude = if self.lock_behind {
            wrap_angle(heading_yaw + PI)
        } else {
            self.longitude
        };
        let (sin_lon, cos_lon) = longitude.sin_cos();
        let (sin_lat, cos_lat) = self.latitude.sin_cos();
        self.focus(target)
            + Vec3::new(
                cos_lat * sin_lon,
                sin_lat,
                cos_lat * cos_lon,
            ) * self.distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eye_sits_at_distance_from_focus() {
        let rig = OrbitRig::default();
        let target = Vec3::new(3.0, 0.5, -2.0);
        let eye = rig.eye_position(target, 0.0);
        assert!(((eye - rig.focus(target)).norm() - rig.distance).abs() < 1.0e-4);
    }

    #[test]
    fn zoom_respects_distance_clamps() {
        let mut rig = OrbitRig::default();
        rig.zoom(-1000.0);
        assert_eq!(rig.distance, rig.max_distance);
        rig.zoom(1.0e6);
        assert_eq!(rig.distance, rig.min_distance);
    }

    #[test]
    fn orbit_clamps_latitude_and_wraps_longitude() {
        let mut rig = OrbitRig::default();
        rig.orbit(0.0, 1.0e6);
        assert_eq!(rig.latitude, rig.max_latitude);
        rig.orbit(123456.0, 0.0);
        assert!(rig.longitude.abs() <= PI + 1.0e-5);
    }

    #[test]
    fn lock_behind_follows_heading() {
        let mut rig = OrbitRig::default();
        rig.lock_behind = true;
        rig.latitude = 0.0;
        let target = Vec3::zeros();

        // Heading +Z: eye behind at -Z.
        let eye = rig.eye_position(target, 0.0);
        assert!(eye.z < 0.0 && eye.x.abs() < 1.0e-4);

        // Heading +X: eye behind at -X.
        let eye = rig.eye_position(target, std::f32::consts::FRAC_PI_2);
        assert!(eye.x < 0.0 && eye.z.abs() < 1.0e-4);

        // Manual orbit is ignored while locked.
        let lon = rig.longitude;
        rig.orbit(100.0, 100.0);
        assert_eq!(rig.longitude, lon);
    }
}
