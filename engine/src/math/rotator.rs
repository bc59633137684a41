//! Rotator Module
//!
//! Degrees-based pitch/yaw/roll rotation used for look-control math.
//! Yaw convention matches the camera controller: at yaw = 0 the forward
//! direction is -Z, positive yaw turns toward +X.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A rotation expressed as pitch/yaw/roll in degrees.
///
/// Pitch is positive looking up, yaw follows the engine convention
/// (forward = `(sin(yaw), 0, -cos(yaw))`), roll is around the view axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rotator {
    /// Vertical angle (degrees, positive = up)
    pub pitch: f32,
    /// Horizontal angle (degrees)
    pub yaw: f32,
    /// Angle around the view axis (degrees)
    pub roll: f32,
}

impl Rotator {
    /// A zero rotation.
    pub const ZERO: Rotator = Rotator {
        pitch: 0.0,
        yaw: 0.0,
        roll: 0.0,
    };

    pub fn new(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self { pitch, yaw, roll }
    }

    /// Rotation that looks from `from` toward `to`, with zero roll.
    ///
    /// Returns `Rotator::ZERO` when the two points (nearly) coincide.
    pub fn look_at(from: Vec3, to: Vec3) -> Self {
        let dir = to - from;
        let len = dir.length();
        if len < 1e-4 {
            return Self::ZERO;
        }

        let yaw = dir.x.atan2(-dir.z).to_degrees();
        let pitch = (dir.y / len).clamp(-1.0, 1.0).asin().to_degrees();
        Self {
            pitch,
            yaw,
            roll: 0.0,
        }
    }

    /// Forward direction vector for this rotation.
    pub fn forward(&self) -> Vec3 {
        let yaw = self.yaw.to_radians();
        let pitch = self.pitch.to_radians();
        Vec3::new(
            yaw.sin() * pitch.cos(),
            pitch.sin(),
            -yaw.cos() * pitch.cos(),
        )
        .normalize()
    }

    /// Interpolate toward `target` at `speed` (degrees catch-up rate per
    /// second, applied proportionally), taking the shortest path on every
    /// component. Never overshoots; with `speed <= 0` snaps to the target.
    pub fn rinterp_to(&self, target: Rotator, delta_time: f32, speed: f32) -> Rotator {
        if speed <= 0.0 {
            return target;
        }

        let alpha = (delta_time * speed).clamp(0.0, 1.0);
        Rotator {
            pitch: self.pitch + delta_angle(self.pitch, target.pitch) * alpha,
            yaw: self.yaw + delta_angle(self.yaw, target.yaw) * alpha,
            roll: self.roll + delta_angle(self.roll, target.roll) * alpha,
        }
    }
}

/// Normalize an angle into the [0, 360) range.
pub fn normalize_angle_360(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Shortest signed angular difference `to - from`, in (-180, 180].
pub fn delta_angle(from: f32, to: f32) -> f32 {
    let mut diff = (to - from).rem_euclid(360.0);
    if diff > 180.0 {
        diff -= 360.0;
    }
    diff
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_look_at_forward() {
        // Looking straight down -Z should give yaw 0, pitch 0
        let rot = Rotator::look_at(Vec3::ZERO, Vec3::new(0.0, 0.0, -10.0));
        assert!(rot.yaw.abs() < 0.001);
        assert!(rot.pitch.abs() < 0.001);
    }

    #[test]
    fn test_look_at_right_is_positive_yaw() {
        let rot = Rotator::look_at(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0));
        assert!((rot.yaw - 90.0).abs() < 0.001);
    }

    #[test]
    fn test_look_at_up_pitch() {
        let rot = Rotator::look_at(Vec3::ZERO, Vec3::new(0.0, 10.0, -10.0));
        assert!((rot.pitch - 45.0).abs() < 0.01);
    }

    #[test]
    fn test_look_at_degenerate_is_zero() {
        let rot = Rotator::look_at(Vec3::ONE, Vec3::ONE);
        assert_eq!(rot, Rotator::ZERO);
    }

    #[test]
    fn test_normalize_angle_360() {
        assert!((normalize_angle_360(-30.0) - 330.0).abs() < 0.001);
        assert!((normalize_angle_360(370.0) - 10.0).abs() < 0.001);
        assert!(normalize_angle_360(0.0).abs() < 0.001);
    }

    #[test]
    fn test_delta_angle_shortest_path() {
        assert!((delta_angle(350.0, 10.0) - 20.0).abs() < 0.001);
        assert!((delta_angle(10.0, 350.0) + 20.0).abs() < 0.001);
        assert!((delta_angle(0.0, 180.0) - 180.0).abs() < 0.001);
    }

    #[test]
    fn test_rinterp_moves_toward_target() {
        let current = Rotator::new(0.0, 0.0, 0.0);
        let target = Rotator::new(0.0, 90.0, 0.0);
        let step = current.rinterp_to(target, 0.016, 9.0);
        assert!(step.yaw > 0.0);
        assert!(step.yaw < 90.0);
    }

    #[test]
    fn test_rinterp_wraps_across_zero() {
        let current = Rotator::new(0.0, 350.0, 0.0);
        let target = Rotator::new(0.0, 10.0, 0.0);
        let step = current.rinterp_to(target, 0.016, 9.0);
        // Should rotate forward through 360, not backward through 180
        assert!(step.yaw > 350.0);
    }

    #[test]
    fn test_rinterp_converges() {
        let mut current = Rotator::new(-20.0, 120.0, 0.0);
        let target = Rotator::new(5.0, -45.0, 0.0);
        for _ in 0..500 {
            current = current.rinterp_to(target, 0.016, 9.0);
        }
        assert!(delta_angle(current.yaw, target.yaw).abs() < 0.1);
        assert!(delta_angle(current.pitch, target.pitch).abs() < 0.1);
    }
}
