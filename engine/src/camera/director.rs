//! Rotation Director Module
//!
//! Computes the look rotation applied to the viewer every tick while a
//! target is locked. The desired rotation aims at the active target
//! point; pitch can be adjusted by distance (linear formula or curve) to
//! keep the camera framing comfortable at close range. The output is
//! rate-interpolated from the current control rotation, never snapped.

use crate::math::{FloatCurve, Rotator};
use crate::targeting::viewer::ViewerController;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Parameters of the linear distance-to-pitch formula.
///
/// The applied offset is `clamp(-(distance * distance_coefficient +
/// distance_offset), min, max)`, added to the raw look pitch.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct LinearPitch {
    pub distance_coefficient: f32,
    pub distance_offset: f32,
    pub min: f32,
    pub max: f32,
}

impl Default for LinearPitch {
    fn default() -> Self {
        Self {
            distance_coefficient: -0.2,
            distance_offset: 60.0,
            min: -50.0,
            max: -20.0,
        }
    }
}

/// How the locked camera adjusts pitch with distance to the target.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum PitchAdjustment {
    /// Distance-proportional offset added to the raw look pitch
    Linear(LinearPitch),
    /// Pitch sampled from a distance-keyed curve; the active target
    /// point's own curve wins over this default one. With neither curve
    /// available the pitch is held at zero.
    Curve { default_curve: Option<FloatCurve> },
    /// Raw look pitch, unadjusted
    Raw,
}

impl Default for PitchAdjustment {
    fn default() -> Self {
        Self::Linear(LinearPitch::default())
    }
}

/// Per-tick look rotation computation for a locked target.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RotationDirector {
    pub pitch: PitchAdjustment,
    /// Catch-up rate for the rotation interpolation
    pub interp_speed: f32,
}

impl Default for RotationDirector {
    fn default() -> Self {
        Self {
            pitch: PitchAdjustment::default(),
            interp_speed: 9.0,
        }
    }
}

impl RotationDirector {
    /// Desired control rotation toward `aim_point`, interpolated from the
    /// viewer's current control rotation.
    ///
    /// `distance` is the viewer-to-target-origin distance (the pitch
    /// formulas are keyed on it, not on the aim point). `point_curve` is
    /// the active target point's pitch curve, if it has one. Roll is
    /// always held at the current control roll.
    pub fn control_rotation_on_target(
        &self,
        viewer: &impl ViewerController,
        aim_point: Vec3,
        distance: f32,
        point_curve: Option<&FloatCurve>,
        delta_time: f32,
    ) -> Rotator {
        let control = viewer.look_rotation();
        let look = Rotator::look_at(viewer.position(), aim_point);

        let target_rotation = match &self.pitch {
            PitchAdjustment::Curve { default_curve } => {
                let curve = point_curve.or(default_curve.as_ref());
                let pitch = curve.map_or(0.0, |c| c.value_at(distance));
                Rotator::new(pitch, look.yaw, control.roll)
            }
            PitchAdjustment::Linear(linear) => {
                let in_range =
                    -(distance * linear.distance_coefficient + linear.distance_offset);
                let offset = in_range.clamp(linear.min, linear.max);
                Rotator::new(look.pitch + offset, look.yaw, control.roll)
            }
            PitchAdjustment::Raw => Rotator::new(look.pitch, look.yaw, control.roll),
        };

        control.rinterp_to(target_rotation, delta_time, self.interp_speed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::delta_angle;

    struct StubViewer {
        position: Vec3,
        look: Rotator,
    }

    impl ViewerController for StubViewer {
        fn position(&self) -> Vec3 {
            self.position
        }
        fn yaw(&self) -> f32 {
            self.look.yaw
        }
        fn camera_pose(&self) -> Option<(Vec3, Rotator)> {
            Some((self.position, self.look))
        }
        fn look_rotation(&self) -> Rotator {
            self.look
        }
        fn set_look_rotation(&mut self, rotation: Rotator) {
            self.look = rotation;
        }
        fn seize_look_control(&mut self) {}
        fn release_look_control(&mut self) {}
        fn set_look_driven_rotation(&mut self, _enabled: bool) {}
        fn camera_offset(&self) -> Vec3 {
            Vec3::ZERO
        }
        fn set_camera_offset(&mut self, _offset: Vec3) {}
    }

    fn viewer() -> StubViewer {
        StubViewer {
            position: Vec3::ZERO,
            look: Rotator::ZERO,
        }
    }

    #[test]
    fn test_linear_pitch_offset_is_clamped() {
        let linear = LinearPitch::default();
        // Close target: -(0 * -0.2 + 60) = -60, clamped to min -50
        let near = -(0.0 * linear.distance_coefficient + linear.distance_offset);
        assert_eq!(near.clamp(linear.min, linear.max), -50.0);
        // Far target: -(1000 * -0.2 + 60) = 140, clamped to max -20
        let far = -(1000.0 * linear.distance_coefficient + linear.distance_offset);
        assert_eq!(far.clamp(linear.min, linear.max), -20.0);
    }

    #[test]
    fn test_raw_mode_aims_at_point() {
        let director = RotationDirector {
            pitch: PitchAdjustment::Raw,
            interp_speed: 9.0,
        };
        let viewer = viewer();
        let aim = Vec3::new(0.0, 0.0, -100.0);

        // Large step count converges onto the raw look rotation
        let mut rotation = viewer.look_rotation();
        for _ in 0..400 {
            let stub = StubViewer {
                position: viewer.position,
                look: rotation,
            };
            rotation = director.control_rotation_on_target(&stub, aim, 100.0, None, 0.016);
        }
        assert!(delta_angle(rotation.yaw, 0.0).abs() < 0.1);
        assert!(rotation.pitch.abs() < 0.1);
    }

    #[test]
    fn test_point_curve_overrides_default_curve() {
        let director = RotationDirector {
            pitch: PitchAdjustment::Curve {
                default_curve: Some(FloatCurve::new([(0.0, -10.0), (1000.0, -10.0)])),
            },
            interp_speed: 0.0, // snap for assertion clarity
        };
        let viewer = viewer();
        let point_curve = FloatCurve::new([(0.0, -35.0), (1000.0, -35.0)]);

        let with_point = director.control_rotation_on_target(
            &viewer,
            Vec3::new(0.0, 0.0, -100.0),
            100.0,
            Some(&point_curve),
            0.016,
        );
        assert!((with_point.pitch - -35.0).abs() < 0.001);

        let with_default = director.control_rotation_on_target(
            &viewer,
            Vec3::new(0.0, 0.0, -100.0),
            100.0,
            None,
            0.016,
        );
        assert!((with_default.pitch - -10.0).abs() < 0.001);
    }

    #[test]
    fn test_curve_mode_without_any_curve_holds_zero_pitch() {
        let director = RotationDirector {
            pitch: PitchAdjustment::Curve {
                default_curve: None,
            },
            interp_speed: 0.0,
        };
        let viewer = viewer();
        let rotation = director.control_rotation_on_target(
            &viewer,
            Vec3::new(0.0, 50.0, -100.0),
            100.0,
            None,
            0.016,
        );
        assert_eq!(rotation.pitch, 0.0);
    }

    #[test]
    fn test_output_is_interpolated_not_snapped() {
        let director = RotationDirector {
            pitch: PitchAdjustment::Raw,
            interp_speed: 9.0,
        };
        let viewer = viewer();
        let rotation = director.control_rotation_on_target(
            &viewer,
            Vec3::new(100.0, 0.0, 0.0), // 90 degrees to the right
            100.0,
            None,
            0.016,
        );
        assert!(rotation.yaw > 0.0);
        assert!(rotation.yaw < 90.0);
    }

    #[test]
    fn test_roll_passthrough() {
        let director = RotationDirector {
            pitch: PitchAdjustment::Raw,
            interp_speed: 0.0,
        };
        let mut viewer = viewer();
        viewer.look.roll = 12.5;
        let rotation = director.control_rotation_on_target(
            &viewer,
            Vec3::new(0.0, 0.0, -100.0),
            100.0,
            None,
            0.016,
        );
        assert_eq!(rotation.roll, 12.5);
    }
}
