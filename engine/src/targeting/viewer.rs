//! Viewer Controller Module
//!
//! Capability surface of the actor that owns the lock-on controller: its
//! pose, its camera, and the look-control hooks the lock seizes while a
//! target is held.

use crate::math::Rotator;
use glam::Vec3;

/// Owner/viewer capability surface.
///
/// Implemented by the host's player/pawn layer and injected into every
/// controller operation; the controller holds no reference of its own.
pub trait ViewerController {
    /// World position of the viewer actor.
    fn position(&self) -> Vec3;

    /// Actor yaw in degrees (fallback for angle math, facing tests).
    fn yaw(&self) -> f32;

    /// Camera world position and rotation, when a camera exists.
    ///
    /// `None` makes the selection math fall back to the actor's own
    /// position and yaw.
    fn camera_pose(&self) -> Option<(Vec3, Rotator)>;

    /// Current look (control) rotation.
    fn look_rotation(&self) -> Rotator;

    /// Apply a look rotation computed by the rotation director.
    fn set_look_rotation(&mut self, rotation: Rotator);

    /// Take over look input while a target is locked (player look input
    /// should be ignored until released).
    fn seize_look_control(&mut self);

    /// Return look input to the player.
    fn release_look_control(&mut self);

    /// Toggle whether the actor's body rotation follows the look rotation
    /// (`true` while locked) or its movement direction (`false`). Only
    /// driven in the orient-to-movement rotation mode.
    fn set_look_driven_rotation(&mut self, enabled: bool);

    /// Current camera boom offset (override volume blend input).
    fn camera_offset(&self) -> Vec3;

    /// Apply a camera boom offset (override volume blend output).
    fn set_camera_offset(&mut self, offset: Vec3);
}
