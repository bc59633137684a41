//! Target Scene Module
//!
//! The spatial query surface the lock-on controller consumes. The host
//! world implements this trait over whatever scene representation it has;
//! the controller never touches entities directly.

use crate::targeting::entity::{TargetDetails, TargetHandle};
use glam::Vec3;

/// World-side capability surface for targeting.
///
/// All handle-resolving methods return `Option`: a handle whose entity is
/// gone resolves to `None` and the controller short-circuits the affected
/// operation instead of panicking.
pub trait TargetScene {
    /// All entities of the targetable category. Order is unspecified but
    /// must be stable within a frame; candidate ties are kept in this
    /// order.
    fn targets(&self) -> Vec<TargetHandle>;

    /// Targeting descriptor for an entity.
    fn details(&self, target: TargetHandle) -> Option<&TargetDetails>;

    /// Raise or clear the tracked flag on an entity's descriptor.
    fn set_tracked(&mut self, target: TargetHandle, tracked: bool);

    /// World position of the entity's origin.
    fn position(&self, target: TargetHandle) -> Option<Vec3>;

    /// World position of one of the entity's target points, read fresh on
    /// every use (points ride on the entity's transform).
    fn point_position(&self, target: TargetHandle, point_index: usize) -> Option<Vec3>;

    /// The entity's yaw in degrees (facing test for point cycling).
    fn yaw_of(&self, target: TargetHandle) -> Option<f32>;

    /// Visibility test between two world points, ignoring the viewer and
    /// anything attached to it.
    ///
    /// Convention: returns `true` when the ray is UNOBSTRUCTED — i.e. no
    /// blocking hit before `to`. Raycast adapters that report "hit
    /// something" must invert their result; getting this backwards makes
    /// every target permanently invisible (or permanently visible).
    fn line_of_sight(&self, from: Vec3, to: Vec3) -> bool;

    /// Whether a world point projects inside the viewport, with a small
    /// margin at the edges.
    fn on_screen(&self, point: Vec3) -> bool;
}
