//! Target Selector Module
//!
//! Ranks lock candidates by distance and camera-relative angle and
//! resolves directional re-targeting while a lock is held.
//!
//! Angle convention: the camera-relative angle of a world point is
//! `camera_yaw - look_at_yaw`, normalized into [0, 360). Zero means dead
//! ahead; values grow toward one side and wrap. All range checks below
//! operate on this raw wrapped angle.

use crate::math::{Rotator, normalize_angle_360};
use crate::targeting::entity::TargetHandle;
use crate::targeting::pool::{CandidatePool, sort_handles_by_score};
use crate::targeting::scene::TargetScene;
use crate::targeting::viewer::ViewerController;
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Tuning for candidate scoring and switching.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Candidates inside this range always qualify, even off-screen
    pub dangerous_distance_to_target: f32,
    /// Hard distance cap for starting (or switching to) a lock
    pub max_distance_can_start_target: f32,
    /// Angle refinement acceptance cone (degrees)
    pub maximum_find_angle: f32,
    /// How much farther than the distance-best candidate an on-angle
    /// candidate may be and still win the refinement
    pub extra_distance_by_angle: f32,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            dangerous_distance_to_target: 200.0,
            max_distance_can_start_target: 3000.0,
            maximum_find_angle: 50.0,
            extra_distance_by_angle: 300.0,
        }
    }
}

/// Borrowed view over everything one selection query needs.
pub struct SelectionContext<'a, S: TargetScene, V: ViewerController> {
    pub scene: &'a S,
    pub viewer: &'a V,
    pub config: &'a SelectionConfig,
    /// The currently locked target, excluded from switch searches.
    pub current_target: Option<TargetHandle>,
}

impl<'a, S: TargetScene, V: ViewerController> SelectionContext<'a, S, V> {
    /// Entity origin, the reference point for all selection geometry.
    pub fn target_position(&self, target: TargetHandle) -> Option<Vec3> {
        self.scene.position(target)
    }

    /// Distance from the viewer to the entity origin. Unresolvable
    /// handles rank last.
    pub fn distance_to(&self, target: TargetHandle) -> f32 {
        self.target_position(target)
            .map_or(f32::MAX, |position| {
                (position - self.viewer.position()).length()
            })
    }

    /// Camera-relative angle of a world point in [0, 360). Falls back to
    /// the viewer actor's own pose when no camera exists.
    pub fn angle_to(&self, location: Vec3) -> f32 {
        match self.viewer.camera_pose() {
            Some((camera_position, camera_rotation)) => {
                let look = Rotator::look_at(camera_position, location);
                normalize_angle_360(camera_rotation.yaw - look.yaw)
            }
            None => {
                let look = Rotator::look_at(self.viewer.position(), location);
                normalize_angle_360(self.viewer.yaw() - look.yaw)
            }
        }
    }

    /// Whether a candidate passes the base lock filters: visible from the
    /// viewer, within starting range, and on-screen unless dangerously
    /// close.
    fn passes_lock_filters(&self, target: TargetHandle) -> bool {
        let Some(position) = self.target_position(target) else {
            return false;
        };
        if !self.scene.line_of_sight(self.viewer.position(), position) {
            return false;
        }
        let distance = self.distance_to(target);
        if distance > self.config.max_distance_can_start_target {
            return false;
        }
        if !self.scene.on_screen(position) && distance > self.config.dangerous_distance_to_target {
            return false;
        }
        true
    }

    /// Find the best lock candidate in the pool.
    ///
    /// The pool is sorted ascending by distance; the first candidate that
    /// passes the lock filters is the distance-best result. Without angle
    /// refinement it is returned immediately. With refinement, all
    /// passing candidates are re-ranked by camera-relative angle and the
    /// first one inside the acceptance cone AND within
    /// `distance_best + extra_distance_by_angle` wins; when none
    /// qualifies the distance-best candidate is kept.
    pub fn find_nearest_target(
        &self,
        pool: &mut CandidatePool,
        use_angle: bool,
    ) -> Option<TargetHandle> {
        if pool.is_empty() {
            return None;
        }
        pool.sort_by_score(|handle| self.distance_to(handle));

        let mut best_by_distance = None;
        let mut angle_candidates: Vec<TargetHandle> = Vec::new();

        for &handle in pool.handles() {
            if !self.passes_lock_filters(handle) {
                continue;
            }
            if best_by_distance.is_none() {
                best_by_distance = Some(handle);
            }
            if !use_angle {
                break;
            }
            angle_candidates.push(handle);
        }

        let best = best_by_distance?;
        if !use_angle {
            return Some(best);
        }

        sort_handles_by_score(&mut angle_candidates, |handle| {
            self.target_position(handle)
                .map_or(f32::MAX, |position| self.angle_to(position))
        });

        let best_distance = self.distance_to(best);
        for &handle in &angle_candidates {
            let Some(position) = self.target_position(handle) else {
                continue;
            };
            if self.angle_to(position) > self.config.maximum_find_angle {
                continue;
            }
            if best_distance + self.config.extra_distance_by_angle < self.distance_to(handle) {
                continue;
            }
            return Some(handle);
        }

        Some(best)
    }

    /// Directional switch along the horizontal input axis.
    ///
    /// The sign of `axis_x` selects a yaw half-plane ([0, 180] for
    /// negative input, [180, 360] for positive); among candidates in that
    /// half-plane and within starting range, the one closest to the
    /// current target wins.
    pub fn find_by_horizontal(
        &self,
        candidates: &[TargetHandle],
        axis_x: f32,
    ) -> Option<TargetHandle> {
        let current = self.current_target?;
        let current_position = self.target_position(current)?;

        let (range_min, range_max) = half_plane(axis_x);
        let mut min_distance = self.config.max_distance_can_start_target;
        let mut new_target = None;

        for &handle in candidates {
            if handle == current {
                continue;
            }
            let Some(position) = self.target_position(handle) else {
                continue;
            };
            let angle = self.angle_to(position);
            if angle < range_min || angle > range_max {
                continue;
            }
            if self.distance_to(handle) > self.config.max_distance_can_start_target {
                continue;
            }
            let relative_distance = (position - current_position).length();
            if relative_distance > min_distance {
                continue;
            }
            min_distance = relative_distance;
            new_target = Some(handle);
        }
        new_target
    }

    /// Directional switch along the vertical input axis.
    ///
    /// Half-plane selection still follows the sign of `axis.x`. On top of
    /// the horizontal criteria, a negative `axis.y` skips candidates
    /// closer to the viewer than the current target, and a non-negative
    /// `axis.y` skips candidates farther away. This matches the shipped
    /// behavior of the switching input even where it reads inverted;
    /// change it only together with its tests.
    pub fn find_by_vertical(
        &self,
        candidates: &[TargetHandle],
        axis: Vec2,
    ) -> Option<TargetHandle> {
        let current = self.current_target?;
        let current_position = self.target_position(current)?;
        let current_distance = self.distance_to(current);

        let (range_min, range_max) = half_plane(axis.x);
        let mut min_distance = self.config.max_distance_can_start_target;
        let mut new_target = None;

        for &handle in candidates {
            if handle == current {
                continue;
            }
            let Some(position) = self.target_position(handle) else {
                continue;
            };
            let angle = self.angle_to(position);
            if angle < range_min || angle > range_max {
                continue;
            }
            let distance = self.distance_to(handle);
            if distance > self.config.max_distance_can_start_target {
                continue;
            }
            let relative_distance = (position - current_position).length();
            if relative_distance > min_distance {
                continue;
            }
            if axis.y < 0.0 {
                if distance < current_distance {
                    continue;
                }
            } else if distance > current_distance {
                continue;
            }
            min_distance = relative_distance;
            new_target = Some(handle);
        }
        new_target
    }
}

/// Yaw half-plane for a signed axis value: negative input looks at
/// [0, 180], positive (and zero) at [180, 360].
fn half_plane(axis_value: f32) -> (f32, f32) {
    if axis_value < 0.0 {
        (0.0, 180.0)
    } else {
        (180.0, 360.0)
    }
}
