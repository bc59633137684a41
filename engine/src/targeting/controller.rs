//! Lock-On Controller Module
//!
//! The lock session state machine: acquiring a target, observing it while
//! locked (visibility polling with a grace window, distance auto-release),
//! switching targets under directional input with a debounce, cycling
//! between a target's aim points, and driving the locked camera rotation
//! every tick.
//!
//! The controller owns no world state. The host passes its scene and
//! viewer implementations into every operation and calls
//! [`LockOnController::tick`] once per frame.

use crate::camera::RotationDirector;
use crate::events::Dispatcher;
use crate::math::FloatCurve;
use crate::scheduler::{Scheduler, TimerHandle};
use crate::targeting::entity::TargetHandle;
use crate::targeting::pool::CandidatePool;
use crate::targeting::selector::{SelectionConfig, SelectionContext};
use crate::targeting::scene::TargetScene;
use crate::targeting::viewer::ViewerController;
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Debounce window armed while a switch is in flight.
const SWITCH_DEBOUNCE_ACTIVE: f32 = 0.25;
/// Debounce window armed outside of a switch.
const SWITCH_DEBOUNCE_IDLE: f32 = 0.5;

/// How the owning actor's body rotation behaves while locked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RotationMode {
    /// Body follows movement normally; the lock takes over body yaw for
    /// the duration of the session.
    #[default]
    OrientToMovement,
    /// Body yaw is driven elsewhere (strafe setups); the lock leaves it
    /// alone.
    Strafe,
}

/// Lock-on indicator configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IndicatorConfig {
    /// UI asset shown over the active target point. `None` disables the
    /// indicator (and logs a configuration error on attach).
    pub asset: Option<String>,
    pub draw_size: f32,
    pub relative_location: Vec3,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            asset: Some("ui/lock_on_reticle".to_string()),
            draw_size: 32.0,
            relative_location: Vec3::ZERO,
        }
    }
}

/// The indicator currently attached to a locked target's aim point.
#[derive(Clone, Debug, PartialEq)]
pub struct LockIndicator {
    pub asset: String,
    pub target: TargetHandle,
    pub point_index: usize,
    pub draw_size: f32,
    pub relative_location: Vec3,
}

/// Lock-on controller tuning.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct LockOnConfig {
    pub rotation_mode: RotationMode,
    /// Try to re-acquire a replacement when the current target is lost
    pub auto_target_switch: bool,
    /// Input dead-zone below which switch input is ignored
    pub start_rotating_threshold: f32,
    /// Grace window after losing line of sight before the lock releases
    pub break_line_of_sight_delay: f32,
    /// Observation polling interval while locked
    pub timer_tick: f32,
    /// Gather radius for the candidate pool
    pub max_distance_to_potential_targets: f32,
    /// Distance past which a held lock auto-releases; clamped up to at
    /// least `selection.max_distance_can_start_target` at construction
    pub lose_target_distance: f32,
    pub selection: SelectionConfig,
    pub indicator: IndicatorConfig,
}

impl Default for LockOnConfig {
    fn default() -> Self {
        Self {
            rotation_mode: RotationMode::OrientToMovement,
            auto_target_switch: false,
            start_rotating_threshold: 0.85,
            break_line_of_sight_delay: 2.0,
            timer_tick: 0.5,
            max_distance_to_potential_targets: 2400.0,
            lose_target_distance: 4000.0,
            selection: SelectionConfig::default(),
            indicator: IndicatorConfig::default(),
        }
    }
}

impl LockOnConfig {
    /// Load tuning from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// The lock session controller.
///
/// One instance per viewer; the active target and candidate pool are
/// exclusively owned here. Notification dispatchers are public so hosts
/// can subscribe/unsubscribe observers directly.
pub struct LockOnController {
    config: LockOnConfig,
    director: RotationDirector,
    pool: CandidatePool,
    nearest_target: Option<TargetHandle>,
    current_point_name: String,
    target_locked: bool,
    is_switching_target: bool,
    scheduler: Scheduler,
    observing_timer: Option<TimerHandle>,
    behind_wall_timer: Option<TimerHandle>,
    switching_timer: Option<TimerHandle>,
    indicator: Option<LockIndicator>,

    /// Fired with the target when a lock engages (including switches).
    pub on_target_locked_on: Dispatcher<TargetHandle>,
    /// Fired with the target when observation of it ends.
    pub on_target_locked_off: Dispatcher<TargetHandle>,
    /// Fired once per finished lock attempt/session.
    pub on_finish_target_lock: Dispatcher<()>,
    /// Fired when a target is released because it died (pruned from the
    /// pool permanently).
    pub on_target_died: Dispatcher<TargetHandle>,
}

impl Default for LockOnController {
    fn default() -> Self {
        Self::new(LockOnConfig::default())
    }
}

impl LockOnController {
    pub fn new(config: LockOnConfig) -> Self {
        Self::with_director(config, RotationDirector::default())
    }

    pub fn with_director(mut config: LockOnConfig, director: RotationDirector) -> Self {
        // A lock must never be losable closer than it can be started
        if config.lose_target_distance < config.selection.max_distance_can_start_target {
            config.lose_target_distance = config.selection.max_distance_can_start_target;
        }

        Self {
            config,
            director,
            pool: CandidatePool::new(),
            nearest_target: None,
            current_point_name: String::new(),
            target_locked: false,
            is_switching_target: false,
            scheduler: Scheduler::new(),
            observing_timer: None,
            behind_wall_timer: None,
            switching_timer: None,
            indicator: None,
            on_target_locked_on: Dispatcher::new(),
            on_target_locked_off: Dispatcher::new(),
            on_finish_target_lock: Dispatcher::new(),
            on_target_died: Dispatcher::new(),
        }
    }

    pub fn config(&self) -> &LockOnConfig {
        &self.config
    }

    pub fn is_locked(&self) -> bool {
        self.target_locked && self.nearest_target.is_some()
    }

    pub fn locked_target(&self) -> Option<TargetHandle> {
        if self.target_locked { self.nearest_target } else { None }
    }

    /// Name of the active aim point on the locked target.
    pub fn current_point_name(&self) -> &str {
        &self.current_point_name
    }

    /// Candidates gathered for the current session.
    pub fn potential_targets(&self) -> &[TargetHandle] {
        self.pool.handles()
    }

    pub fn is_switching_target(&self) -> bool {
        self.is_switching_target
    }

    /// The indicator attached to the active aim point, if any.
    pub fn indicator(&self) -> Option<&LockIndicator> {
        self.indicator.as_ref()
    }

    /// Advance timers and, while locked, steer the viewer's look rotation
    /// toward the active target point. The observation check always runs
    /// before the rotation update, so the rotation never chases a target
    /// invalidated in the same tick.
    pub fn tick<S: TargetScene, V: ViewerController>(
        &mut self,
        delta_time: f32,
        scene: &mut S,
        viewer: &mut V,
    ) {
        for fired in self.scheduler.advance(delta_time) {
            if Some(fired) == self.observing_timer {
                self.update_target_info(scene, viewer);
            } else if Some(fired) == self.behind_wall_timer {
                self.behind_wall_timer = None;
                self.stop_observing_target(scene, viewer, true, false);
            } else if Some(fired) == self.switching_timer {
                self.reset_is_switching_target();
            }
        }

        if self.target_locked && self.nearest_target.is_some() {
            self.set_control_rotation_on_target(scene, viewer, delta_time);
        }
    }

    /// Gather candidates and try to lock the best one. Emits
    /// `on_target_locked_on` on success; emits `on_finish_target_lock`
    /// (and stays unlocked) when nothing qualifies.
    pub fn try_start_target_lock<S: TargetScene, V: ViewerController>(
        &mut self,
        scene: &mut S,
        viewer: &mut V,
    ) {
        self.pool.gather(
            scene,
            viewer.position(),
            self.config.max_distance_to_potential_targets,
        );
        if !self.can_target_lock() {
            self.message_finish_target_lock();
            return;
        }

        self.nearest_target = self.find_nearest(scene, viewer, true);
        if self.nearest_target.is_none() {
            self.message_finish_target_lock();
            return;
        }

        self.start_observing_target(scene, viewer);
    }

    /// Fully release the lock session. Safe to call repeatedly: a call
    /// with no session residue emits nothing.
    pub fn stop_target_lock<S: TargetScene, V: ViewerController>(
        &mut self,
        _scene: &mut S,
        viewer: &mut V,
    ) {
        if !self.target_locked && self.nearest_target.is_none() && self.pool.is_empty() {
            return;
        }

        self.target_locked = false;

        if self.nearest_target.is_some() {
            self.control_rotation(viewer, false);
            viewer.release_look_control();
        }

        self.pool.clear();
        self.nearest_target = None;

        self.message_finish_target_lock();
    }

    /// Release observation of the current target.
    ///
    /// `target_is_dead` prunes the target from the pool permanently and
    /// emits `on_target_died`. Unless a switch is in flight, the release
    /// continues into auto-switching (when enabled and not suppressed via
    /// `ignore_auto_switch`) or a full unlock.
    pub fn stop_observing_target<S: TargetScene, V: ViewerController>(
        &mut self,
        scene: &mut S,
        viewer: &mut V,
        ignore_auto_switch: bool,
        target_is_dead: bool,
    ) {
        if let Some(target) = self.nearest_target {
            self.on_target_locked_off.broadcast(&target);
            scene.set_tracked(target, false);
            if target_is_dead {
                self.pool.remove(target);
                self.on_target_died.broadcast(&target);
            }
        }

        // No timer of the ended session may outlive it: a stale grace
        // timer would otherwise release whatever target comes next.
        if let Some(handle) = self.observing_timer.take() {
            self.scheduler.cancel(handle);
        }
        if let Some(handle) = self.behind_wall_timer.take() {
            self.scheduler.cancel(handle);
        }

        self.indicator = None;

        if self.is_switching_target {
            return;
        }

        if self.config.auto_target_switch && !ignore_auto_switch {
            self.auto_switch_target(scene, viewer);
            return;
        }

        self.stop_target_lock(scene, viewer);
    }

    /// Directional target/point switching under continuous input.
    ///
    /// Ignored below the input dead-zone and while the switch debounce is
    /// active. Cycling between the current target's own aim points takes
    /// priority over switching targets.
    pub fn switch_target<S: TargetScene, V: ViewerController>(
        &mut self,
        scene: &mut S,
        viewer: &mut V,
        axis: Vec2,
    ) {
        if !self.can_switch_target(axis) {
            return;
        }
        if self.try_switch_between_target_points(scene, viewer, axis) {
            return;
        }
        if self.pool.len() <= 1 {
            return;
        }
        if self.is_switching_target {
            return;
        }

        let viewer_position = viewer.position();
        let mut visible_candidates: Vec<TargetHandle> = Vec::new();
        for &handle in self.pool.handles() {
            let Some(position) = scene.position(handle) else {
                continue;
            };
            if !scene.line_of_sight(viewer_position, position) {
                continue;
            }
            if !scene.on_screen(position) {
                continue;
            }
            visible_candidates.push(handle);
        }

        let context = SelectionContext {
            scene: &*scene,
            viewer: &*viewer,
            config: &self.config.selection,
            current_target: self.nearest_target,
        };
        let new_target = if axis.x.abs() > axis.y.abs() {
            context.find_by_horizontal(&visible_candidates, axis.x)
        } else {
            context.find_by_vertical(&visible_candidates, axis)
        };

        let Some(new_target) = new_target else {
            return;
        };

        self.is_switching_target = true;

        self.stop_observing_target(scene, viewer, false, false);
        self.nearest_target = Some(new_target);
        self.start_observing_target(scene, viewer);

        self.reset_is_switching_target();
    }

    /// Toggle whether the lock drives the viewer's body rotation. Only
    /// acts in the orient-to-movement rotation mode.
    pub fn control_rotation(&self, viewer: &mut impl ViewerController, should_control: bool) {
        if self.config.rotation_mode == RotationMode::OrientToMovement {
            viewer.set_look_driven_rotation(should_control);
        }
    }

    fn can_target_lock(&self) -> bool {
        !self.pool.is_empty()
    }

    fn can_switch_target(&self, axis: Vec2) -> bool {
        axis.x.abs() >= self.config.start_rotating_threshold
            || axis.y.abs() >= self.config.start_rotating_threshold
    }

    fn find_nearest<S: TargetScene, V: ViewerController>(
        &mut self,
        scene: &S,
        viewer: &V,
        use_angle: bool,
    ) -> Option<TargetHandle> {
        let context = SelectionContext {
            scene,
            viewer,
            config: &self.config.selection,
            current_target: self.nearest_target,
        };
        context.find_nearest_target(&mut self.pool, use_angle)
    }

    fn start_observing_target<S: TargetScene, V: ViewerController>(
        &mut self,
        scene: &mut S,
        viewer: &mut V,
    ) {
        let Some(target) = self.nearest_target else {
            return;
        };

        self.target_locked = true;
        scene.set_tracked(target, true);
        self.current_point_name = scene
            .details(target)
            .map(|details| details.start_point_name.clone())
            .unwrap_or_default();

        self.on_target_locked_on.broadcast(&target);

        self.control_rotation(viewer, true);
        viewer.seize_look_control();

        self.attach_indicator(scene, target);

        if let Some(handle) = self.observing_timer.take() {
            self.scheduler.cancel(handle);
        }
        self.observing_timer = Some(self.scheduler.schedule_repeating(self.config.timer_tick));
    }

    /// Periodic observation of the locked target: line-of-sight with a
    /// grace window, then aliveness and distance.
    fn update_target_info<S: TargetScene, V: ViewerController>(
        &mut self,
        scene: &mut S,
        viewer: &mut V,
    ) {
        let Some(target) = self.nearest_target else {
            return;
        };

        let viewer_position = viewer.position();
        let target_position = scene.position(target);
        let alive = scene
            .details(target)
            .is_some_and(|details| details.tracked);

        if let Some(position) = target_position {
            if alive && !scene.line_of_sight(viewer_position, position) {
                // A single failed check only arms the grace timer;
                // repeated failures must not restart it
                if self.behind_wall_timer.is_some() {
                    return;
                }
                self.behind_wall_timer = Some(
                    self.scheduler
                        .schedule_once(self.config.break_line_of_sight_delay),
                );
                return;
            }
        }
        if let Some(handle) = self.behind_wall_timer.take() {
            self.scheduler.cancel(handle);
        }

        let distance =
            target_position.map_or(f32::MAX, |position| (position - viewer_position).length());
        if alive && distance <= self.config.lose_target_distance {
            return;
        }

        self.stop_observing_target(scene, viewer, false, true);
    }

    fn auto_switch_target<S: TargetScene, V: ViewerController>(
        &mut self,
        scene: &mut S,
        viewer: &mut V,
    ) {
        let Some(new_target) = self.find_nearest(scene, viewer, false) else {
            self.stop_target_lock(scene, viewer);
            return;
        };

        self.nearest_target = Some(new_target);
        self.start_observing_target(scene, viewer);

        self.is_switching_target = true;
        self.reset_is_switching_target();
    }

    /// Cycle to the adjacent aim point on the current target.
    ///
    /// The cycle direction follows the dominant input axis; when the
    /// viewer is behind the target (outside +-90 degrees of its facing)
    /// the direction inverts so "left" and "right" stay screen-relative.
    /// Walking past either end of the point list is a no-op.
    fn try_switch_between_target_points<S: TargetScene, V: ViewerController>(
        &mut self,
        scene: &mut S,
        viewer: &mut V,
        axis: Vec2,
    ) -> bool {
        let Some(target) = self.nearest_target else {
            return false;
        };
        let Some(details) = scene.details(target) else {
            return false;
        };
        if details.points.len() <= 1 {
            return false;
        }
        if self.is_switching_target {
            return false;
        }

        let major_axis = if axis.x.abs() > axis.y.abs() {
            axis.x
        } else {
            axis.y
        };

        let target_yaw = scene.yaw_of(target).unwrap_or(0.0);
        let range_min = target_yaw - 90.0;
        let range_max = target_yaw + 90.0;
        let facing = viewer.yaw() > range_min && viewer.yaw() < range_max;

        let direction: i32 = if facing {
            if major_axis > 0.0 { 1 } else { -1 }
        } else if major_axis > 0.0 {
            -1
        } else {
            1
        };

        let current_index = details
            .point_index_by_name(&self.current_point_name)
            .unwrap_or(0) as i32;
        let new_index = current_index + direction;
        if new_index < 0 || new_index as usize >= details.points.len() {
            return false;
        }

        self.current_point_name = details.points[new_index as usize].name.clone();
        self.attach_indicator(scene, target);
        self.is_switching_target = true;
        self.reset_is_switching_target();
        true
    }

    /// Arm-or-clear toggle for the switch debounce. With no timer armed,
    /// arms one (short window while a switch is in flight, longer one
    /// otherwise); with a timer armed - including the arming timer firing
    /// - clears it and ends the debounce.
    fn reset_is_switching_target(&mut self) {
        match self.switching_timer {
            None => {
                let delay = if self.is_switching_target {
                    SWITCH_DEBOUNCE_ACTIVE
                } else {
                    SWITCH_DEBOUNCE_IDLE
                };
                self.switching_timer = Some(self.scheduler.schedule_once(delay));
            }
            Some(handle) => {
                self.scheduler.cancel(handle);
                self.switching_timer = None;
                self.is_switching_target = false;
            }
        }
    }

    fn set_control_rotation_on_target<S: TargetScene, V: ViewerController>(
        &mut self,
        scene: &S,
        viewer: &mut V,
        delta_time: f32,
    ) {
        let Some(target) = self.nearest_target else {
            return;
        };
        let Some(origin) = scene.position(target) else {
            return;
        };

        let mut aim_point = origin;
        let mut point_curve: Option<&FloatCurve> = None;
        if let Some(details) = scene.details(target) {
            if let Some(index) = details.point_index_by_name(&self.current_point_name) {
                if let Some(position) = scene.point_position(target, index) {
                    aim_point = position;
                }
                point_curve = details.points[index].pitch_curve.as_ref();
            }
        }

        let distance = (origin - viewer.position()).length();
        let rotation = self.director.control_rotation_on_target(
            viewer,
            aim_point,
            distance,
            point_curve,
            delta_time,
        );
        viewer.set_look_rotation(rotation);
    }

    fn attach_indicator(&mut self, scene: &impl TargetScene, target: TargetHandle) {
        self.indicator = None;

        let Some(details) = scene.details(target) else {
            log::warn!("cannot attach lock-on indicator: target has no descriptor");
            return;
        };
        if details.points.is_empty() {
            return;
        }
        let point_index = details
            .point_index_by_name(&self.current_point_name)
            .unwrap_or(0);

        let Some(asset) = self.config.indicator.asset.clone() else {
            log::error!(
                "cannot attach lock-on indicator: no indicator asset configured"
            );
            return;
        };

        self.indicator = Some(LockIndicator {
            asset,
            target,
            point_index,
            draw_size: self.config.indicator.draw_size,
            relative_location: self.config.indicator.relative_location,
        });
    }

    fn message_finish_target_lock(&mut self) {
        self.on_finish_target_lock.broadcast(&());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults_match_tuning() {
        let config = LockOnConfig::default();
        assert_eq!(config.start_rotating_threshold, 0.85);
        assert_eq!(config.break_line_of_sight_delay, 2.0);
        assert_eq!(config.timer_tick, 0.5);
        assert_eq!(config.max_distance_to_potential_targets, 2400.0);
        assert_eq!(config.lose_target_distance, 4000.0);
        assert!(!config.auto_target_switch);
        assert_eq!(config.rotation_mode, RotationMode::OrientToMovement);
    }

    #[test]
    fn test_lose_distance_clamped_to_start_distance() {
        let mut config = LockOnConfig::default();
        config.lose_target_distance = 1000.0;
        let controller = LockOnController::new(config);
        assert_eq!(
            controller.config().lose_target_distance,
            controller.config().selection.max_distance_can_start_target
        );
    }

    #[test]
    fn test_config_json_round_trip() {
        let config = LockOnConfig::default();
        let json = config.to_json().unwrap();
        let restored = LockOnConfig::from_json(&json).unwrap();
        assert_eq!(restored.start_rotating_threshold, 0.85);
        assert_eq!(restored.indicator, config.indicator);
    }

    #[test]
    fn test_config_json_missing_fields_use_defaults() {
        let config = LockOnConfig::from_json(r#"{"auto_target_switch": true}"#).unwrap();
        assert!(config.auto_target_switch);
        assert_eq!(config.timer_tick, 0.5);
        assert_eq!(config.selection.maximum_find_angle, 50.0);
    }

    #[test]
    fn test_new_controller_is_unlocked() {
        let controller = LockOnController::default();
        assert!(!controller.is_locked());
        assert!(controller.locked_target().is_none());
        assert!(controller.potential_targets().is_empty());
        assert!(controller.indicator().is_none());
    }
}
