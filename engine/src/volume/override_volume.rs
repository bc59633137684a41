//! Override Distance Volume Module
//!
//! A trigger volume that, while a viewer overlaps it and it still tracks
//! live targets, blends the viewer's camera boom offset toward a
//! configured value - and blends back out when the viewer leaves or all
//! tracked targets die. The host forwards overlap begin/end callbacks and
//! death notifications; the volume itself never queries the world.

use crate::events::Dispatcher;
use crate::math::FloatCurve;
use crate::targeting::entity::TargetHandle;
use crate::targeting::scene::TargetScene;
use crate::targeting::viewer::ViewerController;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Playback state of the blend timeline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum TimelineState {
    #[default]
    Stopped,
    Forward,
    Reverse,
}

/// Forward/reverse playhead over a float curve, advanced by tick delta.
///
/// `tick` yields the sampled alpha only while playing (including the
/// final sample when a bound is reached), then goes quiet.
#[derive(Clone, Debug, Default)]
pub struct Timeline {
    curve: FloatCurve,
    position: f32,
    state: TimelineState,
}

impl Timeline {
    pub fn new(curve: FloatCurve) -> Self {
        Self {
            curve,
            position: 0.0,
            state: TimelineState::Stopped,
        }
    }

    /// Restart playback from the beginning of the curve.
    pub fn play_from_start(&mut self) {
        self.position = 0.0;
        self.state = TimelineState::Forward;
    }

    /// Play backward from the current position.
    pub fn reverse(&mut self) {
        self.state = TimelineState::Reverse;
    }

    pub fn is_playing(&self) -> bool {
        self.state != TimelineState::Stopped
    }

    /// Current curve sample regardless of playback state.
    pub fn alpha(&self) -> f32 {
        self.curve.value_at(self.position)
    }

    /// Advance the playhead; `None` while stopped.
    pub fn tick(&mut self, delta_time: f32) -> Option<f32> {
        let duration = self.curve.duration();
        match self.state {
            TimelineState::Stopped => None,
            TimelineState::Forward => {
                self.position = (self.position + delta_time).min(duration);
                if self.position >= duration {
                    self.state = TimelineState::Stopped;
                }
                Some(self.curve.value_at(self.position))
            }
            TimelineState::Reverse => {
                self.position = (self.position - delta_time).max(0.0);
                if self.position <= 0.0 {
                    self.state = TimelineState::Stopped;
                }
                Some(self.curve.value_at(self.position))
            }
        }
    }
}

/// Override volume tuning.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct OverrideVolumeConfig {
    /// Camera boom offset applied while the volume session is active
    pub target_camera_offset: Vec3,
    /// Blend shape; alpha 0 keeps the saved offset, alpha 1 the target
    pub blend_curve: FloatCurve,
    /// Arm the volume's overlap reaction immediately on creation
    pub initially_active: bool,
}

impl Default for OverrideVolumeConfig {
    fn default() -> Self {
        Self {
            target_camera_offset: Vec3::ZERO,
            blend_curve: FloatCurve::linear_ramp(1.0),
            initially_active: true,
        }
    }
}

/// Camera-distance override trigger volume.
///
/// Lifecycle: armed -> (viewer overlap while the tracked set is
/// non-empty) -> active, blending the camera offset forward -> (overlap
/// end, explicit deactivation, or tracked set depleted by deaths) ->
/// reverse blend -> released once the blend returns to zero.
///
/// The host wires this up: it calls [`on_overlap_begin`] /
/// [`on_overlap_end`] from its collision layer, forwards the lock-on
/// controller's `on_target_died` notifications to [`notify_target_died`]
/// while the session is active, and ticks the volume each frame.
///
/// [`on_overlap_begin`]: OverrideDistanceVolume::on_overlap_begin
/// [`on_overlap_end`]: OverrideDistanceVolume::on_overlap_end
/// [`notify_target_died`]: OverrideDistanceVolume::notify_target_died
pub struct OverrideDistanceVolume {
    config: OverrideVolumeConfig,
    targets_in_volume: Vec<TargetHandle>,
    timeline: Timeline,
    saved_offset: Vec3,
    active: bool,
    armed: bool,
    viewer_bound: bool,

    /// Fired with `true` when a session starts and `false` once the
    /// reverse blend has fully released the viewer.
    pub on_trigger_activated: Dispatcher<bool>,
}

impl OverrideDistanceVolume {
    /// Create the volume over an initial tracked set. Entities without a
    /// descriptor or flagged ineligible are dropped up front.
    pub fn new(
        config: OverrideVolumeConfig,
        tracked: &[TargetHandle],
        scene: &impl TargetScene,
    ) -> Self {
        let targets_in_volume: Vec<TargetHandle> = tracked
            .iter()
            .copied()
            .filter(|&handle| {
                scene
                    .details(handle)
                    .is_some_and(|details| details.eligible)
            })
            .collect();

        let timeline = Timeline::new(config.blend_curve.clone());
        let armed = config.initially_active && !targets_in_volume.is_empty();

        Self {
            config,
            targets_in_volume,
            timeline,
            saved_offset: Vec3::ZERO,
            active: false,
            armed,
            viewer_bound: false,
            on_trigger_activated: Dispatcher::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Tracked targets still alive inside the volume.
    pub fn tracked_targets(&self) -> &[TargetHandle] {
        &self.targets_in_volume
    }

    /// Arm the volume so overlaps start a session. Ignored while a
    /// session runs or when there is nothing left to track.
    pub fn activate_volume(&mut self) {
        if self.targets_in_volume.is_empty() || self.active {
            return;
        }
        self.armed = true;
    }

    /// Disarm the volume and start the reverse blend. Ignored while no
    /// session is running.
    pub fn deactivate_volume(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        self.timeline.reverse();
        self.armed = false;
    }

    /// A viewer entered the volume. Starts a session when armed and
    /// targets remain; re-entry during the reverse blend restarts the
    /// blend from the viewer's current offset, so the motion stays
    /// continuous.
    pub fn on_overlap_begin(&mut self, viewer: &impl ViewerController) {
        if !self.armed {
            return;
        }
        if self.targets_in_volume.is_empty() {
            return;
        }

        self.start_session(viewer);
        self.on_trigger_activated.broadcast(&true);
    }

    /// The viewer left the volume; the active session winds down.
    pub fn on_overlap_end(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        self.timeline.reverse();
    }

    /// Forwarded death notification. Prunes the tracked set; when the
    /// last tracked target dies during an active session, the session
    /// winds down exactly as on overlap end.
    pub fn notify_target_died(&mut self, target: TargetHandle) {
        let before = self.targets_in_volume.len();
        self.targets_in_volume.retain(|handle| *handle != target);
        if before == self.targets_in_volume.len() {
            return;
        }

        if self.targets_in_volume.is_empty() && self.active {
            self.active = false;
            self.timeline.reverse();
        }
    }

    /// Advance the blend and apply the camera offset to the bound
    /// viewer. Once the reverse blend reaches zero with the session still
    /// inactive, the viewer is released and `on_trigger_activated(false)`
    /// fires.
    pub fn tick(&mut self, delta_time: f32, viewer: &mut impl ViewerController) {
        let Some(alpha) = self.timeline.tick(delta_time) else {
            return;
        };
        if !self.viewer_bound {
            return;
        }

        viewer.set_camera_offset(
            self.saved_offset
                .lerp(self.config.target_camera_offset, alpha),
        );

        if alpha <= 0.0 && !self.active {
            self.stop_session();
        }
    }

    fn start_session(&mut self, viewer: &impl ViewerController) {
        self.active = true;
        self.viewer_bound = true;
        // Restarting from the viewer's current offset keeps re-entry
        // mid-reverse continuous even though the timeline rewinds
        self.saved_offset = viewer.camera_offset();
        self.timeline.play_from_start();
    }

    fn stop_session(&mut self) {
        self.viewer_bound = false;
        self.on_trigger_activated.broadcast(&false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeline_forward_then_stop() {
        let mut timeline = Timeline::new(FloatCurve::linear_ramp(1.0));
        timeline.play_from_start();

        assert!((timeline.tick(0.5).unwrap() - 0.5).abs() < 0.001);
        assert!((timeline.tick(0.6).unwrap() - 1.0).abs() < 0.001);
        assert!(timeline.tick(0.1).is_none());
    }

    #[test]
    fn test_timeline_reverse_from_current_position() {
        let mut timeline = Timeline::new(FloatCurve::linear_ramp(1.0));
        timeline.play_from_start();
        timeline.tick(0.75);

        timeline.reverse();
        assert!((timeline.tick(0.25).unwrap() - 0.5).abs() < 0.001);
        assert!((timeline.tick(1.0).unwrap() - 0.0).abs() < 0.001);
        assert!(!timeline.is_playing());
    }

    #[test]
    fn test_timeline_idle_yields_nothing() {
        let mut timeline = Timeline::new(FloatCurve::linear_ramp(1.0));
        assert!(timeline.tick(0.5).is_none());
    }
}
