//! Shared mock scene and viewer for the targeting integration tests.

#![allow(dead_code)]

use glam::Vec3;
use std::collections::HashMap;
use target_lock_engine::math::Rotator;
use target_lock_engine::targeting::{TargetDetails, TargetHandle, TargetScene, ViewerController};

/// One scripted entity in the mock scene.
pub struct MockTarget {
    pub details: TargetDetails,
    pub position: Vec3,
    pub yaw: f32,
    pub visible: bool,
    pub on_screen: bool,
    /// Target point offsets relative to the entity origin, by point index
    pub point_offsets: Vec<Vec3>,
}

/// Scripted world: entities keyed by handle, enumerated in insertion
/// order.
#[derive(Default)]
pub struct MockScene {
    order: Vec<TargetHandle>,
    targets: HashMap<TargetHandle, MockTarget>,
}

impl MockScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an eligible, visible, on-screen entity with no target points.
    pub fn add(&mut self, id: u32, position: Vec3) -> TargetHandle {
        self.add_with_details(id, position, TargetDetails::default())
    }

    pub fn add_with_details(
        &mut self,
        id: u32,
        position: Vec3,
        details: TargetDetails,
    ) -> TargetHandle {
        let handle = TargetHandle(id);
        self.order.push(handle);
        self.targets.insert(
            handle,
            MockTarget {
                details,
                position,
                yaw: 0.0,
                visible: true,
                on_screen: true,
                point_offsets: Vec::new(),
            },
        );
        handle
    }

    pub fn target_mut(&mut self, handle: TargetHandle) -> &mut MockTarget {
        self.targets.get_mut(&handle).expect("unknown mock target")
    }

    pub fn target(&self, handle: TargetHandle) -> &MockTarget {
        self.targets.get(&handle).expect("unknown mock target")
    }

    /// Simulate the entity dying: the host clears the tracked flag, which
    /// the observation tick reads as "no longer a valid lock subject".
    pub fn kill(&mut self, handle: TargetHandle) {
        self.target_mut(handle).details.tracked = false;
    }

    fn target_at(&self, point: Vec3) -> Option<&MockTarget> {
        self.targets
            .values()
            .find(|target| (target.position - point).length() < 0.01)
    }
}

impl TargetScene for MockScene {
    fn targets(&self) -> Vec<TargetHandle> {
        self.order.clone()
    }

    fn details(&self, target: TargetHandle) -> Option<&TargetDetails> {
        self.targets.get(&target).map(|t| &t.details)
    }

    fn set_tracked(&mut self, target: TargetHandle, tracked: bool) {
        if let Some(t) = self.targets.get_mut(&target) {
            t.details.tracked = tracked;
        }
    }

    fn position(&self, target: TargetHandle) -> Option<Vec3> {
        self.targets.get(&target).map(|t| t.position)
    }

    fn point_position(&self, target: TargetHandle, point_index: usize) -> Option<Vec3> {
        self.targets.get(&target).map(|t| {
            let offset = t.point_offsets.get(point_index).copied().unwrap_or(Vec3::ZERO);
            t.position + offset
        })
    }

    fn yaw_of(&self, target: TargetHandle) -> Option<f32> {
        self.targets.get(&target).map(|t| t.yaw)
    }

    fn line_of_sight(&self, _from: Vec3, to: Vec3) -> bool {
        // Rays end on entity origins in these tests; visibility is
        // scripted per entity. Unobstructed (true) by default.
        self.target_at(to).is_none_or(|target| target.visible)
    }

    fn on_screen(&self, point: Vec3) -> bool {
        self.target_at(point).is_none_or(|target| target.on_screen)
    }
}

/// Scripted viewer standing at the origin looking down -Z.
pub struct MockViewer {
    pub position: Vec3,
    pub yaw: f32,
    pub camera: Option<(Vec3, Rotator)>,
    pub look: Rotator,
    pub look_seized: bool,
    pub look_driven: bool,
    pub camera_offset: Vec3,
}

impl MockViewer {
    pub fn at_origin() -> Self {
        Self {
            position: Vec3::ZERO,
            yaw: 0.0,
            camera: Some((Vec3::ZERO, Rotator::ZERO)),
            look: Rotator::ZERO,
            look_seized: false,
            look_driven: false,
            camera_offset: Vec3::ZERO,
        }
    }
}

impl ViewerController for MockViewer {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn yaw(&self) -> f32 {
        self.yaw
    }

    fn camera_pose(&self) -> Option<(Vec3, Rotator)> {
        self.camera
    }

    fn look_rotation(&self) -> Rotator {
        self.look
    }

    fn set_look_rotation(&mut self, rotation: Rotator) {
        self.look = rotation;
    }

    fn seize_look_control(&mut self) {
        self.look_seized = true;
    }

    fn release_look_control(&mut self) {
        self.look_seized = false;
    }

    fn set_look_driven_rotation(&mut self, enabled: bool) {
        self.look_driven = enabled;
    }

    fn camera_offset(&self) -> Vec3 {
        self.camera_offset
    }

    fn set_camera_offset(&mut self, offset: Vec3) {
        self.camera_offset = offset;
    }
}

/// Horizontal direction for a yaw angle in degrees (the crate's yaw
/// convention: 0 degrees faces -Z, positive yaw turns toward +X).
pub fn dir(yaw_degrees: f32) -> Vec3 {
    let yaw = yaw_degrees.to_radians();
    Vec3::new(yaw.sin(), 0.0, -yaw.cos())
}
