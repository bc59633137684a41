//! Candidate Pool Module
//!
//! The working set of targetable entities for one lock session. Rebuilt
//! on every acquisition attempt, pruned when targets die, and re-sorted
//! by whatever score the selector needs.

use crate::targeting::entity::TargetHandle;
use crate::targeting::scene::TargetScene;
use glam::Vec3;

/// Ordered set of candidate handles.
///
/// Gathering preserves the scene's enumeration order for equal-score
/// candidates; beyond that, tie order is unspecified.
#[derive(Clone, Debug, Default)]
pub struct CandidatePool {
    handles: Vec<TargetHandle>,
}

impl CandidatePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the pool: keep entities that have a descriptor, are
    /// eligible, and lie within `max_range` of `viewer_position`.
    pub fn gather(
        &mut self,
        scene: &impl TargetScene,
        viewer_position: Vec3,
        max_range: f32,
    ) {
        self.handles.clear();
        for handle in scene.targets() {
            let Some(details) = scene.details(handle) else {
                continue;
            };
            if !details.eligible {
                continue;
            }
            let Some(position) = scene.position(handle) else {
                continue;
            };
            if (position - viewer_position).length() > max_range {
                continue;
            }
            self.handles.push(handle);
        }
    }

    pub fn handles(&self) -> &[TargetHandle] {
        &self.handles
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn contains(&self, handle: TargetHandle) -> bool {
        self.handles.contains(&handle)
    }

    /// Remove a handle (death pruning). Returns whether it was present.
    pub fn remove(&mut self, handle: TargetHandle) -> bool {
        let before = self.handles.len();
        self.handles.retain(|h| *h != handle);
        before != self.handles.len()
    }

    pub fn clear(&mut self) {
        self.handles.clear();
    }

    /// Sort ascending by a per-candidate score (distance, angle, ...).
    /// The sort is stable, so equal scores keep their gather order.
    pub fn sort_by_score(&mut self, mut score: impl FnMut(TargetHandle) -> f32) {
        self.handles.sort_by(|a, b| {
            score(*a)
                .partial_cmp(&score(*b))
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    }
}

/// Sort a plain handle list ascending by score (used for the transient
/// angle-sorted copy during refinement).
pub fn sort_handles_by_score(
    handles: &mut [TargetHandle],
    mut score: impl FnMut(TargetHandle) -> f32,
) {
    handles.sort_by(|a, b| {
        score(*a)
            .partial_cmp(&score(*b))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}
