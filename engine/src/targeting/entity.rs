//! Target Entity Module
//!
//! Per-entity targeting metadata: the non-owning handle the controller
//! works with, named target points (anchors), and the descriptor that
//! bundles eligibility and tracked state.

use crate::math::FloatCurve;
use serde::{Deserialize, Serialize};

/// Non-owning reference to a targetable entity.
///
/// The host world owns the entities; the targeting code only ever stores
/// and compares these handles and resolves them through
/// [`TargetScene`](crate::targeting::TargetScene).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetHandle(pub u32);

/// A named aim point on a targetable entity.
///
/// Points are ordered by `index`; switching between points walks that
/// order. The index must be unique within the owning entity — duplicates
/// are tolerated with a warning and the first occurrence wins.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetPoint {
    pub name: String,
    pub index: i32,
    /// Optional distance-keyed pitch offset curve overriding the default
    /// one while this point is the active aim point.
    pub pitch_curve: Option<FloatCurve>,
}

impl TargetPoint {
    pub fn new(name: impl Into<String>, index: i32) -> Self {
        Self {
            name: name.into(),
            index,
            pitch_curve: None,
        }
    }

    pub fn with_pitch_curve(mut self, curve: FloatCurve) -> Self {
        self.pitch_curve = Some(curve);
        self
    }
}

/// Targeting descriptor for one entity.
///
/// `eligible` gates admission into the candidate pool. `tracked` is the
/// live lock state: the controller raises it on lock; the host clears it
/// when the entity dies (or otherwise stops being a valid lock subject),
/// which the observation tick treats as a dead target.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TargetDetails {
    pub eligible: bool,
    pub start_point_name: String,
    pub points: Vec<TargetPoint>,
    pub tracked: bool,
}

impl Default for TargetDetails {
    fn default() -> Self {
        Self {
            eligible: true,
            start_point_name: String::new(),
            points: Vec::new(),
            tracked: false,
        }
    }
}

impl TargetDetails {
    /// Build a descriptor, sorting points by index and validating the
    /// start point name.
    ///
    /// Duplicate point indices log a warning (the earlier point keeps its
    /// slot). A start name that matches no point falls back to the first
    /// point, also with a warning. An empty point list is legal: such an
    /// entity is targeted at its origin.
    pub fn new(
        eligible: bool,
        start_point_name: impl Into<String>,
        points: Vec<TargetPoint>,
    ) -> Self {
        let mut details = Self {
            eligible,
            start_point_name: start_point_name.into(),
            points,
            tracked: false,
        };

        if details.points.is_empty() {
            return details;
        }

        // Stable sort: duplicate indices keep insertion order, first wins
        details.points.sort_by_key(|point| point.index);
        for pair in details.points.windows(2) {
            if pair[0].index == pair[1].index {
                log::warn!(
                    "identical target point indexes ({} and {}) = {}",
                    pair[0].name,
                    pair[1].name,
                    pair[1].index
                );
            }
        }

        let start_is_valid = details
            .points
            .iter()
            .any(|point| point.name == details.start_point_name);
        if !start_is_valid {
            log::warn!(
                "start target point '{}' not found, falling back to '{}'",
                details.start_point_name,
                details.points[0].name
            );
            details.start_point_name = details.points[0].name.clone();
        }

        details
    }

    /// Index of the first point with the given name.
    pub fn point_index_by_name(&self, name: &str) -> Option<usize> {
        self.points.iter().position(|point| point.name == name)
    }

    /// Index of the configured start point, if any points exist.
    pub fn start_point_index(&self) -> Option<usize> {
        self.point_index_by_name(&self.start_point_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_sorted_by_index() {
        let details = TargetDetails::new(
            true,
            "head",
            vec![
                TargetPoint::new("legs", 2),
                TargetPoint::new("head", 0),
                TargetPoint::new("chest", 1),
            ],
        );
        let names: Vec<&str> = details.points.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["head", "chest", "legs"]);
    }

    #[test]
    fn test_duplicate_indices_keep_insertion_order() {
        let details = TargetDetails::new(
            true,
            "first",
            vec![TargetPoint::new("first", 0), TargetPoint::new("second", 0)],
        );
        assert_eq!(details.points[0].name, "first");
        assert_eq!(details.point_index_by_name("first"), Some(0));
    }

    #[test]
    fn test_unknown_start_name_falls_back_to_first_point() {
        let details = TargetDetails::new(
            true,
            "missing",
            vec![TargetPoint::new("chest", 1), TargetPoint::new("head", 0)],
        );
        assert_eq!(details.start_point_name, "head");
        assert_eq!(details.start_point_index(), Some(0));
    }

    #[test]
    fn test_empty_points_are_legal() {
        let details = TargetDetails::new(true, "spine", Vec::new());
        assert!(details.points.is_empty());
        assert_eq!(details.start_point_name, "spine");
        assert_eq!(details.start_point_index(), None);
    }
}
