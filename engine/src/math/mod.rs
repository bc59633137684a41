//! Math Module
//!
//! Rotation and curve primitives shared by the targeting and camera code.
//! Positions and directions use [`glam::Vec3`] throughout the crate.

pub mod curve;
pub mod rotator;

pub use curve::{CurveKey, FloatCurve};
pub use rotator::{Rotator, delta_angle, normalize_angle_360};
