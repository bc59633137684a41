//! Camera Module
//!
//! Locked-camera rotation computation. This module is window-system
//! agnostic - it only turns target geometry into control rotations.

pub mod director;

pub use director::{LinearPitch, PitchAdjustment, RotationDirector};
