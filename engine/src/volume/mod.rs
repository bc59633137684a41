//! Volume Module
//!
//! The camera-distance override trigger volume, a companion to the
//! lock-on controller that widens the camera while a fight plays out
//! inside a marked area.

pub mod override_volume;

pub use override_volume::{OverrideDistanceVolume, OverrideVolumeConfig, Timeline};
