//! Target Lock Engine Library
//!
//! A lock-on targeting system for third-person action games: candidate
//! gathering and scoring, a hysteresis-governed lock session state
//! machine, locked-camera rotation, and a camera-distance override
//! trigger volume. The library owns no world state - the host implements
//! the [`targeting::TargetScene`] and [`targeting::ViewerController`]
//! capability traits and drives everything from its own tick loop.
//!
//! # Modules
//!
//! - [`targeting`] - Candidate pool, scorer/selector, and the lock session controller
//! - [`camera`] - Locked-camera rotation director with pitch adjustment
//! - [`volume`] - Camera-distance override trigger volume
//! - [`math`] - Rotator and float-curve primitives
//! - [`scheduler`] - Tick-driven logical timers
//! - [`events`] - Observer lists for lock-on notifications
//!
//! # Example
//!
//! ```ignore
//! use target_lock_engine::targeting::{LockOnController, LockOnConfig};
//! use glam::Vec2;
//!
//! let mut controller = LockOnController::new(LockOnConfig::default());
//!
//! // Subscribe to notifications
//! controller.on_target_locked_on.subscribe(|target| {
//!     println!("locked on {target:?}");
//! });
//!
//! // Engage on input (scene/viewer are the host's trait impls)
//! controller.try_start_target_lock(&mut scene, &mut viewer);
//!
//! // Every frame
//! controller.tick(delta_time, &mut scene, &mut viewer);
//!
//! // Directional switch input
//! controller.switch_target(&mut scene, &mut viewer, Vec2::new(1.0, 0.0));
//!
//! // Disengage
//! controller.stop_target_lock(&mut scene, &mut viewer);
//! ```

pub mod camera;
pub mod events;
pub mod math;
pub mod scheduler;
pub mod targeting;
pub mod volume;

// Re-export the main entry points at crate level for convenience
pub use camera::{PitchAdjustment, RotationDirector};
pub use events::{Dispatcher, SubscriptionId};
pub use math::{FloatCurve, Rotator};
pub use scheduler::{Scheduler, TimerHandle};
pub use targeting::{
    LockOnConfig, LockOnController, TargetDetails, TargetHandle, TargetPoint, TargetScene,
    ViewerController,
};
pub use volume::{OverrideDistanceVolume, OverrideVolumeConfig};
