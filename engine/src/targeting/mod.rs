//! Targeting Module
//!
//! Lock-on target acquisition and tracking: entity descriptors, the
//! scene/viewer capability traits the host implements, the candidate
//! pool, the scorer/selector, and the lock session controller.
//!
//! # Example
//!
//! ```rust,ignore
//! use target_lock_engine::targeting::{LockOnController, LockOnConfig};
//! use glam::Vec2;
//!
//! let mut controller = LockOnController::new(LockOnConfig::default());
//!
//! // scene and viewer are the host's TargetScene / ViewerController impls
//! controller.try_start_target_lock(&mut scene, &mut viewer);
//! if controller.is_locked() {
//!     // per frame:
//!     controller.tick(delta_time, &mut scene, &mut viewer);
//!     // on switch input:
//!     controller.switch_target(&mut scene, &mut viewer, Vec2::new(1.0, 0.0));
//! }
//! ```

pub mod controller;
pub mod entity;
pub mod pool;
pub mod scene;
pub mod selector;
pub mod viewer;

pub use controller::{
    IndicatorConfig, LockIndicator, LockOnConfig, LockOnController, RotationMode,
};
pub use entity::{TargetDetails, TargetHandle, TargetPoint};
pub use pool::CandidatePool;
pub use scene::TargetScene;
pub use selector::{SelectionConfig, SelectionContext};
pub use viewer::ViewerController;
