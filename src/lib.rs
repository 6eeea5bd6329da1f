//! Galaxy Tree — a photo tree that explodes into a galaxy.
//!
//! Core pieces, from the bottom up:
//! - `math`: vectors, Euler angles, easing curves
//! - `scene`: configuration, layout generators, the item model
//! - `interaction`: scene state machine and click gestures
//! - `animate`: tweens, per-item animators, the star topper
//! - `camera`: orbit rig, projection and picking
//! - `stage`: everything above behind one clock
//! - `photo`: background photo fetching and decoding
//!
//! The `galaxy-tree` binary is an egui viewer on top of [`stage::Stage`].

pub mod math;
pub mod scene;
pub mod interaction;
pub mod animate;
pub mod camera;
pub mod stage;
pub mod photo;

pub use stage::Stage;
