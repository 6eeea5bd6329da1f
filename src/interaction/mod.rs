//! Interaction — scene mode, focus, and the gestures that drive them.
//!
//! - `state`   — the tree/galaxy/focus state machine
//! - `gesture` — raw clicks → scene events

pub mod gesture;
pub mod state;

pub use gesture::{ClickRecognizer, Gesture, PickTarget};
pub use state::{InteractionMachine, SceneEvent, SceneMode, SceneState, TogglePolicy};
