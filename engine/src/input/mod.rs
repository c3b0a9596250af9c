//! Input Module
//!
//! Platform-agnostic input handling: movement intents, key bindings,
//! pointer capture and tracked-controller state.
//!
//! # Example
//!
//! ```rust,ignore
//! use archviz_engine::input::{InputState, KeyBindings, KeyCode};
//!
//! let bindings = KeyBindings::new();
//! let mut input = InputState::new();
//!
//! if let Some(intent) = bindings.get_action(KeyCode::W).and_then(|a| a.intent()) {
//!     input.set(intent, true, grounded);
//! }
//! ```

pub mod bindings;
pub mod keyboard;
pub mod pointer_capture;
pub mod xr;

pub use bindings::{InputAction, KeyBindings};
pub use keyboard::{InputState, Intent, KeyCode};
pub use pointer_capture::{CaptureAction, PointerCapture};
pub use xr::{ControllerState, Handedness, XrInput};
