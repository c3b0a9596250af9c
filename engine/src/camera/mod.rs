//! Camera Module
//!
//! Projection, interactive controls and the VR rig. This module is
//! window-system agnostic - it only deals with camera state and math.

pub mod fps_controller;
pub mod orbit;
pub mod projection;
pub mod rig;
pub mod viewport;

pub use fps_controller::PointerLockControls;
pub use orbit::OrbitControls;
pub use projection::{Projection, ProjectionKind};
pub use rig::VrRig;
pub use viewport::{CameraIntent, Controls, PresentationMode, RigKind, Viewport};
