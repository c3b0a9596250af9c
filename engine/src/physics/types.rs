//! Physics type re-exports from glam
//!
//! The math types shared by collision queries and movement.

pub use glam::{Mat4, Quat, Vec2, Vec3};
