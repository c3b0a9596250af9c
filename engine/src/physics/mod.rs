//! Physics module
//!
//! Static collision geometry and raycast queries used by the walkthrough
//! movement simulation. There is no general physics engine here: the
//! player is approximated by a capsule whose floor and walls are found with
//! a handful of rays per frame.
//!
//! # Unit System
//!
//! **1 unit = 1 meter**, velocities in m/s, accelerations in m/s².
//!
//! # Submodules
//!
//! - [`types`] - Core mathematical types re-exported from glam
//! - [`collision`] - Triangle meshes, ray-triangle and ray-AABB tests, [`CollisionField`]

pub mod collision;
pub mod types;

pub use collision::{ColliderMesh, CollisionField, RayHit, Triangle, ray_aabb_intersect};
pub use types::{Mat4, Quat, Vec2, Vec3};
