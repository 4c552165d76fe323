//! Camera state, GPU uniform plumbing, and the two motion sources:
//! the path flythrough and the damped manual orbit offset.

pub mod core;
pub mod flythrough;
pub mod orbit;
pub mod rig;

pub use self::core::{Camera, CameraUniform};
pub use flythrough::Flythrough;
pub use orbit::OrbitInput;
pub use rig::CameraRig;
