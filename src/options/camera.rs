use serde::{Deserialize, Serialize};

/// Camera projection and orbit-input parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
    /// Initial eye distance on +z before the flythrough takes over.
    pub initial_distance: f32,
    /// Per-frame easing factor for manual orbit input (0..=1).
    pub orbit_damping: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 75.0,
            znear: 0.1,
            zfar: 1000.0,
            initial_distance: 5.0,
            orbit_damping: 0.03,
        }
    }
}
