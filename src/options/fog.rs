use serde::{Deserialize, Serialize};

/// Exponential-squared fog parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FogOptions {
    /// Fog color as linear RGB.
    pub color: [f32; 3],
    /// Fog density.
    pub density: f32,
}

impl Default for FogOptions {
    fn default() -> Self {
        Self {
            color: [0.0, 0.0, 0.0],
            density: 0.3,
        }
    }
}
