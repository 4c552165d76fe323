use serde::{Deserialize, Serialize};

/// Tunnel sweep and decoration-box parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TunnelOptions {
    /// Number of rings swept along the path.
    pub tubular_segments: u32,
    /// Tube cross-section radius.
    pub radius: f32,
    /// Number of vertices per ring.
    pub radial_segments: u32,
    /// Minimum face angle (degrees) for a mesh edge to survive wireframe
    /// extraction.
    pub edge_threshold_deg: f32,
    /// Number of decoration boxes scattered along the path.
    pub box_count: u32,
    /// Decoration box edge length.
    pub box_size: f32,
}

impl Default for TunnelOptions {
    fn default() -> Self {
        Self {
            tubular_segments: 222,
            radius: 0.65,
            radial_segments: 16,
            edge_threshold_deg: 0.2,
            box_count: 55,
            box_size: 0.075,
        }
    }
}
