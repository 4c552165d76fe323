use serde::{Deserialize, Serialize};

/// Bloom and tone-mapping parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PostProcessingOptions {
    /// Luminance cutoff for bloom extraction.
    pub bloom_threshold: f32,
    /// Bloom blend strength in the composite.
    pub bloom_strength: f32,
    /// Bloom blur spread scale.
    pub bloom_radius: f32,
    /// Exposure multiplier before tone mapping.
    pub exposure: f32,
}

impl Default for PostProcessingOptions {
    fn default() -> Self {
        Self {
            bloom_threshold: 0.002,
            bloom_strength: 3.5,
            bloom_radius: 0.0,
            exposure: 1.0,
        }
    }
}
