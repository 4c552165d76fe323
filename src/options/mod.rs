//! Centralized rendering options with TOML preset support.
//!
//! All tweakable settings (camera projection and travel, tunnel geometry,
//! fog, post-processing) are consolidated here. Options serialize to/from
//! TOML for view presets.

mod camera;
mod fog;
mod post_processing;
mod tunnel;

use std::path::Path;

pub use camera::CameraOptions;
pub use fog::FogOptions;
pub use post_processing::PostProcessingOptions;
use serde::{Deserialize, Serialize};
pub use tunnel::TunnelOptions;

use crate::error::WormholeError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[fog]`) work correctly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    /// Camera projection and orbit parameters.
    pub camera: CameraOptions,
    /// Tunnel and decoration geometry parameters.
    pub tunnel: TunnelOptions,
    /// Fog parameters.
    pub fog: FogOptions,
    /// Post-processing effect parameters.
    pub post_processing: PostProcessingOptions,
}

impl Options {
    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, WormholeError> {
        let content = std::fs::read_to_string(path).map_err(WormholeError::Io)?;
        toml::from_str(&content)
            .map_err(|e| WormholeError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), WormholeError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| WormholeError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(WormholeError::Io)?;
        }
        std::fs::write(path, content).map_err(WormholeError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[fog]
density = 0.5
";
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.fog.density, 0.5);
        // Everything else should be default
        assert_eq!(opts.fog.color, [0.0, 0.0, 0.0]);
        assert_eq!(opts.tunnel.box_count, 55);
        assert_eq!(opts.post_processing.bloom_strength, 3.5);
    }

    #[test]
    fn defaults_match_the_shipped_look() {
        let opts = Options::default();
        assert_eq!(opts.camera.fovy, 75.0);
        assert_eq!(opts.camera.znear, 0.1);
        assert_eq!(opts.camera.zfar, 1000.0);
        assert_eq!(opts.camera.orbit_damping, 0.03);
        assert_eq!(opts.tunnel.tubular_segments, 222);
        assert_eq!(opts.tunnel.radius, 0.65);
        assert_eq!(opts.tunnel.radial_segments, 16);
        assert_eq!(opts.tunnel.box_size, 0.075);
        assert_eq!(opts.fog.density, 0.3);
        assert_eq!(opts.post_processing.bloom_threshold, 0.002);
        assert_eq!(opts.post_processing.bloom_radius, 0.0);
    }
}
