//! Render configuration: which sources to render, where, and how.
//!
//! Configuration is plain data; it is usually loaded from a JSON file with
//! [`Config::from_file`] and then adjusted by command-line overrides.

use crate::{Clip, EngineConfig, Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Per-source settings for an animated cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimatedCursor {
    /// Number of frames to capture (must be at least 1)
    pub frames: u32,
}

/// Full configuration for a render run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the `.svg` sources
    pub svgs_dir: PathBuf,
    /// Directory bitmaps are written to (created if absent)
    pub bitmaps_dir: PathBuf,
    /// Static sources, rendered in listed order
    pub static_cursors: Vec<String>,
    /// Animated sources and their frame counts, rendered in name order
    pub animated_cursors: BTreeMap<String, AnimatedCursor>,
    /// Crop region applied to every animated frame
    pub animated_clip: Clip,
    /// Rendering engine launch options
    pub engine: EngineConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            svgs_dir: PathBuf::from("svg"),
            bitmaps_dir: PathBuf::from("bitmaps"),
            static_cursors: Vec::new(),
            animated_cursors: BTreeMap::new(),
            animated_clip: Clip::default(),
            engine: EngineConfig::default(),
        }
    }
}

impl Config {
    /// Parse a configuration from JSON text. Missing fields take defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::ConfigError(format!("Failed to parse config: {}", e)))
    }

    /// Load a configuration file.
    ///
    /// Relative source/output directories are resolved against the directory
    /// containing the file, so a config can be run from anywhere.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::ConfigError(format!("Failed to read {}: {}", path.display(), e)))?;
        let mut config = Self::from_json(&text)?;

        if let Some(base) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            config.svgs_dir = resolve(base, &config.svgs_dir);
            config.bitmaps_dir = resolve(base, &config.bitmaps_dir);
            if let Some(chrome) = config.engine.chrome_path.take() {
                config.engine.chrome_path = Some(resolve(base, &chrome));
            }
        }
        Ok(config)
    }

    /// Full path of a source file
    pub fn source_path(&self, source: &str) -> PathBuf {
        self.svgs_dir.join(source)
    }

    /// Total number of bitmaps a run with this configuration writes
    pub fn expected_outputs(&self) -> usize {
        self.static_cursors.len()
            + self
                .animated_cursors
                .values()
                .map(|a| a.frames as usize)
                .sum::<usize>()
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
