// SPDX-License-Identifier: CC-BY-NC-ND-4.0

//! Configuration module for manifest generation

use crate::error::{ManifestError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Firmware image the manifest points at
pub const DEFAULT_TARGET_FILE: &str = "app_update.bin";

/// Updates are never forced unless configured otherwise
pub const DEFAULT_FORCE: bool = false;

/// Where the manifest is written, relative to the working directory
pub const DEFAULT_OUTPUT_PATH: &str = "manifest.json";

fn default_target_file() -> String {
    DEFAULT_TARGET_FILE.to_owned()
}

fn default_output_path() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_PATH)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestConfig {
    /// Firmware binary described by the manifest
    #[serde(default = "default_target_file")]
    pub file: String,

    /// Apply the update unconditionally on the device
    #[serde(default)]
    pub force: bool,

    /// Destination of the serialized manifest
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,

    /// Tag prefix stripped from the descriptor before parsing (e.g., "v")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_prefix: Option<String>,

    /// Pretty-print the manifest JSON
    #[serde(default)]
    pub pretty: bool,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            file: default_target_file(),
            force: DEFAULT_FORCE,
            output_path: default_output_path(),
            tag_prefix: None,
            pretty: false,
        }
    }
}

impl ManifestConfig {
    /// Descriptor with the configured tag prefix removed
    pub fn strip_tag_prefix<'a>(&self, descriptor: &'a str) -> &'a str {
        match self.tag_prefix.as_deref() {
            Some(prefix) if !prefix.is_empty() => {
                descriptor.strip_prefix(prefix).unwrap_or(descriptor)
            }
            _ => descriptor,
        }
    }
}

/// Load config from `path`, falling back to defaults when the file is missing
pub fn load_config(path: &Path) -> Result<ManifestConfig> {
    if path.exists() {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| ManifestError::Config(format!("Failed to parse config: {e}")))
    } else {
        Ok(ManifestConfig::default())
    }
}

pub fn save_config(path: &Path, config: &ManifestConfig) -> Result<()> {
    let temp_path = path.with_extension("tmp");
    let content = serde_json::to_string_pretty(config)?;

    // Atomic write
    std::fs::write(&temp_path, content)?;
    std::fs::rename(&temp_path, path)?;

    Ok(())
}
