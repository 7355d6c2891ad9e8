// SPDX-License-Identifier: CC-BY-NC-ND-4.0

//! Manifest assembly module

use crate::config::ManifestConfig;
use crate::error::{ManifestError, Result};
use crate::version::VersionRecord;
use serde::{Deserialize, Serialize};

/// OTA manifest consumed by the update server and the device
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestRecord {
    pub version: VersionRecord,
    /// Firmware binary this manifest describes
    pub file: String,
    /// Apply the update even if the device considers itself up to date
    pub force: bool,
}

/// Result of a build: the assembled record plus whether it may be written
///
/// A failed build keeps a zero-valued version for diagnostics only.
#[derive(Debug)]
pub struct ManifestBuild {
    manifest: ManifestRecord,
    failure: Option<ManifestError>,
}

impl ManifestBuild {
    pub fn is_ok(&self) -> bool {
        self.failure.is_none()
    }

    /// The assembled record, valid or not
    pub fn manifest(&self) -> &ManifestRecord {
        &self.manifest
    }

    /// Human-readable failure reason, if the build failed
    pub fn failure_reason(&self) -> Option<String> {
        self.failure.as_ref().map(ToString::to_string)
    }

    /// Manifest ready for serialization, or the parse failure
    pub fn into_result(self) -> Result<ManifestRecord> {
        match self.failure {
            None => Ok(self.manifest),
            Some(e) => Err(e),
        }
    }
}

/// Assembles manifests around parsed versions
#[derive(Debug, Clone)]
pub struct ManifestBuilder {
    file: String,
    force: bool,
}

impl Default for ManifestBuilder {
    fn default() -> Self {
        Self::from_config(&ManifestConfig::default())
    }
}

impl ManifestBuilder {
    pub fn from_config(config: &ManifestConfig) -> Self {
        Self {
            file: config.file.clone(),
            force: config.force,
        }
    }

    pub fn build(&self, outcome: Result<VersionRecord>) -> ManifestBuild {
        let mut manifest = ManifestRecord {
            version: VersionRecord::default(),
            file: self.file.clone(),
            force: self.force,
        };

        let failure = match outcome {
            Ok(version) => {
                manifest.version = version;
                None
            }
            Err(e) => Some(e),
        };

        ManifestBuild { manifest, failure }
    }
}
