// SPDX-License-Identifier: CC-BY-NC-ND-4.0

//! OTA Manifest - Describes the firmware image delivered by an over-the-air update
//!
//! The version comes from `git describe --tags --long`, is parsed into a
//! fixed [`VersionRecord`], wrapped into a [`ManifestRecord`] and serialized to
//! the `manifest.json` consumed by the update server and the device bootloader.

pub mod config;
pub mod describe;
pub mod error;
pub mod manifest;
pub mod output;
pub mod pipeline;
pub mod serializer;
pub mod version;

pub use config::ManifestConfig;
pub use describe::{DescriptorSource, GitDescribe, StaticDescriptor};
pub use error::ManifestError;
pub use manifest::{ManifestBuild, ManifestBuilder, ManifestRecord};
pub use pipeline::generate;
pub use serializer::{deserialize, serialize, serialize_pretty};
pub use version::{VersionRecord, is_newer, parse_descriptor};
