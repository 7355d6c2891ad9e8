// SPDX-License-Identifier: CC-BY-NC-ND-4.0

//! Manifest JSON encoding
//!
//! Field order is `version` (`major`, `minor`, `patch`, `commit`, `hash`),
//! `file`, `force`. `hash` is always an array of 8 byte values.

use crate::error::Result;
use crate::manifest::ManifestRecord;

/// Compact canonical encoding
pub fn serialize(record: &ManifestRecord) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(record)?)
}

pub fn serialize_pretty(record: &ManifestRecord) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(record)?)
}

/// Decode a manifest, rejecting any `hash` that is not exactly 8 bytes
pub fn deserialize(bytes: &[u8]) -> Result<ManifestRecord> {
    Ok(serde_json::from_slice(bytes)?)
}
