// SPDX-License-Identifier: CC-BY-NC-ND-4.0

//! Descriptor parsing and version comparison module

use crate::error::{ManifestError, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Length of the abbreviated commit hash carried in the manifest
pub const HASH_LEN: usize = 8;

/// Firmware version as carried by the OTA manifest
///
/// `hash` holds the raw bytes of the abbreviated commit hash characters, not
/// decoded hex. The default value is the all-zero record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VersionRecord {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    /// Commits since the most recent tag
    pub commit: u32,
    pub hash: [u8; HASH_LEN],
}

impl VersionRecord {
    /// Hash bytes rendered as text
    pub fn hash_str(&self) -> String {
        String::from_utf8_lossy(&self.hash).into_owned()
    }
}

impl fmt::Display for VersionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}-{}-{}",
            self.major,
            self.minor,
            self.patch,
            self.commit,
            self.hash_str()
        )
    }
}

/// Parse a `git describe --tags --long` descriptor (e.g., "1.2.3-4-gabcdef1")
///
/// The descriptor must be exactly `MAJOR.MINOR.PATCH-COMMITS-HASH`, where the
/// numeric fields are full decimal digit runs and `HASH` is 8 single-byte
/// characters. Line endings around the descriptor are ignored.
pub fn parse_descriptor(raw: &str) -> Result<VersionRecord> {
    let invalid = || ManifestError::invalid_descriptor(raw);
    let descriptor = raw.trim_matches(['\r', '\n']);

    let Some(split) = descriptor.len().checked_sub(HASH_LEN) else {
        return Err(invalid());
    };
    if !descriptor.is_char_boundary(split) {
        return Err(invalid());
    }

    let (head, hash) = descriptor.split_at(split);
    if !hash.is_ascii() || hash.contains(['\r', '\n']) {
        return Err(invalid());
    }

    let head = head.strip_suffix('-').ok_or_else(invalid)?;
    let (triplet, commit) = head.rsplit_once('-').ok_or_else(invalid)?;

    let parts: Vec<&str> = triplet.split('.').collect();
    let [major, minor, patch] = parts.as_slice() else {
        return Err(invalid());
    };

    let mut record = VersionRecord {
        major: parse_digits(major).ok_or_else(invalid)?,
        minor: parse_digits(minor).ok_or_else(invalid)?,
        patch: parse_digits(patch).ok_or_else(invalid)?,
        commit: parse_digits(commit).ok_or_else(invalid)?,
        hash: [0; HASH_LEN],
    };
    record.hash.copy_from_slice(hash.as_bytes());

    Ok(record)
}

/// Non-empty run of ASCII digits that fits in a `u32`
fn parse_digits(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Returns true if `remote` should replace `local`
///
/// Used when replacing an existing manifest, and by consumers deciding
/// whether to fetch the image a manifest points at.
///
/// Major, minor, patch and commit count are compared in order. When all of
/// them match, a different hash still counts as an update.
pub fn is_newer(local: &VersionRecord, remote: &VersionRecord) -> bool {
    let local_key = (local.major, local.minor, local.patch, local.commit);
    let remote_key = (remote.major, remote.minor, remote.patch, remote.commit);

    match remote_key.cmp(&local_key) {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => remote.hash != local.hash,
    }
}
