// SPDX-License-Identifier: CC-BY-NC-ND-4.0

//! Manifest file output

use crate::error::Result;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::info;

/// Sibling temp file, e.g. `manifest.json.tmp`
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write the serialized manifest to `path`, replacing any previous manifest
pub fn write_manifest(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let temp_path = temp_path_for(path);

    // Atomic write
    std::fs::write(&temp_path, bytes)?;
    if let Err(e) = std::fs::rename(&temp_path, path) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(e.into());
    }

    info!("File written to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_temp_path_keeps_extension() {
        assert_eq!(
            temp_path_for(Path::new("out/manifest.json")),
            PathBuf::from("out/manifest.json.tmp")
        );
    }

    #[test]
    fn test_write_manifest_creates_parent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out").join("manifest.json");

        write_manifest(&path, b"{}").unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"{}");
        assert!(!temp_path_for(&path).exists());
    }

    #[test]
    fn test_write_manifest_replaces_existing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("manifest.json");
        std::fs::write(&path, "stale").unwrap();

        write_manifest(&path, b"fresh").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "fresh");
    }

    #[test]
    fn test_write_manifest_leaves_sibling_tmp_alone() {
        let dir = TempDir::new().unwrap();
        let sibling = dir.path().join("manifest.tmp");
        std::fs::write(&sibling, "unrelated").unwrap();

        write_manifest(&dir.path().join("manifest.json"), b"{}").unwrap();

        assert_eq!(std::fs::read_to_string(&sibling).unwrap(), "unrelated");
    }

    #[test]
    fn test_write_manifest_failed_rename_cleans_up() {
        let dir = TempDir::new().unwrap();
        // A non-empty directory at the target path makes the rename fail
        let path = dir.path().join("manifest.json");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep"), "x").unwrap();

        assert!(write_manifest(&path, b"{}").is_err());
        assert!(!temp_path_for(&path).exists());
    }
}
