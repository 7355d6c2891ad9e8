// SPDX-License-Identifier: CC-BY-NC-ND-4.0

//! End-to-end manifest generation

use crate::config::ManifestConfig;
use crate::describe::DescriptorSource;
use crate::error::Result;
use crate::manifest::{ManifestBuilder, ManifestRecord};
use crate::serializer::{serialize, serialize_pretty};
use crate::version::parse_descriptor;
use tracing::{debug, error, info};

/// Describe, parse, build and serialize a manifest
///
/// Nothing is serialized when the descriptor is malformed; the parse error is
/// returned instead.
pub fn generate(
    source: &(impl DescriptorSource + ?Sized),
    config: &ManifestConfig,
) -> Result<(ManifestRecord, Vec<u8>)> {
    let raw = source.describe()?;
    let descriptor = config.strip_tag_prefix(raw.trim_matches(['\r', '\n']));
    info!("version {descriptor}");

    let build = ManifestBuilder::from_config(config).build(parse_descriptor(descriptor));
    if let Some(reason) = build.failure_reason() {
        error!("Unable to process manifest: {reason} ({descriptor:?})");
    }
    let manifest = build.into_result()?;

    let bytes = if config.pretty {
        serialize_pretty(&manifest)?
    } else {
        serialize(&manifest)?
    };

    info!("manifest generated for {}", manifest.version);
    debug!("manifest: {}", String::from_utf8_lossy(&bytes));

    Ok((manifest, bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::describe::StaticDescriptor;
    use crate::error::ManifestError;

    #[test]
    fn test_generate_from_descriptor() {
        let source = StaticDescriptor("1.2.3-4-abcdefgh\n".to_owned());
        let (manifest, bytes) = generate(&source, &ManifestConfig::default()).unwrap();

        assert_eq!(manifest.version.to_string(), "1.2.3-4-abcdefgh");
        assert_eq!(manifest.file, "app_update.bin");
        assert!(!manifest.force);
        assert_eq!(bytes, serialize(&manifest).unwrap());
    }

    #[test]
    fn test_generate_strips_tag_prefix() {
        let config = ManifestConfig {
            tag_prefix: Some("v".to_owned()),
            ..ManifestConfig::default()
        };
        let source = StaticDescriptor("v0.2.0-11-g9e8d7c6\r\n".to_owned());

        let (manifest, _) = generate(&source, &config).unwrap();
        assert_eq!(manifest.version.minor, 2);
        assert_eq!(manifest.version.commit, 11);
        assert_eq!(&manifest.version.hash, b"g9e8d7c6");
    }

    #[test]
    fn test_generate_without_prefix_rejects_tagged_descriptor() {
        let source = StaticDescriptor("v0.2.0-11-g9e8d7c6".to_owned());
        let err = generate(&source, &ManifestConfig::default()).unwrap_err();
        assert!(matches!(err, ManifestError::InvalidDescriptor { .. }));
    }

    #[test]
    fn test_generate_pretty() {
        let config = ManifestConfig {
            pretty: true,
            ..ManifestConfig::default()
        };
        let source = StaticDescriptor("1.0.0-0-00000000".to_owned());

        let (manifest, bytes) = generate(&source, &config).unwrap();
        assert_eq!(bytes, serialize_pretty(&manifest).unwrap());
    }

    #[test]
    fn test_generate_propagates_source_error() {
        let source =
            || -> Result<String> { Err(ManifestError::Describe("no tags".to_owned())) };
        let err = generate(&source, &ManifestConfig::default()).unwrap_err();
        assert!(matches!(err, ManifestError::Describe(_)));
    }
}
