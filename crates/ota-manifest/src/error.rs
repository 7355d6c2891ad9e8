// SPDX-License-Identifier: CC-BY-NC-ND-4.0

//! Error types for the manifest crate

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("invalid descriptor format")]
    InvalidDescriptor { descriptor: String },

    #[error("git describe failed: {0}")]
    Describe(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("manifest serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ManifestError {
    pub(crate) fn invalid_descriptor(descriptor: &str) -> Self {
        Self::InvalidDescriptor {
            descriptor: descriptor.to_owned(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ManifestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_descriptor_reason() {
        let err = ManifestError::invalid_descriptor("not-a-version");
        assert_eq!(err.to_string(), "invalid descriptor format");
        assert!(matches!(
            err,
            ManifestError::InvalidDescriptor { ref descriptor } if descriptor == "not-a-version"
        ));
    }

    #[test]
    fn test_describe_error_message() {
        let err = ManifestError::Describe("fatal: No names found".to_owned());
        assert_eq!(err.to_string(), "git describe failed: fatal: No names found");
    }
}
