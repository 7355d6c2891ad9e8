// SPDX-License-Identifier: CC-BY-NC-ND-4.0

//! Sources of the raw version descriptor

use crate::error::{ManifestError, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// Produces the raw descriptor string fed to the parser
pub trait DescriptorSource {
    fn describe(&self) -> Result<String>;
}

impl<F> DescriptorSource for F
where
    F: Fn() -> Result<String>,
{
    fn describe(&self) -> Result<String> {
        self()
    }
}

/// Fixed descriptor, e.g. passed on the command line
#[derive(Debug, Clone)]
pub struct StaticDescriptor(pub String);

impl DescriptorSource for StaticDescriptor {
    fn describe(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}

/// Runs `git describe --tags --long`
#[derive(Debug, Clone, Default)]
pub struct GitDescribe {
    repo_dir: Option<PathBuf>,
}

impl GitDescribe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run git inside `dir` instead of the current directory
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            repo_dir: Some(dir.as_ref().to_path_buf()),
        }
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new("git");
        cmd.args(["describe", "--tags", "--long"]);
        if let Some(dir) = &self.repo_dir {
            cmd.current_dir(dir);
        }
        cmd
    }
}

impl DescriptorSource for GitDescribe {
    fn describe(&self) -> Result<String> {
        debug!("Running git describe in {:?}", self.repo_dir);

        let output = self
            .command()
            .output()
            .map_err(|e| ManifestError::Describe(format!("failed to run git: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ManifestError::Describe(format!(
                "{}: {}",
                output.status,
                stderr.trim()
            )));
        }

        String::from_utf8(output.stdout)
            .map_err(|e| ManifestError::Describe(format!("output is not UTF-8: {e}")))
    }
}
