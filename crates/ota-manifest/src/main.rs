// SPDX-License-Identifier: CC-BY-NC-ND-4.0

//! OTA Manifest - Entry point for the manifest generator binary
//!
//! Usage:
//!   ota-manifest                          # describe HEAD, write ./manifest.json
//!   ota-manifest --descriptor 1.2.3-4-g0123abc --dry-run
//!   ota-manifest --config manifest_config.json --output build/manifest.json

use anyhow::{Context, Result};
use clap::Parser;
use ota_manifest::config::load_config;
use ota_manifest::output::write_manifest;
use ota_manifest::{
    DescriptorSource, GitDescribe, ManifestConfig, ManifestRecord, StaticDescriptor, deserialize,
    generate, is_newer,
};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "ota-manifest")]
#[command(about = "Generate the OTA manifest from git describe output", long_about = None)]
struct Cli {
    /// Path to the JSON config file (defaults are used if it doesn't exist)
    #[arg(short, long, default_value = "manifest_config.json")]
    config: PathBuf,

    /// Where to write the manifest (overrides config)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Use this descriptor instead of running git describe
    #[arg(short, long)]
    descriptor: Option<String>,

    /// Repository to describe (defaults to the current directory)
    #[arg(long)]
    repo: Option<PathBuf>,

    /// Firmware file named in the manifest (overrides config)
    #[arg(long)]
    file: Option<String>,

    /// Force the update on devices
    #[arg(long)]
    force: bool,

    /// Tag prefix to strip before parsing (e.g., "v")
    #[arg(long)]
    tag_prefix: Option<String>,

    /// Pretty-print the manifest JSON
    #[arg(long)]
    pretty: bool,

    /// Generate and log the manifest without writing it
    #[arg(long)]
    dry_run: bool,
}

impl Cli {
    fn apply(&self, config: &mut ManifestConfig) {
        if let Some(output) = &self.output {
            config.output_path.clone_from(output);
        }
        if let Some(file) = &self.file {
            config.file.clone_from(file);
        }
        if let Some(prefix) = &self.tag_prefix {
            config.tag_prefix = Some(prefix.clone());
        }
        config.force |= self.force;
        config.pretty |= self.pretty;
    }

    fn source(&self) -> Box<dyn DescriptorSource> {
        match (&self.descriptor, &self.repo) {
            (Some(descriptor), _) => Box::new(StaticDescriptor(descriptor.clone())),
            (None, Some(repo)) => Box::new(GitDescribe::in_dir(repo)),
            (None, None) => Box::new(GitDescribe::new()),
        }
    }
}

/// Log how the new manifest relates to the one it replaces
fn report_replaced(path: &Path, manifest: &ManifestRecord) {
    let Ok(previous) = std::fs::read(path) else {
        return;
    };
    match deserialize(&previous) {
        Ok(previous) if is_newer(&previous.version, &manifest.version) => {
            info!("Replacing manifest for {}", previous.version);
        }
        Ok(previous) => {
            warn!(
                "Manifest for {} is not newer than existing {}",
                manifest.version, previous.version
            );
        }
        Err(e) => warn!("Existing manifest {} is unreadable: {e}", path.display()),
    }
}

fn main() -> Result<()> {
    // Logs go to stderr so a dry run prints only the manifest on stdout
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ota_manifest=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    let mut config = load_config(&cli.config)
        .with_context(|| format!("Failed to load config {}", cli.config.display()))?;
    cli.apply(&mut config);

    let source = cli.source();
    let (manifest, bytes) = generate(&*source, &config).context("Failed to generate manifest")?;

    if cli.dry_run {
        info!("Dry run, not writing {}", config.output_path.display());
        println!("{}", String::from_utf8_lossy(&bytes));
        return Ok(());
    }

    report_replaced(&config.output_path, &manifest);
    write_manifest(&config.output_path, &bytes).context("Failed to write manifest")?;
    info!(
        "Manifest for {} ({}) written to {}",
        manifest.version,
        manifest.file,
        config.output_path.display()
    );

    Ok(())
}
