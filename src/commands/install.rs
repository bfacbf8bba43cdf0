//! `grapnel install` — install a plugin and its transitive dependencies.

use anyhow::Result;
use clap::Args;

use crate::application::services::DependencyInstaller;
use crate::domain::{Artifact, Settings};
use crate::infra::fs::LocalDisk;
use crate::infra::registrar::NullRegistrar;
use crate::infra::resolver::LocalRepositoryResolver;
use crate::output::{OutputContext, SpinnerReporter};

#[derive(Args)]
pub struct InstallArgs {
    /// Coordinate of the plugin to install, as group:name:version
    pub coordinate: String,
}

/// Run `grapnel install`.
///
/// # Errors
///
/// Returns an error if the coordinate is malformed, the plugin is already
/// installed, resolution fails, or the plugin directory cannot be populated.
pub fn run(args: &InstallArgs, settings: &Settings, ctx: &OutputContext) -> Result<()> {
    let artifact: Artifact = args.coordinate.parse()?;
    let installer = DependencyInstaller::new(NullRegistrar, settings.ext_dir.clone());
    let resolver = LocalRepositoryResolver::new(settings.repository.clone());
    let reporter = SpinnerReporter::new(ctx);
    installer.install(&artifact, &resolver, &LocalDisk, &reporter)?;
    Ok(())
}
