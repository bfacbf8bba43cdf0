//! `grapnel list` — list installed plugins.

use anyhow::Result;

use crate::application::services::DependencyInstaller;
use crate::domain::Settings;
use crate::infra::fs::LocalDisk;
use crate::infra::registrar::NullRegistrar;
use crate::output::OutputContext;

/// Run `grapnel list`.
///
/// # Errors
///
/// Returns an error if the extension root exists but cannot be read.
pub fn run(settings: &Settings, ctx: &OutputContext, json: bool) -> Result<()> {
    let installer = DependencyInstaller::new(NullRegistrar, settings.ext_dir.clone());
    let plugins = installer.installed(&LocalDisk)?;

    if json {
        println!("{}", serde_json::json!({ "plugins": plugins }));
        return Ok(());
    }

    if plugins.is_empty() {
        if !ctx.quiet {
            println!("No plugins installed. Install one: grapnel install <group:name:version>");
        }
        return Ok(());
    }

    ctx.header("Installed plugins:");
    for name in &plugins {
        println!("  {name}");
    }
    Ok(())
}
