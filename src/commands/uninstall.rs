//! `grapnel uninstall` — remove an installed plugin.

use anyhow::Result;
use clap::Args;

use crate::application::services::DependencyInstaller;
use crate::domain::Settings;
use crate::infra::fs::LocalDisk;
use crate::infra::registrar::NullRegistrar;
use crate::output::{OutputContext, SpinnerReporter};

#[derive(Args)]
pub struct UninstallArgs {
    /// Name of the installed plugin to remove
    pub name: String,

    /// Skip the confirmation prompt
    #[arg(long)]
    pub yes: bool,
}

/// Run `grapnel uninstall`.
///
/// Removing a plugin that is not installed succeeds as a no-op.
///
/// # Errors
///
/// Returns an error if the name is unsafe or the plugin directory cannot be
/// removed.
pub fn run(args: &UninstallArgs, settings: &Settings, ctx: &OutputContext) -> Result<()> {
    if !args.yes && ctx.is_tty {
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(format!("Remove plugin '{}' and all of its files?", args.name))
            .default(false)
            .interact()?;
        if !confirmed {
            ctx.info("aborted");
            return Ok(());
        }
    }

    let installer = DependencyInstaller::new(NullRegistrar, settings.ext_dir.clone());
    let reporter = SpinnerReporter::new(ctx);
    installer.uninstall_named(&args.name, &LocalDisk, &reporter)?;
    Ok(())
}
