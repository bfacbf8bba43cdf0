//! CLI argument parsing with clap derive

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;
use crate::domain::Settings;
use crate::infra::settings::SettingsLoader;
use crate::output::OutputContext;

/// Isolated dependency bundles for plugin extensions
#[derive(Parser)]
#[command(
    name = "grapnel",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Extension root the plugins install into
    #[arg(long, global = true, value_name = "DIR", env = "GRAPNEL_EXT_DIR")]
    pub ext_dir: Option<PathBuf>,

    /// Local artifact repository the resolver reads from
    #[arg(long, global = true, value_name = "DIR", env = "GRAPNEL_REPOSITORY")]
    pub repository: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Install a plugin and its transitive dependencies
    Install(commands::install::InstallArgs),

    /// Remove an installed plugin
    Uninstall(commands::uninstall::UninstallArgs),

    /// List installed plugins
    List,

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub fn run(self) -> Result<()> {
        let Cli {
            json,
            quiet,
            no_color,
            ext_dir,
            repository,
            command,
        } = self;
        match command {
            Command::Version => commands::version::run(json),
            Command::Install(args) => {
                let ctx = OutputContext::new(no_color, quiet);
                let settings = load_settings(ext_dir, repository)?;
                commands::install::run(&args, &settings, &ctx)
            }
            Command::Uninstall(args) => {
                let ctx = OutputContext::new(no_color, quiet);
                let settings = load_settings(ext_dir, repository)?;
                commands::uninstall::run(&args, &settings, &ctx)
            }
            Command::List => {
                let ctx = OutputContext::new(no_color, quiet);
                let settings = load_settings(ext_dir, repository)?;
                commands::list::run(&settings, &ctx, json)
            }
        }
    }
}

fn load_settings(ext_dir: Option<PathBuf>, repository: Option<PathBuf>) -> Result<Settings> {
    let config = SettingsLoader::new()?.load()?.unwrap_or_default();
    let home =
        dirs::home_dir().ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
    Ok(Settings::resolve(&config, ext_dir, repository, &home))
}
