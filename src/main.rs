//! Grapnel CLI - Isolated dependency bundles for plugin extensions

use clap::Parser;

use grapnel_cli::cli::Cli;

fn main() {
    let cli = Cli::parse();
    if let Err(e) = cli.run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
