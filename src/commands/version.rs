//! `grapnel version` — print version information.

use anyhow::Result;

/// Print the version in human or JSON form.
///
/// # Errors
///
/// Infallible in practice; returns `Result` for uniform command dispatch.
pub fn run(json: bool) -> Result<()> {
    let version = env!("CARGO_PKG_VERSION");
    if json {
        println!("{}", serde_json::json!({ "version": version }));
    } else {
        println!("grapnel {version}");
    }
    Ok(())
}
