//! Typed domain error enums.
//!
//! All error types implement `thiserror::Error` and convert to
//! `anyhow::Error` via the `?` operator. `InstallError` is the contract the
//! installer service exposes: callers branch on `AlreadyInstalled` to decide
//! whether to uninstall-then-retry, so it is a named variant rather than a
//! generic failure.

use std::path::PathBuf;

use thiserror::Error;

// ── Coordinate errors ─────────────────────────────────────────────────────────

/// Errors raised while constructing or parsing an artifact coordinate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoordinateError {
    #[error("artifact {0} must not be empty")]
    Empty(&'static str),

    #[error(
        "artifact {field} '{value}' may only contain alphanumerics, '.', '_' and '-', and must start with an alphanumeric"
    )]
    Unsafe { field: &'static str, value: String },

    #[error("invalid coordinate '{0}': expected group:name:version")]
    Malformed(String),
}

// ── Install errors ────────────────────────────────────────────────────────────

/// Errors raised by the install/uninstall use-cases.
#[derive(Debug, Error)]
pub enum InstallError {
    #[error("plugin '{name}' is already installed. Remove it first: grapnel uninstall {name}")]
    AlreadyInstalled { name: String },

    #[error("failed to resolve dependencies for {coordinate}")]
    Resolution {
        coordinate: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("install of '{name}' failed while copying files{}", cleanup_note(.cleanup_error))]
    CopyFailed {
        name: String,
        #[source]
        source: anyhow::Error,
        /// Set when removing the partial plugin directory also failed.
        cleanup_error: Option<String>,
    },

    #[error("failed to remove plugin directory {}", .dir.display())]
    RemoveFailed {
        dir: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("plugin '{name}' was installed but could not be registered with the host")]
    Registration {
        name: String,
        #[source]
        source: anyhow::Error,
    },

    #[error(transparent)]
    InvalidCoordinate(#[from] CoordinateError),
}

fn cleanup_note(cleanup_error: &Option<String>) -> String {
    match cleanup_error {
        Some(e) => format!("; removing the partial plugin directory also failed: {e}"),
        None => String::new(),
    }
}
