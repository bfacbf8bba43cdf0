//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` — never from `crate::infra`,
//! `crate::commands`, or `crate::output`. All traits are sync: the installer
//! performs blocking filesystem and resolution work by design.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::domain::Artifact;

// ── Resolution Port ───────────────────────────────────────────────────────────

/// Turns a coordinate into the full transitive set of resolved local files.
///
/// The resolution mechanism (repositories, dependency graphs, downloads) is
/// entirely the implementation's concern; the installer consumes the returned
/// paths verbatim and propagates resolution errors uninterpreted.
pub trait DependencyResolver {
    /// Resolve `artifact` and all transitive dependencies to local paths,
    /// ordered and de-duplicated.
    ///
    /// # Errors
    ///
    /// Returns an error if the artifact or any transitive dependency cannot
    /// be resolved.
    fn resolve(&self, artifact: &Artifact) -> Result<Vec<PathBuf>>;
}

// ── Registration Port ─────────────────────────────────────────────────────────

/// The registration context a successful install enriches — e.g. a host
/// process that makes the installed files loadable. Opaque to the installer;
/// the on-disk install state never depends on it.
pub trait PluginRegistrar {
    /// Register a freshly installed plugin and its resolved files.
    ///
    /// # Errors
    ///
    /// Returns an error if the host rejects the plugin.
    fn register(&self, artifact: &Artifact, files: &[PathBuf]) -> Result<()>;
}

// ── Filesystem Port ───────────────────────────────────────────────────────────

/// Abstracts local filesystem operations so services can be tested without
/// touching the real disk.
pub trait LocalFs {
    fn exists(&self, path: &Path) -> bool;

    /// Create `path` and any missing parents.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be created.
    fn create_dir_all(&self, path: &Path) -> Result<()>;

    /// Remove `path` and everything beneath it.
    ///
    /// # Errors
    ///
    /// Returns an error if the tree cannot be removed.
    fn remove_dir_all(&self, path: &Path) -> Result<()>;

    /// Copy a single file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or written.
    fn copy_file(&self, from: &Path, to: &Path) -> Result<()>;

    /// Names of the immediate subdirectories of `path`, in directory order.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` cannot be read.
    fn list_subdirs(&self, path: &Path) -> Result<Vec<String>>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}
