//! Application service — plugin dependency install/uninstall use-cases.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.
//!
//! The existence of `<ext_dir>/<name>/` is the sole source of truth for
//! "installed": no manifest or lock file is kept under the root. An install
//! attempt against an existing directory fails without mutating anything, and
//! a mid-copy failure removes the partial directory so a retry is never
//! blocked by the failed attempt's residue.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock, Mutex, PoisonError};

use crate::application::ports::{DependencyResolver, LocalFs, PluginRegistrar, ProgressReporter};
use crate::domain::error::InstallError;
use crate::domain::{Artifact, validate_plugin_name};

/// Process-wide lock registry keyed by target plugin directory. Serializes
/// the check-then-act sequence for one directory across installer instances;
/// distinct directories proceed independently.
static DIR_LOCKS: LazyLock<Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

fn dir_lock(path: &Path) -> Arc<Mutex<()>> {
    let mut locks = DIR_LOCKS.lock().unwrap_or_else(PoisonError::into_inner);
    Arc::clone(locks.entry(path.to_path_buf()).or_default())
}

/// Installs plugin dependency bundles under an extension root and hands
/// successfully installed plugins to a registration context.
///
/// The root is fixed for the installer's lifetime. It need not exist yet; it
/// is created on demand by the first successful install.
pub struct DependencyInstaller<R> {
    registrar: R,
    ext_dir: PathBuf,
}

impl<R: PluginRegistrar> DependencyInstaller<R> {
    pub fn new(registrar: R, ext_dir: impl Into<PathBuf>) -> Self {
        Self {
            registrar,
            ext_dir: ext_dir.into(),
        }
    }

    /// The directory a given artifact installs into.
    #[must_use]
    pub fn plugin_dir(&self, artifact: &Artifact) -> PathBuf {
        self.ext_dir.join(artifact.dir_name())
    }

    /// Install `artifact` and its transitive dependencies into
    /// `<ext_dir>/<name>/`.
    ///
    /// # Errors
    ///
    /// - [`InstallError::AlreadyInstalled`] if the plugin directory exists;
    ///   the existing directory is left completely untouched.
    /// - [`InstallError::Resolution`] if the resolver fails; no directory is
    ///   created.
    /// - [`InstallError::CopyFailed`] if populating the directory fails; the
    ///   partial directory is removed best-effort first.
    /// - [`InstallError::Registration`] if the registrar rejects the plugin;
    ///   the populated directory stays in place.
    pub fn install(
        &self,
        artifact: &Artifact,
        resolver: &impl DependencyResolver,
        fs: &impl LocalFs,
        reporter: &impl ProgressReporter,
    ) -> Result<(), InstallError> {
        let target = self.plugin_dir(artifact);
        let lock = dir_lock(&target);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        if fs.exists(&target) {
            return Err(InstallError::AlreadyInstalled {
                name: artifact.dir_name().to_string(),
            });
        }

        reporter.step(&format!("resolving {artifact}..."));
        let files = resolver
            .resolve(artifact)
            .map_err(|source| InstallError::Resolution {
                coordinate: artifact.to_string(),
                source,
            })?;

        reporter.step(&format!(
            "copying {} files to {}...",
            files.len(),
            target.display()
        ));
        if let Err(source) = populate(&target, &files, fs) {
            let cleanup_error = remove_partial(&target, fs);
            return Err(InstallError::CopyFailed {
                name: artifact.dir_name().to_string(),
                source,
                cleanup_error,
            });
        }

        self.registrar
            .register(artifact, &files)
            .map_err(|source| InstallError::Registration {
                name: artifact.dir_name().to_string(),
                source,
            })?;

        reporter.success(&format!("plugin '{}' installed", artifact.dir_name()));
        Ok(())
    }

    /// Uninstall the plugin directory derived from `artifact`.
    ///
    /// Absence is success: removing an already-absent plugin is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`InstallError::RemoveFailed`] if the directory exists but
    /// cannot be removed.
    pub fn uninstall(
        &self,
        artifact: &Artifact,
        fs: &impl LocalFs,
        reporter: &impl ProgressReporter,
    ) -> Result<(), InstallError> {
        self.remove_plugin_dir(artifact.dir_name(), fs, reporter)
    }

    /// Uninstall by bare plugin name, for callers that no longer have the
    /// full coordinate. The raw name passes the same directory-safety guard
    /// as `Artifact::new` before any path is built from it.
    ///
    /// # Errors
    ///
    /// Returns [`InstallError::InvalidCoordinate`] for an unsafe name, or
    /// [`InstallError::RemoveFailed`] if the removal fails.
    pub fn uninstall_named(
        &self,
        name: &str,
        fs: &impl LocalFs,
        reporter: &impl ProgressReporter,
    ) -> Result<(), InstallError> {
        validate_plugin_name(name)?;
        self.remove_plugin_dir(name, fs, reporter)
    }

    fn remove_plugin_dir(
        &self,
        name: &str,
        fs: &impl LocalFs,
        reporter: &impl ProgressReporter,
    ) -> Result<(), InstallError> {
        let target = self.ext_dir.join(name);
        let lock = dir_lock(&target);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        if !fs.exists(&target) {
            reporter.warn(&format!("plugin '{name}' is not installed; nothing to remove"));
            return Ok(());
        }

        fs.remove_dir_all(&target)
            .map_err(|source| InstallError::RemoveFailed {
                dir: target.clone(),
                source,
            })?;

        reporter.success(&format!("plugin '{name}' removed"));
        Ok(())
    }

    /// Sorted names of the installed plugins. A missing root is an empty
    /// list, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the root exists but cannot be read.
    pub fn installed(&self, fs: &impl LocalFs) -> anyhow::Result<Vec<String>> {
        if !fs.exists(&self.ext_dir) {
            return Ok(Vec::new());
        }
        let mut names = fs.list_subdirs(&self.ext_dir)?;
        names.sort();
        Ok(names)
    }
}

/// Create the target directory and copy the resolved files into it, flat.
fn populate(target: &Path, files: &[PathBuf], fs: &impl LocalFs) -> anyhow::Result<()> {
    fs.create_dir_all(target)?;
    for file in files {
        let file_name = file
            .file_name()
            .ok_or_else(|| anyhow::anyhow!("resolved path has no file name: {}", file.display()))?;
        fs.copy_file(file, &target.join(file_name))?;
    }
    Ok(())
}

/// Best-effort removal of a partially populated target. Returns the removal
/// error, if any, for the caller to report alongside the original failure.
fn remove_partial(target: &Path, fs: &impl LocalFs) -> Option<String> {
    if !fs.exists(target) {
        return None;
    }
    fs.remove_dir_all(target).err().map(|e| format!("{e:#}"))
}
