//! Domain types for grapnel configuration.
//!
//! Pure defaulting and merge logic only — loading the config file from disk
//! lives in `crate::infra::settings`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Top-level configuration stored in `~/.grapnel/config.yaml`. Every field is
/// optional; unset fields fall back to the defaults under `~/.grapnel/`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GrapnelConfig {
    /// Extension root the plugins install into.
    pub ext_dir: Option<PathBuf>,
    /// Local artifact repository the resolver reads from.
    pub repository: Option<PathBuf>,
}

/// Effective settings after merging CLI flags over the config file over the
/// built-in defaults.
#[derive(Debug, Clone)]
pub struct Settings {
    pub ext_dir: PathBuf,
    pub repository: PathBuf,
}

impl Settings {
    /// Merge precedence: flags win over the config file; the config file wins
    /// over the defaults under `home/.grapnel/`.
    #[must_use]
    pub fn resolve(
        config: &GrapnelConfig,
        flag_ext_dir: Option<PathBuf>,
        flag_repository: Option<PathBuf>,
        home: &Path,
    ) -> Self {
        let base = home.join(".grapnel");
        Self {
            ext_dir: flag_ext_dir
                .or_else(|| config.ext_dir.clone())
                .unwrap_or_else(|| base.join("ext")),
            repository: flag_repository
                .or_else(|| config.repository.clone())
                .unwrap_or_else(|| base.join("repository")),
        }
    }
}
