//! Infrastructure loader for the `~/.grapnel/config.yaml` settings file.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::domain::GrapnelConfig;

/// Settings file manager.
pub struct SettingsLoader {
    path: PathBuf,
}

impl SettingsLoader {
    /// Create a loader using the default path (`~/.grapnel/config.yaml`).
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self> {
        let home =
            dirs::home_dir().ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
        Ok(Self::with_path(home.join(".grapnel").join("config.yaml")))
    }

    /// Create a loader with an explicit path (used in tests).
    #[must_use]
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load the config file, returning `None` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<Option<GrapnelConfig>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("reading config file {}", self.path.display()))?;
        let config = serde_yaml::from_str(&content)
            .with_context(|| format!("parsing config file {}", self.path.display()))?;
        Ok(Some(config))
    }
}
