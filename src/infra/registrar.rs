//! Registration context implementations.

use std::path::PathBuf;

use anyhow::Result;

use crate::application::ports::PluginRegistrar;
use crate::domain::Artifact;

/// Registration context for the standalone CLI: there is no host process to
/// enrich, so registration accepts everything. Host embeddings supply their
/// own `PluginRegistrar` (e.g. one that adds the installed files to a loader
/// path).
pub struct NullRegistrar;

impl PluginRegistrar for NullRegistrar {
    fn register(&self, _artifact: &Artifact, _files: &[PathBuf]) -> Result<()> {
        Ok(())
    }
}
