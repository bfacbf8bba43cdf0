//! Local artifact repository — the production `DependencyResolver`.
//!
//! Repository layout: `<root>/<group with dots as '/'>/<name>/<version>/`
//! holding the artifact's payload files, plus an optional `manifest.yaml`
//! declaring direct dependencies:
//!
//! ```yaml
//! dependencies:
//!   - coordinate: org.example:util:1.0
//! ```
//!
//! The transitive closure is walked depth-first; an artifact reached through
//! more than one path contributes its files once, and cycles terminate.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::application::ports::DependencyResolver;
use crate::domain::Artifact;

/// File name of the per-artifact dependency manifest.
pub const MANIFEST_FILE: &str = "manifest.yaml";

/// Resolves coordinates against an on-disk repository.
pub struct LocalRepositoryResolver {
    root: PathBuf,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ArtifactManifest {
    dependencies: Vec<DependencyRef>,
}

#[derive(Debug, Deserialize)]
struct DependencyRef {
    coordinate: String,
}

impl LocalRepositoryResolver {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn artifact_dir(&self, artifact: &Artifact) -> PathBuf {
        let mut dir = self.root.clone();
        for segment in artifact.group().split('.') {
            dir.push(segment);
        }
        dir.push(artifact.name());
        dir.push(artifact.version());
        dir
    }

    fn collect(
        &self,
        artifact: &Artifact,
        seen: &mut HashSet<Artifact>,
        files: &mut Vec<PathBuf>,
    ) -> Result<()> {
        if !seen.insert(artifact.clone()) {
            return Ok(());
        }

        let dir = self.artifact_dir(artifact);
        anyhow::ensure!(
            dir.is_dir(),
            "artifact {artifact} not found in repository {}",
            self.root.display()
        );

        let mut manifest = ArtifactManifest::default();
        let mut payload: Vec<PathBuf> = Vec::new();
        let entries =
            std::fs::read_dir(&dir).with_context(|| format!("reading {}", dir.display()))?;
        for entry in entries {
            let entry = entry.with_context(|| format!("reading {}", dir.display()))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if entry.file_name() == MANIFEST_FILE {
                let content = std::fs::read_to_string(&path)
                    .with_context(|| format!("reading {}", path.display()))?;
                manifest = serde_yaml::from_str(&content)
                    .with_context(|| format!("parsing {}", path.display()))?;
            } else {
                payload.push(path);
            }
        }
        payload.sort();
        files.extend(payload);

        for dep in &manifest.dependencies {
            let dep_artifact: Artifact = dep
                .coordinate
                .parse()
                .with_context(|| format!("in dependency manifest of {artifact}"))?;
            self.collect(&dep_artifact, seen, files)?;
        }
        Ok(())
    }
}

impl DependencyResolver for LocalRepositoryResolver {
    fn resolve(&self, artifact: &Artifact) -> Result<Vec<PathBuf>> {
        let mut seen = HashSet::new();
        let mut files = Vec::new();
        self.collect(artifact, &mut seen, &mut files)?;
        Ok(files)
    }
}
