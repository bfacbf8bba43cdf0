//! The artifact coordinate — the (group, name, version) triple identifying a
//! resolvable plugin package.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::error::CoordinateError;

/// `name` is used verbatim as a directory under the extension root, and the
/// group/version segments become repository path components. Checked before
/// any path interpolation to prevent path-traversal (CWE-22).
static SEGMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Safety: this is a compile-time constant pattern — cannot fail.
    #[allow(clippy::expect_used)]
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").expect("valid regex")
});

fn validate_segment(field: &'static str, value: &str) -> Result<(), CoordinateError> {
    if value.is_empty() {
        return Err(CoordinateError::Empty(field));
    }
    if !SEGMENT_RE.is_match(value) {
        return Err(CoordinateError::Unsafe {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

/// Validate a bare plugin name the same way `Artifact::new` validates the
/// `name` component.
///
/// # Errors
///
/// Returns an error if the name is empty or not safe to use as a directory
/// name.
pub fn validate_plugin_name(name: &str) -> Result<(), CoordinateError> {
    validate_segment("name", name)
}

/// An immutable artifact coordinate.
///
/// Equality is structural and case-sensitive across all three components.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Artifact {
    group: String,
    name: String,
    version: String,
}

impl Artifact {
    /// Construct a coordinate from its three components.
    ///
    /// # Errors
    ///
    /// Returns an error if any component is empty or contains characters that
    /// are unsafe in a filesystem path segment.
    pub fn new(
        group: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Result<Self, CoordinateError> {
        let group = group.into();
        let name = name.into();
        let version = version.into();
        validate_segment("group", &group)?;
        validate_segment("name", &name)?;
        validate_segment("version", &version)?;
        Ok(Self {
            group,
            name,
            version,
        })
    }

    #[must_use]
    pub fn group(&self) -> &str {
        &self.group
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// The directory name this artifact installs into: the plugin name,
    /// verbatim.
    #[must_use]
    pub fn dir_name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.name, self.version)
    }
}

impl FromStr for Artifact {
    type Err = CoordinateError;

    /// Parse a `group:name:version` coordinate.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(':');
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(group), Some(name), Some(version), None) => Self::new(group, name, version),
            _ => Err(CoordinateError::Malformed(s.to_string())),
        }
    }
}
