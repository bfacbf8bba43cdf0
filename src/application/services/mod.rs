//! Application services — use-case orchestration through port traits.

pub mod installer;

pub use installer::DependencyInstaller;
