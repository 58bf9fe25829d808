//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `dsinit-adapters` crate provides implementations.

use std::path::Path;

use crate::domain::{EnvironmentManifest, Invocation, Notebook, ProcessOutput};
use crate::error::DsinitResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `dsinit_adapters::filesystem::LocalFilesystem` (production)
/// - `dsinit_adapters::filesystem::MemoryFilesystem` (testing)
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories. Existing ones are fine.
    fn create_dir_all(&self, path: &Path) -> DsinitResult<()>;

    /// Replace the file's full content in one step.
    ///
    /// Implementations must never leave a partially written file behind.
    fn write_file(&self, path: &Path, content: &str) -> DsinitResult<()>;

    /// Read a whole file as UTF-8.
    fn read_to_string(&self, path: &Path) -> DsinitResult<String>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check if path exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;
}

/// Port for running external programs.
///
/// Implemented by:
/// - `dsinit_adapters::process::SystemProcessRunner` (production)
/// - `dsinit_adapters::process::ScriptedProcessRunner` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait ProcessRunner: Send + Sync {
    /// Run to completion and capture stdout/stderr.
    ///
    /// A non-zero exit is *not* an error at this level; callers decide.
    /// Only a failure to start the program is reported as `Err`.
    fn run(&self, invocation: &Invocation) -> DsinitResult<ProcessOutput>;
}

/// Port for structured-document formats (JSON notebooks, YAML manifests).
///
/// Implemented by:
/// - `dsinit_adapters::serializer::SerdeDocuments`
#[cfg_attr(test, mockall::automock)]
pub trait DocumentSerializer: Send + Sync {
    /// Notebook JSON, four-space indented.
    fn notebook_to_json(&self, notebook: &Notebook) -> DsinitResult<String>;

    /// Parse the YAML printed by the environment-export command.
    fn parse_environment(&self, yaml: &str) -> DsinitResult<EnvironmentManifest>;

    /// Block-style YAML for the environment manifest.
    fn environment_to_yaml(&self, manifest: &EnvironmentManifest) -> DsinitResult<String>;
}
