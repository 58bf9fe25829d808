use std::fmt;
use std::path::{Path, PathBuf};

/// How an existing file at the target path is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WritePolicy {
    /// Leave an existing file untouched.
    SkipIfExists,
    /// Replace the whole content.
    Overwrite,
}

/// What a write actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    Skipped,
}

impl WriteOutcome {
    pub fn is_written(self) -> bool {
        matches!(self, Self::Written)
    }
}

impl fmt::Display for WriteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Written => f.write_str("written"),
            Self::Skipped => f.write_str("skipped"),
        }
    }
}

/// A file produced by a generator step.
///
/// Content is always complete; the materializer writes it in one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    pub path: PathBuf,
    pub content: String,
    pub policy: WritePolicy,
}

impl GeneratedArtifact {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>, policy: WritePolicy) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            policy,
        }
    }

    pub fn skip_if_exists(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self::new(path, content, WritePolicy::SkipIfExists)
    }

    pub fn overwrite(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self::new(path, content, WritePolicy::Overwrite)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
