use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::error::DomainError;

/// A validated project name.
///
/// Invariant: non-empty, a single path segment, not `.` or `..`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectName(String);

impl ProjectName {
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, DomainError> {
        let raw = raw.as_ref();
        let name = raw.trim();

        if name.is_empty() {
            return Err(DomainError::invalid_name(raw, "name cannot be empty"));
        }
        if name.contains('/') || name.contains('\\') {
            return Err(DomainError::invalid_name(
                raw,
                "name cannot contain path separators",
            ));
        }
        if name == "." || name == ".." {
            return Err(DomainError::invalid_name(raw, "name is reserved"));
        }

        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProjectName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The single free variable of a scaffold run: a name and the project
/// directory derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectIdentity {
    name: ProjectName,
    path: PathBuf,
}

impl ProjectIdentity {
    /// Resolve `name` against `base_dir` (normally the invoking directory).
    pub fn resolve(name: impl AsRef<str>, base_dir: &Path) -> Result<Self, DomainError> {
        let name = ProjectName::parse(name)?;
        let path = base_dir.join(name.as_str());
        Ok(Self { name, path })
    }

    pub fn name(&self) -> &ProjectName {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn into_path(self) -> PathBuf {
        self.path
    }
}
