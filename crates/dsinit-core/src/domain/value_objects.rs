// ============================================================================
// value_objects.rs - PURE DOMAIN PRIMITIVES
// ============================================================================

use std::fmt;
use std::str::FromStr;

use crate::domain::error::DomainError;

// ============================================================================
// ScriptKind
// ============================================================================

/// Kind of boilerplate file seeded by `new-script`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScriptKind {
    /// A Python source file (`.py`).
    Python,
    /// A Jupyter notebook (`.ipynb`).
    Notebook,
}

impl ScriptKind {
    pub const ALL: &'static [ScriptKind] = &[Self::Python, Self::Notebook];

    pub const fn extension(self) -> &'static str {
        match self {
            Self::Python => "py",
            Self::Notebook => "ipynb",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Python => "PY",
            Self::Notebook => "IPYNB",
        }
    }
}

impl fmt::Display for ScriptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ScriptKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "py" | "python" => Ok(Self::Python),
            "ipynb" | "notebook" | "nb" => Ok(Self::Notebook),
            _ => Err(DomainError::UnknownScriptKind { kind: s.into() }),
        }
    }
}

// ============================================================================
// SecondarySession
// ============================================================================

/// Whether a secondary package-manager session (conda) is active.
///
/// Discovered once by the caller and passed down; nothing in the core reads
/// the process environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SecondarySession {
    Active,
    #[default]
    Inactive,
}

impl SecondarySession {
    pub fn from_flag(active: bool) -> Self {
        if active { Self::Active } else { Self::Inactive }
    }

    pub fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}
