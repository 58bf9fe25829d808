// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use std::path::PathBuf;
use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (carried inside pipeline reports)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error("Invalid project layout: {0}")]
    InvalidLayout(String),

    #[error("Duplicate directory '{name}' in '{parent}'")]
    DuplicateDirectory { parent: String, name: String },

    // ========================================================================
    // Unsupported Input
    // ========================================================================
    #[error("Unsupported script format: {}", path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("Unknown script kind '{kind}'")]
    UnknownScriptKind { kind: String },
}

impl DomainError {
    /// Shorthand for building an [`DomainError::InvalidName`].
    pub fn invalid_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidName { name, reason } => vec![
                format!("'{}' was rejected: {}", name, reason),
                "Use a plain directory name such as: river-turbidity".into(),
            ],
            Self::InvalidLayout(msg) | Self::DuplicateDirectory { parent: msg, .. } => vec![
                format!("Check the [[layout]] entries in your configuration ({})", msg),
                "Directory names must be unique and must not contain path separators".into(),
            ],
            Self::UnsupportedFormat { path } => vec![
                format!("'{}' is neither a .py nor a .sh script", path.display()),
                "Rename the script or point the configuration at a supported one".into(),
            ],
            Self::UnknownScriptKind { .. } => {
                vec!["Supported kinds: py (Python script), ipynb (Jupyter notebook)".into()]
            }
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnsupportedFormat { .. } => ErrorCategory::Unsupported,
            _ => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Unsupported,
}
