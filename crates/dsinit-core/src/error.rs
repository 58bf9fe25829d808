//! Unified error handling for dsinit core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::{DomainError, Stage};

/// Root error type for dsinit core operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DsinitError {
    /// Errors from the domain layer (invalid names, layouts, formats).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Errors from the application layer (filesystem, processes, parsing).
    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// A fatal pipeline stage failed; later stages did not run.
    #[error("{stage} step failed: {source}")]
    Halted {
        stage: Stage,
        #[source]
        source: Box<DsinitError>,
    },
}

impl DsinitError {
    pub fn halted(stage: Stage, source: DsinitError) -> Self {
        Self::Halted {
            stage,
            source: Box::new(source),
        }
    }

    /// The innermost error, looking through `Halted`.
    pub fn root(&self) -> &DsinitError {
        match self {
            Self::Halted { source, .. } => source.root(),
            other => other,
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Halted { source, .. } => source.suggestions(),
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::InvalidInput,
                crate::domain::ErrorCategory::Unsupported => ErrorCategory::UnsupportedFormat,
            },
            Self::Application(e) => e.category(),
            Self::Halted { source, .. } => source.category(),
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    InvalidInput,
    Filesystem,
    ExternalTool,
    UnsupportedFormat,
    Parse,
    Internal,
}

/// Convenient result type alias.
pub type DsinitResult<T> = Result<T, DsinitError>;
