//! Application layer errors.
//!
//! These errors represent failures talking to the outside world (files,
//! processes, serializers), not rule violations. Rule violations are
//! `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while executing pipeline steps.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// Filesystem operation failed.
    #[error("Filesystem error at {}: {reason}", path.display())]
    FilesystemError { path: PathBuf, reason: String },

    /// The external program could not be started (not installed, not on PATH).
    #[error("Could not run `{command}`: {reason}")]
    ToolUnavailable { command: String, reason: String },

    /// The external program ran and exited unsuccessfully.
    #[error("`{command}` failed ({}){}", exit_status(*code), stderr_suffix(stderr))]
    StepFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    /// Structured output of an external tool could not be parsed.
    #[error("Could not parse {what}: {reason}")]
    ParseFailed { what: String, reason: String },

    /// A document could not be serialized.
    #[error("Could not serialize {what}: {reason}")]
    SerializationFailed { what: String, reason: String },

    /// An in-memory adapter's lock was poisoned.
    #[error("Adapter state lock poisoned")]
    LockPoisoned,
}

fn exit_status(code: Option<i32>) -> String {
    code.map_or_else(
        || "terminated by signal".to_string(),
        |c| format!("exit status {c}"),
    )
}

fn stderr_suffix(stderr: &str) -> String {
    match stderr.lines().rev().find(|l| !l.trim().is_empty()) {
        Some(line) => format!(": {}", line.trim()),
        None => String::new(),
    }
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::ToolUnavailable { command, .. } => vec![
                format!("Ensure `{}` is installed and on your PATH", command),
                "Or point the configuration at another command".into(),
            ],
            Self::StepFailed { command, .. } => vec![
                format!("Run `{}` by hand to see the full output", command),
                "Re-run with -v for the captured error output".into(),
            ],
            Self::ParseFailed { what, .. } => vec![
                format!("The {} output was not valid YAML", what),
                "Check that the active environment exports cleanly".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FilesystemError { .. } => ErrorCategory::Filesystem,
            Self::ToolUnavailable { .. } | Self::StepFailed { .. } => ErrorCategory::ExternalTool,
            Self::ParseFailed { .. } => ErrorCategory::Parse,
            Self::SerializationFailed { .. } | Self::LockPoisoned => ErrorCategory::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_failed_names_command_and_last_stderr_line() {
        let err = ApplicationError::StepFailed {
            command: "git init /tmp/p".into(),
            code: Some(128),
            stderr: "hint: something\nfatal: cannot mkdir\n\n".into(),
        };
        assert_eq!(
            err.to_string(),
            "`git init /tmp/p` failed (exit status 128): fatal: cannot mkdir"
        );
    }

    #[test]
    fn step_failed_without_stderr_or_code() {
        let err = ApplicationError::StepFailed {
            command: "bash x.sh".into(),
            code: None,
            stderr: String::new(),
        };
        assert_eq!(err.to_string(), "`bash x.sh` failed (terminated by signal)");
    }

    #[test]
    fn categories() {
        assert_eq!(
            ApplicationError::ToolUnavailable {
                command: "conda".into(),
                reason: "not found".into()
            }
            .category(),
            ErrorCategory::ExternalTool
        );
        assert_eq!(
            ApplicationError::ParseFailed {
                what: "conda env export".into(),
                reason: "bad".into()
            }
            .category(),
            ErrorCategory::Parse
        );
    }
}
