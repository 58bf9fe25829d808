//! Error handling for the dsinit CLI.
//!
//! Every failure reaches the user as a single `✗ <message>` line on stderr.
//! The source chain and suggestions are added with `-v`.

use std::error::Error as _;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use thiserror::Error;

use dsinit_core::error::DsinitError;

pub use dsinit_core::error::ErrorCategory as CoreCategory;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid user input caught before reaching the core.
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// A directory argument does not exist.
    #[error("Directory not found: {}", path.display())]
    DirectoryNotFound { path: PathBuf },

    /// A configuration file could not be read, parsed, or written.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An error propagated from `dsinit-core`.
    #[error(transparent)]
    Core(#[from] DsinitError),

    /// An I/O operation failed.
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
            source: None,
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { message } => vec![
                format!("Check your input: {}", message),
                "Use --help for usage information".into(),
            ],

            Self::DirectoryNotFound { path } => vec![
                format!("Create it first: mkdir -p {}", path.display()),
                "Or pass an existing directory".into(),
            ],

            Self::ConfigError { .. } => vec![
                "Check the configuration file shown by 'dsinit config path'".into(),
                "Use 'dsinit config init --force' to write a fresh default config".into(),
                "Environment overrides use the form DSINIT_SECTION__KEY".into(),
            ],

            Self::Core(core_err) => core_err.suggestions(),

            Self::IoError { .. } => vec![
                "Check file permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
        }
    }

    /// Get the error category for styling and logging.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } => ErrorCategory::UserError,
            Self::DirectoryNotFound { .. } => ErrorCategory::NotFound,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::Core(core) => match core.category() {
                CoreCategory::InvalidInput | CoreCategory::UnsupportedFormat => {
                    ErrorCategory::UserError
                }
                CoreCategory::Filesystem | CoreCategory::ExternalTool | CoreCategory::Parse => {
                    ErrorCategory::Environment
                }
                CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::IoError { .. } => ErrorCategory::Internal,
        }
    }

    /// Exit code to pass to the OS.  Every failure maps to 1.
    pub fn exit_code(&self) -> u8 {
        1
    }

    /// Format the error for stderr, with colours.
    pub fn format_colored(&self, verbose: bool) -> String {
        let mut output = format!("{} {}", "\u{2717}".red().bold(), self.to_string().red());

        if verbose {
            for cause in self.chain() {
                output.push_str(&format!("\n  {} {}", "\u{2192}".dimmed(), cause.dimmed()));
            }
            let suggestions = self.suggestions();
            if !suggestions.is_empty() {
                output.push_str(&format!("\n{}", "Suggestions:".yellow().bold()));
                for suggestion in suggestions {
                    output.push_str(&format!("\n  {}", suggestion));
                }
            }
        }

        output
    }

    /// Plain-text version of [`Self::format_colored`]; no ANSI codes.
    pub fn format_plain(&self, verbose: bool) -> String {
        let mut out = format!("\u{2717} {self}");

        if verbose {
            for cause in self.chain() {
                out.push_str(&format!("\n  Caused by: {cause}"));
            }
            let suggestions = self.suggestions();
            if !suggestions.is_empty() {
                out.push_str("\nSuggestions:");
                for s in &suggestions {
                    out.push_str(&format!("\n  {s}"));
                }
            }
        }

        out
    }

    /// Log the error using tracing.
    ///
    /// Only internal errors are logged above DEBUG; everything else is
    /// already printed as the `✗` line.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError => tracing::debug!("User error: {}", self),
            ErrorCategory::NotFound => tracing::debug!("Not found: {}", self),
            ErrorCategory::Configuration => tracing::debug!("Configuration error: {}", self),
            ErrorCategory::Environment => tracing::debug!("Step failed: {}", self),
            ErrorCategory::Internal => tracing::error!("Internal error: {}", self),
        }

        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {}", source);
        }
    }

    /// Messages of every source below the top-level error.
    ///
    /// `Core` is transparent, so its first source repeats the top line and
    /// is skipped.
    fn chain(&self) -> Vec<String> {
        let top = self.to_string();
        let mut causes = Vec::new();
        let mut source = self.source();
        while let Some(err) = source {
            let message = err.to_string();
            if message != top {
                causes.push(message);
            }
            source = err.source();
        }
        causes
    }
}

/// Error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// User input error (validation, invalid arguments).
    UserError,
    /// Resource not found.
    NotFound,
    /// Configuration error.
    Configuration,
    /// A tool, file or parse problem in the surrounding environment.
    Environment,
    /// Internal/system error.
    Internal,
}

// ── IntoCli trait ─────────────────────────────────────────────────────────────

/// Extension trait to convert foreign error types into [`CliError`] at
/// call-sites with a descriptive context message.
pub trait IntoCli<T> {
    /// Convert to `CliResult` attaching a human-readable context message.
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for Result<T, std::io::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::IoError {
            message: format!("{}: {}", f().into(), e),
            source: e,
        })
    }
}

impl<T> IntoCli<T> for anyhow::Result<T> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::ConfigError {
            message: format!("{}: {:#}", f().into(), e),
            source: Some(e.into()),
        })
    }
}
