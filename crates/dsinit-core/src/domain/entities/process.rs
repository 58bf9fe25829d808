use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::error::DomainError;

/// One external process call.
///
/// `working_dir` applies to the child only; the caller's own working
/// directory is never changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: Option<PathBuf>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            working_dir: None,
        }
    }

    /// Build from an argv-style list; `None` if the list is empty.
    pub fn from_argv<S: AsRef<str>>(argv: &[S]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self::new(program.as_ref()).args(args.iter().map(|a| a.as_ref().to_string())))
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " \"{arg}\"")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// Captured result of a finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// `None` when the process was terminated by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn failure(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }
}

/// A script the pipeline knows how to run.
///
/// The set is closed: anything else fails to parse with
/// [`DomainError::UnsupportedFormat`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptRecipe {
    Python { script: PathBuf },
    Shell { script: PathBuf },
}

impl ScriptRecipe {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some("py") => Ok(Self::Python {
                script: path.to_path_buf(),
            }),
            Some("sh") => Ok(Self::Shell {
                script: path.to_path_buf(),
            }),
            _ => Err(DomainError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    pub fn interpreter(&self) -> &'static str {
        match self {
            Self::Python { .. } => "python3",
            Self::Shell { .. } => "bash",
        }
    }

    pub fn script(&self) -> &Path {
        match self {
            Self::Python { script } | Self::Shell { script } => script,
        }
    }

    pub fn invocation<I, S>(&self, args: I) -> Invocation
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Invocation::new(self.interpreter())
            .arg(self.script().display().to_string())
            .args(args)
    }
}

/// How the project's version-control root is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VcsInit {
    /// `<binary> init <project_path>`.
    Git { binary: String },
    /// `<interpreter> <script> <commit_message> <branch>`, run inside the project.
    Script {
        script: PathBuf,
        commit_message: String,
        branch: String,
    },
}

impl Default for VcsInit {
    fn default() -> Self {
        Self::Git {
            binary: "git".into(),
        }
    }
}
