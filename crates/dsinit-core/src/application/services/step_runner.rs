//! External Process Runner - exit-status policy over the [`ProcessRunner`] port.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{ApplicationError, ports::ProcessRunner},
    domain::{DomainError, Invocation, ProcessOutput, ScriptRecipe},
    error::DsinitResult,
};

/// Result of [`StepRunner::run_script`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptRun {
    Completed(ProcessOutput),
    /// The script's extension has no recipe; nothing was run.
    Unsupported { script: PathBuf },
}

/// Runs external programs and turns a non-zero exit into
/// [`ApplicationError::StepFailed`].
#[derive(Clone)]
pub struct StepRunner {
    runner: Arc<dyn ProcessRunner>,
}

impl StepRunner {
    pub fn new(runner: Arc<dyn ProcessRunner>) -> Self {
        Self { runner }
    }

    /// Run `invocation`; succeed only on exit status zero.
    #[instrument(skip_all, fields(command = %invocation))]
    pub fn execute(&self, invocation: &Invocation) -> DsinitResult<ProcessOutput> {
        let output = self.runner.run(invocation)?;

        if !output.is_success() {
            warn!(code = ?output.code, "Command failed");
            return Err(ApplicationError::StepFailed {
                command: invocation.to_string(),
                code: output.code,
                stderr: output.stderr,
            }
            .into());
        }

        debug!(stdout_bytes = output.stdout.len(), "Command succeeded");
        Ok(output)
    }

    /// Run a `.py` or `.sh` script with `args`, optionally inside `working_dir`.
    ///
    /// An unrecognised extension is logged and reported as
    /// [`ScriptRun::Unsupported`]; it is not an error.
    pub fn run_script(
        &self,
        script: &Path,
        args: &[String],
        working_dir: Option<&Path>,
    ) -> DsinitResult<ScriptRun> {
        let recipe = match ScriptRecipe::from_path(script) {
            Ok(recipe) => recipe,
            Err(DomainError::UnsupportedFormat { path }) => {
                warn!(script = %path.display(), "Unsupported script format");
                return Ok(ScriptRun::Unsupported { script: path });
            }
            Err(other) => return Err(other.into()),
        };

        let mut invocation = recipe.invocation(args.iter().cloned());
        if let Some(dir) = working_dir {
            invocation = invocation.current_dir(dir);
        }

        let output = self.execute(&invocation)?;
        info!(script = %script.display(), "Script completed");
        Ok(ScriptRun::Completed(output))
    }
}
