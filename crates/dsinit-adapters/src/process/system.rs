//! Process runner backed by `std::process::Command`.

use std::process::{Command, Stdio};

use dsinit_core::{
    application::{ApplicationError, ports::ProcessRunner},
    domain::{Invocation, ProcessOutput},
    error::DsinitResult,
};
use tracing::debug;

/// Runs programs on the host, blocking until they exit.
///
/// stdin is closed; stdout and stderr are captured.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProcessRunner;

impl SystemProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessRunner for SystemProcessRunner {
    fn run(&self, invocation: &Invocation) -> DsinitResult<ProcessOutput> {
        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &invocation.working_dir {
            cmd.current_dir(dir);
        }

        debug!(command = %invocation, "Spawning");
        let output = cmd.output().map_err(|e| ApplicationError::ToolUnavailable {
            command: invocation.to_string(),
            reason: e.to_string(),
        })?;

        Ok(ProcessOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use dsinit_core::error::DsinitError;

    #[test]
    fn captures_stdout_and_exit_code() {
        let out = SystemProcessRunner
            .run(&Invocation::new("sh").args(["-c", "echo hello; exit 3"]))
            .unwrap();
        assert_eq!(out.code, Some(3));
        assert_eq!(out.stdout, "hello\n");
    }

    #[test]
    fn captures_stderr() {
        let out = SystemProcessRunner
            .run(&Invocation::new("sh").args(["-c", "echo oops >&2"]))
            .unwrap();
        assert!(out.is_success());
        assert_eq!(out.stderr, "oops\n");
    }

    #[test]
    fn working_dir_applies_to_child_only() {
        let dir = tempfile::tempdir().unwrap();
        let before = std::env::current_dir().unwrap();

        let out = SystemProcessRunner
            .run(&Invocation::new("pwd").current_dir(dir.path()))
            .unwrap();

        let reported = std::path::PathBuf::from(out.stdout.trim());
        assert_eq!(
            reported.canonicalize().unwrap(),
            dir.path().canonicalize().unwrap()
        );
        assert_eq!(std::env::current_dir().unwrap(), before);
    }

    #[test]
    fn missing_program_is_tool_unavailable() {
        let err = SystemProcessRunner
            .run(&Invocation::new("dsinit-no-such-program-4f1c"))
            .unwrap_err();
        assert!(matches!(
            err,
            DsinitError::Application(ApplicationError::ToolUnavailable { .. })
        ));
    }
}
