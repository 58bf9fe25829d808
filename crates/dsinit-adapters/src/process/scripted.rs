//! Canned process runner for tests and dry runs.

use std::sync::{Arc, Mutex};

use dsinit_core::{
    application::{ApplicationError, ports::ProcessRunner},
    domain::{Invocation, ProcessOutput},
    error::DsinitResult,
};

#[derive(Debug, Clone)]
enum Reply {
    Output(ProcessOutput),
    Missing,
}

#[derive(Debug, Default)]
struct ScriptedInner {
    rules: Vec<(String, Reply)>,
    calls: Vec<Invocation>,
}

/// Answers invocations from a table keyed by program name and records
/// every call.
///
/// Programs without a rule succeed with empty output. Cloning shares state.
#[derive(Debug, Clone, Default)]
pub struct ScriptedProcessRunner {
    inner: Arc<Mutex<ScriptedInner>>,
}

impl ScriptedProcessRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply to `program` with `output`.
    pub fn with_output(self, program: impl Into<String>, output: ProcessOutput) -> Self {
        self.push(program.into(), Reply::Output(output));
        self
    }

    /// Treat `program` as not installed.
    pub fn with_missing(self, program: impl Into<String>) -> Self {
        self.push(program.into(), Reply::Missing);
        self
    }

    /// Every invocation seen so far, in order.
    pub fn calls(&self) -> Vec<Invocation> {
        self.inner
            .lock()
            .map(|inner| inner.calls.clone())
            .unwrap_or_default()
    }

    pub fn programs(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.program).collect()
    }

    fn push(&self, program: String, reply: Reply) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.rules.push((program, reply));
        }
    }
}

impl ProcessRunner for ScriptedProcessRunner {
    fn run(&self, invocation: &Invocation) -> DsinitResult<ProcessOutput> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| ApplicationError::LockPoisoned)?;
        inner.calls.push(invocation.clone());

        let reply = inner
            .rules
            .iter()
            .rev()
            .find(|(program, _)| *program == invocation.program)
            .map(|(_, reply)| reply.clone());

        match reply {
            Some(Reply::Output(output)) => Ok(output),
            Some(Reply::Missing) => Err(ApplicationError::ToolUnavailable {
                command: invocation.to_string(),
                reason: "No such file or directory (os error 2)".into(),
            }
            .into()),
            None => Ok(ProcessOutput::success("")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replies_by_program_and_records_calls() {
        let runner = ScriptedProcessRunner::new()
            .with_output("python3", ProcessOutput::success("numpy==1.26.0\n"))
            .with_missing("conda");

        let out = runner
            .run(&Invocation::new("python3").args(["-m", "pip", "freeze"]))
            .unwrap();
        assert_eq!(out.stdout, "numpy==1.26.0\n");
        assert!(runner.run(&Invocation::new("conda")).is_err());
        assert!(runner.run(&Invocation::new("git")).unwrap().is_success());

        assert_eq!(runner.programs(), ["python3", "conda", "git"]);
    }

    #[test]
    fn later_rule_wins() {
        let runner = ScriptedProcessRunner::new()
            .with_output("git", ProcessOutput::success(""))
            .with_output("git", ProcessOutput::failure(128, "fatal"));

        assert_eq!(runner.run(&Invocation::new("git")).unwrap().code, Some(128));
    }
}
