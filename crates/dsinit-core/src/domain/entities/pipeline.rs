use std::fmt;

/// The fixed steps of a setup run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Scaffold,
    Snapshot,
    VersionControlInit,
    WriteLoggingArtifact,
}

impl Stage {
    pub const ORDER: [Stage; 4] = [
        Stage::Scaffold,
        Stage::Snapshot,
        Stage::VersionControlInit,
        Stage::WriteLoggingArtifact,
    ];

    pub fn first() -> Self {
        Self::ORDER[0]
    }

    pub fn next(self) -> Option<Self> {
        let idx = Self::ORDER.iter().position(|s| *s == self)?;
        Self::ORDER.get(idx + 1).copied()
    }

    /// Whether an error in this stage halts the pipeline.
    pub fn is_fatal(self) -> bool {
        !matches!(self, Self::Snapshot)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scaffold => "scaffold",
            Self::Snapshot => "snapshot",
            Self::VersionControlInit => "version-control init",
            Self::WriteLoggingArtifact => "logging setup",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `Start → Scaffold → Snapshot → VersionControlInit → WriteLoggingArtifact → Done`,
/// with `Failed` reachable from any fatal stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Start,
    Running(Stage),
    Done,
    Failed(Stage),
}

impl PipelineState {
    /// Advance after the current stage finished without a fatal error.
    pub fn advance(self) -> Self {
        match self {
            Self::Start => Self::Running(Stage::first()),
            Self::Running(stage) => stage.next().map_or(Self::Done, Self::Running),
            terminal => terminal,
        }
    }

    pub fn fail(self) -> Self {
        match self {
            Self::Running(stage) => Self::Failed(stage),
            other => other,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Completed { detail: String },
    /// Finished, but a best-effort part of it did not.
    Degraded { reason: String },
    Skipped { reason: String },
    Failed { reason: String },
}

impl StepOutcome {
    pub fn message(&self) -> &str {
        match self {
            Self::Completed { detail } => detail,
            Self::Degraded { reason } | Self::Skipped { reason } | Self::Failed { reason } => {
                reason
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRecord {
    pub stage: Stage,
    pub outcome: StepOutcome,
}

impl StepRecord {
    pub fn new(stage: Stage, outcome: StepOutcome) -> Self {
        Self { stage, outcome }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_machine_walks_every_stage_in_order() {
        let mut state = PipelineState::Start;
        let mut visited = Vec::new();
        loop {
            state = state.advance();
            match state {
                PipelineState::Running(stage) => visited.push(stage),
                PipelineState::Done => break,
                other => panic!("unexpected state {other:?}"),
            }
        }
        assert_eq!(visited, Stage::ORDER);
    }

    #[test]
    fn failure_is_terminal() {
        let failed = PipelineState::Running(Stage::VersionControlInit).fail();
        assert_eq!(failed, PipelineState::Failed(Stage::VersionControlInit));
        assert!(failed.is_terminal());
        assert_eq!(failed.advance(), failed);
    }

    #[test]
    fn only_snapshot_is_best_effort() {
        assert!(Stage::Scaffold.is_fatal());
        assert!(!Stage::Snapshot.is_fatal());
        assert!(Stage::VersionControlInit.is_fatal());
        assert!(Stage::WriteLoggingArtifact.is_fatal());
    }
}
