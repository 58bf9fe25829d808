//! Setup Orchestrator - runs the full project setup pipeline.
//!
//! Stages run in a fixed order (see [`Stage::ORDER`]):
//! 1. Scaffold the project tree
//! 2. Snapshot dependencies into the config directory (best effort)
//! 3. Initialize version control
//! 4. Write the logging helper into the project
//!
//! A fatal stage failure stops the run with [`DsinitError::Halted`]. The
//! first commit is never made; the report carries the command for it.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::{error, info, instrument, warn};

use crate::{
    application::services::{
        materializer::Materializer,
        scaffold_service::ScaffoldService,
        snapshot_service::SnapshotService,
        step_runner::{ScriptRun, StepRunner},
    },
    domain::{
        GeneratedArtifact, Invocation, LoggingSetupTemplate, PipelineState, ProjectIdentity,
        ScriptRecipe, SecondarySession, Stage, StepOutcome, StepRecord, TextTemplate, VcsInit,
    },
    error::{DsinitError, DsinitResult},
};

pub const LOGGING_FILE: &str = "logging_setup.py";
pub const DEFAULT_LOG_FILE: &str = "project.log";
pub const FOLLOW_UP_COMMIT_MESSAGE: &str = "Initial project setup";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupOptions {
    /// Snapshot target, relative to the project root.
    pub config_dir: PathBuf,
    /// Directory of the logging helper, relative to the project root.
    pub logging_dir: PathBuf,
    pub vcs: VcsInit,
    /// Script suggested for the first commit instead of plain git.
    pub follow_up_script: Option<PathBuf>,
}

impl Default for SetupOptions {
    fn default() -> Self {
        Self {
            config_dir: PathBuf::from("config"),
            logging_dir: PathBuf::from("src"),
            vcs: VcsInit::default(),
            follow_up_script: None,
        }
    }
}

/// Progress callbacks, one pair per stage.
pub trait SetupObserver {
    fn stage_started(&self, _stage: Stage) {}
    fn stage_finished(&self, _record: &StepRecord) {}
}

/// Observer that ignores every event.
pub struct NoopObserver;

impl SetupObserver for NoopObserver {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupReport {
    pub identity: ProjectIdentity,
    pub steps: Vec<StepRecord>,
    /// Command the operator runs to make the first commit.
    pub follow_up: String,
}

impl SetupReport {
    pub fn outcome(&self, stage: Stage) -> Option<&StepOutcome> {
        self.steps
            .iter()
            .find(|r| r.stage == stage)
            .map(|r| &r.outcome)
    }
}

pub struct SetupService {
    scaffold: ScaffoldService,
    snapshot: SnapshotService,
    steps: StepRunner,
    materializer: Materializer,
    options: SetupOptions,
}

impl SetupService {
    pub fn new(
        scaffold: ScaffoldService,
        snapshot: SnapshotService,
        steps: StepRunner,
        materializer: Materializer,
        options: SetupOptions,
    ) -> Self {
        Self {
            scaffold,
            snapshot,
            steps,
            materializer,
            options,
        }
    }

    pub fn options(&self) -> &SetupOptions {
        &self.options
    }

    /// Run every stage for `<base_dir>/<name>`.
    ///
    /// An invalid name fails before any stage starts.
    #[instrument(skip_all, fields(project = %name.as_ref(), session = ?session))]
    pub fn run(
        &self,
        name: impl AsRef<str>,
        base_dir: &Path,
        today: NaiveDate,
        session: SecondarySession,
        observer: &dyn SetupObserver,
    ) -> DsinitResult<SetupReport> {
        let identity = ProjectIdentity::resolve(name, base_dir)?;
        info!(path = %identity.path().display(), "Setting up project");

        let mut steps = Vec::with_capacity(Stage::ORDER.len());
        let mut state = PipelineState::Start.advance();

        while let PipelineState::Running(stage) = state {
            observer.stage_started(stage);

            let record = match self.run_stage(stage, &identity, base_dir, today, session) {
                Ok(outcome) => StepRecord::new(stage, outcome),
                Err(e) if !stage.is_fatal() => {
                    warn!(%stage, error = %e, "Step degraded");
                    StepRecord::new(stage, StepOutcome::Degraded {
                        reason: e.to_string(),
                    })
                }
                Err(e) => {
                    error!(%stage, error = %e, "Step failed");
                    let record = StepRecord::new(stage, StepOutcome::Failed {
                        reason: e.to_string(),
                    });
                    observer.stage_finished(&record);
                    return Err(DsinitError::halted(stage, e));
                }
            };

            observer.stage_finished(&record);
            steps.push(record);
            state = state.advance();
        }

        let follow_up = self.follow_up(&identity);
        info!("Project setup complete");
        Ok(SetupReport {
            identity,
            steps,
            follow_up,
        })
    }

    fn run_stage(
        &self,
        stage: Stage,
        identity: &ProjectIdentity,
        base_dir: &Path,
        today: NaiveDate,
        session: SecondarySession,
    ) -> DsinitResult<StepOutcome> {
        match stage {
            Stage::Scaffold => {
                let outcome = self
                    .scaffold
                    .generate(identity.name().as_str(), base_dir, today)?;
                Ok(StepOutcome::Completed {
                    detail: format!("created {}", outcome.identity.path().display()),
                })
            }
            Stage::Snapshot => self.snapshot_stage(identity, session),
            Stage::VersionControlInit => self.vcs_stage(identity),
            Stage::WriteLoggingArtifact => self.logging_stage(identity),
        }
    }

    fn snapshot_stage(
        &self,
        identity: &ProjectIdentity,
        session: SecondarySession,
    ) -> DsinitResult<StepOutcome> {
        let target = identity.path().join(&self.options.config_dir);
        self.materializer.filesystem().create_dir_all(&target)?;

        let report = self.snapshot.snapshot(&target, session);
        if report.has_failures() {
            return Ok(StepOutcome::Degraded {
                reason: report.failures().join("; "),
            });
        }
        Ok(StepOutcome::Completed {
            detail: format!("dependencies saved in {}", target.display()),
        })
    }

    fn vcs_stage(&self, identity: &ProjectIdentity) -> DsinitResult<StepOutcome> {
        let root = identity.path();
        match &self.options.vcs {
            VcsInit::Git { binary } => {
                let invocation = Invocation::new(binary.as_str())
                    .arg("init")
                    .arg(root.display().to_string());
                self.steps.execute(&invocation)?;
                Ok(StepOutcome::Completed {
                    detail: "initialized git repository".into(),
                })
            }
            VcsInit::Script {
                script,
                commit_message,
                branch,
            } => {
                let args = [commit_message.clone(), branch.clone()];
                match self.steps.run_script(script, &args, Some(root))? {
                    ScriptRun::Completed(_) => Ok(StepOutcome::Completed {
                        detail: format!("ran {}", script.display()),
                    }),
                    ScriptRun::Unsupported { script } => Ok(StepOutcome::Skipped {
                        reason: format!("unsupported script format: {}", script.display()),
                    }),
                }
            }
        }
    }

    fn logging_stage(&self, identity: &ProjectIdentity) -> DsinitResult<StepOutcome> {
        let dir = identity.path().join(&self.options.logging_dir);
        self.materializer.filesystem().create_dir_all(&dir)?;

        let path = dir.join(LOGGING_FILE);
        let content = LoggingSetupTemplate {
            default_log_file: DEFAULT_LOG_FILE,
        }
        .render();
        self.materializer
            .write(&GeneratedArtifact::overwrite(&path, content))?;

        Ok(StepOutcome::Completed {
            detail: format!("created {}", path.display()),
        })
    }

    fn follow_up(&self, identity: &ProjectIdentity) -> String {
        let cd = format!("cd {}", double_quoted(&identity.path().display().to_string()));
        let script = self.options.follow_up_script.as_deref().and_then(|s| {
            ScriptRecipe::from_path(s)
                .inspect_err(|e| warn!(script = %s.display(), error = %e, "Follow-up script ignored"))
                .ok()
        });

        match script {
            Some(recipe) => format!(
                "{cd} && {} {} \"{FOLLOW_UP_COMMIT_MESSAGE}\"",
                recipe.interpreter(),
                double_quoted(&recipe.script().display().to_string())
            ),
            None => format!("{cd} && git add -A && git commit -m \"{FOLLOW_UP_COMMIT_MESSAGE}\""),
        }
    }
}

/// Wrap `text` in double quotes for a POSIX shell.
fn double_quoted(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        if matches!(c, '"' | '\\' | '$' | '`') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}
