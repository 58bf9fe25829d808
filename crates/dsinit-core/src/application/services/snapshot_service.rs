//! Environment Snapshotter - dependency manifests of the active environment.
//!
//! Two independent, best-effort captures:
//! - the primary package list (`pip freeze`), written verbatim
//! - the secondary environment export (`conda env export`), pins stripped
//!
//! Nothing here returns `Err`. Every failure is logged and reported in a
//! [`SnapshotReport`] so a setup run can carry on.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::{
    application::{
        ports::DocumentSerializer,
        services::{materializer::Materializer, step_runner::StepRunner},
    },
    domain::{GeneratedArtifact, Invocation, SecondarySession},
    error::DsinitResult,
};

/// Commands and file names used by the snapshotter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotConfig {
    pub primary_command: Vec<String>,
    pub primary_manifest: String,
    pub secondary_command: Vec<String>,
    pub secondary_manifest: String,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            primary_command: ["python3", "-m", "pip", "freeze"].map(String::from).to_vec(),
            primary_manifest: "requirements.txt".into(),
            secondary_command: ["conda", "env", "export"].map(String::from).to_vec(),
            secondary_manifest: "environment.yml".into(),
        }
    }
}

/// Result of one capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotStatus {
    Written { path: PathBuf },
    Skipped { reason: String },
    Failed { reason: String },
}

impl SnapshotStatus {
    pub fn is_written(&self) -> bool {
        matches!(self, Self::Written { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

impl fmt::Display for SnapshotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Written { path } => write!(f, "wrote {}", path.display()),
            Self::Skipped { reason } => write!(f, "skipped ({reason})"),
            Self::Failed { reason } => write!(f, "failed ({reason})"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotReport {
    pub primary: SnapshotStatus,
    pub secondary: SnapshotStatus,
}

impl SnapshotReport {
    pub fn has_failures(&self) -> bool {
        self.primary.is_failed() || self.secondary.is_failed()
    }

    /// `"<manifest>: <reason>"` for each failed capture.
    pub fn failures(&self) -> Vec<String> {
        [("primary", &self.primary), ("secondary", &self.secondary)]
            .into_iter()
            .filter_map(|(which, status)| match status {
                SnapshotStatus::Failed { reason } => Some(format!("{which} snapshot: {reason}")),
                _ => None,
            })
            .collect()
    }
}

#[derive(Clone)]
pub struct SnapshotService {
    steps: StepRunner,
    materializer: Materializer,
    documents: Arc<dyn DocumentSerializer>,
    config: SnapshotConfig,
}

impl SnapshotService {
    pub fn new(
        steps: StepRunner,
        materializer: Materializer,
        documents: Arc<dyn DocumentSerializer>,
        config: SnapshotConfig,
    ) -> Self {
        Self {
            steps,
            materializer,
            documents,
            config,
        }
    }

    pub fn config(&self) -> &SnapshotConfig {
        &self.config
    }

    /// Both captures into `target_dir`.
    #[instrument(skip_all, fields(target = %target_dir.display(), session = ?session))]
    pub fn snapshot(&self, target_dir: &Path, session: SecondarySession) -> SnapshotReport {
        SnapshotReport {
            primary: self.snapshot_primary(target_dir),
            secondary: self.snapshot_secondary(target_dir, session),
        }
    }

    /// Write the freeze command's stdout to `<target_dir>/<primary_manifest>`.
    pub fn snapshot_primary(&self, target_dir: &Path) -> SnapshotStatus {
        let Some(invocation) = Invocation::from_argv(&self.config.primary_command) else {
            return SnapshotStatus::Skipped {
                reason: "no freeze command configured".into(),
            };
        };

        let path = target_dir.join(&self.config.primary_manifest);
        match self.capture_primary(&invocation, &path) {
            Ok(()) => {
                info!(path = %path.display(), "Primary dependencies saved");
                SnapshotStatus::Written { path }
            }
            Err(e) => {
                warn!(error = %e, "Could not save primary dependencies");
                SnapshotStatus::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Export the secondary environment, strip pins, and write YAML to
    /// `<target_dir>/<secondary_manifest>`. Only attempted when `session`
    /// is active.
    pub fn snapshot_secondary(&self, target_dir: &Path, session: SecondarySession) -> SnapshotStatus {
        if !session.is_active() {
            info!("No active secondary environment, skipping export");
            return SnapshotStatus::Skipped {
                reason: "no active secondary environment".into(),
            };
        }
        let Some(invocation) = Invocation::from_argv(&self.config.secondary_command) else {
            return SnapshotStatus::Skipped {
                reason: "no export command configured".into(),
            };
        };

        let path = target_dir.join(&self.config.secondary_manifest);
        match self.capture_secondary(&invocation, &path) {
            Ok(()) => {
                info!(path = %path.display(), "Environment saved");
                SnapshotStatus::Written { path }
            }
            Err(e) => {
                warn!(error = %e, "Could not save environment");
                SnapshotStatus::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }

    fn capture_primary(&self, invocation: &Invocation, path: &Path) -> DsinitResult<()> {
        let output = self.steps.execute(invocation)?;
        self.materializer
            .write(&GeneratedArtifact::overwrite(path, output.stdout))?;
        Ok(())
    }

    fn capture_secondary(&self, invocation: &Invocation, path: &Path) -> DsinitResult<()> {
        let output = self.steps.execute(invocation)?;
        let manifest = self
            .documents
            .parse_environment(&output.stdout)?
            .strip_version_pins();
        let yaml = self.documents.environment_to_yaml(&manifest)?;
        self.materializer
            .write(&GeneratedArtifact::overwrite(path, yaml))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ApplicationError;
    use crate::application::ports::output::{MockDocumentSerializer, MockProcessRunner};
    use crate::application::services::test_support::FakeFilesystem;
    use crate::domain::{DependencyEntry, EnvironmentManifest, ProcessOutput};

    struct Fixture {
        fs: Arc<FakeFilesystem>,
        runner: MockProcessRunner,
        documents: MockDocumentSerializer,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                fs: Arc::new(FakeFilesystem::default()),
                runner: MockProcessRunner::new(),
                documents: MockDocumentSerializer::new(),
            }
        }

        fn build(self) -> (Arc<FakeFilesystem>, SnapshotService) {
            let service = SnapshotService::new(
                StepRunner::new(Arc::new(self.runner)),
                Materializer::new(self.fs.clone()),
                Arc::new(self.documents),
                SnapshotConfig::default(),
            );
            (self.fs, service)
        }
    }

    #[test]
    fn primary_writes_stdout_verbatim() {
        let mut fx = Fixture::new();
        fx.runner
            .expect_run()
            .withf(|inv| inv.program == "python3" && inv.args == ["-m", "pip", "freeze"])
            .times(1)
            .returning(|_| Ok(ProcessOutput::success("numpy==1.26.0\npandas==2.1.0\n")));
        let (fs, service) = fx.build();

        let status = service.snapshot_primary(Path::new("/p/config"));

        assert_eq!(
            status,
            SnapshotStatus::Written {
                path: PathBuf::from("/p/config/requirements.txt")
            }
        );
        assert_eq!(
            fs.file("/p/config/requirements.txt").as_deref(),
            Some("numpy==1.26.0\npandas==2.1.0\n")
        );
    }

    #[test]
    fn inactive_session_never_runs_export() {
        let mut fx = Fixture::new();
        fx.runner.expect_run().never();
        let (fs, service) = fx.build();

        let status = service.snapshot_secondary(Path::new("/p/config"), SecondarySession::Inactive);

        assert!(matches!(status, SnapshotStatus::Skipped { .. }));
        assert!(fs.file("/p/config/environment.yml").is_none());
    }

    #[test]
    fn active_session_strips_pins_before_writing() {
        let mut fx = Fixture::new();
        fx.runner
            .expect_run()
            .withf(|inv| inv.program == "conda")
            .returning(|_| Ok(ProcessOutput::success("dependencies: [numpy=1.26.0]")));
        fx.documents.expect_parse_environment().returning(|_| {
            Ok(EnvironmentManifest {
                dependencies: vec![
                    DependencyEntry::Package("numpy=1.26.0".into()),
                    DependencyEntry::Package("scipy=1.11.0".into()),
                ],
                ..Default::default()
            })
        });
        fx.documents
            .expect_environment_to_yaml()
            .withf(|m| m.package_names().collect::<Vec<_>>() == ["numpy", "scipy"])
            .times(1)
            .returning(|_| Ok("dependencies:\n- numpy\n- scipy\n".into()));
        let (fs, service) = fx.build();

        let status = service.snapshot_secondary(Path::new("/p/config"), SecondarySession::Active);

        assert!(status.is_written());
        assert_eq!(
            fs.file("/p/config/environment.yml").as_deref(),
            Some("dependencies:\n- numpy\n- scipy\n")
        );
    }

    #[test]
    fn missing_tool_is_reported_not_raised() {
        let mut fx = Fixture::new();
        fx.runner.expect_run().returning(|inv| {
            Err(ApplicationError::ToolUnavailable {
                command: inv.to_string(),
                reason: "No such file or directory".into(),
            }
            .into())
        });
        let (fs, service) = fx.build();

        let report = service.snapshot(Path::new("/p/config"), SecondarySession::Active);

        assert!(report.primary.is_failed());
        assert!(report.secondary.is_failed());
        assert_eq!(report.failures().len(), 2);
        assert!(fs.file("/p/config/requirements.txt").is_none());
    }

    #[test]
    fn parse_failure_leaves_primary_intact() {
        let mut fx = Fixture::new();
        fx.runner
            .expect_run()
            .returning(|_| Ok(ProcessOutput::success("::: not yaml")));
        fx.documents.expect_parse_environment().returning(|_| {
            Err(ApplicationError::ParseFailed {
                what: "environment export".into(),
                reason: "invalid".into(),
            }
            .into())
        });
        let (fs, service) = fx.build();

        let report = service.snapshot(Path::new("/p"), SecondarySession::Active);

        assert!(report.primary.is_written());
        assert!(report.secondary.is_failed());
        assert!(fs.file("/p/requirements.txt").is_some());
        assert!(fs.file("/p/environment.yml").is_none());
    }

    #[test]
    fn write_failure_is_reported() {
        let mut fx = Fixture::new();
        fx.fs = Arc::new(FakeFilesystem::default().read_only("/locked"));
        fx.runner
            .expect_run()
            .returning(|_| Ok(ProcessOutput::success("x==1\n")));
        let (_, service) = fx.build();

        assert!(service.snapshot_primary(Path::new("/locked")).is_failed());
    }

    #[test]
    fn non_zero_exit_is_reported() {
        let mut fx = Fixture::new();
        fx.runner
            .expect_run()
            .returning(|_| Ok(ProcessOutput::failure(1, "No module named pip")));
        let (_, service) = fx.build();

        let status = service.snapshot_primary(Path::new("/p"));
        let SnapshotStatus::Failed { reason } = status else {
            panic!("expected failure, got {status:?}");
        };
        assert!(reason.contains("No module named pip"), "{reason}");
    }
}
