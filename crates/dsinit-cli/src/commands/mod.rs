//! Command handlers.
//!
//! Each handler turns parsed arguments into calls on the core services and
//! reports the result through [`OutputManager`].  Adapters are chosen here
//! and nowhere else.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{Local, NaiveDate};

use dsinit_adapters::{LocalFilesystem, SerdeDocuments, SystemProcessRunner};
use dsinit_core::application::{
    DocumentSerializer, Materializer, ScaffoldService, ScriptService, SetupService,
    SnapshotService, StepRunner,
};

use crate::{
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

pub mod completions;
pub mod config;
pub mod new_module;
pub mod new_script;
pub mod scaffold;
pub mod setup;
pub mod snapshot;

/// Everything a handler needs besides its own arguments.
pub struct Context {
    pub config: AppConfig,
    pub output: OutputManager,
    /// Base directory for relative paths.
    pub cwd: PathBuf,
    pub today: NaiveDate,
}

impl Context {
    pub fn new(config: AppConfig, output: OutputManager, cwd: PathBuf) -> Self {
        Self {
            config,
            output,
            cwd,
            today: Local::now().date_naive(),
        }
    }

    /// `path` made absolute against the working directory.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }

    /// Like [`Self::resolve`], but the directory must already exist.
    pub fn existing_dir(&self, path: &Path) -> CliResult<PathBuf> {
        let resolved = self.resolve(path);
        if resolved.is_dir() {
            Ok(resolved)
        } else {
            Err(CliError::DirectoryNotFound { path: resolved })
        }
    }

    pub fn services(&self) -> Services {
        Services::production(&self.config)
    }
}

/// Core services wired to the production adapters.
pub struct Services {
    pub steps: StepRunner,
    pub materializer: Materializer,
    pub documents: Arc<dyn DocumentSerializer>,
    config: AppConfig,
}

impl Services {
    pub fn production(config: &AppConfig) -> Self {
        Self {
            steps: StepRunner::new(Arc::new(SystemProcessRunner::new())),
            materializer: Materializer::new(Arc::new(LocalFilesystem::new())),
            documents: Arc::new(SerdeDocuments::new()),
            config: config.clone(),
        }
    }

    pub fn scaffold(&self) -> ScaffoldService {
        ScaffoldService::new(self.materializer.clone(), self.config.layout())
    }

    pub fn snapshot(&self) -> SnapshotService {
        SnapshotService::new(
            self.steps.clone(),
            self.materializer.clone(),
            Arc::clone(&self.documents),
            self.config.snapshot_config(),
        )
    }

    pub fn scripts(&self) -> ScriptService {
        ScriptService::new(self.materializer.clone(), Arc::clone(&self.documents))
    }

    pub fn setup(&self) -> CliResult<SetupService> {
        let options = self.config.setup_options().map_err(CliError::config)?;
        Ok(SetupService::new(
            self.scaffold(),
            self.snapshot(),
            self.steps.clone(),
            self.materializer.clone(),
            options,
        ))
    }
}
