//! Boilerplate/Notebook Initializer - seeds scripts, notebooks and modules.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, instrument};

use crate::{
    application::{ports::DocumentSerializer, services::materializer::Materializer},
    domain::{
        GeneratedArtifact, ModuleTemplate, NotebookTemplate, ProjectName, ScriptKind,
        ScriptTemplate, TextTemplate, WriteOutcome,
    },
    error::DsinitResult,
};

pub const DEFAULT_MODULE_TITLE: &str = "Script Name";
pub const DEFAULT_MODULE_DESCRIPTION: &str = "Contains functions related to this module";

/// A boilerplate file and whether it was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedFile {
    pub path: PathBuf,
    pub outcome: WriteOutcome,
}

#[derive(Clone)]
pub struct ScriptService {
    materializer: Materializer,
    documents: Arc<dyn DocumentSerializer>,
}

impl ScriptService {
    pub fn new(materializer: Materializer, documents: Arc<dyn DocumentSerializer>) -> Self {
        Self {
            materializer,
            documents,
        }
    }

    /// Write `<dir>/<name>.<ext>`; an existing file is left alone.
    #[instrument(skip_all, fields(name = %name.as_ref(), kind = %kind, dir = %dir.display()))]
    pub fn create_script(
        &self,
        name: impl AsRef<str>,
        kind: ScriptKind,
        dir: &Path,
        today: NaiveDate,
    ) -> DsinitResult<CreatedFile> {
        let (stem, path) = target_path(name.as_ref(), kind.extension(), dir)?;

        let content = match kind {
            ScriptKind::Python => ScriptTemplate {
                script_name: &stem,
                created_on: today,
            }
            .render(),
            ScriptKind::Notebook => {
                let notebook = NotebookTemplate {
                    notebook_name: &stem,
                    created_on: today,
                }
                .render();
                self.documents.notebook_to_json(&notebook)?
            }
        };

        self.write(path, content)
    }

    /// Write a `src/`-style module `<dir>/<name>.py`; an existing file is left alone.
    #[instrument(skip_all, fields(name = %name.as_ref(), dir = %dir.display()))]
    pub fn create_module(
        &self,
        name: impl AsRef<str>,
        title: Option<&str>,
        description: Option<&str>,
        dir: &Path,
        today: NaiveDate,
    ) -> DsinitResult<CreatedFile> {
        let (stem, path) = target_path(name.as_ref(), "py", dir)?;
        let content = ModuleTemplate {
            module_name: &stem,
            title: title.unwrap_or(DEFAULT_MODULE_TITLE),
            description: description.unwrap_or(DEFAULT_MODULE_DESCRIPTION),
            created_on: today,
        }
        .render();

        self.write(path, content)
    }

    fn write(&self, path: PathBuf, content: String) -> DsinitResult<CreatedFile> {
        let outcome = self
            .materializer
            .write(&GeneratedArtifact::skip_if_exists(&path, content))?;
        if outcome.is_written() {
            info!(path = %path.display(), "Created");
        } else {
            info!(path = %path.display(), "Already exists, skipping");
        }
        Ok(CreatedFile { path, outcome })
    }
}

/// `(stem, dir/stem.ext)`; a name that already carries `.ext` is not doubled.
fn target_path(name: &str, extension: &str, dir: &Path) -> DsinitResult<(String, PathBuf)> {
    let name = ProjectName::parse(name)?;
    let suffix = format!(".{extension}");
    let stem = name
        .as_str()
        .strip_suffix(&suffix)
        .filter(|s| !s.is_empty())
        .unwrap_or(name.as_str())
        .to_string();
    let path = dir.join(format!("{stem}{suffix}"));
    Ok((stem, path))
}
