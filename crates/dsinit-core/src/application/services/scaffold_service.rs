//! Scaffold Service - creates the project skeleton.
//!
//! This service coordinates the scaffolding workflow:
//! 1. Validate the name and resolve the project path
//! 2. Create the directory tree from the layout
//! 3. Write the README (kept if present) and the ignore file (replaced)

use std::path::Path;

use chrono::NaiveDate;
use tracing::{info, instrument};

use crate::{
    application::services::materializer::Materializer,
    domain::{
        GeneratedArtifact, GitignoreTemplate, ProjectIdentity, ProjectLayout, ReadmeTemplate,
        TextTemplate, WriteOutcome,
    },
    error::DsinitResult,
};

pub const README_FILE: &str = "README.md";
pub const IGNORE_FILE: &str = ".gitignore";

/// What a scaffold run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldOutcome {
    pub identity: ProjectIdentity,
    pub readme: WriteOutcome,
    pub ignore_file: WriteOutcome,
}

/// Materializes a [`ProjectLayout`] under a named project directory.
#[derive(Clone)]
pub struct ScaffoldService {
    materializer: Materializer,
    layout: ProjectLayout,
}

impl ScaffoldService {
    pub fn new(materializer: Materializer, layout: ProjectLayout) -> Self {
        Self {
            materializer,
            layout,
        }
    }

    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    /// Scaffold `<base_dir>/<name>`.
    ///
    /// Safe to re-run: existing directories and READMEs are kept.
    #[instrument(skip_all, fields(project = %name.as_ref(), base = %base_dir.display()))]
    pub fn generate(
        &self,
        name: impl AsRef<str>,
        base_dir: &Path,
        today: NaiveDate,
    ) -> DsinitResult<ScaffoldOutcome> {
        let identity = ProjectIdentity::resolve(name, base_dir)?;
        let root = identity.path();

        self.materializer.ensure_tree(root, &self.layout)?;

        let readme = ReadmeTemplate {
            project_name: identity.name().as_str(),
            generated_on: today,
            layout: &self.layout,
        };
        let readme = self.materializer.write(&GeneratedArtifact::skip_if_exists(
            root.join(README_FILE),
            readme.render(),
        ))?;

        let ignore = GitignoreTemplate {
            layout: &self.layout,
        };
        let ignore_file = self.materializer.write(&GeneratedArtifact::overwrite(
            root.join(IGNORE_FILE),
            ignore.render(),
        ))?;

        info!(path = %root.display(), %readme, "Project scaffolded");
        Ok(ScaffoldOutcome {
            identity,
            readme,
            ignore_file,
        })
    }
}
