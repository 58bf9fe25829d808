//! Filesystem Materializer - directory trees and policy-driven file writes.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::{
    application::ports::Filesystem,
    domain::{GeneratedArtifact, ProjectLayout, WriteOutcome, WritePolicy},
    error::DsinitResult,
};

/// Creates directory trees and writes generated artifacts.
///
/// Directory creation is idempotent. Files are written whole through the
/// [`Filesystem`] port, so re-running after a crash is always safe.
#[derive(Clone)]
pub struct Materializer {
    filesystem: Arc<dyn Filesystem>,
}

impl Materializer {
    pub fn new(filesystem: Arc<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    pub fn filesystem(&self) -> &dyn Filesystem {
        self.filesystem.as_ref()
    }

    /// Create `root` and every directory of `layout` beneath it.
    #[instrument(skip_all, fields(root = %root.display()))]
    pub fn ensure_tree(&self, root: &Path, layout: &ProjectLayout) -> DsinitResult<()> {
        self.filesystem.create_dir_all(root)?;
        for dir in layout.directories() {
            self.filesystem.create_dir_all(&root.join(dir))?;
        }
        debug!("Directory tree ensured");
        Ok(())
    }

    /// Write `artifact` according to its policy.
    pub fn write(&self, artifact: &GeneratedArtifact) -> DsinitResult<WriteOutcome> {
        if artifact.policy == WritePolicy::SkipIfExists && self.filesystem.exists(&artifact.path) {
            debug!(path = %artifact.path.display(), "Exists, skipping");
            return Ok(WriteOutcome::Skipped);
        }

        self.filesystem
            .write_file(&artifact.path, &artifact.content)?;
        debug!(path = %artifact.path.display(), "Written");
        Ok(WriteOutcome::Written)
    }

    /// Shorthand for `write(&GeneratedArtifact::new(..))`.
    pub fn write_file(
        &self,
        path: &Path,
        content: &str,
        policy: WritePolicy,
    ) -> DsinitResult<WriteOutcome> {
        self.write(&GeneratedArtifact::new(path, content, policy))
    }
}
