//! `dsinit snapshot`: write dependency manifests for the active environment.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use dsinit_core::application::SnapshotStatus;

use crate::{cli::SnapshotArgs, commands::Context, error::CliResult, output::OutputManager};

/// Directory used when no target is given and it exists.
const DEFAULT_TARGET: &str = "config";

#[instrument(skip_all)]
pub fn execute(args: SnapshotArgs, ctx: Context) -> CliResult<()> {
    let target = match &args.dir {
        Some(dir) => ctx.existing_dir(dir)?,
        None => default_target(&ctx.cwd),
    };
    let session = ctx.config.secondary_session();
    debug!(target = %target.display(), ?session, "Snapshot target resolved");

    let report = ctx.services().snapshot().snapshot(&target, session);

    report_status(&ctx.output, "Primary", &report.primary)?;
    report_status(&ctx.output, "Environment", &report.secondary)?;
    Ok(())
}

/// `./config` when it exists, otherwise the working directory itself.
fn default_target(cwd: &Path) -> PathBuf {
    let config_dir = cwd.join(DEFAULT_TARGET);
    if config_dir.is_dir() {
        config_dir
    } else {
        cwd.to_path_buf()
    }
}

/// Failures here are best-effort and reported as warnings.
fn report_status(output: &OutputManager, which: &str, status: &SnapshotStatus) -> CliResult<()> {
    match status {
        SnapshotStatus::Written { path } => {
            output.success(&format!("{which} dependencies saved to {}", path.display()))?
        }
        SnapshotStatus::Skipped { reason } => output.info(&format!("{which} snapshot skipped: {reason}"))?,
        SnapshotStatus::Failed { reason } => output.warning(&format!("{which} snapshot failed: {reason}"))?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_target_prefers_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(default_target(dir.path()), dir.path());

        std::fs::create_dir(dir.path().join("config")).unwrap();
        assert_eq!(default_target(dir.path()), dir.path().join("config"));
    }
}
