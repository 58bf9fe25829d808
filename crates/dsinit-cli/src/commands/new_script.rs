//! `dsinit new-script`: create a script or notebook with boilerplate.

use std::path::Path;

use tracing::instrument;

use dsinit_core::application::CreatedFile;

use crate::{cli::NewScriptArgs, commands::Context, error::CliResult, output::OutputManager};

#[instrument(skip_all, fields(name = %args.name, kind = %args.kind))]
pub fn execute(args: NewScriptArgs, ctx: Context) -> CliResult<()> {
    let dir = ctx.existing_dir(args.dir.as_deref().unwrap_or(Path::new(".")))?;
    let created = ctx
        .services()
        .scripts()
        .create_script(&args.name, args.kind, &dir, ctx.today)?;

    report(&ctx.output, &created)
}

/// Shared with `new-module`.
pub(crate) fn report(output: &OutputManager, created: &CreatedFile) -> CliResult<()> {
    if created.outcome.is_written() {
        output.success(&format!("Created {}", created.path.display()))?;
    } else {
        output.warning(&format!(
            "{} already exists, skipping",
            created.path.display()
        ))?;
    }
    Ok(())
}
