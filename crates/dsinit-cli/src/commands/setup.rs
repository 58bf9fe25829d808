//! `dsinit setup`: the full scaffold → snapshot → VCS → logging pipeline.

use tracing::{info, instrument};

use dsinit_core::{
    application::SetupObserver,
    domain::{Stage, StepOutcome, StepRecord},
};

use crate::{cli::SetupArgs, commands::Context, error::CliResult, output::OutputManager};

/// Prints one line per pipeline stage as it finishes.
struct CliObserver<'a> {
    output: &'a OutputManager,
}

impl SetupObserver for CliObserver<'_> {
    fn stage_started(&self, stage: Stage) {
        let _ = self.output.print(&format!("\u{2192} {stage}"));
    }

    fn stage_finished(&self, record: &StepRecord) {
        let stage = record.stage;
        let _ = match &record.outcome {
            StepOutcome::Completed { detail } => self.output.success(&format!("{stage}: {detail}")),
            StepOutcome::Degraded { reason } => self.output.warning(&format!("{stage}: {reason}")),
            StepOutcome::Skipped { reason } => {
                self.output.info(&format!("{stage} skipped: {reason}"))
            }
            // The returned error is printed by the caller.
            StepOutcome::Failed { .. } => Ok(()),
        };
    }
}

#[instrument(skip_all, fields(project = %args.name))]
pub fn execute(args: SetupArgs, ctx: Context) -> CliResult<()> {
    let service = ctx.services().setup()?;
    let session = ctx.config.secondary_session();
    let observer = CliObserver {
        output: &ctx.output,
    };

    ctx.output.header(&format!("Setting up '{}'", args.name.trim()))?;
    let report = service.run(&args.name, &ctx.cwd, ctx.today, session, &observer)?;
    info!(path = %report.identity.path().display(), "Setup completed");

    ctx.output.print("")?;
    ctx.output.success(&format!(
        "Project '{}' ready at {}",
        report.identity.name(),
        report.identity.path().display()
    ))?;
    ctx.output.print("Make the first commit with:")?;
    ctx.output.print(&format!("  {}", report.follow_up))?;
    Ok(())
}
