//! `dsinit scaffold`: create the project tree, README and ignore file.

use tracing::{info, instrument};

use dsinit_core::{
    domain::{Invocation, Stage},
    error::DsinitError,
};

use crate::{cli::ScaffoldArgs, commands::Context, error::CliResult};

#[instrument(skip_all, fields(project = %args.name, git = args.git))]
pub fn execute(args: ScaffoldArgs, ctx: Context) -> CliResult<()> {
    let services = ctx.services();
    let outcome = services
        .scaffold()
        .generate(&args.name, &ctx.cwd, ctx.today)?;
    let root = outcome.identity.path();

    ctx.output
        .success(&format!("Project structure created at {}", root.display()))?;
    ctx.output.print(&format!("  README.md   {}", outcome.readme))?;
    ctx.output.print(&format!("  .gitignore  {}", outcome.ignore_file))?;

    if args.git {
        let invocation = Invocation::new(&ctx.config.setup.git_binary)
            .arg("init")
            .arg(root.display().to_string());
        services
            .steps
            .execute(&invocation)
            .map_err(|e| DsinitError::halted(Stage::VersionControlInit, e))?;
        info!(path = %root.display(), "Git repository initialized");
        ctx.output.success("Git repository initialized")?;
    }

    Ok(())
}
