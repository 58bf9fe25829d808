//! `dsinit new-module`: create a source module with a docstring header.

use std::path::Path;

use tracing::instrument;

use crate::{cli::NewModuleArgs, commands::Context, commands::new_script, error::CliResult};

#[instrument(skip_all, fields(name = %args.name))]
pub fn execute(args: NewModuleArgs, ctx: Context) -> CliResult<()> {
    let dir = ctx.existing_dir(args.dir.as_deref().unwrap_or(Path::new(".")))?;
    let created = ctx.services().scripts().create_module(
        &args.name,
        args.title.as_deref(),
        args.description.as_deref(),
        &dir,
        ctx.today,
    )?;

    new_script::report(&ctx.output, &created)
}
