//! # dsinit CLI
//!
//! Data-science project scaffolding.
//!
//! ## Startup sequence
//!
//! 1. Load `.env` when present.
//! 2. Parse CLI arguments (`--help` / `--version` exit 0, usage errors exit 1).
//! 3. Initialise the tracing subscriber.
//! 4. Load configuration (defaults, files, environment).
//! 5. Build the [`OutputManager`] and dispatch to the command handler.
//! 6. Translate any [`CliError`] into a one-line message and exit code 1.
//!
//! Skipped or degraded best-effort steps still exit 0.

use std::process::ExitCode;

use clap::{Parser, error::ErrorKind};
use tracing::{debug, info, instrument};

use crate::{
    cli::{Cli, Commands},
    commands::Context,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(1),
            };
        }
    };

    let _log_guard = match init_logging(&cli.global) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("\u{2717} Failed to initialise logging: {e:#}");
            return ExitCode::from(1);
        }
    };

    debug!(
        verbose = cli.global.verbose,
        quiet = cli.global.quiet,
        no_color = cli.global.no_color,
        "CLI started"
    );

    let verbose = cli.global.verbose > 0;
    match run(cli) {
        Ok(()) => {
            info!("dsinit completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => handle_error(e, verbose),
    }
}

/// Load configuration and dispatch to the correct command handler.
#[instrument(skip_all)]
fn run(cli: Cli) -> CliResult<()> {
    let cwd = std::env::current_dir().with_cli_context(|| "Failed to read the working directory")?;
    let config = AppConfig::load(cli.global.config.as_ref(), &cwd)
        .with_cli_context(|| "Failed to load configuration")?;
    let output = OutputManager::new(&cli.global, &config);
    let ctx = Context::new(config, output, cwd);

    match cli.command {
        Commands::Scaffold(args) => commands::scaffold::execute(args, ctx),
        Commands::Snapshot(args) => commands::snapshot::execute(args, ctx),
        Commands::NewScript(args) => commands::new_script::execute(args, ctx),
        Commands::NewModule(args) => commands::new_module::execute(args, ctx),
        Commands::Setup(args) => commands::setup::execute(args, ctx),
        Commands::Config(cmd) => commands::config::execute(cmd, ctx),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}

/// Print a `CliError` to stderr and map it to an exit code.
fn handle_error(err: CliError, verbose: bool) -> ExitCode {
    err.log();

    let colored = std::io::IsTerminal::is_terminal(&std::io::stderr())
        && std::env::var_os("NO_COLOR").is_none_or(|v| v.is_empty());
    let msg = if colored {
        err.format_colored(verbose)
    } else {
        err.format_plain(verbose)
    };
    eprintln!("{msg}");

    ExitCode::from(err.exit_code())
}

// ── tests ─────────────────────────────────────────────────────────────────────
