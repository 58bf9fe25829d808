//! `dsinit config`: inspect and initialise configuration files.

use std::fs;
use std::path::PathBuf;

use tracing::info;

use crate::{
    cli::ConfigCommands,
    commands::Context,
    config::{AppConfig, LOCAL_CONFIG_FILE},
    error::{CliError, CliResult, IntoCli},
};

/// Dispatch to the correct config subcommand.
pub fn execute(cmd: ConfigCommands, ctx: Context) -> CliResult<()> {
    match cmd {
        ConfigCommands::Init { local, force } => {
            let path = if local {
                ctx.cwd.join(LOCAL_CONFIG_FILE)
            } else {
                global_path()?
            };
            init_file(&path, force)?;
            info!(path = %path.display(), "Configuration file written");
            ctx.output
                .success(&format!("Wrote configuration to {}", path.display()))?;
        }

        ConfigCommands::Get { key } => {
            let value = get_config_value(&ctx.config, &key)?;
            ctx.output.print(&value)?;
        }

        ConfigCommands::List => {
            ctx.output.header("Current Configuration:")?;
            ctx.output.print(&render(&effective(&ctx.config))?)?;
        }

        ConfigCommands::Path => {
            ctx.output.print(&global_path()?.display().to_string())?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn global_path() -> CliResult<PathBuf> {
    AppConfig::config_path()
        .ok_or_else(|| CliError::config("Could not determine the configuration directory"))
}

/// The loaded config with the layout preset spelled out.
fn effective(config: &AppConfig) -> AppConfig {
    AppConfig {
        layout: Some(config.layout()),
        ..config.clone()
    }
}

fn render(config: &AppConfig) -> CliResult<String> {
    toml::to_string_pretty(config).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise config: {e}"),
        source: Some(Box::new(e)),
    })
}

fn init_file(path: &std::path::Path, force: bool) -> CliResult<()> {
    if path.exists() && !force {
        return Err(CliError::config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_cli_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let text = render(&effective(&AppConfig::default()))?;
    fs::write(path, text).with_cli_context(|| format!("Failed to write {}", path.display()))
}

/// Look up a dotted key such as `setup.branch` in the effective config.
fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    if key.trim().is_empty() {
        return Err(CliError::InvalidInput {
            message: "config key cannot be empty".into(),
        });
    }
    let root = toml::Value::try_from(effective(config)).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise config: {e}"),
        source: Some(Box::new(e)),
    })?;

    let mut current = &root;
    for part in key.split('.') {
        current = match current {
            toml::Value::Table(table) => table.get(part),
            toml::Value::Array(items) => part.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        }
        .ok_or_else(|| CliError::config(format!("Unknown config key: '{key}'")))?;
    }

    Ok(match current {
        toml::Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}

// ── tests ─────────────────────────────────────────────────────────────────────
