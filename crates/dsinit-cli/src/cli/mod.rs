//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use dsinit_core::domain::ScriptKind;

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "dsinit",
    bin_name = "dsinit",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Data-science project scaffolding",
    long_about = "dsinit creates data-science project workspaces: a standard \
                  directory layout, README and ignore file, notebook and script \
                  boilerplate, dependency snapshots and version control.",
    after_help = "EXAMPLES:\n\
        \x20 dsinit setup river-turbidity\n\
        \x20 dsinit scaffold river-turbidity --git\n\
        \x20 dsinit new-script eda ipynb --dir notebooks\n\
        \x20 dsinit snapshot config",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create the project directory tree, README and ignore file.
    #[command(
        about = "Scaffold a project directory",
        after_help = "EXAMPLES:\n\
            \x20 dsinit scaffold river-turbidity\n\
            \x20 dsinit scaffold river-turbidity --git"
    )]
    Scaffold(ScaffoldArgs),

    /// Snapshot the active environment's dependencies.
    #[command(
        about = "Write dependency manifests",
        after_help = "EXAMPLES:\n\
            \x20 dsinit snapshot            # ./config if present, else .\n\
            \x20 dsinit snapshot my-project/config"
    )]
    Snapshot(SnapshotArgs),

    /// Create a script or notebook with standard boilerplate.
    #[command(
        about = "Create a script or notebook",
        after_help = "EXAMPLES:\n\
            \x20 dsinit new-script clean_data py --dir scripts\n\
            \x20 dsinit new-script eda ipynb --dir notebooks"
    )]
    NewScript(NewScriptArgs),

    /// Create a `src/` module with standard boilerplate.
    #[command(
        about = "Create a source module",
        after_help = "EXAMPLES:\n\
            \x20 dsinit new-module features --title \"Feature engineering\" --dir src"
    )]
    NewModule(NewModuleArgs),

    /// Run the full setup pipeline.
    #[command(
        about = "Scaffold, snapshot, and initialize version control",
        after_help = "EXAMPLES:\n\
            \x20 dsinit setup river-turbidity\n\
            \x20 dsinit -v setup river-turbidity"
    )]
    Setup(SetupArgs),

    /// Manage the dsinit configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 dsinit config init\n\
            \x20 dsinit config get setup.branch\n\
            \x20 dsinit config list"
    )]
    Config(ConfigCommands),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 dsinit completions bash > ~/.local/share/bash-completion/completions/dsinit\n\
            \x20 dsinit completions zsh  > ~/.zfunc/_dsinit\n\
            \x20 dsinit completions fish > ~/.config/fish/completions/dsinit.fish"
    )]
    Completions(CompletionsArgs),
}

// ── scaffold ──────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ScaffoldArgs {
    /// Project name; the project is created in the current directory.
    #[arg(value_name = "NAME", help = "Project name")]
    pub name: String,

    /// Run `git init` in the new project.
    #[arg(long = "git", help = "Initialize a git repository")]
    pub git: bool,
}

// ── snapshot ──────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SnapshotArgs {
    /// Target directory; must exist.
    #[arg(value_name = "DIR", help = "Directory to write manifests into")]
    pub dir: Option<PathBuf>,
}

// ── new-script ────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct NewScriptArgs {
    /// File name, with or without extension.
    #[arg(value_name = "NAME", help = "Script or notebook name")]
    pub name: String,

    /// `py` for a script, `ipynb` for a notebook.
    #[arg(value_name = "KIND", help = "File kind (py, ipynb)")]
    pub kind: ScriptKind,

    #[arg(
        short = 'd',
        long = "dir",
        value_name = "DIR",
        help = "Directory to create the file in (default: current directory)"
    )]
    pub dir: Option<PathBuf>,
}

// ── new-module ────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct NewModuleArgs {
    #[arg(value_name = "NAME", help = "Module name")]
    pub name: String,

    #[arg(short = 't', long = "title", value_name = "TITLE", help = "Docstring title")]
    pub title: Option<String>,

    #[arg(
        short = 'D',
        long = "description",
        value_name = "TEXT",
        help = "Docstring description"
    )]
    pub description: Option<String>,

    #[arg(
        short = 'd',
        long = "dir",
        value_name = "DIR",
        help = "Directory to create the module in (default: current directory)"
    )]
    pub dir: Option<PathBuf>,
}

// ── setup ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SetupArgs {
    /// Project name; the project is created in the current directory.
    #[arg(value_name = "NAME", help = "Project name")]
    pub name: String,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `dsinit completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `dsinit config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Write a configuration file with every default spelled out.
    Init {
        /// Write `.dsinit.toml` in the current directory instead of the global file.
        #[arg(long = "local")]
        local: bool,
        /// Overwrite an existing file.
        #[arg(short = 'f', long = "force")]
        force: bool,
    },
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `setup.branch`.
        key: String,
    },
    /// Print the effective configuration.
    List,
    /// Print the path to the global configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_setup_command() {
        let cli = Cli::parse_from(["dsinit", "setup", "river-turbidity"]);
        assert!(matches!(cli.command, Commands::Setup(ref a) if a.name == "river-turbidity"));
    }

    #[test]
    fn parse_new_script_kinds() {
        let cli = Cli::parse_from(["dsinit", "new-script", "eda", "ipynb", "--dir", "notebooks"]);
        let Commands::NewScript(args) = cli.command else {
            panic!("expected new-script");
        };
        assert_eq!(args.kind, ScriptKind::Notebook);
        assert_eq!(args.dir, Some(PathBuf::from("notebooks")));

        let cli = Cli::parse_from(["dsinit", "new-script", "clean", "py"]);
        assert!(matches!(
            cli.command,
            Commands::NewScript(NewScriptArgs { kind: ScriptKind::Python, .. })
        ));
    }

    #[test]
    fn unknown_script_kind_is_rejected() {
        assert!(Cli::try_parse_from(["dsinit", "new-script", "x", "rb"]).is_err());
    }

    #[test]
    fn scaffold_requires_name() {
        assert!(Cli::try_parse_from(["dsinit", "scaffold"]).is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["dsinit", "snapshot", "-vv", "--log-file", "run.log"]);
        assert_eq!(cli.global.verbose, 2);
        assert_eq!(cli.global.log_file, Some(PathBuf::from("run.log")));
    }

    #[test]
    fn no_color_is_a_plain_switch() {
        let cli = Cli::parse_from(["dsinit", "scaffold", "p", "--no-color"]);
        assert!(cli.global.no_color);
        assert!(Cli::try_parse_from(["dsinit", "--no-color=1", "scaffold", "p"]).is_err());
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["dsinit", "--quiet", "--verbose", "snapshot"]);
        assert!(result.is_err());
    }
}
