//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only sees the typed options built
//! from it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables (`DSINIT_SETUP__BRANCH=dev`)
//! 3. The `--config` file, when given (must exist)
//! 4. `./.dsinit.toml`
//! 5. The global file (`dsinit config path`)
//! 6. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use dsinit_core::{
    application::{SetupOptions, SnapshotConfig},
    domain::{ProjectLayout, SecondarySession, VcsInit},
};

/// Name of the per-directory configuration file.
pub const LOCAL_CONFIG_FILE: &str = ".dsinit.toml";

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "DSINIT";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Dependency snapshot commands and manifest names.
    pub snapshot: SnapshotSection,
    /// Setup pipeline settings.
    pub setup: SetupSection,
    /// Output settings.
    pub output: OutputConfig,
    /// Directory layout; the built-in data-science preset when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<ProjectLayout>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotSection {
    pub primary_command: Vec<String>,
    pub primary_manifest: String,
    pub secondary_command: Vec<String>,
    pub secondary_manifest: String,
    /// Environment variable whose presence marks an active secondary session.
    pub session_var: String,
}

impl Default for SnapshotSection {
    fn default() -> Self {
        let core = SnapshotConfig::default();
        Self {
            primary_command: core.primary_command,
            primary_manifest: core.primary_manifest,
            secondary_command: core.secondary_command,
            secondary_manifest: core.secondary_manifest,
            session_var: "CONDA_PREFIX".into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VcsMode {
    /// `git init <project>`.
    #[default]
    Git,
    /// Run `setup.script` inside the project.
    Script,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SetupSection {
    pub config_dir: PathBuf,
    pub logging_dir: PathBuf,
    pub vcs: VcsMode,
    pub git_binary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script: Option<PathBuf>,
    pub commit_message: String,
    pub branch: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_up_script: Option<PathBuf>,
}

impl Default for SetupSection {
    fn default() -> Self {
        let core = SetupOptions::default();
        Self {
            config_dir: core.config_dir,
            logging_dir: core.logging_dir,
            vcs: VcsMode::Git,
            git_binary: "git".into(),
            script: None,
            commit_message: "Initial project scaffold".into(),
            branch: "main".into(),
            follow_up_script: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl AppConfig {
    /// Load configuration from every layer, lowest priority first.
    ///
    /// `config_file` is the path passed via `--config`; `cwd` is where the
    /// local `.dsinit.toml` is looked up.
    pub fn load(config_file: Option<&PathBuf>, cwd: &Path) -> anyhow::Result<Self> {
        let mut builder = Config::builder();

        if let Some(global) = Self::config_path() {
            builder = builder.add_source(File::from(global).format(FileFormat::Toml).required(false));
        }
        builder = builder.add_source(
            File::from(cwd.join(LOCAL_CONFIG_FILE))
                .format(FileFormat::Toml)
                .required(false),
        );
        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path.as_path()).format(FileFormat::Toml).required(true));
        }
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .context("Failed to read configuration")?
            .try_deserialize::<AppConfig>()
            .context("Invalid configuration")?;
        Ok(config)
    }

    /// Path to the global configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness.
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("org", "dsinit", "dsinit")
            .map(|d| d.config_dir().join("config.toml"))
    }

    pub fn layout(&self) -> ProjectLayout {
        self.layout.clone().unwrap_or_default()
    }

    pub fn snapshot_config(&self) -> SnapshotConfig {
        SnapshotConfig {
            primary_command: self.snapshot.primary_command.clone(),
            primary_manifest: self.snapshot.primary_manifest.clone(),
            secondary_command: self.snapshot.secondary_command.clone(),
            secondary_manifest: self.snapshot.secondary_manifest.clone(),
        }
    }

    /// Setup options, or an error message when the VCS mode is incomplete.
    pub fn setup_options(&self) -> Result<SetupOptions, String> {
        let setup = &self.setup;
        let vcs = match setup.vcs {
            VcsMode::Git => VcsInit::Git {
                binary: setup.git_binary.clone(),
            },
            VcsMode::Script => VcsInit::Script {
                script: setup
                    .script
                    .clone()
                    .ok_or("setup.script must be set when setup.vcs = \"script\"")?,
                commit_message: setup.commit_message.clone(),
                branch: setup.branch.clone(),
            },
        };
        Ok(SetupOptions {
            config_dir: setup.config_dir.clone(),
            logging_dir: setup.logging_dir.clone(),
            vcs,
            follow_up_script: setup.follow_up_script.clone(),
        })
    }

    /// Whether the configured session variable is set and non-empty.
    pub fn secondary_session(&self) -> SecondarySession {
        let active = std::env::var_os(&self.snapshot.session_var).is_some_and(|v| !v.is_empty());
        SecondarySession::from_flag(active)
    }
}
