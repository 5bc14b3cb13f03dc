// ABOUTME: CLI argument parsing and command routing for stash-setup
//
// Provides command-line access to the setup wizard core:
// - preview: show the paths a set of raw answers resolves to
// - welcome: show the config location options for this platform
// - dry-run: walk the whole wizard with an answers file, without provisioning

pub mod dry_run;
pub mod preview;
pub mod welcome;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::SetupSettings;
use crate::platform::{OsFamily, PlatformContext};
use crate::wizard::SetupFields;

/// First-run setup wizard for Stash
#[derive(Parser)]
#[command(name = "stash-setup")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Settings file (defaults to the user config directory)
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,
}

/// Output format for commands
#[derive(Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Show the resolved paths for the given answers
    Preview(PreviewArgs),

    /// Show where the configuration file can be created
    Welcome(PlatformArgs),

    /// Walk the wizard with an answers file and print the setup payload
    DryRun(DryRunArgs),
}

/// Platform facts, overriding detection and the settings file
#[derive(clap::Args, Clone, Default)]
pub struct PlatformArgs {
    /// Operating system family
    #[arg(long, value_enum)]
    pub os: Option<OsFamily>,

    /// Working directory of the server
    #[arg(long)]
    pub working_dir: Option<String>,

    /// Home directory of the server user
    #[arg(long)]
    pub home_dir: Option<String>,
}

impl PlatformArgs {
    pub fn resolve(&self, settings: &SetupSettings) -> PlatformContext {
        let base = settings.platform(PlatformContext::detect());
        PlatformContext::new(
            self.os.unwrap_or_else(|| base.os()),
            self.working_dir
                .clone()
                .unwrap_or_else(|| base.working_dir().to_string()),
            self.home_dir
                .clone()
                .or_else(|| base.home_dir().map(str::to_string)),
        )
    }
}

/// Raw answers: an optional TOML file with per-field flag overrides
#[derive(clap::Args, Clone, Default)]
pub struct AnswerArgs {
    /// TOML file with wizard answers
    #[arg(long)]
    pub answers: Option<PathBuf>,

    /// Config file location ("" for the default, "config.yml" for the working directory)
    #[arg(long)]
    pub config_location: Option<String>,

    /// Database file path
    #[arg(long)]
    pub database_file: Option<String>,

    /// Generated content directory
    #[arg(long)]
    pub generated: Option<String>,

    /// Cache directory
    #[arg(long)]
    pub cache: Option<String>,

    /// Blobs directory
    #[arg(long)]
    pub blobs: Option<String>,

    /// Store blobs in the database instead of the filesystem
    #[arg(long)]
    pub blobs_in_database: bool,

    /// Library directory (repeatable)
    #[arg(long = "library")]
    pub libraries: Vec<String>,
}

impl AnswerArgs {
    pub fn to_fields(&self) -> Result<SetupFields> {
        let mut fields = match &self.answers {
            Some(path) => load_answers(path)?,
            None => SetupFields::default(),
        };

        if let Some(v) = &self.config_location {
            fields.config_location.clone_from(v);
        }
        if let Some(v) = &self.database_file {
            fields.database_file.clone_from(v);
        }
        if let Some(v) = &self.generated {
            fields.generated_location.clone_from(v);
        }
        if let Some(v) = &self.cache {
            fields.cache_location.clone_from(v);
        }
        if let Some(v) = &self.blobs {
            fields.blobs_location.clone_from(v);
        }
        if self.blobs_in_database {
            fields.store_blobs_in_database = true;
        }
        for library in &self.libraries {
            fields
                .library_paths
                .push(crate::wizard::LibraryPath::new(library.clone())?);
        }

        Ok(fields)
    }
}

/// Arguments for the preview command
#[derive(clap::Args)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub answers: AnswerArgs,

    #[command(flatten)]
    pub platform: PlatformArgs,
}

/// Arguments for the dry-run command
#[derive(clap::Args)]
pub struct DryRunArgs {
    #[command(flatten)]
    pub answers: AnswerArgs,

    #[command(flatten)]
    pub platform: PlatformArgs,

    /// Continue even when no library paths are given
    #[arg(long)]
    pub allow_empty_libraries: bool,
}

/// Read wizard answers from a TOML file
pub fn load_answers(path: &Path) -> Result<SetupFields> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read answers from {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse answers from {}", path.display()))
}
