// ABOUTME: Settings for the stash-setup command-line front-end
// TOML file under the user config directory; every key is optional

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::platform::{OsFamily, PlatformContext};

/// On-disk settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupSettings {
    /// tracing filter directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Newest release note id, acknowledged after a successful setup
    #[serde(default = "default_release_note")]
    pub latest_release_note: String,

    /// Overrides for the detected platform facts
    #[serde(default)]
    pub platform: PlatformOverrides,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformOverrides {
    pub os: Option<OsFamily>,
    pub working_dir: Option<String>,
    pub home_dir: Option<String>,
}

fn default_log_filter() -> String {
    "stash_setup=info".to_string()
}

fn default_release_note() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

impl Default for SetupSettings {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            latest_release_note: default_release_note(),
            platform: PlatformOverrides::default(),
        }
    }
}

impl SetupSettings {
    /// Get the path to the settings file
    pub fn settings_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(config_dir.join("stash-setup").join("settings.toml"))
    }

    /// Load settings from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::settings_path()?)
    }

    /// Load settings from `path`, falling back to defaults when it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;

        let settings: SetupSettings = toml::from_str(&content)
            .with_context(|| format!("Failed to parse settings from {}", path.display()))?;

        Ok(settings)
    }

    /// Save settings to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directories exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create settings directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize settings")?;

        fs::write(path, content)
            .with_context(|| format!("Failed to write settings to {}", path.display()))?;

        Ok(())
    }

    /// Platform context with the overrides applied on top of `detected`
    pub fn platform(&self, detected: PlatformContext) -> PlatformContext {
        let overrides = &self.platform;
        if overrides.os.is_none() && overrides.working_dir.is_none() && overrides.home_dir.is_none()
        {
            return detected;
        }

        PlatformContext::new(
            overrides.os.unwrap_or_else(|| detected.os()),
            overrides
                .working_dir
                .clone()
                .unwrap_or_else(|| detected.working_dir().to_string()),
            overrides
                .home_dir
                .clone()
                .or_else(|| detected.home_dir().map(str::to_string)),
        )
    }
}
