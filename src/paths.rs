// ABOUTME: Default path resolution for the setup wizard
// Turns partially-filled path fields into the concrete paths shown before submission

use serde::Serialize;
use std::fmt;

use crate::platform::PlatformContext;
use crate::wizard::state::SetupFields;

/// Reserved `config_location` value meaning "use the working directory".
pub const WORKING_DIR_SENTINEL: &str = "config.yml";
pub const CONFIG_FILE_NAME: &str = "config.yml";
pub const DATABASE_FILE_NAME: &str = "stash-go.sqlite";
pub const GENERATED_DIR_NAME: &str = "generated";
pub const CACHE_DIR_NAME: &str = "cache";
pub const BLOBS_DIR_NAME: &str = "blobs";

/// Which rule picked the base directory for the derived defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigBase {
    /// Empty config location: `<home>/.stash`
    FallbackStashDir,
    /// The working-directory sentinel
    WorkingDirectory,
    /// An explicit config file path. Derived defaults still use the fallback
    /// stash directory, not the directory of the explicit file.
    Explicit,
}

impl ConfigBase {
    pub fn classify(config_location: &str) -> Self {
        match config_location {
            "" => Self::FallbackStashDir,
            WORKING_DIR_SENTINEL => Self::WorkingDirectory,
            _ => Self::Explicit,
        }
    }
}

/// Where blobs end up
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "path")]
pub enum BlobStorage {
    InDatabase,
    Directory(String),
}

impl fmt::Display for BlobStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InDatabase => write!(f, "(stored in the database)"),
            Self::Directory(path) => write!(f, "{path}"),
        }
    }
}

/// Fully defaulted paths. All values come from the same base directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedConfig {
    pub base: ConfigBase,
    pub config_path: String,
    pub database_file: String,
    pub generated: String,
    pub cache: String,
    pub blobs: BlobStorage,
}

/// Pure resolver over a platform context
#[derive(Debug, Clone, Copy)]
pub struct PathResolver<'a> {
    platform: &'a PlatformContext,
}

impl<'a> PathResolver<'a> {
    pub fn new(platform: &'a PlatformContext) -> Self {
        Self { platform }
    }

    /// Directory that empty fields are defaulted under
    pub fn base_dir(&self, config_location: &str) -> String {
        match ConfigBase::classify(config_location) {
            ConfigBase::WorkingDirectory => self.platform.working_dir_token().to_string(),
            ConfigBase::FallbackStashDir | ConfigBase::Explicit => {
                self.platform.fallback_stash_dir()
            }
        }
    }

    pub fn resolve(&self, fields: &SetupFields) -> ResolvedConfig {
        let base = ConfigBase::classify(&fields.config_location);
        let base_dir = self.base_dir(&fields.config_location);
        let default_under = |raw: &str, name: &str| {
            if raw.is_empty() {
                self.platform.join(&[base_dir.as_str(), name])
            } else {
                raw.to_string()
            }
        };

        let config_path = match base {
            ConfigBase::Explicit => fields.config_location.clone(),
            ConfigBase::FallbackStashDir | ConfigBase::WorkingDirectory => {
                self.platform.join(&[base_dir.as_str(), CONFIG_FILE_NAME])
            }
        };

        let blobs = if fields.store_blobs_in_database {
            BlobStorage::InDatabase
        } else {
            BlobStorage::Directory(default_under(&fields.blobs_location, BLOBS_DIR_NAME))
        };

        ResolvedConfig {
            base,
            config_path,
            database_file: default_under(&fields.database_file, DATABASE_FILE_NAME),
            generated: default_under(&fields.generated_location, GENERATED_DIR_NAME),
            cache: default_under(&fields.cache_location, CACHE_DIR_NAME),
            blobs,
        }
    }
}
