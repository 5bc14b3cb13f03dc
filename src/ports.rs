// ABOUTME: Interfaces to the collaborators the wizard depends on
// Status probe, setup backend, release-notes acknowledgement, and folder browsing

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[cfg(test)]
use mockall::automock;

use crate::error::BackendError;
use crate::platform::{OsFamily, PlatformContext};
use crate::wizard::state::{LibraryPath, SetupFields};

/// System status, polled once when the wizard mounts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemStatus {
    /// The application is already set up; the wizard must not run
    pub configured: bool,
    /// Configuration path that was probed but not loaded, or empty
    pub config_path: String,
    pub os: OsFamily,
    pub working_dir: String,
    pub home_dir: String,
}

impl SystemStatus {
    pub fn platform(&self) -> PlatformContext {
        PlatformContext::new(
            self.os,
            self.working_dir.clone(),
            Some(self.home_dir.clone()),
        )
    }
}

/// Partial configuration already known to the backend
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExistingConfiguration {
    pub stashes: Vec<LibraryPath>,
    pub generated_path: String,
    pub cache_path: String,
    pub blobs_path: String,
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait StatusSource: Send + Sync {
    async fn system_status(&self) -> Result<SystemStatus, BackendError>;

    async fn configuration(&self) -> Result<ExistingConfiguration, BackendError>;
}

/// Performs the actual provisioning (directories, database, config file).
/// Treated as atomic: it either succeeds or fails.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SetupBackend: Send + Sync {
    async fn perform_setup(&self, fields: &SetupFields) -> Result<(), BackendError>;
}

/// Marks release notes up to `latest_id` as seen. Best effort.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ReleaseNotes: Send + Sync {
    async fn acknowledge(&self, latest_id: &str) -> Result<(), BackendError>;
}

/// Modal folder chooser. `None` means the user cancelled.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait FolderBrowser: Send + Sync {
    async fn browse_folder(&self) -> Option<String>;
}
