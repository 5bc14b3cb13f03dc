// ABOUTME: Library crate for stash-setup exposing the setup wizard core for front-ends and tests

#![allow(missing_docs)]

pub mod cli;
pub mod config;
pub mod error;
pub mod paths;
pub mod platform;
pub mod ports;
pub mod wizard;

pub use error::{BackendError, SetupError};
pub use paths::{BlobStorage, ConfigBase, PathResolver, ResolvedConfig};
pub use platform::{OsFamily, PlatformContext};
pub use wizard::{SetupWizard, SubmissionOrchestrator, WizardEntry};
