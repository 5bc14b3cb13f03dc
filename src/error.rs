// ABOUTME: Error types for the setup wizard core
// Library-facing enums; the binary wraps these in anyhow at the edges

use thiserror::Error;

use crate::wizard::state::PathField;
use crate::wizard::step::StepKind;

/// Failure reported by an external collaborator (status probe, setup backend,
/// release-notes acknowledgement).
#[derive(Error, Debug)]
pub enum BackendError {
    /// The backend rejected the request. The message is shown to the user as-is.
    #[error("{message}")]
    Rejected { message: String },

    /// The backend could not be reached.
    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BackendError {
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    /// Human-readable text for the error screen.
    ///
    /// Uses the failure's own message when it has one, otherwise falls back to
    /// the debug representation so nothing is ever shown as a blank error.
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            format!("{self:?}")
        } else {
            message
        }
    }
}

/// Errors raised by wizard operations that the caller asked for out of turn.
#[derive(Error, Debug)]
pub enum SetupError {
    #[error("Operation requires the {expected:?} step, but the wizard is on {actual:?}")]
    WrongStep { expected: StepKind, actual: StepKind },

    #[error("A setup submission is already in progress")]
    SubmissionInProgress,

    #[error("The working directory cannot be used as the configuration location on this system")]
    WorkingDirectoryRestricted,

    #[error("A folder picker is already open for {0:?}")]
    PickerAlreadyOpen(PathField),

    #[error("No folder picker is open")]
    NoPickerOpen,

    #[error("{0:?} cannot be chosen with a folder picker")]
    NotBrowsable(PathField),

    #[error("{0:?} is disabled while blobs are stored in the database")]
    FieldDisabled(PathField),

    #[error("{0:?} is already fixed by the existing configuration")]
    FieldSuppressed(PathField),

    #[error("Library path is empty")]
    EmptyLibraryPath,

    #[error("No library path at index {index} (have {len})")]
    LibraryIndexOutOfRange { index: usize, len: usize },

    #[error("Failed to load system status: {0}")]
    Status(#[source] BackendError),
}
