// ABOUTME: Submission orchestration for the setup wizard
// Sends the raw fields to the setup backend, acknowledges release notes, and maps the result

use std::sync::Arc;
use tracing::{error, info, warn};

use super::controller::{SetupWizard, Transition};
use super::state::SetupFields;
use super::step::FinishOutcome;
use crate::error::SetupError;
use crate::ports::{ReleaseNotes, SetupBackend};

/// Payload captured when a submission starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupRequest {
    fields: SetupFields,
}

impl SetupRequest {
    /// Raw field values, exactly as entered. Defaulting is the backend's job.
    pub fn fields(&self) -> &SetupFields {
        &self.fields
    }
}

/// Runs the setup call and the follow-up acknowledgement.
///
/// Submission is split in three so a front-end can render the busy state
/// while the call is outstanding:
///
/// 1. [`SubmissionOrchestrator::begin`] sets the submitting flag and captures the payload
/// 2. [`SubmissionOrchestrator::perform`] talks to the backend
/// 3. [`SubmissionOrchestrator::complete`] clears the flag and moves to Finish
///
/// [`SubmissionOrchestrator::submit`] does all three.
pub struct SubmissionOrchestrator {
    backend: Arc<dyn SetupBackend>,
    release_notes: Arc<dyn ReleaseNotes>,
    latest_release_note: String,
}

impl SubmissionOrchestrator {
    pub fn new(
        backend: Arc<dyn SetupBackend>,
        release_notes: Arc<dyn ReleaseNotes>,
        latest_release_note: impl Into<String>,
    ) -> Self {
        Self {
            backend,
            release_notes,
            latest_release_note: latest_release_note.into(),
        }
    }

    pub fn begin(&self, wizard: &mut SetupWizard) -> Result<SetupRequest, SetupError> {
        let fields = wizard.begin_submission()?;
        info!(
            libraries = fields.library_paths.len(),
            "Submitting setup"
        );
        Ok(SetupRequest { fields })
    }

    /// Perform the setup call. Never fails: a rejected setup becomes an
    /// error outcome carrying the backend's message.
    pub async fn perform(&self, request: &SetupRequest) -> FinishOutcome {
        if let Err(e) = self.backend.perform_setup(&request.fields).await {
            let message = e.user_message();
            error!(error = %message, "Setup failed");
            return FinishOutcome::Error { message };
        }

        info!("Setup succeeded");
        if let Err(e) = self
            .release_notes
            .acknowledge(&self.latest_release_note)
            .await
        {
            warn!("Failed to acknowledge release notes: {}", e);
        }

        FinishOutcome::Success
    }

    pub fn complete(&self, wizard: &mut SetupWizard, outcome: FinishOutcome) -> Transition {
        wizard.complete_submission(outcome)
    }

    /// Begin, perform, and complete in one go. Returns the outcome now shown
    /// on the Finish step.
    pub async fn submit(&self, wizard: &mut SetupWizard) -> Result<FinishOutcome, SetupError> {
        let request = self.begin(wizard)?;
        let outcome = self.perform(&request).await;
        self.complete(wizard, outcome.clone());
        Ok(outcome)
    }
}
