// ABOUTME: CLI dry-run command
//
// Drives the wizard end to end from an answers file against a backend that
// only records the payload. Useful for checking answers before a real setup.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use super::preview::{self, PreviewOutput};
use super::{DryRunArgs, OutputFormat};
use crate::config::SetupSettings;
use crate::error::BackendError;
use crate::paths::ConfigBase;
use crate::platform::PlatformContext;
use crate::ports::{ExistingConfiguration, ReleaseNotes, SetupBackend, SystemStatus};
use crate::wizard::{
    ConfigLocationChoice, FinishOutcome, PathField, SetupFields, SetupWizard,
    SubmissionOrchestrator, Transition,
};

/// Backend that accepts every setup without touching the filesystem
pub struct DryRunBackend;

#[async_trait]
impl SetupBackend for DryRunBackend {
    async fn perform_setup(&self, fields: &SetupFields) -> Result<(), BackendError> {
        info!(
            config_location = %fields.config_location,
            libraries = fields.library_paths.len(),
            "Dry run: setup accepted"
        );
        Ok(())
    }
}

#[async_trait]
impl ReleaseNotes for DryRunBackend {
    async fn acknowledge(&self, latest_id: &str) -> Result<(), BackendError> {
        info!(latest_id, "Dry run: release notes acknowledged");
        Ok(())
    }
}

/// JSON output structure for the dry-run command
#[derive(Debug, Serialize)]
pub struct DryRunReport {
    pub preview: PreviewOutput,
    /// Exactly what would be sent to the setup backend
    pub payload: SetupFields,
    pub outcome: FinishOutcome,
}

/// Walk every wizard step with `fields` as the user's answers
pub async fn run(
    fields: SetupFields,
    platform: &PlatformContext,
    allow_empty_libraries: bool,
    latest_release_note: &str,
) -> Result<DryRunReport> {
    let status = SystemStatus {
        configured: false,
        config_path: String::new(),
        os: platform.os(),
        working_dir: platform.working_dir().to_string(),
        home_dir: platform.home_dir().unwrap_or_default().to_string(),
    };
    let Some(mut wizard) =
        SetupWizard::enter(&status, &ExistingConfiguration::default()).into_wizard()
    else {
        bail!("System is already configured");
    };

    // Welcome
    match ConfigBase::classify(&fields.config_location) {
        ConfigBase::FallbackStashDir => {
            wizard.choose_config_location(ConfigLocationChoice::FallbackDirectory)?;
        }
        ConfigBase::WorkingDirectory => {
            wizard.choose_config_location(ConfigLocationChoice::WorkingDirectory)?;
        }
        ConfigBase::Explicit => {
            wizard.set_config_location(fields.config_location.clone());
            wizard.advance();
        }
    }

    // Paths
    for field in PathField::all() {
        wizard.set_path(*field, fields.get(*field));
    }
    wizard.set_store_blobs_in_database(fields.store_blobs_in_database);
    wizard.set_library_paths(fields.library_paths.clone())?;

    if wizard.advance() == Transition::NeedsLibraryConfirmation {
        if !allow_empty_libraries {
            bail!("No library paths given; pass --allow-empty-libraries to continue without any");
        }
        wizard.accept_empty_libraries();
    }

    // Confirm
    let summary = wizard.preview();
    let preview = PreviewOutput {
        resolved: summary.resolved,
        libraries: summary.library_paths,
        restricted_root: platform.is_restricted_root(),
    };

    let backend = Arc::new(DryRunBackend);
    let orchestrator =
        SubmissionOrchestrator::new(backend.clone(), backend, latest_release_note.to_string());
    let request = orchestrator.begin(&mut wizard)?;
    let payload = request.fields().clone();
    let outcome = orchestrator.perform(&request).await;
    orchestrator.complete(&mut wizard, outcome.clone());

    Ok(DryRunReport {
        preview,
        payload,
        outcome,
    })
}

pub async fn execute(
    args: DryRunArgs,
    format: OutputFormat,
    settings: &SetupSettings,
) -> Result<()> {
    let fields = args.answers.to_fields()?;
    let platform = args.platform.resolve(settings);
    let report = run(
        fields,
        &platform,
        args.allow_empty_libraries,
        &settings.latest_release_note,
    )
    .await?;

    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&report).context("Failed to serialize report")?
            );
        }
        OutputFormat::Text => {
            println!("{}", preview::render_text(&report.preview));
            println!();
            println!("Payload:");
            println!(
                "{}",
                serde_json::to_string_pretty(&report.payload)
                    .context("Failed to serialize payload")?
            );
            println!();
            match &report.outcome {
                FinishOutcome::Success => println!("✅ Dry run complete"),
                FinishOutcome::Error { message } => println!("❌ Setup failed: {message}"),
            }
        }
    }

    Ok(())
}
