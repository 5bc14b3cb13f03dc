// ABOUTME: Behavioral tests for the full wizard flow
// Entry guard, navigation, the library gate, pickers, and submission outcomes

use pretty_assertions::assert_eq;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use super::fixtures::{
    fresh_status, fresh_wizard, orchestrator, CountingReleaseNotes, FakeStatus, RecordingBackend,
    ScriptedBrowser, UnreachableStatus,
};
use stash_setup::ports::ExistingConfiguration;
use stash_setup::wizard::{
    ConfigLocationChoice, FinishOutcome, LibraryPath, PathField, SetupStep, SetupWizard, StepKind,
    Transition, WelcomeVariant, WizardEntry,
};
use stash_setup::{OsFamily, SetupError};

fn to_confirm(wizard: &mut SetupWizard) {
    wizard
        .choose_config_location(ConfigLocationChoice::FallbackDirectory)
        .unwrap();
    wizard
        .add_library_path(LibraryPath::new("/media/videos").unwrap())
        .unwrap();
    assert_eq!(wizard.advance(), Transition::Moved(StepKind::Confirm));
}

#[tokio::test]
async fn test_configured_system_redirects_before_any_step() {
    let mut status = fresh_status();
    status.configured = true;
    let source = FakeStatus::new(status, ExistingConfiguration::default());

    let entry = SetupWizard::load(&source).await.unwrap();

    assert!(matches!(entry, WizardEntry::Redirect));
    assert_eq!(source.configuration_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_load_seeds_from_backend() {
    let mut status = fresh_status();
    status.config_path = "/etc/stash/config.yml".to_string();
    let existing = ExistingConfiguration {
        stashes: vec![LibraryPath::new("/media").unwrap().excluding_image()],
        generated_path: "/var/stash/generated".to_string(),
        cache_path: String::new(),
        blobs_path: "/var/stash/blobs".to_string(),
    };
    let source = FakeStatus::new(status, existing);

    let wizard = SetupWizard::load(&source).await.unwrap().into_wizard().unwrap();

    assert_eq!(
        wizard.current_step(),
        SetupStep::Welcome(&WelcomeVariant::SpecificConfig {
            config_path: "/etc/stash/config.yml".to_string()
        })
    );
    assert_eq!(wizard.fields().config_location, "/etc/stash/config.yml");
    assert_eq!(wizard.fields().generated_location, "/var/stash/generated");
    assert_eq!(wizard.fields().library_paths.len(), 1);
    assert_eq!(
        wizard.visible_prompts(),
        vec![PathField::DatabaseFile, PathField::Cache]
    );
}

#[tokio::test]
async fn test_load_reports_unreachable_backend() {
    let result = SetupWizard::load(&UnreachableStatus).await;
    assert!(matches!(result, Err(SetupError::Status(_))));
}

#[test]
fn test_welcome_variant_fixed_across_navigation() {
    let mut status = fresh_status();
    status.config_path = "/etc/stash/config.yml".to_string();
    let mut wizard = SetupWizard::enter(&status, &ExistingConfiguration::default())
        .into_wizard()
        .unwrap();

    wizard.advance();
    wizard.set_config_location("");
    wizard.retreat(1);

    assert!(matches!(
        wizard.current_step(),
        SetupStep::Welcome(WelcomeVariant::SpecificConfig { .. })
    ));
}

#[test]
fn test_mac_app_disables_working_directory() {
    let mut status = fresh_status();
    status.os = OsFamily::Darwin;
    status.working_dir = "/".to_string();
    let mut wizard = SetupWizard::enter(&status, &ExistingConfiguration::default())
        .into_wizard()
        .unwrap();

    assert!(wizard.platform().is_restricted_root());
    let disabled: Vec<_> = wizard
        .welcome_options()
        .into_iter()
        .filter(|o| !o.enabled)
        .map(|o| o.choice)
        .collect();
    assert_eq!(disabled, vec![ConfigLocationChoice::WorkingDirectory]);

    assert!(wizard
        .choose_config_location(ConfigLocationChoice::WorkingDirectory)
        .is_err());
    assert_eq!(wizard.step_kind(), StepKind::Welcome);
}

#[test]
fn test_empty_libraries_need_override() {
    let mut wizard = fresh_wizard();
    wizard
        .choose_config_location(ConfigLocationChoice::WorkingDirectory)
        .unwrap();

    assert_eq!(wizard.advance(), Transition::NeedsLibraryConfirmation);
    assert_eq!(wizard.advance(), Transition::NeedsLibraryConfirmation);
    assert_eq!(wizard.step_kind(), StepKind::SetPaths);

    assert_eq!(
        wizard.accept_empty_libraries(),
        Transition::Moved(StepKind::Confirm)
    );
    assert!(wizard.fields().library_paths.is_empty());
}

#[tokio::test]
async fn test_folder_pickers_fill_fields() {
    let mut wizard = fresh_wizard();
    wizard
        .choose_config_location(ConfigLocationChoice::FallbackDirectory)
        .unwrap();
    let browser = ScriptedBrowser::new(vec![Some("/mnt/generated"), None]);

    wizard.browse(PathField::Generated, &browser).await.unwrap();
    wizard.set_path(PathField::Cache, "/typed/cache");
    wizard.browse(PathField::Cache, &browser).await.unwrap();

    assert_eq!(wizard.fields().generated_location, "/mnt/generated");
    assert_eq!(wizard.fields().cache_location, "/typed/cache");
    assert_eq!(wizard.state().open_picker(), None);
}

#[tokio::test]
async fn test_successful_setup() {
    let backend = Arc::new(RecordingBackend::default());
    let notes = Arc::new(CountingReleaseNotes::default());
    let orchestrator = orchestrator(backend.clone(), notes.clone());

    let mut wizard = fresh_wizard();
    to_confirm(&mut wizard);
    let outcome = orchestrator.submit(&mut wizard).await.unwrap();

    assert_eq!(outcome, FinishOutcome::Success);
    assert_eq!(wizard.current_step(), SetupStep::Finish(&FinishOutcome::Success));
    assert!(!wizard.is_submitting());
    assert_eq!(notes.calls.load(Ordering::SeqCst), 1);

    let payloads = backend.payloads.lock().unwrap();
    assert_eq!(payloads.len(), 1);
    assert_eq!(&payloads[0], wizard.fields());
}

#[tokio::test]
async fn test_acknowledgement_failure_still_succeeds() {
    let backend = Arc::new(RecordingBackend::default());
    let notes = Arc::new(CountingReleaseNotes {
        fail: true,
        ..CountingReleaseNotes::default()
    });

    let mut wizard = fresh_wizard();
    to_confirm(&mut wizard);
    let outcome = orchestrator(backend, notes.clone())
        .submit(&mut wizard)
        .await
        .unwrap();

    assert!(outcome.is_success());
    assert_eq!(notes.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_disk_full_then_retry_from_paths() {
    let backend = Arc::new(RecordingBackend::failing_with(&["disk full"]));
    let notes = Arc::new(CountingReleaseNotes::default());
    let orchestrator = orchestrator(backend.clone(), notes.clone());

    let mut wizard = fresh_wizard();
    to_confirm(&mut wizard);
    let outcome = orchestrator.submit(&mut wizard).await.unwrap();

    let expected = FinishOutcome::Error {
        message: "disk full".to_string(),
    };
    assert_eq!(outcome, expected);
    assert_eq!(wizard.current_step(), SetupStep::Finish(&expected));
    assert!(!wizard.is_submitting());
    assert_eq!(notes.calls.load(Ordering::SeqCst), 0);

    // Back to the paths step, skipping confirm
    assert_eq!(wizard.retreat(2), Transition::Moved(StepKind::SetPaths));
    wizard.set_path(PathField::Generated, "/bigger/disk/generated");
    assert_eq!(wizard.advance(), Transition::Moved(StepKind::Confirm));

    let outcome = orchestrator.submit(&mut wizard).await.unwrap();
    assert!(outcome.is_success());
    assert_eq!(wizard.current_step(), SetupStep::Finish(&FinishOutcome::Success));
    assert_eq!(backend.calls(), 2);
}

#[tokio::test]
async fn test_no_resubmission_after_success() {
    let backend = Arc::new(RecordingBackend::default());
    let notes = Arc::new(CountingReleaseNotes::default());
    let orchestrator = orchestrator(backend.clone(), notes.clone());

    let mut wizard = fresh_wizard();
    to_confirm(&mut wizard);
    orchestrator.submit(&mut wizard).await.unwrap();

    assert_eq!(wizard.retreat(1), Transition::Unchanged);
    assert_eq!(wizard.retreat(2), Transition::Unchanged);
    assert!(matches!(
        orchestrator.submit(&mut wizard).await,
        Err(SetupError::WrongStep { .. })
    ));
    assert_eq!(wizard.current_step(), SetupStep::Finish(&FinishOutcome::Success));
    assert_eq!(backend.calls(), 1);
    assert_eq!(notes.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_no_automatic_retry() {
    let backend = Arc::new(RecordingBackend::failing_with(&["permission denied"]));
    let notes = Arc::new(CountingReleaseNotes::default());

    let mut wizard = fresh_wizard();
    to_confirm(&mut wizard);
    orchestrator(backend.clone(), notes)
        .submit(&mut wizard)
        .await
        .unwrap();

    assert_eq!(backend.calls(), 1);
}
