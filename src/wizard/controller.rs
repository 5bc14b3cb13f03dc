// ABOUTME: Step controller for the setup wizard
// Entry guard, forward/back navigation, the library-path gate, welcome choices, and folder pickers

use serde::Serialize;
use tracing::{debug, info};

use super::state::{LibraryPath, PathField, SetupFields, SuppressedPrompts, WizardState};
use super::step::{FinishOutcome, SetupStep, StepKind, WelcomeVariant};
use crate::error::SetupError;
use crate::paths::{PathResolver, ResolvedConfig, WORKING_DIR_SENTINEL};
use crate::platform::PlatformContext;
use crate::ports::{ExistingConfiguration, FolderBrowser, StatusSource, SystemStatus};

/// Result of asking the wizard to run
#[derive(Debug)]
pub enum WizardEntry {
    /// Already configured: show nothing and send the user elsewhere
    Redirect,
    Run(Box<SetupWizard>),
}

impl WizardEntry {
    pub fn into_wizard(self) -> Option<SetupWizard> {
        match self {
            Self::Redirect => None,
            Self::Run(wizard) => Some(*wizard),
        }
    }
}

/// Outcome of a navigation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Moved(StepKind),
    Unchanged,
    /// Leaving the paths step with no library paths needs explicit confirmation
    NeedsLibraryConfirmation,
}

/// Where the configuration file should go, as chosen on the generic welcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigLocationChoice {
    /// `<home>/.stash`
    FallbackDirectory,
    /// The server's working directory
    WorkingDirectory,
}

impl ConfigLocationChoice {
    /// Raw value stored in `config_location` for this choice
    pub fn raw_value(self) -> &'static str {
        match self {
            Self::FallbackDirectory => "",
            Self::WorkingDirectory => WORKING_DIR_SENTINEL,
        }
    }
}

/// A selectable option on the generic welcome screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WelcomeOption {
    pub choice: ConfigLocationChoice,
    /// Directory the config file would be created in, as a shell-style token
    pub directory: String,
    /// The same directory with the home or working directory filled in
    pub resolved_directory: String,
    pub enabled: bool,
}

/// What the confirm step shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmSummary {
    pub resolved: ResolvedConfig,
    pub library_paths: Vec<LibraryPath>,
}

/// The setup wizard: state plus the rules for moving through it
#[derive(Debug, Clone)]
pub struct SetupWizard {
    platform: PlatformContext,
    state: WizardState,
}

impl SetupWizard {
    /// Decide whether the wizard runs and seed it from what the backend knows.
    pub fn enter(status: &SystemStatus, existing: &ExistingConfiguration) -> WizardEntry {
        if status.configured {
            info!("System already configured - skipping setup wizard");
            return WizardEntry::Redirect;
        }

        let welcome = if status.config_path.is_empty() {
            WelcomeVariant::Generic
        } else {
            WelcomeVariant::SpecificConfig {
                config_path: status.config_path.clone(),
            }
        };

        let mut fields = SetupFields {
            config_location: status.config_path.clone(),
            ..SetupFields::default()
        };
        if !existing.stashes.is_empty() {
            fields.library_paths = existing.stashes.clone();
        }
        if !existing.generated_path.is_empty() {
            fields.generated_location = existing.generated_path.clone();
        }

        let suppressed = SuppressedPrompts {
            generated: !existing.generated_path.is_empty(),
            cache: !existing.cache_path.is_empty(),
            blobs: !existing.blobs_path.is_empty(),
        };

        debug!(?welcome, ?suppressed, "Starting setup wizard");

        WizardEntry::Run(Box::new(Self {
            platform: status.platform(),
            state: WizardState::new(welcome, fields, suppressed),
        }))
    }

    /// Poll status and configuration once, then `enter`.
    pub async fn load(source: &dyn StatusSource) -> Result<WizardEntry, SetupError> {
        let status = source.system_status().await.map_err(SetupError::Status)?;
        if status.configured {
            return Ok(Self::enter(&status, &ExistingConfiguration::default()));
        }
        let existing = source.configuration().await.map_err(SetupError::Status)?;
        Ok(Self::enter(&status, &existing))
    }

    pub fn platform(&self) -> &PlatformContext {
        &self.platform
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn fields(&self) -> &SetupFields {
        &self.state.fields
    }

    pub fn step_kind(&self) -> StepKind {
        self.state.step_kind()
    }

    /// The step to render
    pub fn current_step(&self) -> SetupStep<'_> {
        match self.state.step_kind() {
            StepKind::Welcome => SetupStep::Welcome(&self.state.welcome),
            StepKind::SetPaths => SetupStep::SetPaths,
            StepKind::Confirm => SetupStep::Confirm,
            StepKind::Finish => {
                debug_assert!(
                    self.state.outcome.is_some(),
                    "finish step reached without an outcome"
                );
                match &self.state.outcome {
                    Some(outcome) => SetupStep::Finish(outcome),
                    None => SetupStep::Confirm,
                }
            }
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.state.submitting
    }

    /// Setup completed successfully
    pub fn is_finished(&self) -> bool {
        self.state.step_kind() == StepKind::Finish
            && self
                .state
                .outcome
                .as_ref()
                .is_some_and(FinishOutcome::is_success)
    }

    // Navigation

    /// Move forward one step.
    ///
    /// Leaving the paths step without library paths raises the confirmation
    /// alert instead. Confirm only moves on through submission, and Finish is
    /// terminal.
    pub fn advance(&mut self) -> Transition {
        if self.state.submitting {
            debug!("Ignoring advance while submitting");
            return Transition::Unchanged;
        }

        match self.state.step_kind() {
            StepKind::SetPaths if self.state.fields.library_paths.is_empty() => {
                debug!("No library paths - asking for confirmation");
                self.state.library_alert = true;
                Transition::NeedsLibraryConfirmation
            }
            StepKind::Confirm | StepKind::Finish => Transition::Unchanged,
            StepKind::Welcome | StepKind::SetPaths => self.move_to(self.state.step_index + 1),
        }
    }

    /// Move back `n` steps, stopping at the first. `0` is treated as `1`.
    ///
    /// A successful finish is terminal: the system is set up and there is
    /// nothing to go back to.
    pub fn retreat(&mut self, n: usize) -> Transition {
        if self.state.submitting {
            debug!("Ignoring retreat while submitting");
            return Transition::Unchanged;
        }
        if self.is_finished() {
            debug!("Ignoring retreat after successful setup");
            return Transition::Unchanged;
        }

        let n = n.max(1);
        self.state.library_alert = false;
        self.move_to(self.state.step_index.saturating_sub(n))
    }

    /// Accept proceeding with zero library paths
    pub fn accept_empty_libraries(&mut self) -> Transition {
        if !self.state.library_alert {
            return Transition::Unchanged;
        }
        self.state.library_alert = false;
        info!("Continuing without library paths");
        self.move_to(StepKind::Confirm.index())
    }

    pub fn dismiss_library_alert(&mut self) {
        self.state.library_alert = false;
    }

    fn move_to(&mut self, index: usize) -> Transition {
        let target = index.min(StepKind::last().index());
        if target == self.state.step_index {
            return Transition::Unchanged;
        }
        self.state.step_index = target;
        self.state.open_picker = None;
        self.state.library_alert = false;
        let kind = self.state.step_kind();
        debug!(step = kind.title(), "Wizard step changed");
        Transition::Moved(kind)
    }

    // Welcome

    /// Options for the generic welcome screen
    pub fn welcome_options(&self) -> Vec<WelcomeOption> {
        vec![
            WelcomeOption {
                choice: ConfigLocationChoice::FallbackDirectory,
                directory: self.platform.fallback_stash_dir(),
                resolved_directory: self.platform.concrete_stash_dir(),
                enabled: true,
            },
            WelcomeOption {
                choice: ConfigLocationChoice::WorkingDirectory,
                directory: self.platform.working_dir_token().to_string(),
                resolved_directory: self.platform.working_dir().to_string(),
                enabled: !self.platform.is_restricted_root(),
            },
        ]
    }

    /// Record the config location picked on the welcome screen and move on
    pub fn choose_config_location(
        &mut self,
        choice: ConfigLocationChoice,
    ) -> Result<Transition, SetupError> {
        self.require_step(StepKind::Welcome)?;
        if choice == ConfigLocationChoice::WorkingDirectory && self.platform.is_restricted_root() {
            return Err(SetupError::WorkingDirectoryRestricted);
        }

        self.state.fields.config_location = choice.raw_value().to_string();
        Ok(self.advance())
    }

    // Field editing

    pub fn set_config_location(&mut self, value: impl Into<String>) {
        self.state.fields.config_location = value.into();
    }

    pub fn set_path(&mut self, field: PathField, value: impl Into<String>) {
        self.state.fields.set(field, value);
    }

    pub fn set_store_blobs_in_database(&mut self, store: bool) {
        self.state.fields.store_blobs_in_database = store;
    }

    pub fn toggle_store_blobs_in_database(&mut self) {
        self.state.fields.store_blobs_in_database = !self.state.fields.store_blobs_in_database;
    }

    pub fn add_library_path(&mut self, library: LibraryPath) -> Result<(), SetupError> {
        if library.path.trim().is_empty() {
            return Err(SetupError::EmptyLibraryPath);
        }
        self.state.fields.library_paths.push(library);
        Ok(())
    }

    pub fn remove_library_path(&mut self, index: usize) -> Result<LibraryPath, SetupError> {
        let len = self.state.fields.library_paths.len();
        if index >= len {
            return Err(SetupError::LibraryIndexOutOfRange { index, len });
        }
        Ok(self.state.fields.library_paths.remove(index))
    }

    pub fn set_library_paths(&mut self, libraries: Vec<LibraryPath>) -> Result<(), SetupError> {
        if libraries.iter().any(|l| l.path.trim().is_empty()) {
            return Err(SetupError::EmptyLibraryPath);
        }
        self.state.fields.library_paths = libraries;
        Ok(())
    }

    /// Path prompts shown on the paths step. Prompts whose value the existing
    /// configuration already fixes are left out.
    pub fn visible_prompts(&self) -> Vec<PathField> {
        PathField::all()
            .iter()
            .copied()
            .filter(|f| !self.state.suppressed.contains(*f))
            .collect()
    }

    // Folder pickers

    pub fn open_picker(&mut self, field: PathField) -> Result<(), SetupError> {
        self.require_step(StepKind::SetPaths)?;
        if self.state.submitting {
            return Err(SetupError::SubmissionInProgress);
        }
        if let Some(open) = self.state.open_picker {
            return Err(SetupError::PickerAlreadyOpen(open));
        }
        if !field.is_browsable() {
            return Err(SetupError::NotBrowsable(field));
        }
        if self.state.suppressed.contains(field) {
            return Err(SetupError::FieldSuppressed(field));
        }
        if field == PathField::Blobs && self.state.fields.store_blobs_in_database {
            return Err(SetupError::FieldDisabled(field));
        }

        self.state.open_picker = Some(field);
        Ok(())
    }

    /// Close the open picker. A chosen folder is written into the field;
    /// a cancelled picker leaves the field as it was.
    pub fn close_picker(&mut self, choice: Option<String>) -> Result<(), SetupError> {
        let field = self.state.open_picker.take().ok_or(SetupError::NoPickerOpen)?;
        if let Some(path) = choice {
            debug!(?field, %path, "Folder chosen");
            self.state.fields.set(field, path);
        }
        Ok(())
    }

    /// Open a picker for `field`, wait for the browser, and apply the result
    pub async fn browse(
        &mut self,
        field: PathField,
        browser: &dyn FolderBrowser,
    ) -> Result<(), SetupError> {
        self.open_picker(field)?;
        let choice = browser.browse_folder().await;
        self.close_picker(choice)
    }

    // Confirm

    /// Resolved paths for the confirm screen. Computed independently of the
    /// payload sent to the backend.
    pub fn preview(&self) -> ConfirmSummary {
        ConfirmSummary {
            resolved: PathResolver::new(&self.platform).resolve(&self.state.fields),
            library_paths: self.state.fields.library_paths.clone(),
        }
    }

    // Submission hooks used by the orchestrator

    /// Start a submission: sets the busy flag and snapshots the raw fields
    pub(crate) fn begin_submission(&mut self) -> Result<SetupFields, SetupError> {
        self.require_step(StepKind::Confirm)?;
        if self.state.submitting {
            return Err(SetupError::SubmissionInProgress);
        }
        self.state.submitting = true;
        self.state.outcome = None;
        Ok(self.state.fields.clone())
    }

    /// Finish a submission: clears the busy flag, then moves to Finish
    pub(crate) fn complete_submission(&mut self, outcome: FinishOutcome) -> Transition {
        self.state.submitting = false;
        self.state.outcome = Some(outcome);
        self.move_to(StepKind::Finish.index())
    }

    fn require_step(&self, expected: StepKind) -> Result<(), SetupError> {
        let actual = self.state.step_kind();
        if actual == expected {
            Ok(())
        } else {
            Err(SetupError::WrongStep { expected, actual })
        }
    }
}
