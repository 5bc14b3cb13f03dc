// ABOUTME: Step model for the setup wizard
// Step kinds with their order and display metadata, plus the tagged current-step value

use serde::Serialize;

/// Steps in the setup wizard, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StepKind {
    Welcome,
    SetPaths,
    Confirm,
    Finish,
}

impl StepKind {
    /// Get all steps in order
    pub fn all() -> &'static [StepKind] {
        &[Self::Welcome, Self::SetPaths, Self::Confirm, Self::Finish]
    }

    /// Zero-based position in the sequence
    pub fn index(self) -> usize {
        match self {
            Self::Welcome => 0,
            Self::SetPaths => 1,
            Self::Confirm => 2,
            Self::Finish => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::all().get(index).copied()
    }

    /// Get the step number (1-indexed for display)
    pub fn number(self) -> usize {
        self.index() + 1
    }

    /// Get the total number of steps
    pub fn total() -> usize {
        Self::all().len()
    }

    pub fn last() -> Self {
        Self::Finish
    }

    /// Get display title for this step
    pub fn title(self) -> &'static str {
        match self {
            Self::Welcome => "Welcome",
            Self::SetPaths => "Paths",
            Self::Confirm => "Confirm",
            Self::Finish => "Finish",
        }
    }

    /// Get description for this step
    pub fn description(self) -> &'static str {
        match self {
            Self::Welcome => "Where should the configuration file live?",
            Self::SetPaths => "Library folders and storage locations",
            Self::Confirm => "Review the resolved paths",
            Self::Finish => "Setup result",
        }
    }
}

/// Which welcome screen is shown. Chosen once at entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum WelcomeVariant {
    /// No configuration path was known: the user picks a location.
    Generic,
    /// A configuration path was probed but could not be loaded.
    SpecificConfig { config_path: String },
}

/// Terminal result of the wizard
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum FinishOutcome {
    Success,
    Error { message: String },
}

impl FinishOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Success => None,
            Self::Error { message } => Some(message),
        }
    }
}

/// The current step with the data it renders
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupStep<'a> {
    Welcome(&'a WelcomeVariant),
    SetPaths,
    Confirm,
    Finish(&'a FinishOutcome),
}

impl SetupStep<'_> {
    pub fn kind(&self) -> StepKind {
        match self {
            Self::Welcome(_) => StepKind::Welcome,
            Self::SetPaths => StepKind::SetPaths,
            Self::Confirm => StepKind::Confirm,
            Self::Finish(_) => StepKind::Finish,
        }
    }
}
