// ABOUTME: Setup wizard module for first-run configuration
// Walks the user through config location, library and storage paths, confirmation, and submission

pub mod controller;
pub mod state;
pub mod step;
pub mod submission;

pub use controller::{
    ConfigLocationChoice, ConfirmSummary, SetupWizard, Transition, WelcomeOption, WizardEntry,
};
pub use state::{LibraryPath, PathField, SetupFields, SuppressedPrompts, WizardState};
pub use step::{FinishOutcome, SetupStep, StepKind, WelcomeVariant};
pub use submission::{SetupRequest, SubmissionOrchestrator};
