// ABOUTME: State for the setup wizard
// Collected field values, library paths, and the flags the controller gates on

use serde::{Deserialize, Serialize};

use super::step::{FinishOutcome, StepKind, WelcomeVariant};
use crate::error::SetupError;

/// A library source directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryPath {
    pub path: String,
    #[serde(default)]
    pub exclude_video: bool,
    #[serde(default)]
    pub exclude_image: bool,
}

impl LibraryPath {
    /// Create a library path that includes both videos and images
    pub fn new(path: impl Into<String>) -> Result<Self, SetupError> {
        let path = path.into();
        if path.trim().is_empty() {
            return Err(SetupError::EmptyLibraryPath);
        }
        Ok(Self {
            path,
            exclude_video: false,
            exclude_image: false,
        })
    }

    pub fn excluding_video(mut self) -> Self {
        self.exclude_video = true;
        self
    }

    pub fn excluding_image(mut self) -> Self {
        self.exclude_image = true;
        self
    }

    /// Summary of excluded media, e.g. `(excludes videos and images)`
    pub fn exclusion_note(&self) -> Option<String> {
        let mut excludes = Vec::new();
        if self.exclude_video {
            excludes.push("videos");
        }
        if self.exclude_image {
            excludes.push("images");
        }

        if excludes.is_empty() {
            None
        } else {
            Some(format!("(excludes {})", excludes.join(" and ")))
        }
    }
}

/// Raw, user-entered values. Empty strings mean "use the default".
///
/// This is also the payload handed to the setup backend, which applies its
/// own defaulting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SetupFields {
    pub config_location: String,
    pub database_file: String,
    pub generated_location: String,
    pub cache_location: String,
    pub store_blobs_in_database: bool,
    pub blobs_location: String,
    #[serde(alias = "stashes")]
    pub library_paths: Vec<LibraryPath>,
}

impl SetupFields {
    pub fn get(&self, field: PathField) -> &str {
        match field {
            PathField::DatabaseFile => &self.database_file,
            PathField::Generated => &self.generated_location,
            PathField::Cache => &self.cache_location,
            PathField::Blobs => &self.blobs_location,
        }
    }

    pub fn set(&mut self, field: PathField, value: impl Into<String>) {
        let slot = match field {
            PathField::DatabaseFile => &mut self.database_file,
            PathField::Generated => &mut self.generated_location,
            PathField::Cache => &mut self.cache_location,
            PathField::Blobs => &mut self.blobs_location,
        };
        *slot = value.into();
    }
}

/// Path prompts on the paths step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathField {
    DatabaseFile,
    Generated,
    Cache,
    Blobs,
}

impl PathField {
    pub fn all() -> &'static [PathField] {
        &[Self::DatabaseFile, Self::Generated, Self::Cache, Self::Blobs]
    }

    /// Whether a folder picker can fill this field. The database is a file name.
    pub fn is_browsable(self) -> bool {
        !matches!(self, Self::DatabaseFile)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::DatabaseFile => "Database file",
            Self::Generated => "Generated content",
            Self::Cache => "Cache",
            Self::Blobs => "Blobs",
        }
    }
}

/// Prompts whose value is already fixed by the existing configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SuppressedPrompts {
    pub generated: bool,
    pub cache: bool,
    pub blobs: bool,
}

impl SuppressedPrompts {
    pub fn contains(self, field: PathField) -> bool {
        match field {
            PathField::DatabaseFile => false,
            PathField::Generated => self.generated,
            PathField::Cache => self.cache,
            PathField::Blobs => self.blobs,
        }
    }
}

/// Full wizard state
#[derive(Debug, Clone)]
pub struct WizardState {
    /// Index into `StepKind::all()`; only the controller moves it
    pub(crate) step_index: usize,
    pub(crate) fields: SetupFields,
    pub(crate) welcome: WelcomeVariant,
    /// Set once a submission has completed
    pub(crate) outcome: Option<FinishOutcome>,
    /// Whether the setup call is outstanding
    pub(crate) submitting: bool,
    /// Whether the "no library paths" confirmation is showing
    pub(crate) library_alert: bool,
    pub(crate) open_picker: Option<PathField>,
    pub(crate) suppressed: SuppressedPrompts,
}

impl WizardState {
    pub fn new(welcome: WelcomeVariant, fields: SetupFields, suppressed: SuppressedPrompts) -> Self {
        Self {
            step_index: 0,
            fields,
            welcome,
            outcome: None,
            submitting: false,
            library_alert: false,
            open_picker: None,
            suppressed,
        }
    }

    pub fn step_index(&self) -> usize {
        self.step_index
    }

    pub fn step_kind(&self) -> StepKind {
        // step_index is only ever set from StepKind::index()
        StepKind::from_index(self.step_index).unwrap_or(StepKind::Welcome)
    }

    pub fn fields(&self) -> &SetupFields {
        &self.fields
    }

    pub fn welcome(&self) -> &WelcomeVariant {
        &self.welcome
    }

    pub fn outcome(&self) -> Option<&FinishOutcome> {
        self.outcome.as_ref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn library_alert(&self) -> bool {
        self.library_alert
    }

    pub fn open_picker(&self) -> Option<PathField> {
        self.open_picker
    }

    pub fn suppressed(&self) -> SuppressedPrompts {
        self.suppressed
    }
}
