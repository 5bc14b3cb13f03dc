// ABOUTME: Read-once platform facts used by the wizard
// Path separator, shell-style directory tokens, and the restricted-root check

use serde::{Deserialize, Serialize};

/// Operating-system family as reported by the backend's system status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OsFamily {
    Windows,
    Darwin,
    #[default]
    Other,
}

impl OsFamily {
    /// Family of the machine this binary runs on
    pub fn current() -> Self {
        match std::env::consts::OS {
            "windows" => Self::Windows,
            "macos" => Self::Darwin,
            _ => Self::Other,
        }
    }
}

/// Platform facts supplied once at wizard entry. Never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformContext {
    os: OsFamily,
    working_dir: String,
    home_dir: Option<String>,
}

impl PlatformContext {
    pub fn new(os: OsFamily, working_dir: impl Into<String>, home_dir: Option<String>) -> Self {
        let working_dir = working_dir.into();
        Self {
            os,
            // An unknown working directory is reported as "."
            working_dir: if working_dir.is_empty() {
                ".".to_string()
            } else {
                working_dir
            },
            home_dir: home_dir.filter(|h| !h.is_empty()),
        }
    }

    /// Build a context from the local process environment
    pub fn detect() -> Self {
        let working_dir = std::env::current_dir()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        let home_dir = dirs::home_dir().map(|h| h.display().to_string());
        Self::new(OsFamily::current(), working_dir, home_dir)
    }

    pub fn os(&self) -> OsFamily {
        self.os
    }

    pub fn working_dir(&self) -> &str {
        &self.working_dir
    }

    pub fn home_dir(&self) -> Option<&str> {
        self.home_dir.as_deref()
    }

    pub fn separator(&self) -> &'static str {
        match self.os {
            OsFamily::Windows => "\\",
            _ => "/",
        }
    }

    /// Token standing for the user's home directory in displayed paths
    pub fn home_token(&self) -> &'static str {
        match self.os {
            OsFamily::Windows => "%USERPROFILE%",
            _ => "$HOME",
        }
    }

    /// Token standing for the server's working directory in displayed paths
    pub fn working_dir_token(&self) -> &'static str {
        match self.os {
            OsFamily::Windows => "%CD%",
            _ => "$PWD",
        }
    }

    /// Join segments with the platform separator. No normalisation is applied.
    pub fn join(&self, segments: &[&str]) -> String {
        segments.join(self.separator())
    }

    /// The app bundle on macOS starts with `/` as its working directory, which
    /// is usually read-only, so the working directory is not offered as a
    /// configuration root there.
    pub fn is_restricted_root(&self) -> bool {
        self.os == OsFamily::Darwin && self.working_dir == "/"
    }

    /// `<home token>/.stash`, the default base directory
    pub fn fallback_stash_dir(&self) -> String {
        self.join(&[self.home_token(), ".stash"])
    }

    /// The fallback stash directory with the concrete home directory
    /// substituted when it is known.
    pub fn concrete_stash_dir(&self) -> String {
        match &self.home_dir {
            Some(home) => self.join(&[home.as_str(), ".stash"]),
            None => self.fallback_stash_dir(),
        }
    }
}
