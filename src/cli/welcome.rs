// ABOUTME: CLI welcome command
//
// Lists the configuration location choices and whether this platform allows each one

use anyhow::{Context, Result};

use super::{OutputFormat, PlatformArgs};
use crate::config::SetupSettings;
use crate::platform::PlatformContext;
use crate::ports::SystemStatus;
use crate::wizard::{ConfigLocationChoice, SetupWizard, WelcomeOption, WizardEntry};

/// Welcome options for a fresh, unconfigured system on `platform`
pub fn options_for(platform: &PlatformContext) -> Vec<WelcomeOption> {
    let status = SystemStatus {
        configured: false,
        config_path: String::new(),
        os: platform.os(),
        working_dir: platform.working_dir().to_string(),
        home_dir: platform.home_dir().unwrap_or_default().to_string(),
    };

    match SetupWizard::enter(&status, &Default::default()) {
        WizardEntry::Run(wizard) => wizard.welcome_options(),
        WizardEntry::Redirect => Vec::new(),
    }
}

fn describe(option: &WelcomeOption) -> String {
    let label = match option.choice {
        ConfigLocationChoice::FallbackDirectory => "In the stash directory",
        ConfigLocationChoice::WorkingDirectory => "In the current working directory",
    };
    let state = if option.enabled { "" } else { "  [disabled]" };
    format!(
        "{label:<34} {} ({}){state}",
        option.directory, option.resolved_directory
    )
}

pub fn execute(args: PlatformArgs, format: OutputFormat, settings: &SetupSettings) -> Result<()> {
    let platform = args.resolve(settings);
    let options = options_for(&platform);

    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&options).context("Failed to serialize options")?
            );
        }
        OutputFormat::Text => {
            println!("Where should the configuration file be created?");
            println!("{}", "━".repeat(48));
            for option in &options {
                println!("{}", describe(option));
            }
            if platform.is_restricted_root() {
                println!();
                println!("The working directory is / (macOS app bundle), which is usually read-only.");
                println!("Choose the stash directory instead.");
            }
        }
    }

    Ok(())
}
