// ABOUTME: Main entry point for stash-setup
//
// Binary: stash-setup
// Usage: stash-setup <COMMAND>
// - preview: resolved paths for a set of answers
// - welcome: config location options on this platform
// - dry-run: walk the wizard without provisioning anything

#![allow(missing_docs)]

use anyhow::Result;
use clap::Parser;

use stash_setup::cli::{self, Commands};
use stash_setup::config::SetupSettings;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    let settings = match &args.settings {
        Some(path) => SetupSettings::load_from(path)?,
        None => SetupSettings::load()?,
    };

    setup_logging(&settings);
    setup_panic_handler();

    match args.command {
        Commands::Preview(preview_args) => {
            cli::preview::execute(preview_args, args.format, &settings)
        }
        Commands::Welcome(platform_args) => {
            cli::welcome::execute(platform_args, args.format, &settings)
        }
        Commands::DryRun(dry_run_args) => {
            cli::dry_run::execute(dry_run_args, args.format, &settings).await
        }
    }
}

fn setup_logging(settings: &SetupSettings) {
    use tracing_subscriber::prelude::*;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| settings.log_filter.as_str().into()),
        )
        .init();
}

fn setup_panic_handler() {
    use tracing::error;

    std::panic::set_hook(Box::new(|panic_info| {
        error!("Application panicked: {}", panic_info);
        eprintln!("Application panicked: {}", panic_info);
    }));
}
