// ABOUTME: CLI preview command
//
// Resolves raw answers into the concrete paths the confirm step would show (text/JSON output)

use anyhow::{Context, Result};
use serde::Serialize;

use super::{OutputFormat, PreviewArgs};
use crate::config::SetupSettings;
use crate::paths::{PathResolver, ResolvedConfig};
use crate::platform::PlatformContext;
use crate::wizard::{LibraryPath, SetupFields};

/// JSON output structure for the preview command
#[derive(Debug, Serialize)]
pub struct PreviewOutput {
    pub resolved: ResolvedConfig,
    pub libraries: Vec<LibraryPath>,
    pub restricted_root: bool,
}

pub fn build(fields: &SetupFields, platform: &PlatformContext) -> PreviewOutput {
    PreviewOutput {
        resolved: PathResolver::new(platform).resolve(fields),
        libraries: fields.library_paths.clone(),
        restricted_root: platform.is_restricted_root(),
    }
}

/// Text rendering shared with the dry-run command
pub fn render_text(output: &PreviewOutput) -> String {
    let resolved = &output.resolved;
    let mut lines = vec![
        format!("Configuration:  {}", resolved.config_path),
        format!("Database:       {}", resolved.database_file),
        format!("Generated:      {}", resolved.generated),
        format!("Cache:          {}", resolved.cache),
        format!("Blobs:          {}", resolved.blobs),
    ];

    if output.libraries.is_empty() {
        lines.push("Libraries:      (none)".to_string());
    } else {
        lines.push("Libraries:".to_string());
        for library in &output.libraries {
            match library.exclusion_note() {
                Some(note) => lines.push(format!("  {} {note}", library.path)),
                None => lines.push(format!("  {}", library.path)),
            }
        }
    }

    lines.join("\n")
}

pub fn execute(args: PreviewArgs, format: OutputFormat, settings: &SetupSettings) -> Result<()> {
    let fields = args.answers.to_fields()?;
    let platform = args.platform.resolve(settings);
    let output = build(&fields, &platform);

    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&output).context("Failed to serialize preview")?
            );
        }
        OutputFormat::Text => {
            println!("{}", render_text(&output));
        }
    }

    Ok(())
}
