// ABOUTME: Behavioral tests for settings and answers files
// Verifies defaults, TOML persistence, and that answers files feed the wizard unchanged

use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

use stash_setup::cli::load_answers;
use stash_setup::config::SetupSettings;
use stash_setup::{OsFamily, PlatformContext};

/// Settings survive a save/load cycle and keep defaults for unset keys
#[test]
fn test_settings_persist() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("stash-setup").join("settings.toml");

    let mut settings = SetupSettings::default();
    settings.log_filter = "stash_setup=debug".to_string();
    settings.platform.home_dir = Some("/home/ana".to_string());
    settings.save_to(&path).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("log_filter = \"stash_setup=debug\""));

    let loaded = SetupSettings::load_from(&path).unwrap();
    assert_eq!(loaded, settings);

    let platform = loaded.platform(PlatformContext::new(OsFamily::Other, "/srv", None));
    assert_eq!(platform.concrete_stash_dir(), "/home/ana/.stash");
}

#[test]
fn test_answers_file_with_stashes() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("answers.toml");
    fs::write(
        &path,
        r#"
config_location = "config.yml"
store_blobs_in_database = true

[[stashes]]
path = "/media/videos"
exclude_image = true

[[stashes]]
path = "/media/photos"
exclude_video = true
"#,
    )
    .unwrap();

    let fields = load_answers(&path).unwrap();

    assert_eq!(fields.config_location, "config.yml");
    assert!(fields.store_blobs_in_database);
    assert_eq!(fields.library_paths.len(), 2);
    assert_eq!(
        fields.library_paths[1].exclusion_note().as_deref(),
        Some("(excludes videos)")
    );
}
