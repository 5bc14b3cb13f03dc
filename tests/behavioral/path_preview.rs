// ABOUTME: Behavioral tests for path defaulting and the confirm preview
// Verifies fallback/working-directory/explicit bases and that previews never touch the payload

use pretty_assertions::assert_eq;
use std::sync::Arc;

use super::fixtures::{fresh_wizard, orchestrator, CountingReleaseNotes, RecordingBackend};
use stash_setup::paths::{
    BlobStorage, ConfigBase, PathResolver, BLOBS_DIR_NAME, CACHE_DIR_NAME, CONFIG_FILE_NAME,
    DATABASE_FILE_NAME, GENERATED_DIR_NAME,
};
use stash_setup::wizard::{ConfigLocationChoice, LibraryPath, PathField, SetupFields};
use stash_setup::{OsFamily, PlatformContext};

#[test]
fn test_empty_inputs_resolve_under_fallback_dir() {
    for os in [OsFamily::Windows, OsFamily::Darwin, OsFamily::Other] {
        let platform = PlatformContext::new(os, "/anywhere", None);
        let fallback = platform.fallback_stash_dir();
        let resolved = PathResolver::new(&platform).resolve(&SetupFields::default());

        assert_eq!(resolved.config_path, platform.join(&[fallback.as_str(), CONFIG_FILE_NAME]));
        assert_eq!(resolved.database_file, platform.join(&[fallback.as_str(), DATABASE_FILE_NAME]));
        assert_eq!(resolved.generated, platform.join(&[fallback.as_str(), GENERATED_DIR_NAME]));
        assert_eq!(resolved.cache, platform.join(&[fallback.as_str(), CACHE_DIR_NAME]));
        assert_eq!(
            resolved.blobs,
            BlobStorage::Directory(platform.join(&[fallback.as_str(), BLOBS_DIR_NAME]))
        );
    }
}

#[test]
fn test_working_directory_sentinel() {
    let platform = PlatformContext::new(OsFamily::Windows, "D:\\stash", None);
    let fields = SetupFields {
        config_location: "config.yml".to_string(),
        ..SetupFields::default()
    };
    let resolved = PathResolver::new(&platform).resolve(&fields);

    assert_eq!(resolved.base, ConfigBase::WorkingDirectory);
    assert_eq!(resolved.config_path, "%CD%\\config.yml");
    assert_eq!(resolved.generated, "%CD%\\generated");
}

#[test]
fn test_blobs_in_database_ignores_location() {
    let platform = PlatformContext::new(OsFamily::Other, "/", None);
    for blobs_location in ["", "/mnt/blobs"] {
        let fields = SetupFields {
            store_blobs_in_database: true,
            blobs_location: blobs_location.to_string(),
            ..SetupFields::default()
        };
        assert_eq!(
            PathResolver::new(&platform).resolve(&fields).blobs,
            BlobStorage::InDatabase
        );
    }
}

#[test]
fn test_confirm_preview_matches_resolver() {
    let mut wizard = fresh_wizard();
    wizard
        .choose_config_location(ConfigLocationChoice::WorkingDirectory)
        .unwrap();
    wizard.set_path(PathField::Blobs, "/srv/blobs");
    wizard
        .add_library_path(LibraryPath::new("/media").unwrap().excluding_video())
        .unwrap();
    wizard.advance();

    let summary = wizard.preview();
    let direct = PathResolver::new(wizard.platform()).resolve(wizard.fields());

    assert_eq!(summary.resolved, direct);
    assert_eq!(summary.resolved.config_path, "$PWD/config.yml");
    assert_eq!(summary.resolved.blobs, BlobStorage::Directory("/srv/blobs".to_string()));
    assert_eq!(
        summary.library_paths[0].exclusion_note().as_deref(),
        Some("(excludes videos)")
    );
}

#[tokio::test]
async fn test_payload_is_unresolved() {
    let backend = Arc::new(RecordingBackend::default());
    let notes = Arc::new(CountingReleaseNotes::default());

    let mut wizard = fresh_wizard();
    wizard
        .choose_config_location(ConfigLocationChoice::FallbackDirectory)
        .unwrap();
    wizard.advance();
    wizard.accept_empty_libraries();

    let preview = wizard.preview();
    orchestrator(backend.clone(), notes)
        .submit(&mut wizard)
        .await
        .unwrap();

    let payloads = backend.payloads.lock().unwrap();
    assert_eq!(payloads[0].config_location, "");
    assert_eq!(payloads[0].database_file, "");
    assert_eq!(preview.resolved.database_file, "$HOME/.stash/stash-go.sqlite");
}
