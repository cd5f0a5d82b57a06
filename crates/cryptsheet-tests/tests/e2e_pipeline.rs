//! End-to-End Pipeline Tests for cryptsheet
//!
//! Tests verify:
//! - Catalog -> frame sets -> published blobs
//! - Directory store layout and sidecars
//! - Failure propagation without cancelling other entities
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p cryptsheet-tests --test e2e_pipeline
//! ```

use pretty_assertions::assert_eq;
use std::sync::Arc;

use cryptsheet_cli::publish::BlobMeta;
use cryptsheet_cli::{run_pipeline, DirectoryStore, MemoryStore, RunError};
use cryptsheet_frames::FrameError;
use cryptsheet_tests::compute_hash;
use cryptsheet_tests::fixtures::DataDirFixture;

// ============================================================================
// Publishing
// ============================================================================

/// A 128x64 sheet with 4 frames publishes 32 variants, each exactly once.
#[tokio::test]
async fn test_four_frame_enemy_publishes_32_variants() {
    let mut data = DataDirFixture::new();
    data.add_enemy("Bat", "A", 4, 128, 64);
    data.write_catalog();

    let config = data.config();
    let catalog = config.load_catalog().unwrap();
    let store = Arc::new(MemoryStore::new());

    let report = run_pipeline(catalog.entities(), &config, store.clone())
        .await
        .unwrap();

    assert_eq!(report.entities, 1);
    assert_eq!(report.variants, 32);

    let blobs = store.snapshot().await;
    assert_eq!(blobs.len(), 32);
    for frame in 0..8 {
        for tag in ["d", "s", "m", "l"] {
            let name = format!("enemies/BatA{}{}.png", frame, tag);
            let blob = blobs.get(&name).unwrap_or_else(|| panic!("missing {}", name));
            assert_eq!(blob.writes, 1);
            assert_eq!(blob.properties.content_type, "image/png");
            assert_eq!(blob.properties.cache_control, "max-age=604800");
        }
    }
    assert_eq!(
        report.bytes,
        blobs.values().map(|b| b.data.len() as u64).sum::<u64>()
    );
}

/// Published payloads decode to the expected canvas sizes.
#[tokio::test]
async fn test_variant_dimensions() {
    let mut data = DataDirFixture::new();
    data.add_enemy("Bat", "A", 4, 128, 64);
    data.write_catalog();

    let config = data.config();
    let store = Arc::new(MemoryStore::new());
    run_pipeline(config.load_catalog().unwrap().entities(), &config, store.clone())
        .await
        .unwrap();

    let expected = [("d", 32), ("s", 24), ("m", 36), ("l", 56)];
    for (tag, side) in expected {
        let blob = store.get(&format!("enemies/BatA3{}.png", tag)).await.unwrap();
        let image = image::load_from_memory(&blob.data).unwrap();
        assert_eq!((image.width(), image.height()), (side, side), "variant {}", tag);
    }
}

/// Items resolve under `items/` and enemies relative to the data root.
#[tokio::test]
async fn test_items_and_enemies_are_named_by_category() {
    let mut data = DataDirFixture::new();
    data.add_item("Potion", 1, 16, 32)
        .add_enemy("Slime", "", 2, 64, 32);
    data.write_catalog();

    let config = data.config();
    let store = Arc::new(MemoryStore::new());
    let report = run_pipeline(config.load_catalog().unwrap().entities(), &config, store.clone())
        .await
        .unwrap();

    assert_eq!(report.entities, 2);
    assert_eq!(report.variants, 8 + 16);
    let names = store.names().await;
    assert!(names.contains(&"items/Potion1l.png".to_string()));
    assert!(names.contains(&"enemies/Slime3s.png".to_string()));
    assert!(!names.iter().any(|n| n.starts_with("items/Potion2")));
}

/// The directory store writes each blob with a matching sidecar.
#[tokio::test]
async fn test_directory_store_layout() {
    let mut data = DataDirFixture::new();
    data.add_enemy("Ghost", "B", 2, 64, 32);
    data.write_catalog();

    let store_root = tempfile::tempdir().unwrap();
    let location = format!("file://{}", store_root.path().display());
    let store = DirectoryStore::from_location(&location, "crypt").unwrap();
    let container = store.container_dir().to_path_buf();

    let config = data.config();
    let report = run_pipeline(
        config.load_catalog().unwrap().entities(),
        &config,
        Arc::new(store.clone()),
    )
    .await
    .unwrap();
    assert_eq!(report.variants, 16);
    assert_eq!(container, store_root.path().join("crypt"));

    let blob = std::fs::read(store.blob_path("enemies/GhostB1m.png")).unwrap();
    let meta: BlobMeta = serde_json::from_str(
        &std::fs::read_to_string(store.meta_path("enemies/GhostB1m.png")).unwrap(),
    )
    .unwrap();

    assert_eq!(meta.content_type, "image/png");
    assert_eq!(meta.cache_control, "max-age=604800");
    assert_eq!(meta.size, blob.len() as u64);
    assert_eq!(meta.blake3, compute_hash(&blob));
}

// ============================================================================
// Failure propagation
// ============================================================================

/// Entity 2 of 5 has frame count 0: the run fails with InvalidInput, none of
/// its variants are published, and the other four still finish.
#[tokio::test]
async fn test_invalid_entity_fails_run_but_others_finish() {
    let mut data = DataDirFixture::new();
    data.add_enemy("Bat", "A", 4, 128, 64)
        .add_enemy("Slime", "", 0, 64, 32)
        .add_enemy("Ghost", "", 2, 64, 32)
        .add_enemy("Wolf", "", 1, 32, 32)
        .add_enemy("Rat", "", 2, 64, 32);
    data.write_catalog();

    let config = data.config();
    let store = Arc::new(MemoryStore::new());
    let err = run_pipeline(config.load_catalog().unwrap().entities(), &config, store.clone())
        .await
        .unwrap_err();

    match &err {
        RunError::Entity { entity, source } => {
            assert_eq!(entity, "enemies/Slime");
            assert!(matches!(source, FrameError::InvalidInput(_)));
        }
        other => panic!("expected entity failure, got {}", other),
    }

    let names = store.names().await;
    assert!(names.iter().all(|n| !n.starts_with("enemies/Slime")));
    assert_eq!(names.len(), 32 + 16 + 8 + 16);
}

/// A catalog entry whose sheet file is missing surfaces as SourceUnreadable.
#[tokio::test]
async fn test_missing_sheet_is_unreadable() {
    let mut data = DataDirFixture::new();
    data.add_enemy_without_sheet("Phantom", 2);
    data.write_catalog();

    let config = data.config();
    let store = Arc::new(MemoryStore::new());
    let err = run_pipeline(config.load_catalog().unwrap().entities(), &config, store.clone())
        .await
        .unwrap_err();

    assert!(matches!(
        err.frame_error(),
        Some(FrameError::SourceUnreadable { .. })
    ));
    assert!(store.is_empty().await);
}

/// A rejected upload fails the run after every other upload completes.
#[tokio::test]
async fn test_rejected_upload_is_reported() {
    let mut data = DataDirFixture::new();
    data.add_enemy("Bat", "A", 4, 128, 64);
    data.write_catalog();

    let config = data.config().with_publish_concurrency(2);
    let store = Arc::new(MemoryStore::new().with_rejected("enemies/BatA5l.png"));
    let err = run_pipeline(config.load_catalog().unwrap().entities(), &config, store.clone())
        .await
        .unwrap_err();

    match err {
        RunError::Publish { name, .. } => assert_eq!(name, "enemies/BatA5l.png"),
        other => panic!("expected publish failure, got {}", other),
    }
    assert_eq!(store.len().await, 31);
}
