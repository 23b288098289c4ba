//! Reading State Integration Tests
//!
//! Tests for per-chapter configs including:
//! - Merge-on-write
//! - Best-effort delete
//! - Location on disk
//! - Isolation between chapters and titles

mod common;

use common::{MANGA, OTHER_MANGA, TestFixture, chapter};
use mangacache::{ChapterConfig, Error, OFFSET_Y, derive_key};
use serde_json::json;

#[test]
fn test_merge_law() {
    let fixture = TestFixture::new();
    let ch = chapter(1);

    fixture
        .cache
        .write_config(MANGA, &ch, ChapterConfig::new().with("a", 1).with("b", 2))
        .unwrap();
    fixture
        .cache
        .write_config(MANGA, &ch, ChapterConfig::new().with("b", 3).with("c", 4))
        .unwrap();

    let config = fixture.cache.read_config(MANGA, &ch).unwrap().unwrap();
    assert_eq!(
        serde_json::to_value(&config).unwrap(),
        json!({"a": 1, "b": 3, "c": 4})
    );
}

#[test]
fn test_scroll_offset_round_trip() {
    let fixture = TestFixture::new();
    let configs = fixture.cache.configs();
    let ch = chapter(0);

    assert_eq!(configs.offset_y(MANGA, &ch), 0.0);
    configs.write_offset_y(MANGA, &ch, 1830.5).unwrap();
    configs
        .write(MANGA, &ch, ChapterConfig::new().with("readerMode", "ver"))
        .unwrap();

    let config = configs.read(MANGA, &ch).unwrap().unwrap();
    assert_eq!(config.offset_y(), Some(1830.5));
    assert_eq!(config.get("readerMode"), Some(&json!("ver")));
}

#[test]
fn test_config_file_location() {
    let fixture = TestFixture::new();
    fixture
        .cache
        .write_config(MANGA, &chapter(2), ChapterConfig::new().with(OFFSET_Y, 10))
        .unwrap();

    let file = fixture
        .root()
        .join(derive_key(MANGA))
        .join(derive_key(&chapter(2)))
        .join("configs")
        .join("config.json");
    let stored: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(file).unwrap()).unwrap();
    assert_eq!(stored, json!({"offsetY": 10}));
}

#[test]
fn test_read_creates_directory_but_no_file() {
    let fixture = TestFixture::new();
    assert_eq!(fixture.cache.read_config(MANGA, &chapter(1)).unwrap(), None);

    let dir = fixture
        .root()
        .join(derive_key(MANGA))
        .join(derive_key(&chapter(1)))
        .join("configs");
    assert!(dir.is_dir());
    assert!(!dir.join("config.json").exists());
}

#[test]
fn test_delete_missing_config() {
    let fixture = TestFixture::new();

    fixture.cache.delete_config(MANGA, &chapter(1));
    assert_eq!(fixture.cache.read_config(MANGA, &chapter(1)).unwrap(), None);
}

#[test]
fn test_delete_then_write_starts_fresh() {
    let fixture = TestFixture::new();
    let ch = chapter(1);

    fixture
        .cache
        .write_config(MANGA, &ch, ChapterConfig::new().with("a", 1))
        .unwrap();
    fixture.cache.delete_config(MANGA, &ch);
    fixture
        .cache
        .write_config(MANGA, &ch, ChapterConfig::new().with("b", 2))
        .unwrap();

    let config = fixture.cache.read_config(MANGA, &ch).unwrap().unwrap();
    assert_eq!(serde_json::to_value(&config).unwrap(), json!({"b": 2}));
}

#[test]
fn test_configs_are_isolated() {
    let fixture = TestFixture::new();
    let ch = chapter(1);

    fixture
        .cache
        .write_config(MANGA, &ch, ChapterConfig::new().with(OFFSET_Y, 5))
        .unwrap();

    assert_eq!(fixture.cache.read_config(OTHER_MANGA, &ch).unwrap(), None);
    assert_eq!(fixture.cache.read_config(MANGA, &chapter(2)).unwrap(), None);
}

#[test]
fn test_unreadable_config_is_distinct_from_missing() {
    let fixture = TestFixture::new();
    let ch = chapter(1);
    fixture
        .cache
        .write_config(MANGA, &ch, ChapterConfig::new().with(OFFSET_Y, 5))
        .unwrap();

    let file = fixture
        .root()
        .join(derive_key(MANGA))
        .join(derive_key(&ch))
        .join("configs/config.json");
    std::fs::write(&file, r#"{"offsetY": "#).unwrap();

    let err = fixture.cache.read_config(MANGA, &ch).unwrap_err();
    assert!(matches!(err, Error::Parse { .. }));

    // a later write replaces the unreadable file
    fixture
        .cache
        .write_config(MANGA, &ch, ChapterConfig::new().with(OFFSET_Y, 7))
        .unwrap();
    assert_eq!(fixture.cache.configs().offset_y(MANGA, &ch), 7.0);
}

#[test]
fn test_configs_do_not_touch_pages() {
    let fixture = TestFixture::new();
    let ch = chapter(1);

    fixture.cache.pages(MANGA, &ch).unwrap();
    fixture
        .cache
        .write_config(MANGA, &ch, ChapterConfig::new().with(OFFSET_Y, 1))
        .unwrap();
    fixture.cache.delete_config(MANGA, &ch);

    fixture.cache.pages(MANGA, &ch).unwrap();
    assert_eq!(fixture.source.page_calls(), 1);
}
