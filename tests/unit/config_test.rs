//! Unit tests for configuration loading and saving

use fbfsvg::config::{GalleryConfig, ThumbnailConfig};
use fbfsvg::thumbnail::{FAST_THUMBNAIL_THRESHOLD, MAX_CACHE_ENTRIES, MAX_SVG_FILE_SIZE};
use fbfsvg::Config;

use crate::helpers::temp_config_path;

#[test]
fn default_config_uses_cache_constants() {
    let config = Config::default();
    assert_eq!(config.thumbnails.max_entries, MAX_CACHE_ENTRIES);
    assert_eq!(config.thumbnails.max_file_size, MAX_SVG_FILE_SIZE);
    assert_eq!(config.thumbnails.fast_threshold, FAST_THUMBNAIL_THRESHOLD);
    assert_eq!(config.gallery.extensions, vec!["svg".to_string()]);
    assert!(!config.gallery.recursive);
}

#[test]
fn missing_file_loads_defaults() {
    let (_dir, path) = temp_config_path();
    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.thumbnails.width, 200.0);
    assert_eq!(config.thumbnails.height, 200.0);
}

#[test]
fn partial_file_fills_in_defaults() {
    let (_dir, path) = temp_config_path();
    std::fs::write(
        &path,
        "[thumbnails]\nmax_entries = 12\n\n[gallery]\ndirectory = \"/tmp/svgs\"\n",
    )
    .unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.thumbnails.max_entries, 12);
    assert_eq!(config.thumbnails.max_file_size, MAX_SVG_FILE_SIZE);
    assert_eq!(config.gallery.directory, "/tmp/svgs");
    assert_eq!(config.gallery.extensions, vec!["svg".to_string()]);
}

#[test]
fn save_then_load_preserves_values() {
    let (_dir, path) = temp_config_path();
    let mut config = Config::default();
    config.thumbnails.max_entries = 42;
    config.thumbnails.width = 320.0;
    config.gallery.recursive = true;

    config.save_to(&path).unwrap();
    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded.thumbnails.max_entries, 42);
    assert_eq!(loaded.thumbnails.width, 320.0);
    assert!(loaded.gallery.recursive);
}

#[test]
fn zero_entry_limit_is_rejected() {
    let (_dir, path) = temp_config_path();
    std::fs::write(&path, "[thumbnails]\nmax_entries = 0\n").unwrap();
    assert!(Config::load_from(&path).is_err());
}

#[test]
fn malformed_toml_is_an_error() {
    let (_dir, path) = temp_config_path();
    std::fs::write(&path, "[thumbnails\nmax_entries = ").unwrap();
    assert!(Config::load_from(&path).is_err());
}

#[test]
fn thumbnail_config_produces_limits() {
    let config = ThumbnailConfig {
        max_entries: 7,
        max_bytes: 1024,
        ..ThumbnailConfig::default()
    };
    let limits = config.limits();
    assert_eq!(limits.max_entries, 7);
    assert_eq!(limits.max_bytes, 1024);
}

#[test]
fn gallery_directory_expands_home() {
    let config = Config {
        gallery: GalleryConfig {
            directory: "~/pictures/svg".to_string(),
            ..GalleryConfig::default()
        },
        ..Config::default()
    };
    let dir = config.gallery_directory();
    assert!(!dir.to_string_lossy().starts_with('~'));
    assert!(dir.ends_with("pictures/svg"));
}
