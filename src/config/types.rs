//! Configuration type definitions and defaults

use serde::{Deserialize, Serialize};

use crate::thumbnail::{
    CacheLimits, FAST_THUMBNAIL_THRESHOLD, MAX_CACHE_BYTES, MAX_CACHE_ENTRIES, MAX_SVG_FILE_SIZE,
};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub thumbnails: ThumbnailConfig,
    #[serde(default)]
    pub gallery: GalleryConfig,
}

/// Thumbnail cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThumbnailConfig {
    /// Maximum number of cached thumbnails
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
    /// Byte budget for cached thumbnail markup
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,
    /// Files above this size get a "Large File" card instead of a render
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
    /// Files above this size get a static preview instead of a full render
    #[serde(default = "default_fast_threshold")]
    pub fast_threshold: u64,
    /// Default thumbnail width in pixels
    #[serde(default = "default_thumbnail_size")]
    pub width: f32,
    /// Default thumbnail height in pixels
    #[serde(default = "default_thumbnail_size")]
    pub height: f32,
}

pub fn default_max_entries() -> usize {
    MAX_CACHE_ENTRIES
}

pub fn default_max_bytes() -> usize {
    MAX_CACHE_BYTES
}

pub fn default_max_file_size() -> u64 {
    MAX_SVG_FILE_SIZE
}

pub fn default_fast_threshold() -> u64 {
    FAST_THUMBNAIL_THRESHOLD
}

pub fn default_thumbnail_size() -> f32 {
    200.0
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            max_entries: default_max_entries(),
            max_bytes: default_max_bytes(),
            max_file_size: default_max_file_size(),
            fast_threshold: default_fast_threshold(),
            width: default_thumbnail_size(),
            height: default_thumbnail_size(),
        }
    }
}

impl ThumbnailConfig {
    /// Cache limits derived from this configuration.
    pub fn limits(&self) -> CacheLimits {
        CacheLimits {
            max_entries: self.max_entries,
            max_bytes: self.max_bytes,
        }
    }

    /// Validate thumbnail settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_entries == 0 {
            return Err("thumbnails.max_entries must be > 0".to_string());
        }
        if self.max_bytes == 0 {
            return Err("thumbnails.max_bytes must be > 0".to_string());
        }
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(format!("thumbnails.width must be > 0 (got {})", self.width));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(format!(
                "thumbnails.height must be > 0 (got {})",
                self.height
            ));
        }
        Ok(())
    }
}

/// Gallery configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryConfig {
    /// Directory scanned when no directory is given on the command line
    #[serde(default = "default_directory")]
    pub directory: String,
    /// File extensions shown in the gallery (case-insensitive, no dot)
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    /// Whether to descend into subdirectories
    #[serde(default)]
    pub recursive: bool,
}

pub fn default_directory() -> String {
    "~/svg".to_string()
}

pub fn default_extensions() -> Vec<String> {
    vec!["svg".to_string()]
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            extensions: default_extensions(),
            recursive: false,
        }
    }
}
