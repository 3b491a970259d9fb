//! Gallery listing: the source files shown as thumbnail cells.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::sleep;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::config::GalleryConfig;
use crate::thumbnail::{ThumbnailCache, ThumbnailState};

/// How often the gallery polls the cache's change flag.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// One file in the gallery grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GalleryItem {
    /// Grid position, also used as the load priority
    pub index: usize,
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
}

impl GalleryItem {
    pub fn file_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("")
    }

    /// Path as a cache key.
    pub fn key(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }
}

/// Scan `dir` for gallery files, sorted by path.
pub fn scan(dir: &Path, config: &GalleryConfig) -> Result<Vec<GalleryItem>> {
    let mut paths = Vec::new();
    collect(dir, config, &mut paths)
        .with_context(|| format!("Failed to scan gallery directory: {:?}", dir))?;
    paths.sort();

    let items = paths
        .into_iter()
        .enumerate()
        .map(|(index, path)| {
            let size = fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
            GalleryItem { index, path, size }
        })
        .collect();
    Ok(items)
}

fn collect(dir: &Path, config: &GalleryConfig, out: &mut Vec<PathBuf>) -> std::io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            if config.recursive {
                collect(&path, config, out)?;
            }
        } else if has_gallery_extension(&path, &config.extensions) {
            out.push(path);
        }
    }
    Ok(())
}

fn has_gallery_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
}

/// Outcome of loading one gallery thumbnail.
#[derive(Debug, Clone, Serialize)]
pub struct ThumbnailReport {
    pub index: usize,
    pub path: PathBuf,
    pub state: ThumbnailState,
    /// Size of the rendered markup in bytes (0 unless Ready)
    pub bytes: usize,
    pub error: Option<String>,
}

/// Request a thumbnail for every item and wait for them to settle.
///
/// Items are requested in grid order, at most one cache's worth at a time,
/// the way a scrolling grid only requests its visible cells. Each window is
/// reported once it settles, before the next one can evict it. Within a
/// window the cache is polled the way a render loop would: states are
/// re-read only after the change flag is raised.
///
/// Returns early on `timeout` or when `interrupted` is set; unsettled items
/// are reported in whatever state they reached.
pub fn render_thumbnails(
    cache: &ThumbnailCache,
    items: &[GalleryItem],
    width: f32,
    height: f32,
    timeout: Duration,
    interrupted: &AtomicBool,
) -> Vec<ThumbnailReport> {
    let window = cache.limits().max_entries.max(1);
    let deadline = Instant::now() + timeout;
    let should_stop = || Instant::now() >= deadline || interrupted.load(Ordering::SeqCst);

    cache.start_loader();
    let mut reports = Vec::with_capacity(items.len());
    for chunk in items.chunks(window) {
        let keys: Vec<String> = chunk.iter().map(GalleryItem::key).collect();
        if !should_stop() {
            for (item, key) in chunk.iter().zip(&keys) {
                let priority = i32::try_from(item.index).unwrap_or(i32::MAX);
                cache.request_load(key, width, height, priority);
            }
            wait_for_window(cache, &keys, &should_stop);
        }
        reports.extend(
            chunk
                .iter()
                .zip(&keys)
                .map(|(item, key)| report(cache, item, key)),
        );
    }
    cache.stop_loader();
    reports
}

/// Poll until no key is still queued or rendering.
///
/// A key that was evicted or refused reads `NotLoaded` and counts as done.
fn wait_for_window(cache: &ThumbnailCache, keys: &[String], should_stop: &impl Fn() -> bool) {
    let in_progress = || {
        keys.iter()
            .filter(|key| cache.get_state(key).is_in_progress())
            .count()
    };

    let mut remaining = in_progress();
    while remaining > 0 && !should_stop() {
        sleep(POLL_INTERVAL);
        if cache.has_new_ready_thumbnails() {
            cache.clear_new_ready_flag();
            remaining = in_progress();
            debug!(remaining, "Gallery thumbnails still loading");
        }
    }
}

fn report(cache: &ThumbnailCache, item: &GalleryItem, key: &str) -> ThumbnailReport {
    let entry = cache.entry_snapshot(key);
    ThumbnailReport {
        index: item.index,
        path: item.path.clone(),
        state: entry.as_ref().map(|e| e.state).unwrap_or_default(),
        bytes: entry.as_ref().map_or(0, |e| e.content_size),
        error: entry.and_then(|e| e.error_message),
    }
}
