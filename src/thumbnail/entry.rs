//! Entry table: the authoritative path -> entry map and its LRU eviction.
//!
//! Recency is a monotonic access tick, so no two accesses share a time.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use super::state::ThumbnailState;

/// Default maximum number of cached entries.
pub const MAX_CACHE_ENTRIES: usize = 100;

/// Default byte budget for cached thumbnail content (100 MB).
pub const MAX_CACHE_BYTES: usize = 100 * 1024 * 1024;

/// Capacity limits enforced by the entry table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheLimits {
    /// Maximum number of entries, in any state
    pub max_entries: usize,
    /// Maximum total size of Ready content in bytes
    pub max_bytes: usize,
}

impl Default for CacheLimits {
    fn default() -> Self {
        Self {
            max_entries: MAX_CACHE_ENTRIES,
            max_bytes: MAX_CACHE_BYTES,
        }
    }
}

/// A cached thumbnail and its bookkeeping.
#[derive(Debug, Clone, Serialize)]
pub struct CacheEntry {
    pub path: String,
    pub state: ThumbnailState,
    /// Rendered markup, present iff `state == Ready`
    #[serde(skip)]
    pub content: Option<Arc<str>>,
    /// Failure reason, present iff `state == Error`
    pub error_message: Option<String>,
    pub target_width: f32,
    pub target_height: f32,
    /// Access tick of the last read or write; sole input to eviction
    pub last_access: u64,
    /// Size of `content` in bytes (0 unless Ready)
    pub content_size: usize,
}

impl CacheEntry {
    /// Create a freshly requested entry.
    pub fn pending(path: impl Into<String>, width: f32, height: f32) -> Self {
        Self {
            path: path.into(),
            state: ThumbnailState::Pending,
            content: None,
            error_message: None,
            target_width: width,
            target_height: height,
            last_access: 0,
            content_size: 0,
        }
    }

    /// Whether this entry was last requested at the given size.
    pub fn has_size(&self, width: f32, height: f32) -> bool {
        self.target_width == width && self.target_height == height
    }

    /// Reset to Pending at a (possibly new) size, dropping any result.
    pub fn mark_pending(&mut self, width: f32, height: f32) {
        self.state = ThumbnailState::Pending;
        self.target_width = width;
        self.target_height = height;
        self.content = None;
        self.content_size = 0;
        self.error_message = None;
    }

    pub fn mark_loading(&mut self) {
        self.state = ThumbnailState::Loading;
    }

    /// Store a rendered thumbnail.
    pub fn set_ready(&mut self, content: Arc<str>) {
        self.state = ThumbnailState::Ready;
        self.content_size = content.len();
        self.content = Some(content);
        self.error_message = None;
    }

    /// Record a render failure.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.state = ThumbnailState::Error;
        self.content = None;
        self.content_size = 0;
        self.error_message = Some(message.into());
    }
}

/// Map from path to entry with LRU eviction.
///
/// Not synchronized; the cache facade guards it with a mutex.
#[derive(Debug)]
pub struct EntryTable {
    entries: HashMap<String, CacheEntry>,
    limits: CacheLimits,
    total_bytes: usize,
    tick: u64,
}

impl EntryTable {
    pub fn new(limits: CacheLimits) -> Self {
        Self {
            entries: HashMap::new(),
            limits,
            total_bytes: 0,
            tick: 0,
        }
    }

    pub fn limits(&self) -> CacheLimits {
        self.limits
    }

    /// State of a path without updating recency. Absent paths are `NotLoaded`.
    pub fn state(&self, path: &str) -> ThumbnailState {
        self.entries
            .get(path)
            .map(|entry| entry.state)
            .unwrap_or_default()
    }

    /// Borrow an entry without updating recency.
    pub fn peek(&self, path: &str) -> Option<&CacheEntry> {
        self.entries.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    /// Mark a path as most recently used. Returns false if absent.
    pub fn touch(&mut self, path: &str) -> bool {
        let tick = self.next_tick();
        match self.entries.get_mut(path) {
            Some(entry) => {
                entry.last_access = tick;
                true
            }
            None => false,
        }
    }

    /// Read an entry, updating its recency.
    pub fn get(&mut self, path: &str) -> Option<&CacheEntry> {
        self.touch(path);
        self.entries.get(path)
    }

    /// Insert or replace the entry for `entry.path`, then enforce capacity.
    ///
    /// The written entry becomes the most recently used. Returns the entries
    /// evicted to get back under the limits.
    pub fn insert_or_update(&mut self, mut entry: CacheEntry) -> Vec<CacheEntry> {
        entry.last_access = self.next_tick();
        self.total_bytes += entry.content_size;
        if let Some(old) = self.entries.insert(entry.path.clone(), entry) {
            self.total_bytes -= old.content_size;
        }
        self.evict_if_needed()
    }

    pub fn remove(&mut self, path: &str) -> Option<CacheEntry> {
        let removed = self.entries.remove(path)?;
        self.total_bytes -= removed.content_size;
        Some(removed)
    }

    /// Remove every entry in the given state, returning their paths.
    pub fn remove_in_state(&mut self, state: ThumbnailState) -> Vec<String> {
        let paths: Vec<String> = self
            .entries
            .values()
            .filter(|entry| entry.state == state)
            .map(|entry| entry.path.clone())
            .collect();
        for path in &paths {
            self.remove(path);
        }
        paths
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.total_bytes = 0;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_bytes(&self) -> usize {
        self.total_bytes
    }

    /// Number of entries currently in `state`.
    pub fn count_in_state(&self, state: ThumbnailState) -> usize {
        self.entries.values().filter(|e| e.state == state).count()
    }

    fn over_limits(&self) -> bool {
        self.entries.len() > self.limits.max_entries || self.total_bytes > self.limits.max_bytes
    }

    /// Evict oldest non-Loading entries until within limits.
    ///
    /// Ties on access tick fall back to path order. Stops early if only
    /// Loading entries remain.
    fn evict_if_needed(&mut self) -> Vec<CacheEntry> {
        let mut evicted = Vec::new();
        while self.over_limits() {
            let victim = self
                .entries
                .values()
                .filter(|entry| entry.state != ThumbnailState::Loading)
                .min_by(|a, b| {
                    a.last_access
                        .cmp(&b.last_access)
                        .then_with(|| a.path.cmp(&b.path))
                })
                .map(|entry| entry.path.clone());

            let Some(path) = victim else { break };
            if let Some(entry) = self.remove(&path) {
                debug!(path = %entry.path, state = %entry.state, "Evicted thumbnail");
                evicted.push(entry);
            }
        }
        evicted
    }

    fn next_tick(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }
}
