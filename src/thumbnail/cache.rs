//! Thumbnail cache facade
//!
//! Coordinates the entry table, the request queue and the loader worker.
//! Every public method takes the state lock for its whole critical section
//! and returns without waiting on rendering; only `start_loader` and
//! `stop_loader` block (on thread start and join).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use tracing::trace;

use super::entry::{CacheEntry, CacheLimits, EntryTable};
use super::queue::{LoadRequest, RequestQueue};
use super::renderer::{Renderer, SvgFileRenderer};
use super::state::ThumbnailState;
use super::worker::LoaderWorker;
use crate::config::ThumbnailConfig;

/// State guarded by the cache lock.
struct Shared {
    entries: EntryTable,
    queue: RequestQueue,
    stop_requested: bool,
}

impl Shared {
    /// Keep the queue in step with entries the table just evicted.
    fn forget_evicted(&mut self, evicted: Vec<CacheEntry>) {
        for entry in evicted {
            if entry.state == ThumbnailState::Pending {
                self.queue.cancel(&entry.path);
            }
        }
    }
}

/// State shared between the facade and the loader thread.
pub(crate) struct Inner {
    shared: Mutex<Shared>,
    work_available: Condvar,
    new_ready: AtomicBool,
    renderer: Arc<dyn Renderer>,
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, Shared> {
        // Renderer panics are caught on the loader thread, but never let a
        // poisoned lock take the caller's render loop down with it
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn renderer(&self) -> &dyn Renderer {
        self.renderer.as_ref()
    }

    pub(crate) fn reset_stop(&self) {
        self.lock().stop_requested = false;
    }

    pub(crate) fn request_stop(&self) {
        self.lock().stop_requested = true;
        self.work_available.notify_all();
    }

    /// Block until a request is available and mark its entry Loading.
    ///
    /// Returns `None` once a stop has been requested. Requests whose entry
    /// is no longer Pending are dropped here.
    pub(crate) fn next_request(&self) -> Option<LoadRequest> {
        let mut shared = self.lock();
        loop {
            if shared.stop_requested {
                return None;
            }

            if let Some(request) = shared.queue.dequeue_next() {
                let entry = shared
                    .entries
                    .peek(&request.path)
                    .filter(|entry| entry.state == ThumbnailState::Pending)
                    .cloned();
                let Some(mut entry) = entry else {
                    trace!(path = %request.path, "Skipping stale load request");
                    continue;
                };

                entry.mark_loading();
                let evicted = shared.entries.insert_or_update(entry);
                shared.forget_evicted(evicted);
                return Some(request);
            }

            shared = self
                .work_available
                .wait(shared)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Write a finished render back into the table.
    ///
    /// If the table was cleared while rendering, the result re-creates the
    /// entry. If the path was re-requested at a different size meanwhile,
    /// the result is discarded in favour of the queued request. Content
    /// larger than the whole byte budget is recorded as an error.
    pub(crate) fn complete(&self, request: &LoadRequest, result: Result<String, String>) {
        let mut shared = self.lock();
        let path = request.path.as_str();

        let mut entry = match shared.entries.peek(path) {
            None => CacheEntry::pending(path, request.width, request.height),
            Some(entry)
                if entry.state == ThumbnailState::Loading
                    && !entry.has_size(request.width, request.height)
                    && shared.queue.contains(path) =>
            {
                let mut entry = entry.clone();
                trace!(path, "Re-rendering at the newly requested size");
                entry.mark_pending(entry.target_width, entry.target_height);
                let evicted = shared.entries.insert_or_update(entry);
                shared.forget_evicted(evicted);
                return;
            }
            Some(entry) if entry.state == ThumbnailState::Loading => {
                let mut entry = entry.clone();
                // Resize request was cancelled; keep the size actually rendered
                entry.target_width = request.width;
                entry.target_height = request.height;
                shared.queue.cancel(path);
                entry
            }
            Some(entry)
                if entry.state == ThumbnailState::Pending
                    && entry.has_size(request.width, request.height) =>
            {
                let entry = entry.clone();
                shared.queue.cancel(path);
                entry
            }
            Some(entry) => {
                trace!(path, state = %entry.state, "Discarding superseded render");
                return;
            }
        };

        let max_bytes = shared.entries.limits().max_bytes;
        match result {
            Ok(content) if content.len() > max_bytes => entry.set_error(format!(
                "Thumbnail is {} bytes, over the {} byte cache budget",
                content.len(),
                max_bytes
            )),
            Ok(content) => entry.set_ready(Arc::from(content)),
            Err(message) => entry.set_error(message),
        }
        let evicted = shared.entries.insert_or_update(entry);
        shared.forget_evicted(evicted);
        drop(shared);

        self.new_ready.store(true, Ordering::SeqCst);
    }
}

/// Counts by state, for status displays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub entries: usize,
    pub bytes: usize,
    pub pending: usize,
    pub loading: usize,
    pub ready: usize,
    pub errors: usize,
    pub queued: usize,
}

/// Bounded, thread-safe thumbnail cache with a background loader.
///
/// Callers on any thread request thumbnails with [`request_load`] and poll
/// [`get_state`] / [`get_thumbnail_svg`] each frame, using
/// [`has_new_ready_thumbnails`] as a coalesced "something changed" signal.
///
/// [`request_load`]: ThumbnailCache::request_load
/// [`get_state`]: ThumbnailCache::get_state
/// [`get_thumbnail_svg`]: ThumbnailCache::get_thumbnail_svg
/// [`has_new_ready_thumbnails`]: ThumbnailCache::has_new_ready_thumbnails
pub struct ThumbnailCache {
    inner: Arc<Inner>,
    loader: Mutex<LoaderWorker>,
    loader_running: Arc<AtomicBool>,
}

impl ThumbnailCache {
    /// Create a cache with the default limits. The loader is not started.
    pub fn new(renderer: impl Renderer + 'static) -> Self {
        Self::with_limits(renderer, CacheLimits::default())
    }

    pub fn with_limits(renderer: impl Renderer + 'static, limits: CacheLimits) -> Self {
        let loader = LoaderWorker::new();
        let loader_running = loader.running_flag();
        Self {
            inner: Arc::new(Inner {
                shared: Mutex::new(Shared {
                    entries: EntryTable::new(limits),
                    queue: RequestQueue::new(),
                    stop_requested: false,
                }),
                work_available: Condvar::new(),
                new_ready: AtomicBool::new(false),
                renderer: Arc::new(renderer),
            }),
            loader: Mutex::new(loader),
            loader_running,
        }
    }

    /// Create a cache rendering SVG files from disk, sized by `config`.
    pub fn from_config(config: &ThumbnailConfig) -> Self {
        let renderer = SvgFileRenderer::new(config.max_file_size, config.fast_threshold);
        Self::with_limits(renderer, config.limits())
    }

    pub fn limits(&self) -> CacheLimits {
        self.inner.lock().entries.limits()
    }

    // --- Loader lifecycle ---

    /// Start the background loader. No-op if already running.
    pub fn start_loader(&self) {
        self.lock_loader().start(&self.inner);
    }

    /// Stop the background loader and wait for it to exit.
    ///
    /// After this returns no further entry writes happen until the loader
    /// is started again. No-op if not running.
    pub fn stop_loader(&self) {
        self.lock_loader().stop(&self.inner);
    }

    pub fn is_loader_running(&self) -> bool {
        self.loader_running.load(Ordering::SeqCst)
    }

    fn lock_loader(&self) -> MutexGuard<'_, LoaderWorker> {
        self.loader.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // --- Requests ---

    /// Queue a thumbnail render (fire-and-forget).
    ///
    /// Lower `priority` is serviced sooner. Re-requesting a queued path keeps
    /// the more urgent priority. A Ready or Loading entry at the same size is
    /// only touched; a different size forces a re-render. Error entries are
    /// retried. Empty paths and non-positive sizes are ignored.
    pub fn request_load(&self, path: &str, width: f32, height: f32, priority: i32) {
        if path.is_empty() || !is_valid_dimension(width) || !is_valid_dimension(height) {
            trace!(path, width, height, "Ignoring invalid thumbnail request");
            return;
        }

        let mut shared = self.inner.lock();
        let entry = match shared.entries.peek(path) {
            Some(existing) => match existing.state {
                ThumbnailState::Loading if existing.has_size(width, height) => {
                    shared.entries.touch(path);
                    return;
                }
                ThumbnailState::Loading => {
                    // Stays Loading; the finished render is superseded by this request
                    let mut entry = existing.clone();
                    entry.target_width = width;
                    entry.target_height = height;
                    entry
                }
                ThumbnailState::Ready if existing.has_size(width, height) => {
                    shared.entries.touch(path);
                    return;
                }
                _ => {
                    let mut entry = existing.clone();
                    entry.mark_pending(width, height);
                    entry
                }
            },
            None => CacheEntry::pending(path, width, height),
        };

        shared.queue.enqueue(path, width, height, priority);
        let evicted = shared.entries.insert_or_update(entry);
        shared.forget_evicted(evicted);
        drop(shared);

        self.inner.work_available.notify_one();
    }

    /// Cancel a queued request. No-op unless the path is Pending.
    pub fn cancel_request(&self, path: &str) {
        let mut shared = self.inner.lock();
        if shared.entries.state(path) == ThumbnailState::Pending {
            shared.entries.remove(path);
            shared.queue.cancel(path);
        }
    }

    /// Cancel every queued request. In-flight and finished entries are kept.
    pub fn cancel_all_requests(&self) {
        let mut shared = self.inner.lock();
        shared.queue.cancel_all();
        let dropped = shared.entries.remove_in_state(ThumbnailState::Pending);
        trace!(count = dropped.len(), "Cancelled pending thumbnail requests");
    }

    /// Drop every entry and queued request and reset the new-ready flag.
    ///
    /// A render in flight still completes and re-creates its entry.
    pub fn clear(&self) {
        let mut shared = self.inner.lock();
        shared.queue.cancel_all();
        shared.entries.clear();
        self.inner.new_ready.store(false, Ordering::SeqCst);
    }

    // --- Queries ---

    /// Current state of a path; `NotLoaded` if unknown. Touches recency.
    pub fn get_state(&self, path: &str) -> ThumbnailState {
        let mut shared = self.inner.lock();
        shared
            .entries
            .get(path)
            .map(|entry| entry.state)
            .unwrap_or_default()
    }

    /// Rendered thumbnail markup, present iff the path is Ready. Touches recency.
    pub fn get_thumbnail_svg(&self, path: &str) -> Option<Arc<str>> {
        let mut shared = self.inner.lock();
        shared
            .entries
            .get(path)
            .filter(|entry| entry.state == ThumbnailState::Ready)
            .and_then(|entry| entry.content.clone())
    }

    /// Copy of a path's entry, if present. Touches recency.
    pub fn entry_snapshot(&self, path: &str) -> Option<CacheEntry> {
        self.inner.lock().entries.get(path).cloned()
    }

    pub fn has_entry(&self, path: &str) -> bool {
        self.inner.lock().entries.contains(path)
    }

    /// Number of entries; never exceeds the configured maximum.
    pub fn get_entry_count(&self) -> usize {
        self.inner.lock().entries.len()
    }

    /// Total size of cached thumbnail content in bytes.
    pub fn cache_size_bytes(&self) -> usize {
        self.inner.lock().entries.total_bytes()
    }

    pub fn stats(&self) -> CacheStats {
        let shared = self.inner.lock();
        let entries = &shared.entries;
        CacheStats {
            entries: entries.len(),
            bytes: entries.total_bytes(),
            pending: entries.count_in_state(ThumbnailState::Pending),
            loading: entries.count_in_state(ThumbnailState::Loading),
            ready: entries.count_in_state(ThumbnailState::Ready),
            errors: entries.count_in_state(ThumbnailState::Error),
            queued: shared.queue.len(),
        }
    }

    // --- Change detection ---

    /// Whether any thumbnail finished (Ready or Error) since the flag was
    /// last cleared. Does not clear the flag.
    pub fn has_new_ready_thumbnails(&self) -> bool {
        self.inner.new_ready.load(Ordering::SeqCst)
    }

    pub fn clear_new_ready_flag(&self) {
        self.inner.new_ready.store(false, Ordering::SeqCst);
    }
}

impl Drop for ThumbnailCache {
    fn drop(&mut self) {
        self.stop_loader();
    }
}

fn is_valid_dimension(value: f32) -> bool {
    value.is_finite() && value > 0.0
}
