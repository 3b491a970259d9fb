//! Loader worker: the single background thread that renders thumbnails.
//!
//! The thread blocks on the cache's condition variable until a request is
//! queued or a stop is requested. Rendering happens with no cache lock
//! held, so callers never wait behind a slow file.

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::channel;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;

use tracing::{debug, trace, warn};

use super::cache::Inner;

/// Name given to the loader thread.
pub const LOADER_THREAD_NAME: &str = "thumbnail-loader";

/// Lifecycle of the loader thread: `Stopped -> Running -> Stopped`.
///
/// Not synchronized on its own; the cache serializes start/stop calls.
#[derive(Debug, Default)]
pub(crate) struct LoaderWorker {
    handle: Option<JoinHandle<()>>,
    running: Arc<AtomicBool>,
}

impl LoaderWorker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Shared running flag, readable without the lifecycle lock.
    pub(crate) fn running_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.running)
    }

    /// Spawn the loader thread and wait until it is running.
    ///
    /// No-op if already running.
    pub(crate) fn start(&mut self, inner: &Arc<Inner>) {
        if self.handle.is_some() {
            return;
        }

        inner.reset_stop();
        let (started_tx, started_rx) = channel::<()>();
        let worker_inner = Arc::clone(inner);
        let spawned = thread::Builder::new()
            .name(LOADER_THREAD_NAME.to_string())
            .spawn(move || {
                // Receiver outlives this send; start() is blocked on it
                let _ = started_tx.send(());
                run(worker_inner);
            });

        match spawned {
            Ok(handle) => {
                let _ = started_rx.recv();
                self.handle = Some(handle);
                self.running.store(true, Ordering::SeqCst);
                debug!("Thumbnail loader started");
            }
            Err(e) => warn!(error = %e, "Failed to spawn thumbnail loader thread"),
        }
    }

    /// Signal the loader to exit and join it.
    ///
    /// An in-flight render completes and is written back before the thread
    /// exits. No-op if not running.
    pub(crate) fn stop(&mut self, inner: &Inner) {
        let Some(handle) = self.handle.take() else {
            return;
        };

        inner.request_stop();
        if handle.join().is_err() {
            warn!("Thumbnail loader thread panicked");
        }
        self.running.store(false, Ordering::SeqCst);
        debug!("Thumbnail loader stopped");
    }
}

/// Loader loop: take the most urgent request, render it, write it back.
fn run(inner: Arc<Inner>) {
    while let Some(request) = inner.next_request() {
        trace!(path = %request.path, priority = request.priority, "Rendering thumbnail");
        let started = Instant::now();

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            inner
                .renderer()
                .render(&request.path, request.width, request.height)
        }));
        let result = match result {
            Ok(Ok(content)) if content.is_empty() => Err("Renderer produced no content".to_string()),
            Ok(Ok(content)) => Ok(content),
            Ok(Err(e)) => Err(e.to_string()),
            Err(_) => Err("Renderer panicked".to_string()),
        };

        debug!(
            path = %request.path,
            elapsed_ms = started.elapsed().as_millis() as u64,
            ok = result.is_ok(),
            "Rendered thumbnail"
        );
        inner.complete(&request, result);
    }
    trace!("Thumbnail loader exiting");
}
