//! Background-threaded thumbnail cache for the gallery view.
//!
//! The render loop never blocks on file parsing: it requests thumbnails,
//! draws a placeholder while they load, and polls for results each frame.
//!
//! - `entry`: path -> entry table with LRU eviction
//! - `queue`: priority-ordered, deduplicated load requests
//! - `worker`: the single loader thread
//! - `cache`: the [`ThumbnailCache`] facade tying them together
//! - `placeholder`: stateless placeholder markup
//! - `renderer`: the [`Renderer`] trait and the SVG file renderer

pub mod cache;
pub mod entry;
pub mod error;
pub mod placeholder;
pub mod queue;
pub mod renderer;
pub mod state;
mod worker;

pub use cache::{CacheStats, ThumbnailCache};
pub use entry::{CacheEntry, CacheLimits, EntryTable, MAX_CACHE_BYTES, MAX_CACHE_ENTRIES};
pub use error::RenderError;
pub use placeholder::{generate_loading_spinner, generate_placeholder};
pub use queue::{LoadRequest, RequestQueue};
pub use renderer::{Renderer, SvgFileRenderer, FAST_THUMBNAIL_THRESHOLD, MAX_SVG_FILE_SIZE};
pub use state::ThumbnailState;
pub use worker::LOADER_THREAD_NAME;
