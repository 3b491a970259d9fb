//! fbfsvg Library
//!
//! Gallery support for a frame-by-frame SVG animation player: a bounded,
//! background-loaded thumbnail cache plus the pieces around it.

pub mod cli;
pub mod config;
pub mod gallery;
pub mod svg;
pub mod thumbnail;

pub use config::Config;
pub use gallery::GalleryItem;
pub use thumbnail::{
    generate_loading_spinner, generate_placeholder, CacheEntry, CacheLimits, RenderError,
    Renderer, SvgFileRenderer, ThumbnailCache, ThumbnailState,
};
