//! Render failures recorded against individual thumbnails.

use std::path::PathBuf;

/// Errors a renderer can report for a single file.
///
/// These never escape the cache: the loader stores the message in the
/// entry and moves on to the next request.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("File not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("File is empty: {}", path.display())]
    EmptyContent { path: PathBuf },

    #[error("No <svg> root element in {}", path.display())]
    MissingSvgRoot { path: PathBuf },

    #[error("{0}")]
    Other(String),
}
