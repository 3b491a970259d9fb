//! Renderer collaborator: turns a source file into thumbnail markup.
//!
//! The cache calls [`Renderer::render`] from its loader thread only, and
//! never while holding its locks.

use std::collections::hash_map::DefaultHasher;
use std::fs::{self, File};
use std::hash::{Hash, Hasher};
use std::io::Read;
use std::path::Path;

use super::error::RenderError;
use crate::svg;

/// Default per-file size limit (50 MB). Larger files get a "Large File" card.
pub const MAX_SVG_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// Files above this size (2 MB) get a static preview instead of a full render.
pub const FAST_THUMBNAIL_THRESHOLD: u64 = 2 * 1024 * 1024;

/// Bytes read from oversized files (enough to find the viewBox).
const TRUNCATED_HEADER_BYTES: u64 = 4096;

/// Bytes read from large files for the static preview.
const LARGE_HEADER_BYTES: u64 = 8192;

/// Produces renderable thumbnail content for a file at a target size.
///
/// Implementations may be slow; they run on the loader thread.
pub trait Renderer: Send + Sync {
    fn render(&self, path: &str, width: f32, height: f32) -> Result<String, RenderError>;
}

impl<F> Renderer for F
where
    F: Fn(&str, f32, f32) -> Result<String, RenderError> + Send + Sync,
{
    fn render(&self, path: &str, width: f32, height: f32) -> Result<String, RenderError> {
        self(path, width, height)
    }
}

/// Renders SVG files from disk into self-contained thumbnail documents.
#[derive(Debug, Clone)]
pub struct SvgFileRenderer {
    max_file_size: u64,
    fast_threshold: u64,
}

impl Default for SvgFileRenderer {
    fn default() -> Self {
        Self::new(MAX_SVG_FILE_SIZE, FAST_THUMBNAIL_THRESHOLD)
    }
}

/// How much of a file was read.
enum Source {
    Full(String),
    Large { header: String, size_mb: u64 },
    Truncated { header: String },
}

impl SvgFileRenderer {
    pub fn new(max_file_size: u64, fast_threshold: u64) -> Self {
        Self {
            max_file_size,
            fast_threshold: fast_threshold.min(max_file_size),
        }
    }

    fn read_source(&self, path: &Path) -> Result<Source, RenderError> {
        let metadata = match fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(RenderError::NotFound {
                    path: path.to_path_buf(),
                })
            }
            Err(e) => return Err(e.into()),
        };
        let size = metadata.len();

        let source = if size > self.max_file_size {
            Source::Truncated {
                header: read_header(path, TRUNCATED_HEADER_BYTES)?,
            }
        } else if size > self.fast_threshold {
            Source::Large {
                header: read_header(path, LARGE_HEADER_BYTES)?,
                size_mb: size / 1024 / 1024,
            }
        } else {
            let bytes = fs::read(path)?;
            Source::Full(String::from_utf8_lossy(&bytes).into_owned())
        };

        let empty = match &source {
            Source::Full(s) => s.trim().is_empty(),
            Source::Large { header, .. } | Source::Truncated { header } => header.is_empty(),
        };
        if empty {
            return Err(RenderError::EmptyContent {
                path: path.to_path_buf(),
            });
        }
        Ok(source)
    }
}

impl Renderer for SvgFileRenderer {
    fn render(&self, path: &str, width: f32, height: f32) -> Result<String, RenderError> {
        let fs_path = Path::new(path);
        match self.read_source(fs_path)? {
            Source::Truncated { .. } => Ok(oversized_card(width, height)),
            Source::Large { size_mb, .. } => Ok(static_preview_card(width, height, size_mb)),
            Source::Full(content) => wrap_thumbnail(fs_path, path, &content, width, height),
        }
    }
}

fn read_header(path: &Path, limit: u64) -> Result<String, RenderError> {
    let mut bytes = Vec::with_capacity(limit as usize);
    File::open(path)?.take(limit).read_to_end(&mut bytes)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Per-path id prefix so composited thumbnails never share ids.
fn id_prefix(path: &str) -> String {
    let mut hasher = DefaultHasher::new();
    path.hash(&mut hasher);
    format!("t{}_", hasher.finish())
}

fn wrap_thumbnail(
    fs_path: &Path,
    path: &str,
    content: &str,
    width: f32,
    height: f32,
) -> Result<String, RenderError> {
    if !content.contains("<svg") {
        return Err(RenderError::MissingSvgRoot {
            path: fs_path.to_path_buf(),
        });
    }

    let prefixed = svg::prefix_ids(content, &id_prefix(path));
    // Keep the source origin so content offset by min-x/min-y is not clipped
    let view_box = svg::extract_view_box(&prefixed).unwrap_or_default();
    let inner = svg::extract_inner(&prefixed)
        .filter(|inner| !inner.trim().is_empty())
        .ok_or_else(|| RenderError::EmptyContent {
            path: fs_path.to_path_buf(),
        })?;

    Ok(format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{}" height="{}" viewBox="{}" preserveAspectRatio="xMidYMid meet" overflow="hidden">{}</svg>"#,
        width,
        height,
        view_box.to_attr(),
        inner
    ))
}

fn oversized_card(width: f32, height: f32) -> String {
    let font_size = (width * 0.08).clamp(10.0, 18.0);
    format!(
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            r##"<rect width="100%" height="100%" fill="#2d3436"/>"##,
            r##"<text x="50%" y="45%" text-anchor="middle" fill="#dfe6e9" font-size="{size}">Large File</text>"##,
            r##"<text x="50%" y="60%" text-anchor="middle" fill="#636e72" font-size="{small}">(&gt;50MB)</text>"##,
            "</svg>"
        ),
        w = width,
        h = height,
        size = font_size,
        small = font_size * 0.7,
    )
}

fn static_preview_card(width: f32, height: f32, size_mb: u64) -> String {
    let font_size = (width * 0.06).clamp(8.0, 14.0);
    let badge = font_size * 0.8;
    let icon = width * 0.3;
    let icon_x = (width - icon) / 2.0;
    let icon_y = height * 0.25;
    let tri = icon * 0.3;
    let tri_x = icon_x + icon / 2.0;
    let tri_y = icon_y + icon * 0.35;

    let mut out = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = width,
        h = height
    );
    out.push_str(r##"<rect width="100%" height="100%" fill="#1e272e"/>"##);
    out.push_str(&format!(
        r##"<rect x="{}" y="{}" width="{}" height="{}" fill="#636e72" rx="4"/>"##,
        icon_x,
        icon_y,
        icon,
        icon * 0.7
    ));
    out.push_str(&format!(
        r##"<polygon points="{},{} {},{} {},{}" fill="#dfe6e9"/>"##,
        tri_x - tri * 0.4,
        tri_y - tri * 0.5,
        tri_x - tri * 0.4,
        tri_y + tri * 0.5,
        tri_x + tri * 0.5,
        tri_y
    ));
    out.push_str(&format!(
        r##"<text x="50%" y="{}" text-anchor="middle" fill="#74b9ff" font-size="{}">{} MB</text>"##,
        height * 0.75,
        badge,
        size_mb
    ));
    out.push_str(&format!(
        r##"<text x="50%" y="{}" text-anchor="middle" fill="#636e72" font-size="{}">Click to load</text>"##,
        height * 0.88,
        badge * 0.8
    ));
    out.push_str("</svg>");
    out
}
