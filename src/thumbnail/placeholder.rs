//! Placeholder generation for cells whose thumbnail is not Ready.
//!
//! Pure functions with no shared state: safe to call from any thread, any
//! number of times. `cell_index` keeps element ids unique per grid cell so
//! several placeholders can live in one composited document.

use std::fmt::Write;

use super::state::ThumbnailState;

const BACKGROUND: &str = "#2d3436";
const ACCENT: &str = "#74b9ff";
const MUTED_TEXT: &str = "#b2bec3";
const LABEL_TEXT: &str = "#636e72";
const ERROR_TEXT: &str = "#e17055";

/// Placeholder markup for a cell in the given state.
///
/// Pending and Loading show a pulsing spinner, Error shows a warning glyph,
/// anything else shows a neutral label. Always a standalone `<svg>`
/// document of exactly `width` x `height`.
pub fn generate_placeholder(width: f32, height: f32, state: ThumbnailState, cell_index: u32) -> String {
    let font_size = (width * 0.1).clamp(10.0, 20.0);
    let cx = width / 2.0;
    let cy = height / 2.0;

    let mut out = String::with_capacity(1024);
    // Writing into a String cannot fail
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = width,
        h = height
    );
    let _ = write!(
        out,
        r#"<rect width="{}" height="{}" fill="{}"/>"#,
        width, height, BACKGROUND
    );

    match state {
        _ if state.is_in_progress() => {
            let r = width.min(height) * 0.15;
            let inner_r = r * 0.4;
            let ring_id = format!("loadRing_{cell_index}");
            let dot_id = format!("loadDot_{cell_index}");

            let _ = write!(
                out,
                r#"<circle id="{ring_id}" cx="{cx}" cy="{cy}" r="{r}" fill="none" stroke="{ACCENT}" stroke-width="3" opacity="1"/>"#
            );
            let _ = write!(
                out,
                r#"<circle id="{dot_id}" cx="{cx}" cy="{cy}" r="{inner_r}" fill="{ACCENT}" opacity="0.3"/>"#
            );
            let _ = write!(
                out,
                r##"<animate xlink:href="#{ring_id}" attributeName="opacity" values="1;0.5;0.3;0.5;1" dur="1.2s" repeatCount="indefinite"/>"##
            );
            let _ = write!(
                out,
                r##"<animate xlink:href="#{dot_id}" attributeName="opacity" values="0.3;0.7;1;0.7;0.3" dur="1.2s" repeatCount="indefinite"/>"##
            );
            let _ = write!(
                out,
                r#"<text x="{cx}" y="{}" text-anchor="middle" fill="{MUTED_TEXT}" font-size="{}">Loading...</text>"#,
                height * 0.75,
                font_size * 0.9
            );
        }
        ThumbnailState::Error => {
            let _ = write!(
                out,
                r#"<text x="{cx}" y="{}" text-anchor="middle" fill="{ERROR_TEXT}" font-size="{}">!</text>"#,
                height * 0.45,
                font_size * 1.5
            );
            let _ = write!(
                out,
                r#"<text x="{cx}" y="{}" text-anchor="middle" fill="{MUTED_TEXT}" font-size="{font_size}">Error</text>"#,
                height * 0.65
            );
        }
        _ => {
            let _ = write!(
                out,
                r#"<text x="{cx}" y="{cy}" text-anchor="middle" fill="{LABEL_TEXT}" font-size="{font_size}">SVG</text>"#
            );
        }
    }

    out.push_str("</svg>");
    out
}

/// Animated loading spinner for a cell.
pub fn generate_loading_spinner(width: f32, height: f32, cell_index: u32) -> String {
    generate_placeholder(width, height, ThumbnailState::Loading, cell_index)
}
