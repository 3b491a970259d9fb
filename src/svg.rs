//! SVG markup helpers
//!
//! Lightweight text-level operations used when wrapping a source file into
//! a thumbnail: viewBox extraction, id namespacing and body extraction.
//! No XML parser is involved.

use std::sync::OnceLock;

use regex::{Captures, Regex};

/// A parsed `viewBox` (or width/height fallback).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub min_x: f32,
    pub min_y: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for ViewBox {
    fn default() -> Self {
        Self {
            min_x: 0.0,
            min_y: 0.0,
            width: 100.0,
            height: 100.0,
        }
    }
}

impl ViewBox {
    /// Format as a `viewBox` attribute value.
    pub fn to_attr(&self) -> String {
        format!("{} {} {} {}", self.min_x, self.min_y, self.width, self.height)
    }
}

macro_rules! cached_regex {
    ($name:ident, $pattern:expr) => {
        fn $name() -> &'static Regex {
            static RE: OnceLock<Regex> = OnceLock::new();
            RE.get_or_init(|| Regex::new($pattern).expect("static regex is valid"))
        }
    };
}

cached_regex!(view_box_re, r#"viewBox\s*=\s*["']([^"']+)["']"#);
cached_regex!(width_re, r#"(?:^|\s)width\s*=\s*["'](\d+(?:\.\d+)?)(?:px)?["']"#);
cached_regex!(height_re, r#"(?:^|\s)height\s*=\s*["'](\d+(?:\.\d+)?)(?:px)?["']"#);
cached_regex!(id_attr_re, r#"(^|\s)id\s*=\s*["']([^"']+)["']"#);
cached_regex!(href_re, r#"(xlink:)?href\s*=\s*["']#([^"']+)["']"#);
cached_regex!(url_re, r#"url\s*\(\s*#([^)]+)\s*\)"#);
cached_regex!(begin_re, r#"begin\s*=\s*["']([A-Za-z_][^"'.;\s]*)\.([^"']+)["']"#);
cached_regex!(values_re, r#"values\s*=\s*["']([^"']+)["']"#);
cached_regex!(id_ref_re, r#"#([^;#]+)"#);

/// The opening root `<svg ...>` tag, if any.
fn root_tag(svg: &str) -> Option<(usize, usize)> {
    let start = svg.find("<svg")?;
    let end = start + svg[start..].find('>')?;
    Some((start, end))
}

/// Extract the full viewBox of the root `<svg>` element.
///
/// Falls back to the root's `width`/`height` attributes with a zero origin.
/// Returns `None` if neither form is present.
pub fn extract_view_box(svg: &str) -> Option<ViewBox> {
    let (start, end) = root_tag(svg)?;
    let root = &svg[start..=end];

    if let Some(caps) = view_box_re().captures(root) {
        let numbers: Vec<f32> = caps[1]
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|s| !s.is_empty())
            .filter_map(|s| s.parse().ok())
            .collect();
        if let &[min_x, min_y, width, height, ..] = numbers.as_slice() {
            return Some(ViewBox {
                min_x,
                min_y,
                width,
                height,
            });
        }
    }

    let width = parse_dimension(width_re(), root)?;
    let height = parse_dimension(height_re(), root)?;
    Some(ViewBox {
        min_x: 0.0,
        min_y: 0.0,
        width,
        height,
    })
}

fn parse_dimension(re: &Regex, svg: &str) -> Option<f32> {
    re.captures(svg)
        .and_then(|caps| caps[1].parse::<f32>().ok())
        .filter(|v| v.is_finite())
}

/// Namespace every element id and id reference with `prefix`.
///
/// Covers `id="..."`, `href`/`xlink:href="#..."`, `url(#...)`, SMIL
/// `begin="id.event"` and `values="#a;#b"` frame lists, so several files
/// can be composited into one document without id collisions.
pub fn prefix_ids(svg: &str, prefix: &str) -> String {
    let result = id_attr_re().replace_all(svg, |caps: &Captures| {
        format!("{}id=\"{}{}\"", &caps[1], prefix, &caps[2])
    });
    let result = href_re().replace_all(&result, |caps: &Captures| {
        let ns = caps.get(1).map_or("", |m| m.as_str());
        format!("{}href=\"#{}{}\"", ns, prefix, &caps[2])
    });
    let result = url_re().replace_all(&result, |caps: &Captures| {
        format!("url(#{}{})", prefix, &caps[1])
    });
    let result = begin_re().replace_all(&result, |caps: &Captures| {
        format!("begin=\"{}{}.{}\"", prefix, &caps[1], &caps[2])
    });
    let result = values_re().replace_all(&result, |caps: &Captures| {
        let values = &caps[1];
        if values.contains('#') {
            let prefixed = id_ref_re().replace_all(values, |refs: &Captures| {
                format!("#{}{}", prefix, &refs[1])
            });
            format!("values=\"{}\"", prefixed)
        } else {
            format!("values=\"{}\"", values)
        }
    });
    result.into_owned()
}

/// Return the markup between the root `<svg ...>` tag and the last `</svg>`.
///
/// Returns `None` if there is no `<svg` root or it is never closed.
pub fn extract_inner(svg: &str) -> Option<&str> {
    let (_, tag_end) = root_tag(svg)?;
    let end = svg.rfind("</svg>")?;
    if end <= tag_end {
        return None;
    }
    Some(&svg[tag_end + 1..end])
}
