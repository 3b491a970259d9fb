//! Test helper utilities for integration tests

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use fbfsvg::{RenderError, ThumbnailCache, ThumbnailState};
use tempfile::TempDir;

pub const MINIMAL_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100" viewBox="0 0 100 100">
  <rect id="box" x="10" y="10" width="80" height="80" fill="blue"/>
</svg>
"#;

pub const ANIMATED_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" viewBox="0 0 200 100">
  <defs><g id="frame1"><circle cx="50" cy="50" r="40" fill="red"/></g></defs>
  <use id="player" xlink:href="#frame1"/>
  <animate xlink:href="#player" attributeName="opacity" values="1;0;1" dur="1s" repeatCount="indefinite"/>
</svg>
"##;

/// A temp dir holding `count` SVG files, alternating minimal and animated.
pub struct SvgFixtures {
    pub dir: TempDir,
    pub paths: Vec<String>,
}

impl SvgFixtures {
    pub fn new(count: usize) -> Self {
        let dir = TempDir::new().unwrap();
        let paths = (0..count)
            .map(|i| {
                let body = if i % 2 == 0 { MINIMAL_SVG } else { ANIMATED_SVG };
                let path = dir.path().join(format!("thumb_{i:03}.svg"));
                std::fs::write(&path, body).unwrap();
                path.to_string_lossy().into_owned()
            })
            .collect();
        Self { dir, paths }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }
}

/// In-memory renderer that counts calls and sleeps briefly per render.
#[derive(Clone, Default)]
pub struct CountingRenderer {
    pub calls: Arc<AtomicUsize>,
    pub delay: Duration,
}

impl CountingRenderer {
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            calls: Arc::default(),
            delay,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl fbfsvg::Renderer for CountingRenderer {
    fn render(&self, path: &str, width: f32, height: f32) -> Result<String, RenderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        Ok(format!(
            r#"<svg width="{}" height="{}"><desc>{}</desc></svg>"#,
            width, height, path
        ))
    }
}

/// Poll until `done` holds or `timeout` passes. Returns whether it held.
pub fn wait_until(timeout: Duration, mut done: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if done() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    done()
}

/// Poll until every path has settled (Ready or Error).
pub fn wait_settled(cache: &ThumbnailCache, paths: &[String], timeout: Duration) -> bool {
    wait_until(timeout, || {
        paths.iter().all(|path| cache.get_state(path).is_settled())
    })
}

/// Every state value a query may legally return.
pub fn is_valid_state(state: ThumbnailState) -> bool {
    ThumbnailState::ALL.contains(&state)
}
