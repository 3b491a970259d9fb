//! Thumbs command handler

use anyhow::{bail, Context, Result};
use humansize::{format_size, BINARY};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use fbfsvg::gallery::{self, ThumbnailReport};
use fbfsvg::{Config, ThumbnailCache, ThumbnailState};

use super::truncate_string;

/// Render thumbnails for every gallery file and print the outcome.
#[cfg(not(tarpaulin_include))]
pub fn handle(
    dir: Option<PathBuf>,
    width: Option<f32>,
    height: Option<f32>,
    timeout_ms: u64,
    json: bool,
) -> Result<()> {
    let config = Config::load()?;
    let dir = dir.unwrap_or_else(|| config.gallery_directory());
    let width = width.unwrap_or(config.thumbnails.width);
    let height = height.unwrap_or(config.thumbnails.height);
    if !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0) {
        bail!("Thumbnail size must be positive (got {}x{})", width, height);
    }

    let items = gallery::scan(&dir, &config.gallery)?;
    if items.is_empty() {
        println!("No SVG files found in {}", dir.display());
        return Ok(());
    }

    let interrupted = Arc::new(AtomicBool::new(false));
    let flag = interrupted.clone();
    ctrlc::set_handler(move || {
        flag.store(true, Ordering::SeqCst);
    })
    .ok(); // Ignore if handler already set

    let cache = ThumbnailCache::from_config(&config.thumbnails);
    let reports = gallery::render_thumbnails(
        &cache,
        &items,
        width,
        height,
        Duration::from_millis(timeout_ms),
        &interrupted,
    );

    if json {
        let out = serde_json::to_string_pretty(&reports).context("Failed to serialize report")?;
        println!("{}", out);
    } else {
        print_table(&reports);
        println!();
        println!("{}", summary(&reports, cache.cache_size_bytes()));
    }
    Ok(())
}

fn print_table(reports: &[ThumbnailReport]) {
    println!("{:>4}  {:<10} {:>10}  FILE", "#", "STATE", "SIZE");
    for report in reports {
        let name = report
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("");
        let size = if report.state == ThumbnailState::Ready {
            format_size(report.bytes, BINARY)
        } else {
            "-".to_string()
        };
        print!(
            "{:>4}  {:<10} {:>10}  {}",
            report.index,
            report.state.to_string(),
            size,
            truncate_string(name, 48)
        );
        match &report.error {
            Some(error) => println!("  ({})", error),
            None => println!(),
        }
    }
}

/// One-line totals for the table output.
fn summary(reports: &[ThumbnailReport], cache_bytes: usize) -> String {
    let count = |state: ThumbnailState| reports.iter().filter(|r| r.state == state).count();
    let unsettled = reports.iter().filter(|r| !r.state.is_settled()).count();
    let mut line = format!(
        "{} ready, {} failed, {} cached",
        count(ThumbnailState::Ready),
        count(ThumbnailState::Error),
        format_size(cache_bytes, BINARY)
    );
    if unsettled > 0 {
        line.push_str(&format!(", {} unfinished", unsettled));
    }
    line
}
