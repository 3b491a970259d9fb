//! CLI definitions for fbfsvg
//!
//! Kept separate from main.rs so xtask can generate man pages from them.

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::thumbnail::ThumbnailState;

/// Version string shown by `--version`.
#[cfg(not(feature = "release"))]
pub const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("VERGEN_GIT_SHA"), ")");

/// Version string shown by `--version`.
#[cfg(feature = "release")]
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build clap styles.
pub fn build_cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::White.on_default())
        .valid(AnsiColor::White.on_default())
        .invalid(AnsiColor::Red.on_default())
        .error(AnsiColor::Red.on_default() | Effects::BOLD)
}

#[derive(Parser)]
#[command(name = "fbfsvg")]
#[command(about = "Frame-by-frame SVG player gallery tools")]
#[command(
    long_about = "fbfsvg - Gallery tools for frame-by-frame SVG animations.

Renders gallery thumbnails on a background loader thread, the same way the
player's gallery view does, and reports what happened to each file.

QUICK START:
    fbfsvg thumbs ~/animations         Render thumbnails for a directory
    fbfsvg placeholder --state error   Print a placeholder cell
    fbfsvg config show                 Show the effective configuration"
)]
#[command(version = VERSION)]
#[command(styles = build_cli_styles())]
pub struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render gallery thumbnails for a directory
    #[command(long_about = "Scan a directory for SVG files and render a thumbnail for each
on the background loader, highest priority (first in the grid) first.

Waits until every file is Ready or Error, or until the timeout elapses,
then prints one line per file.

EXAMPLES:
    fbfsvg thumbs                       Use the configured gallery directory
    fbfsvg thumbs ./frames --json       Machine-readable output
    fbfsvg thumbs ./frames -W 320 -H 180")]
    Thumbs {
        /// Directory to scan (defaults to gallery.directory)
        dir: Option<PathBuf>,
        /// Thumbnail width in pixels
        #[arg(long, short = 'W')]
        width: Option<f32>,
        /// Thumbnail height in pixels
        #[arg(long, short = 'H')]
        height: Option<f32>,
        /// Give up waiting after this many milliseconds
        #[arg(long, default_value_t = 10_000)]
        timeout_ms: u64,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print placeholder markup for a gallery cell
    Placeholder {
        /// State the placeholder represents
        #[arg(long, value_enum, default_value_t = PlaceholderState::Loading)]
        state: PlaceholderState,
        /// Grid cell index (keeps element ids unique)
        #[arg(long, default_value_t = 0)]
        cell: u32,
        /// Width in pixels
        #[arg(long, short = 'W', default_value_t = 200.0)]
        width: f32,
        /// Height in pixels
        #[arg(long, short = 'H', default_value_t = 200.0)]
        height: f32,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Print the configuration file path
    Path,
}

/// Placeholder states selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlaceholderState {
    NotLoaded,
    Pending,
    Loading,
    Error,
}

impl From<PlaceholderState> for ThumbnailState {
    fn from(state: PlaceholderState) -> Self {
        match state {
            PlaceholderState::NotLoaded => ThumbnailState::NotLoaded,
            PlaceholderState::Pending => ThumbnailState::Pending,
            PlaceholderState::Loading => ThumbnailState::Loading,
            PlaceholderState::Error => ThumbnailState::Error,
        }
    }
}
