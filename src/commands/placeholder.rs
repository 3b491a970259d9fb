//! Placeholder command handler

use anyhow::{bail, Result};

use fbfsvg::{generate_placeholder, ThumbnailState};

/// Print placeholder markup for one gallery cell.
pub fn handle(state: ThumbnailState, cell: u32, width: f32, height: f32) -> Result<()> {
    if !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0) {
        bail!("Placeholder size must be positive (got {}x{})", width, height);
    }
    println!("{}", generate_placeholder(width, height, state, cell));
    Ok(())
}
