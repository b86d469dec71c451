//! Faint horizontal striping from sensor readout.
//!
//! Every `spacing`-th row, starting at row 0, gets a full-width white line
//! whose alpha is drawn per line from the inclusive `alpha_range` band.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::composite::blend_over;
use crate::image::{Color, RetroImage};

/// Scanline parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanlineParams {
    /// Distance between lines in rows.
    pub spacing: u32,
    /// Inclusive alpha band `[min, max]`.
    pub alpha_range: [u8; 2],
}

impl Default for ScanlineParams {
    fn default() -> Self {
        Self {
            spacing: 9,
            alpha_range: [3, 6],
        }
    }
}

/// Draw the scanlines in place.
pub fn apply_scanlines<R: Rng + ?Sized>(
    mut image: RetroImage,
    params: &ScanlineParams,
    rng: &mut R,
) -> RetroImage {
    if image.is_empty() {
        return image;
    }
    let [lo, hi] = params.alpha_range;
    let (lo, hi) = (lo.min(hi), lo.max(hi));
    let w = image.width as usize;
    let spacing = params.spacing.max(1) as usize;

    for row in image.pixels.chunks_exact_mut(w).step_by(spacing) {
        let line = Color::WHITE.with_alpha(rng.gen_range(lo..=hi));
        for px in row {
            blend_over(px, line);
        }
    }
    image
}
