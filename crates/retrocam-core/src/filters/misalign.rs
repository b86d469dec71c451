//! Slight horizontal registration error, as from a cheap CCD readout.
//!
//! The image is composited onto itself twice, shifted by `+shift` and then
//! `-shift` pixels, each at a small alpha. Sub-pixel shifts are linearly
//! interpolated and samples past the border clamp to the edge column.

use serde::{Deserialize, Serialize};

use crate::composite::blend_channel;
use crate::image::RetroImage;

/// Channel misalignment parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MisalignParams {
    /// Horizontal shift in pixels (may be fractional).
    pub shift: f32,
    /// Alpha of each shifted copy.
    pub alpha: u8,
}

impl Default for MisalignParams {
    fn default() -> Self {
        Self {
            shift: 0.6,
            alpha: 35,
        }
    }
}

/// Apply both shifted passes.
pub fn apply_misalign(mut image: RetroImage, params: &MisalignParams) -> RetroImage {
    if params.alpha == 0 || params.shift == 0.0 || image.is_empty() {
        return image;
    }
    for shift in [params.shift, -params.shift] {
        shifted_pass(&mut image, shift, params.alpha);
    }
    image
}

/// Composite a copy of `image` displaced by `shift` pixels onto itself.
fn shifted_pass(image: &mut RetroImage, shift: f32, alpha: u8) {
    let w = image.width as usize;
    let max_x = (w - 1) as f32;
    let mut row_copy = vec![[0u8; 4]; w];

    for row in image.pixels.chunks_exact_mut(w) {
        row_copy.copy_from_slice(row);
        for (x, px) in row.iter_mut().enumerate() {
            // Destination x samples the source at x − shift.
            let sx = (x as f32 - shift).clamp(0.0, max_x);
            let x0 = sx.floor() as usize;
            let x1 = (x0 + 1).min(w - 1);
            let t = sx - x0 as f32;
            for c in 0..3 {
                let a = row_copy[x0][c] as f32;
                let b = row_copy[x1][c] as f32;
                let sample = (a + (b - a) * t).round().clamp(0.0, 255.0) as u8;
                px[c] = blend_channel(px[c], sample, alpha);
            }
        }
    }
}
