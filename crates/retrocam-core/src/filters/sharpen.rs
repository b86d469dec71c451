//! Edge-adaptive unsharp mask that deliberately overshoots.
//!
//! The signature artifact of 2014-era phone processing: strong sharpening
//! against a coarse blur reference produces bright/dark halos ("ringing")
//! along every edge.
//!
//! # Algorithm
//! ```text
//! blur   = upscale(downscale(src, downscale))
//! d      = src − blur                       (per channel, signed)
//! e      = max(|dR|, |dG|, |dB|)
//! amount = e ≥ threshold ? base : base × damping
//! out    = clamp(src + trunc(d × amount), 0, 255)
//! ```
//!
//! Flat regions (`e < threshold`) get the damped amount so sensor noise is
//! not amplified as hard as real edges.

use serde::{Deserialize, Serialize};

use crate::composite::clamp_u8;
use crate::filters::resample::downscale_blur;
use crate::image::RetroImage;

/// Halo sharpening parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SharpenParams {
    /// Gain applied to the high-pass difference on edges.
    pub amount: f32,
    /// Edge magnitude (in 8-bit levels) at which the full amount kicks in.
    pub threshold: u8,
    /// Multiplier applied to `amount` in flat regions.
    pub damping: f32,
    /// Downscale factor of the blur reference. Larger is a finer blur.
    pub downscale: f32,
}

impl Default for SharpenParams {
    fn default() -> Self {
        Self {
            amount: 1.75,
            threshold: 10,
            damping: 0.55,
            downscale: 0.70,
        }
    }
}

impl SharpenParams {
    /// Sharpen amount for a pixel whose largest channel difference is `edge`.
    #[inline]
    pub fn amount_for(&self, edge: i32) -> f32 {
        if edge >= self.threshold as i32 {
            self.amount
        } else {
            self.amount * self.damping
        }
    }
}

/// Sharpen one pixel against its blurred counterpart.
#[inline]
pub fn sharpen_pixel(orig: [u8; 4], blurred: [u8; 4], params: &SharpenParams) -> [u8; 4] {
    let d = [
        orig[0] as i32 - blurred[0] as i32,
        orig[1] as i32 - blurred[1] as i32,
        orig[2] as i32 - blurred[2] as i32,
    ];
    let edge = d[0].abs().max(d[1].abs()).max(d[2].abs());
    let amount = params.amount_for(edge);

    let mut out = [0u8, 0, 0, 255];
    for c in 0..3 {
        // Truncates toward zero.
        out[c] = clamp_u8(orig[c] as i32 + (d[c] as f32 * amount) as i32);
    }
    out
}

/// Sharpen `image` against a blur computed at `params.downscale`.
pub fn apply_halo_sharpen(mut image: RetroImage, params: &SharpenParams) -> RetroImage {
    let blur = downscale_blur(&image, params.downscale);
    sharpen_against(&mut image, &blur, params);
    image
}

/// Sharpen `image` in place against an already computed blur reference.
pub fn sharpen_against(image: &mut RetroImage, blur: &RetroImage, params: &SharpenParams) {
    for (px, b) in image.pixels.iter_mut().zip(&blur.pixels) {
        *px = sharpen_pixel(*px, *b, params);
    }
}
