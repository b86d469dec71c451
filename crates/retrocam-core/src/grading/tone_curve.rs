//! Tone and color curve: contrast/brightness, saturation, channel gains.
//!
//! Applied per pixel in a fixed order. Each step rounds and clamps to 8 bits
//! before the next one reads it.
//!
//! ```text
//! 1. c1 = clamp(round((c − 128) × contrast + 128 + brightness))
//! 2. Y  = 0.299 R1 + 0.587 G1 + 0.114 B1
//!    c2 = clamp(round(Y + (c1 − Y) × saturation))
//! 3. c3 = clamp(round(c2 × gain[c]))
//! ```
//!
//! Order matters: saturating before the contrast stretch yields a different
//! image, so the steps are not reorderable.

use serde::{Deserialize, Serialize};

use crate::image::RetroImage;

/// Rec. 601 luma weights.
const LUMA_REC601: [f32; 3] = [0.299, 0.587, 0.114];

/// Tone curve parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToneParams {
    /// Contrast multiplier around mid-gray (128). 1.0 = neutral.
    pub contrast: f32,
    /// Brightness offset in 8-bit levels. 0.0 = neutral.
    pub brightness: f32,
    /// Saturation multiplier around luma. 1.0 = neutral.
    pub saturation: f32,
    /// Per-channel multiplicative gain `[R, G, B]`, applied last.
    pub channel_gains: [f32; 3],
}

impl Default for ToneParams {
    /// Identity curve.
    fn default() -> Self {
        Self {
            contrast: 1.0,
            brightness: 0.0,
            saturation: 1.0,
            channel_gains: [1.0, 1.0, 1.0],
        }
    }
}

#[inline]
fn round_clamp(v: f32) -> f32 {
    v.round().clamp(0.0, 255.0)
}

/// Step 1: contrast around 128 plus brightness.
pub fn apply_contrast_brightness(rgb: [f32; 3], contrast: f32, brightness: f32) -> [f32; 3] {
    rgb.map(|c| round_clamp((c - 128.0) * contrast + 128.0 + brightness))
}

/// Step 2: push channels away from (or toward) Rec. 601 luma.
///
/// `saturation = 0.0` yields gray; `1.0` is identity.
pub fn apply_saturation(rgb: [f32; 3], saturation: f32) -> [f32; 3] {
    let y = rgb[0] * LUMA_REC601[0] + rgb[1] * LUMA_REC601[1] + rgb[2] * LUMA_REC601[2];
    rgb.map(|c| round_clamp(y + (c - y) * saturation))
}

/// Step 3: fixed per-channel gain bias.
pub fn apply_channel_gains(rgb: [f32; 3], gains: [f32; 3]) -> [f32; 3] {
    [
        round_clamp(rgb[0] * gains[0]),
        round_clamp(rgb[1] * gains[1]),
        round_clamp(rgb[2] * gains[2]),
    ]
}

/// Run the full curve on one pixel. Alpha is forced opaque.
#[inline]
pub fn tone_pixel(px: [u8; 4], params: &ToneParams) -> [u8; 4] {
    let rgb = [px[0] as f32, px[1] as f32, px[2] as f32];
    let rgb = apply_contrast_brightness(rgb, params.contrast, params.brightness);
    let rgb = apply_saturation(rgb, params.saturation);
    let rgb = apply_channel_gains(rgb, params.channel_gains);
    [rgb[0] as u8, rgb[1] as u8, rgb[2] as u8, 255]
}

/// Apply the tone curve to every pixel in place.
pub fn apply_tone_curve(mut image: RetroImage, params: &ToneParams) -> RetroImage {
    for px in &mut image.pixels {
        *px = tone_pixel(*px, params);
    }
    image
}
