//! Noise-reduction smear: the "no noise, but no texture either" look of
//! early phone ISPs.
//!
//! ```text
//! blur = upscale(downscale(src, factor))
//! out  = round(src × (1 − mix) + blur × mix)
//! ```
//!
//! The same operation with a mild factor (≈0.965) and a lower mix doubles as
//! the cheap-lens softness pass of the CCD looks.

use serde::{Deserialize, Serialize};

use crate::composite::mix_pixels;
use crate::filters::resample::downscale_blur;
use crate::image::RetroImage;

/// Parameters for a blur-and-blend pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmearParams {
    /// Downscale factor in `(0, 1]`. Smaller is blurrier.
    pub downscale: f32,
    /// Blend weight of the blurred copy in `[0, 1]`.
    pub mix: f32,
}

impl Default for SmearParams {
    fn default() -> Self {
        Self {
            downscale: 0.45,
            mix: 0.62,
        }
    }
}

impl SmearParams {
    /// Mild lens softness: a 0.965 resample blended at 115/255.
    pub fn softness() -> Self {
        Self {
            downscale: 0.965,
            mix: 115.0 / 255.0,
        }
    }

    /// Whether the pass would leave the image unchanged.
    pub fn is_identity(&self) -> bool {
        self.mix <= 0.0
    }
}

/// Blend `blur` into `image` in place with weight `mix`.
///
/// `mix = 0` leaves `image` unchanged, `mix = 1` copies `blur` exactly.
pub fn blend_with_blur(image: &mut RetroImage, blur: &RetroImage, mix: f32) {
    let mix = mix.clamp(0.0, 1.0);
    for (px, b) in image.pixels.iter_mut().zip(&blur.pixels) {
        *px = mix_pixels(*px, *b, mix);
    }
}

/// Smear `image` with a downscale/upscale blur.
pub fn apply_smear(mut image: RetroImage, params: &SmearParams) -> RetroImage {
    if params.is_identity() {
        return image;
    }
    let blur = downscale_blur(&image, params.downscale);
    blend_with_blur(&mut image, &blur, params.mix);
    image
}
