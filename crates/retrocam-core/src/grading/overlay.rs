//! Uniform overlays: highlight compression (solid white, source-over) and
//! the warm soft-midtone cast (Porter-Duff OVERLAY).

use serde::{Deserialize, Serialize};

use crate::composite::blend_over;
use crate::image::{Color, RetroImage};

/// Composite solid white over the whole image at `alpha`.
///
/// Lifts blacks and flattens highlights, approximating the clipped, low
/// dynamic range of a small sensor. `alpha = 0` is a no-op.
pub fn apply_highlight_compression(mut image: RetroImage, alpha: u8) -> RetroImage {
    if alpha == 0 {
        return image;
    }
    let white = Color::WHITE.with_alpha(alpha);
    for px in &mut image.pixels {
        blend_over(px, white);
    }
    image
}

/// Warm overlay tint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayParams {
    /// Overlay color; its alpha is the blend strength.
    pub color: Color,
}

impl Default for OverlayParams {
    fn default() -> Self {
        Self {
            color: Color::rgba(255, 240, 200, 30),
        }
    }
}

/// Porter-Duff OVERLAY of a translucent source onto an opaque destination
/// channel. Premultiplied, all values normalized to `[0, 1]`:
///
/// ```text
///   Sc = s × Sa
///   2D ≤ 1:  out = 2 Sc D                     + D (1 − Sa)
///   else:    out = Sa − 2 (1 − D)(Sa − Sc)    + D (1 − Sa)
/// ```
#[inline]
pub fn overlay_channel(dst: u8, src: u8, alpha: u8) -> u8 {
    let sa = alpha as f32 / 255.0;
    let sc = src as f32 / 255.0 * sa;
    let d = dst as f32 / 255.0;

    let blended = if 2.0 * d <= 1.0 {
        2.0 * sc * d
    } else {
        sa - 2.0 * (1.0 - d) * (sa - sc)
    };
    let out = blended + d * (1.0 - sa);
    (out * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Apply the overlay tint to every pixel in place.
pub fn apply_warm_overlay(mut image: RetroImage, params: &OverlayParams) -> RetroImage {
    let color = params.color;
    if color.a == 0 {
        return image;
    }
    for px in &mut image.pixels {
        px[0] = overlay_channel(px[0], color.r, color.a);
        px[1] = overlay_channel(px[1], color.g, color.a);
        px[2] = overlay_channel(px[2], color.b, color.a);
    }
    image
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_compression_lifts_black() {
        let img = RetroImage::filled(2, 2, Color::BLACK);
        let out = apply_highlight_compression(img, 12);
        // 255 × 12/255 = 12
        assert!(out.pixels.iter().all(|p| *p == [12, 12, 12, 255]));
    }

    #[test]
    fn test_highlight_compression_keeps_white() {
        let img = RetroImage::filled(2, 2, Color::WHITE);
        let out = apply_highlight_compression(img.clone(), 40);
        assert_eq!(out, img);
    }

    #[test]
    fn test_highlight_compression_zero_alpha_is_identity() {
        let img = RetroImage::filled(2, 2, Color::rgb(3, 90, 200));
        assert_eq!(apply_highlight_compression(img.clone(), 0), img);
    }

    #[test]
    fn test_overlay_zero_alpha_is_identity() {
        for d in [0u8, 64, 128, 200, 255] {
            assert_eq!(overlay_channel(d, 255, 0), d);
        }
    }

    #[test]
    fn test_overlay_preserves_black_and_white() {
        assert_eq!(overlay_channel(0, 255, 30), 0);
        assert_eq!(overlay_channel(255, 200, 30), 255);
    }

    #[test]
    fn test_warm_overlay_warms_midtones() {
        let img = RetroImage::filled(1, 1, Color::rgb(100, 100, 100));
        let out = apply_warm_overlay(img, &OverlayParams::default());
        let px = out.pixels[0];
        assert!(px[0] > px[2], "red should end above blue: {px:?}");
    }
}
