//! Alpha compositing onto opaque pixels.
//!
//! Every stage that "draws" something (noise points, vignette, scanlines,
//! overlays, glyphs) goes through these helpers. The destination is always
//! opaque, so source-over reduces to a per-channel linear blend and the
//! destination alpha stays at 255.
//!
//! ```text
//! out = round(src × a + dst × (1 − a)),   a = alpha / 255
//! ```

use crate::image::Color;

/// Blend one channel.
#[inline]
pub fn blend_channel(dst: u8, src: u8, alpha: u8) -> u8 {
    let a = alpha as f32 / 255.0;
    (src as f32 * a + dst as f32 * (1.0 - a)).round().clamp(0.0, 255.0) as u8
}

/// Source-over `color` onto `dst` at `color.a`. Destination alpha is left untouched.
#[inline]
pub fn blend_over(dst: &mut [u8; 4], color: Color) {
    if color.a == 0 {
        return;
    }
    dst[0] = blend_channel(dst[0], color.r, color.a);
    dst[1] = blend_channel(dst[1], color.g, color.a);
    dst[2] = blend_channel(dst[2], color.b, color.a);
}

/// Weighted mix of two pixels: `round(a × (1 − t) + b × t)` per color channel.
///
/// `t = 0` returns `a`, `t = 1` returns `b`, both exactly.
#[inline]
pub fn mix_pixels(a: [u8; 4], b: [u8; 4], t: f32) -> [u8; 4] {
    let mut out = a;
    for c in 0..3 {
        out[c] = (a[c] as f32 * (1.0 - t) + b[c] as f32 * t)
            .round()
            .clamp(0.0, 255.0) as u8;
    }
    out
}

/// Clamp an integer channel value to `[0, 255]`.
#[inline]
pub fn clamp_u8(v: i32) -> u8 {
    v.clamp(0, 255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_channel_extremes() {
        assert_eq!(blend_channel(40, 200, 0), 40);
        assert_eq!(blend_channel(40, 200, 255), 200);
    }

    #[test]
    fn test_blend_over_black_at_half() {
        let mut px = [200, 100, 50, 255];
        blend_over(&mut px, Color::rgba(0, 0, 0, 128));
        // 200 × 127/255 = 99.6
        assert_eq!(px, [100, 50, 25, 255]);
    }

    #[test]
    fn test_blend_over_transparent_is_noop() {
        let mut px = [1, 2, 3, 255];
        blend_over(&mut px, Color::rgba(255, 255, 255, 0));
        assert_eq!(px, [1, 2, 3, 255]);
    }

    #[test]
    fn test_mix_pixels_endpoints_are_exact() {
        let a = [13, 77, 201, 255];
        let b = [250, 0, 99, 255];
        assert_eq!(mix_pixels(a, b, 0.0), a);
        assert_eq!(mix_pixels(a, b, 1.0), b);
    }
}
