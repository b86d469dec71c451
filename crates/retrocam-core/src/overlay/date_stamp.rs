//! Digicam-style date stamp in the lower-right corner.
//!
//! The date is rendered as `yyyy/MM/dd` with the `font8x8` monospace bitmap
//! font, scaled nearest-neighbour so the glyph height tracks
//! `text_size_ratio × width`. A drop shadow is drawn first, offset down and
//! to the right, then the amber text on top.
//!
//! ```text
//!                                      pad_x
//!   ┌──────────────────────────────────┬───┐
//!   │                                  │   │
//!   │                 ┌──────────────┐ │   │
//!   │                 │  2014/07/21  │ │   │  ← text_h = 8 × scale
//!   │                 └──────────────┘ │   │  ← baseline
//!   │                                pad_y   │
//!   └──────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use font8x8::{BASIC_FONTS, UnicodeFonts};
use serde::{Deserialize, Serialize};

use crate::composite::blend_over;
use crate::image::{Color, RetroImage};

/// Native glyph size of `font8x8`.
const GLYPH_SIZE: u32 = 8;

/// Format used for the stamp text.
pub const DATE_FORMAT: &str = "%Y/%m/%d";

/// A padding distance expressed relative to one of the image axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Padding {
    /// Fraction of the image width.
    OfWidth(f32),
    /// Fraction of the image height.
    OfHeight(f32),
}

impl Padding {
    fn resolve(self, width: u32, height: u32) -> u32 {
        match self {
            Self::OfWidth(f) => (width as f32 * f).round().max(0.0) as u32,
            Self::OfHeight(f) => (height as f32 * f).round().max(0.0) as u32,
        }
    }
}

/// Date stamp appearance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateStampParams {
    /// Text color, alpha included.
    pub color: Color,
    /// Shadow color, alpha included.
    pub shadow_color: Color,
    /// Shadow offset in pixels, applied on both axes.
    pub shadow_offset: u32,
    /// Glyph height as a fraction of image width.
    pub text_size_ratio: f32,
    /// Gap between the text's right edge and the image's right edge.
    pub padding_x: Padding,
    /// Gap between the text baseline and the image's bottom edge.
    pub padding_y: Padding,
}

impl Default for DateStampParams {
    fn default() -> Self {
        Self {
            color: Color::rgba(255, 200, 0, 230),
            shadow_color: Color::rgba(0, 0, 0, 230),
            shadow_offset: 2,
            text_size_ratio: 0.048,
            padding_x: Padding::OfWidth(0.04),
            padding_y: Padding::OfHeight(0.065),
        }
    }
}

/// Where the stamp lands for a given image size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateStampLayout {
    /// Integer glyph scale factor.
    pub scale: u32,
    /// Left edge of the text.
    pub x: i64,
    /// Top edge of the text.
    pub y: i64,
    /// Text width in pixels.
    pub text_width: u32,
    /// Text height in pixels.
    pub text_height: u32,
    /// Shadow offset in pixels.
    pub shadow_offset: u32,
}

impl DateStampLayout {
    /// Compute the layout of `text` on a `width × height` image.
    pub fn compute(text: &str, width: u32, height: u32, params: &DateStampParams) -> Self {
        let text_size = width as f32 * params.text_size_ratio;
        // Float-to-int `as` saturates; the pixel sizes below saturate as well.
        let scale = ((text_size / GLYPH_SIZE as f32).round() as u32).max(1);
        let glyphs = u32::try_from(text.chars().count()).unwrap_or(u32::MAX);
        let text_height = GLYPH_SIZE.saturating_mul(scale);
        let text_width = glyphs.saturating_mul(text_height);

        let pad_x = params.padding_x.resolve(width, height);
        let pad_y = params.padding_y.resolve(width, height);
        let x = width as i64 - pad_x as i64 - text_width as i64;
        let baseline = height as i64 - pad_y as i64;

        Self {
            scale,
            x,
            y: baseline - text_height as i64,
            text_width,
            text_height,
            shadow_offset: params.shadow_offset,
        }
    }

    /// Bounding box of everything drawn, shadow included, as `(x0, y0, x1, y1)`
    /// with exclusive upper bounds, clipped to the image.
    pub fn bounds(&self, width: u32, height: u32) -> (u32, u32, u32, u32) {
        let clip_x = |v: i64| v.clamp(0, width as i64) as u32;
        let clip_y = |v: i64| v.clamp(0, height as i64) as u32;
        let off = self.shadow_offset as i64;
        (
            clip_x(self.x),
            clip_y(self.y),
            clip_x(self.x + self.text_width as i64 + off),
            clip_y(self.y + self.text_height as i64 + off),
        )
    }

    /// Whether `(x, y)` falls inside [`bounds`](Self::bounds).
    pub fn contains(&self, x: u32, y: u32, width: u32, height: u32) -> bool {
        let (x0, y0, x1, y1) = self.bounds(width, height);
        x >= x0 && x < x1 && y >= y0 && y < y1
    }
}

/// Render `date` onto `image`.
pub fn apply_date_stamp(
    mut image: RetroImage,
    date: NaiveDate,
    params: &DateStampParams,
) -> RetroImage {
    let text = date.format(DATE_FORMAT).to_string();
    let layout = DateStampLayout::compute(&text, image.width, image.height, params);
    tracing::debug!(
        "date stamp '{text}' at ({}, {}) scale {}",
        layout.x,
        layout.y,
        layout.scale
    );

    let off = layout.shadow_offset as i64;
    draw_text(
        &mut image,
        &text,
        layout.x + off,
        layout.y + off,
        layout.scale,
        params.shadow_color,
    );
    draw_text(&mut image, &text, layout.x, layout.y, layout.scale, params.color);
    image
}

/// Draw `text` with its top-left corner at `(origin_x, origin_y)`. Pixels
/// outside the image are skipped.
fn draw_text(
    image: &mut RetroImage,
    text: &str,
    origin_x: i64,
    origin_y: i64,
    scale: u32,
    color: Color,
) {
    let scale = scale as i64;
    let advance = GLYPH_SIZE as i64 * scale;
    for (i, ch) in text.chars().enumerate() {
        let Some(glyph) = BASIC_FONTS.get(ch).or_else(|| BASIC_FONTS.get('?')) else {
            continue;
        };
        let glyph_x = origin_x + i as i64 * advance;
        for (row, bits) in glyph.iter().enumerate() {
            for col in 0..GLYPH_SIZE {
                if (bits >> col) & 1 == 0 {
                    continue;
                }
                let base_x = glyph_x + col as i64 * scale;
                let base_y = origin_y + row as i64 * scale;
                fill_block(image, base_x, base_y, scale, color);
            }
        }
    }
}

fn fill_block(image: &mut RetroImage, x: i64, y: i64, size: i64, color: Color) {
    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = x.saturating_add(size).min(image.width as i64);
    let y1 = y.saturating_add(size).min(image.height as i64);
    for py in y0..y1 {
        for px in x0..x1 {
            let idx = image.index(px as u32, py as u32);
            blend_over(&mut image.pixels[idx], color);
        }
    }
}
