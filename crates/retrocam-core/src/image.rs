//! Image representation for the stylization pipeline.

use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, StageError};

/// An 8-bit RGBA color. Channels are `[0, 255]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Opaque color from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Color from RGBA components.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with a different alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

/// Internal image representation. Always stored as RGBA u8, row-major.
///
/// Alpha is 255 on every pixel between stages; stages composite onto an
/// opaque destination so the invariant holds without re-normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetroImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Pixel data, `width × height` entries.
    pub pixels: Vec<[u8; 4]>,
}

impl RetroImage {
    /// Create an image filled with a single color.
    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            pixels: vec![[color.r, color.g, color.b, color.a]; len],
        }
    }

    /// Decode compressed source bytes (JPEG, PNG, …) into an opaque RGBA image.
    pub fn decode(bytes: &[u8]) -> Result<Self, PipelineError> {
        let decoded = image::load_from_memory(bytes).map_err(PipelineError::Decode)?;
        let mut image = Self::from_rgba_image(&decoded.to_rgba8());
        // Sources with transparency are flattened: only opaque pixels flow through the stages.
        for px in &mut image.pixels {
            px[3] = 255;
        }
        Ok(image)
    }

    /// Number of pixels.
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// `true` when the image has no pixels.
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Row-major index of `(x, y)`.
    #[inline]
    pub fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Pixel at `(x, y)`.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> [u8; 4] {
        self.pixels[self.index(x, y)]
    }

    /// Check the buffer invariant: non-empty and `pixels.len() == width × height`.
    pub fn validate(&self) -> Result<(), StageError> {
        if self.width == 0 || self.height == 0 {
            return Err(StageError::EmptyImage);
        }
        let expected = (self.width as usize)
            .checked_mul(self.height as usize)
            .ok_or(StageError::DimensionOverflow {
                width: self.width,
                height: self.height,
            })?;
        if self.pixels.len() != expected {
            return Err(StageError::BufferMismatch {
                expected,
                actual: self.pixels.len(),
            });
        }
        Ok(())
    }

    /// Copy into an `image` crate buffer for resampling and encoding.
    pub fn to_rgba_image(&self) -> RgbaImage {
        let raw: &[u8] = bytemuck::cast_slice(&self.pixels);
        // Length is `width × height × 4` by construction, so `from_raw` cannot fail on a valid image.
        RgbaImage::from_raw(self.width, self.height, raw.to_vec())
            .unwrap_or_else(|| RgbaImage::new(self.width, self.height))
    }

    /// Copy out of an `image` crate buffer.
    pub fn from_rgba_image(buffer: &RgbaImage) -> Self {
        let (width, height) = buffer.dimensions();
        Self {
            width,
            height,
            pixels: buffer.pixels().map(|p| p.0).collect(),
        }
    }

    /// Mean of each channel across the image, `[R, G, B, A]`.
    pub fn channel_means(&self) -> [f64; 4] {
        if self.pixels.is_empty() {
            return [0.0; 4];
        }
        let mut sum = [0u64; 4];
        for px in &self.pixels {
            for c in 0..4 {
                sum[c] += px[c] as u64;
            }
        }
        let n = self.pixels.len() as f64;
        [
            sum[0] as f64 / n,
            sum[1] as f64 / n,
            sum[2] as f64 / n,
            sum[3] as f64 / n,
        ]
    }
}
