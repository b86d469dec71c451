//! Affine color matrix: channel mixing plus offsets.
//!
//! # Formula
//! For each output channel `c` in `{R, G, B}`:
//! ```text
//!   out[c] = clamp(m[c][0]×R + m[c][1]×G + m[c][2]×B + m[c][3], 0, 255)
//! ```
//! Alpha passes through unchanged. Rows are in 8-bit units, so offsets are
//! added in levels, not fractions.

use serde::{Deserialize, Serialize};

use crate::image::RetroImage;

/// 3×4 affine color matrix. Each row is `[R, G, B, offset]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorMatrix(pub [[f32; 4]; 3]);

impl ColorMatrix {
    /// No-op matrix.
    pub const IDENTITY: Self = Self([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
    ]);

    /// Whether this matrix leaves every pixel unchanged.
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Transform one pixel.
    #[inline]
    pub fn apply_pixel(&self, px: [u8; 4]) -> [u8; 4] {
        let (r, g, b) = (px[0] as f32, px[1] as f32, px[2] as f32);
        let mut out = px;
        for (c, row) in self.0.iter().enumerate() {
            let v = row[0] * r + row[1] * g + row[2] * b + row[3];
            out[c] = v.round().clamp(0.0, 255.0) as u8;
        }
        out
    }
}

impl Default for ColorMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Apply `matrix` to every pixel in place.
pub fn apply_color_matrix(mut image: RetroImage, matrix: &ColorMatrix) -> RetroImage {
    if matrix.is_identity() {
        return image;
    }
    for px in &mut image.pixels {
        *px = matrix.apply_pixel(*px);
    }
    image
}
