//! Radial darkening toward the corners.
//!
//! ```text
//! t     = clamp(|p − center| / |corner − center|, 0, 1)
//! alpha = trunc(t × max_alpha)
//! out   = black over p at alpha
//! ```
//!
//! [`VignetteMode::Grid`] touches only every `grid_step`-th pixel on both
//! axes (the fast, speckled falloff of the CCD look). [`VignetteMode::Smooth`]
//! evaluates the same falloff at every pixel.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::composite::blend_over;
use crate::image::{Color, RetroImage};

/// Sampling strategy for the falloff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VignetteMode {
    /// Darken one pixel per `grid_step × grid_step` cell.
    #[default]
    Grid,
    /// Darken every pixel.
    Smooth,
}

/// Vignette parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VignetteParams {
    /// Sampling stride for [`VignetteMode::Grid`].
    pub grid_step: u32,
    /// Alpha of the black overlay at the corners.
    pub max_alpha: u8,
    #[serde(default)]
    pub mode: VignetteMode,
}

impl Default for VignetteParams {
    fn default() -> Self {
        Self {
            grid_step: 6,
            max_alpha: 70,
            mode: VignetteMode::Grid,
        }
    }
}

/// Vignette alpha at `(x, y)`.
#[inline]
pub fn falloff_alpha(x: u32, y: u32, center: Vec2, max_dist: f32, max_alpha: u8) -> u8 {
    if max_dist <= 0.0 {
        return 0;
    }
    let dist = Vec2::new(x as f32, y as f32).distance(center);
    let t = (dist / max_dist).clamp(0.0, 1.0);
    (t * max_alpha as f32) as u8
}

/// Apply the vignette in place.
pub fn apply_vignette(mut image: RetroImage, params: &VignetteParams) -> RetroImage {
    if params.max_alpha == 0 {
        return image;
    }
    let center = Vec2::new(image.width as f32 / 2.0, image.height as f32 / 2.0);
    let max_dist = center.length();
    let step = match params.mode {
        VignetteMode::Grid => params.grid_step.max(1) as usize,
        VignetteMode::Smooth => 1,
    };

    for y in (0..image.height).step_by(step) {
        for x in (0..image.width).step_by(step) {
            let alpha = falloff_alpha(x, y, center, max_dist, params.max_alpha);
            let idx = image.index(x, y);
            blend_over(&mut image.pixels[idx], Color::BLACK.with_alpha(alpha));
        }
    }
    image
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_is_untouched_and_corner_is_max() {
        let center = Vec2::new(50.0, 50.0);
        let max_dist = center.length();
        assert_eq!(falloff_alpha(50, 50, center, max_dist, 70), 0);
        assert_eq!(falloff_alpha(0, 0, center, max_dist, 70), 70);
    }

    #[test]
    fn test_grid_mode_only_touches_grid_points() {
        let src = RetroImage::filled(30, 24, Color::WHITE);
        let out = apply_vignette(src, &VignetteParams::default());
        for y in 0..24 {
            for x in 0..30 {
                let on_grid = x % 6 == 0 && y % 6 == 0;
                if !on_grid {
                    assert_eq!(out.get(x, y), [255, 255, 255, 255], "({x},{y})");
                }
            }
        }
        assert!(out.get(0, 0)[0] < 255);
    }

    #[test]
    fn test_smooth_mode_darkens_monotonically_outward() {
        let src = RetroImage::filled(41, 41, Color::WHITE);
        let params = VignetteParams {
            mode: VignetteMode::Smooth,
            ..VignetteParams::default()
        };
        let out = apply_vignette(src, &params);
        let row: Vec<u8> = (0..=20).map(|x| out.get(x, 20)[0]).collect();
        assert!(row.windows(2).all(|w| w[0] <= w[1]), "{row:?}");
        assert!(out.get(0, 0)[0] < out.get(20, 20)[0]);
        // Off-grid pixels are darkened too.
        assert!(out.get(1, 1)[0] < 255);
    }

    #[test]
    fn test_zero_alpha_is_identity() {
        let src = RetroImage::filled(8, 8, Color::rgb(40, 50, 60));
        let params = VignetteParams {
            max_alpha: 0,
            ..VignetteParams::default()
        };
        assert_eq!(apply_vignette(src.clone(), &params), src);
    }
}
