//! Procedural sensor noise: a bounded scatter of faint single-pixel specks.
//!
//! ```text
//! n = min(cap_max, width × height / divisor)
//! ```
//!
//! Each of the `n` draws picks a uniform random coordinate, an alpha in the
//! configured band and either a random RGB color or pure black/white, then
//! composites that color onto the pixel. Coordinates may repeat, so at most
//! `n` distinct pixels change.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::composite::blend_over;
use crate::image::{Color, RetroImage};

/// Color model of the noise specks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NoiseMode {
    /// Each speck is black or white with equal probability.
    #[default]
    Binary,
    /// Each speck has independent uniform R, G, B.
    FullRandom,
}

/// Sensor noise parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseParams {
    /// Hard upper bound on the number of draws.
    pub cap_max: u32,
    /// One draw per `divisor` pixels, before the cap.
    pub divisor: u32,
    /// Inclusive alpha band `[min, max]`.
    pub alpha_range: [u8; 2],
    pub mode: NoiseMode,
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self {
            cap_max: 16_000,
            divisor: 32,
            alpha_range: [11, 11],
            mode: NoiseMode::Binary,
        }
    }
}

/// Number of draws for a `width × height` image.
pub fn perturbation_count(width: u32, height: u32, params: &NoiseParams) -> u64 {
    let pixels = width as u64 * height as u64;
    (pixels / params.divisor.max(1) as u64).min(params.cap_max as u64)
}

/// Scatter noise specks over `image` using `rng`.
pub fn apply_sensor_noise<R: Rng + ?Sized>(
    mut image: RetroImage,
    params: &NoiseParams,
    rng: &mut R,
) -> RetroImage {
    let count = perturbation_count(image.width, image.height, params);
    if count == 0 {
        return image;
    }
    let [lo, hi] = params.alpha_range;
    let (lo, hi) = (lo.min(hi), lo.max(hi));

    for _ in 0..count {
        let x = rng.gen_range(0..image.width);
        let y = rng.gen_range(0..image.height);
        let alpha = rng.gen_range(lo..=hi);
        let color = match params.mode {
            NoiseMode::Binary => {
                if rng.gen_bool(0.5) {
                    Color::WHITE
                } else {
                    Color::BLACK
                }
            }
            NoiseMode::FullRandom => Color::rgb(rng.r#gen(), rng.r#gen(), rng.r#gen()),
        };
        let idx = image.index(x, y);
        blend_over(&mut image.pixels[idx], color.with_alpha(alpha));
    }
    image
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn changed_pixels(a: &RetroImage, b: &RetroImage) -> usize {
        a.pixels.iter().zip(&b.pixels).filter(|(p, q)| p != q).count()
    }

    #[test]
    fn test_count_respects_divisor_and_cap() {
        let params = NoiseParams {
            cap_max: 15_000,
            divisor: 1000,
            ..NoiseParams::default()
        };
        assert_eq!(perturbation_count(100, 100, &params), 10);
        assert_eq!(perturbation_count(4000, 3000, &params), 12_000);
        assert_eq!(perturbation_count(8000, 6000, &params), 15_000);
        assert_eq!(perturbation_count(10, 10, &params), 0);
    }

    #[test]
    fn test_zero_divisor_does_not_panic() {
        let params = NoiseParams {
            divisor: 0,
            cap_max: 5,
            ..NoiseParams::default()
        };
        assert_eq!(perturbation_count(10, 10, &params), 5);
    }

    #[test]
    fn test_changed_pixels_bounded_by_count() {
        let params = NoiseParams {
            cap_max: 50,
            divisor: 4,
            alpha_range: [200, 255],
            mode: NoiseMode::FullRandom,
        };
        let src = RetroImage::filled(40, 40, Color::rgb(128, 128, 128));
        let mut rng = StdRng::seed_from_u64(7);
        let out = apply_sensor_noise(src.clone(), &params, &mut rng);
        let changed = changed_pixels(&src, &out);
        assert!(changed > 0);
        assert!(changed <= 50, "changed {changed}");
    }

    #[test]
    fn test_binary_mode_only_moves_toward_black_or_white() {
        let params = NoiseParams {
            cap_max: 1000,
            divisor: 1,
            alpha_range: [8, 18],
            mode: NoiseMode::Binary,
        };
        let src = RetroImage::filled(30, 30, Color::rgb(100, 100, 100));
        let mut rng = StdRng::seed_from_u64(3);
        let out = apply_sensor_noise(src, &params, &mut rng);
        for p in &out.pixels {
            assert_eq!(p[0], p[1]);
            assert_eq!(p[1], p[2]);
            assert_eq!(p[3], 255);
        }
    }

    #[test]
    fn test_same_seed_is_reproducible() {
        let params = NoiseParams::default();
        let src = RetroImage::filled(64, 64, Color::rgb(90, 60, 30));
        let a = apply_sensor_noise(src.clone(), &params, &mut StdRng::seed_from_u64(11));
        let b = apply_sensor_noise(src, &params, &mut StdRng::seed_from_u64(11));
        assert_eq!(a, b);
    }
}
