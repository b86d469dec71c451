//! Downscale/upscale blur reference shared by the smear and halo stages.

use image::imageops::{self, FilterType};

use crate::image::RetroImage;

/// Blur `src` by shrinking it by `factor` and stretching it back.
///
/// Both passes use bilinear (triangle) resampling. The reduced size is
/// `floor(dim × factor)`, at least one pixel. The returned buffer always has
/// the dimensions of `src`; the intermediate small buffer never escapes.
pub fn downscale_blur(src: &RetroImage, factor: f32) -> RetroImage {
    let factor = factor.clamp(f32::MIN_POSITIVE, 1.0);
    let small_w = ((src.width as f32 * factor) as u32).max(1);
    let small_h = ((src.height as f32 * factor) as u32).max(1);

    let full = src.to_rgba_image();
    let small = imageops::resize(&full, small_w, small_h, FilterType::Triangle);
    drop(full);
    let restored = imageops::resize(&small, src.width, src.height, FilterType::Triangle);

    RetroImage::from_rgba_image(&restored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::Color;

    #[test]
    fn test_blur_preserves_dimensions() {
        let img = RetroImage::filled(37, 21, Color::rgb(90, 90, 90));
        for factor in [0.01, 0.45, 0.7, 0.965, 1.0] {
            let blur = downscale_blur(&img, factor);
            assert_eq!((blur.width, blur.height), (37, 21), "factor {factor}");
        }
    }

    #[test]
    fn test_blur_of_uniform_image_is_uniform() {
        let img = RetroImage::filled(20, 20, Color::rgb(200, 50, 10));
        let blur = downscale_blur(&img, 0.45);
        assert!(blur.pixels.iter().all(|p| *p == [200, 50, 10, 255]));
    }

    #[test]
    fn test_blur_softens_hard_edge() {
        let mut img = RetroImage::filled(40, 4, Color::BLACK);
        for y in 0..4 {
            for x in 20..40 {
                let idx = img.index(x, y);
                img.pixels[idx] = [255, 255, 255, 255];
            }
        }
        let blur = downscale_blur(&img, 0.45);
        let edge = blur.get(20, 2)[0];
        assert!(edge > 0 && edge < 255, "edge pixel should be intermediate, got {edge}");
    }
}
