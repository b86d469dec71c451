//! JPEG round-trip. Bakes blocking and ringing artifacts into the pixels.
//!
//! This stage fails soft: any encode or decode failure, or a decoded image
//! of the wrong size, logs a warning and hands back the input untouched.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageFormat};

use crate::image::RetroImage;

/// Default JPEG quality for the phone look.
pub const DEFAULT_QUALITY: i32 = 74;

/// Clamp a requested quality into the codec's `[1, 100]` range.
pub fn clamp_quality(quality: i32) -> u8 {
    quality.clamp(1, 100) as u8
}

/// Encode `image` as JPEG at `quality` and decode it back.
pub fn apply_lossy_round_trip(image: RetroImage, quality: i32) -> RetroImage {
    match round_trip(&image, clamp_quality(quality)) {
        Ok(decoded) if decoded.width == image.width && decoded.height == image.height => decoded,
        Ok(decoded) => {
            tracing::warn!(
                "JPEG round-trip changed size {}x{} -> {}x{}, keeping original",
                image.width,
                image.height,
                decoded.width,
                decoded.height
            );
            image
        }
        Err(e) => {
            tracing::warn!("JPEG round-trip failed, keeping original: {e}");
            image
        }
    }
}

fn round_trip(image: &RetroImage, quality: u8) -> Result<RetroImage, image::ImageError> {
    // JPEG carries no alpha; every pixel is opaque anyway.
    let rgb: Vec<u8> = image
        .pixels
        .iter()
        .flat_map(|p| [p[0], p[1], p[2]])
        .collect();

    let mut encoded = Vec::new();
    JpegEncoder::new_with_quality(&mut encoded, quality).encode(
        &rgb,
        image.width,
        image.height,
        ExtendedColorType::Rgb8,
    )?;
    drop(rgb);

    let decoded = image::load(Cursor::new(&encoded), ImageFormat::Jpeg)?;
    Ok(RetroImage::from_rgba_image(&decoded.to_rgba8()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::Color;

    fn gradient(width: u32, height: u32) -> RetroImage {
        let mut img = RetroImage::filled(width, height, Color::BLACK);
        for y in 0..height {
            for x in 0..width {
                let idx = img.index(x, y);
                img.pixels[idx] = [(x * 7 % 256) as u8, (y * 13 % 256) as u8, 90, 255];
            }
        }
        img
    }

    #[test]
    fn test_clamp_quality() {
        assert_eq!(clamp_quality(-20), 1);
        assert_eq!(clamp_quality(0), 1);
        assert_eq!(clamp_quality(74), 74);
        assert_eq!(clamp_quality(500), 100);
    }

    #[test]
    fn test_dimensions_survive_any_quality() {
        for quality in [-5, 1, 30, 74, 100, 1000] {
            let out = apply_lossy_round_trip(gradient(33, 17), quality);
            assert_eq!((out.width, out.height), (33, 17), "quality {quality}");
            assert!(out.pixels.iter().all(|p| p[3] == 255));
        }
    }

    #[test]
    fn test_low_quality_changes_pixels() {
        let src = gradient(64, 64);
        let out = apply_lossy_round_trip(src.clone(), 5);
        assert_ne!(out, src);
    }

    #[test]
    fn test_encoder_failure_falls_back_to_input() {
        // JPEG cannot encode dimensions beyond 65535; the stage must hand the input back.
        let src = RetroImage::filled(70_000, 1, Color::rgb(10, 20, 30));
        let out = apply_lossy_round_trip(src.clone(), 74);
        assert_eq!(out, src);
    }
}
