//! Reading sources from disk and writing the stylized copy back.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use image::ExtendedColorType;
use image::codecs::jpeg::JpegEncoder;
use retrocam_core::{OrientationTag, RetroImage};

/// A source file's raw bytes plus the orientation from its EXIF block.
pub struct SourceFile {
    pub bytes: Vec<u8>,
    pub orientation: OrientationTag,
}

/// Read `path` and its EXIF orientation.
pub fn read_source(path: &Path) -> Result<SourceFile, ImageIoError> {
    let bytes = std::fs::read(path).map_err(|e| ImageIoError::Read(path.to_path_buf(), e))?;
    let orientation = OrientationTag::read_from_bytes(&bytes);
    tracing::debug!("{}: {} bytes, orientation {orientation}", path.display(), bytes.len());
    Ok(SourceFile { bytes, orientation })
}

/// File name of a saved copy taken at `millis` since the Unix epoch.
pub fn output_file_name(millis: u128) -> String {
    format!("CCD_{millis}.jpg")
}

/// Where the copy of `input` goes: `out_dir` if given, else next to the input.
pub fn output_path(input: &Path, out_dir: Option<&Path>, millis: u128) -> PathBuf {
    let dir = match out_dir {
        Some(dir) => dir.to_path_buf(),
        None => input
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")),
    };
    dir.join(output_file_name(millis))
}

/// Encode `image` as a baseline JPEG at `quality` and write it to `path`.
pub fn save_jpeg(image: &RetroImage, path: &Path, quality: u8) -> Result<(), ImageIoError> {
    let file = File::create(path).map_err(|e| ImageIoError::Write(path.to_path_buf(), e))?;
    let rgb: Vec<u8> = image
        .pixels
        .iter()
        .flat_map(|p| [p[0], p[1], p[2]])
        .collect();
    JpegEncoder::new_with_quality(BufWriter::new(file), quality.clamp(1, 100))
        .encode(&rgb, image.width, image.height, ExtendedColorType::Rgb8)
        .map_err(ImageIoError::Encode)
}

/// Errors reading or writing image files.
#[derive(Debug, thiserror::Error)]
pub enum ImageIoError {
    #[error("failed to read {path}: {err}", path = .0.display(), err = .1)]
    Read(PathBuf, #[source] std::io::Error),
    #[error("failed to create {path}: {err}", path = .0.display(), err = .1)]
    Write(PathBuf, #[source] std::io::Error),
    #[error("failed to encode JPEG: {0}")]
    Encode(#[source] image::ImageError),
}
