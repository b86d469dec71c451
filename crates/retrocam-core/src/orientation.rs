//! Upright orientation from EXIF metadata.
//!
//! Only the four pure rotations are honoured. Mirrored EXIF orientations
//! (2, 4, 5, 7) never come out of a phone camera sensor path and are
//! treated as [`OrientationTag::Normal`].
//!
//! ```text
//!     EXIF 1: Normal   EXIF 6: Rotate90   EXIF 3: Rotate180   EXIF 8: Rotate270
//!     ┌───┐            ┌────┐             ┌───┐               ┌────┐
//!     │ F │            │  F │             │ Ⅎ │               │ Ⅎ  │
//!     └───┘            └────┘             └───┘               └────┘
//! ```

use std::fmt;
use std::io::Cursor;

use serde::{Deserialize, Serialize};

use crate::image::RetroImage;

/// Clockwise rotation needed to make the decoded pixels upright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OrientationTag {
    #[default]
    Normal,
    Rotate90,
    Rotate180,
    Rotate270,
}

impl OrientationTag {
    /// All tags, in increasing rotation order.
    pub const ALL: [Self; 4] = [
        Self::Normal,
        Self::Rotate90,
        Self::Rotate180,
        Self::Rotate270,
    ];

    /// Map an EXIF orientation value (1-8).
    pub fn from_exif(value: u32) -> Self {
        match value {
            1 => Self::Normal,
            3 => Self::Rotate180,
            6 => Self::Rotate90,
            8 => Self::Rotate270,
            other => {
                tracing::warn!("unsupported EXIF orientation {other}, treating as normal");
                Self::Normal
            }
        }
    }

    /// Read the orientation tag embedded in a JPEG/TIFF container.
    ///
    /// Missing or unreadable metadata yields [`OrientationTag::Normal`].
    pub fn read_from_bytes(bytes: &[u8]) -> Self {
        let mut cursor = Cursor::new(bytes);
        let Ok(exif) = exif::Reader::new().read_from_container(&mut cursor) else {
            return Self::Normal;
        };
        exif.get_field(exif::Tag::Orientation, exif::In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Self::from_exif)
            .unwrap_or(Self::Normal)
    }

    /// Clockwise rotation angle in degrees.
    pub const fn degrees(self) -> u32 {
        match self {
            Self::Normal => 0,
            Self::Rotate90 => 90,
            Self::Rotate180 => 180,
            Self::Rotate270 => 270,
        }
    }

    /// Whether this rotation swaps width and height.
    pub const fn swaps_axes(self) -> bool {
        matches!(self, Self::Rotate90 | Self::Rotate270)
    }

    /// Dimensions after rotation.
    pub const fn rotated_dimensions(self, width: u32, height: u32) -> (u32, u32) {
        if self.swaps_axes() {
            (height, width)
        } else {
            (width, height)
        }
    }
}

impl fmt::Display for OrientationTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

/// Rotate `image` clockwise so its content is upright.
///
/// `Normal` hands the input back untouched (no copy). Other tags allocate one
/// new buffer; the input is dropped on return. An image that fails
/// [`RetroImage::validate`] is also returned untouched, since it has no
/// well-defined rows to rotate.
///
/// Destination mapping for a source pixel at `(x, y)` in a `w × h` image:
///
/// ```text
/// Rotate90:  (h − 1 − y, x)
/// Rotate180: (w − 1 − x, h − 1 − y)
/// Rotate270: (y, w − 1 − x)
/// ```
pub fn normalize(image: RetroImage, tag: OrientationTag) -> RetroImage {
    if tag == OrientationTag::Normal {
        return image;
    }
    if let Err(e) = image.validate() {
        tracing::warn!("not rotating {}×{} image: {e}", image.width, image.height);
        return image;
    }

    let (w, h) = (image.width as usize, image.height as usize);
    let (out_w, out_h) = tag.rotated_dimensions(image.width, image.height);
    let mut pixels = vec![[0u8; 4]; w * h];

    for y in 0..h {
        let row = &image.pixels[y * w..(y + 1) * w];
        for (x, px) in row.iter().enumerate() {
            let (dx, dy) = match tag {
                OrientationTag::Rotate90 => (h - 1 - y, x),
                OrientationTag::Rotate180 => (w - 1 - x, h - 1 - y),
                OrientationTag::Rotate270 => (y, w - 1 - x),
                OrientationTag::Normal => (x, y),
            };
            pixels[dy * out_w as usize + dx] = *px;
        }
    }

    RetroImage {
        width: out_w,
        height: out_h,
        pixels,
    }
}
