//! Stage identifiers and dispatch.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::artifacts::{lossy, scanlines, sensor_noise, vignette};
use crate::filters::{misalign, noise_reduction, sharpen};
use crate::grading::{color_matrix, overlay, tone_curve};
use crate::image::RetroImage;
use crate::pipeline::params::LookProfile;

/// One stylization step. A profile lists these in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StageKind {
    /// Upright rotation from EXIF metadata. Always first, never listed in a
    /// profile.
    Orientation,
    /// Affine channel mixing (`color_matrix`).
    ColorMatrix,
    /// Mild blur-and-blend cheap-lens softness (`softness`).
    Softness,
    /// Heavy blur-and-blend noise-reduction smear (`noise_reduction`).
    NoiseReduction,
    /// Edge-adaptive halo sharpening (`sharpen`).
    HaloSharpen,
    /// Contrast, saturation and channel gains (`tone`).
    ToneCurve,
    /// Sub-pixel horizontal ghosting (`misalign`).
    ChannelMisalign,
    /// Porter-Duff overlay tint (`warm_overlay`).
    WarmOverlay,
    /// JPEG encode/decode (`jpeg_quality`).
    LossyRoundTrip,
    /// Random single-pixel specks (`noise`).
    SensorNoise,
    /// Radial corner darkening (`vignette`).
    Vignette,
    /// Periodic faint white rows (`scanlines`).
    Scanlines,
    /// Uniform white veil (`highlight_alpha`).
    HighlightCompression,
    /// Date overlay. Driven by the `draw_date` flag, never listed in a profile.
    DateStamp,
}

impl StageKind {
    /// Human-readable label for logs and error messages.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Orientation => "orientation",
            Self::ColorMatrix => "color matrix",
            Self::Softness => "softness",
            Self::NoiseReduction => "noise reduction",
            Self::HaloSharpen => "halo sharpen",
            Self::ToneCurve => "tone curve",
            Self::ChannelMisalign => "channel misalign",
            Self::WarmOverlay => "warm overlay",
            Self::LossyRoundTrip => "lossy round-trip",
            Self::SensorNoise => "sensor noise",
            Self::Vignette => "vignette",
            Self::Scanlines => "scanlines",
            Self::HighlightCompression => "highlight compression",
            Self::DateStamp => "date stamp",
        }
    }

    /// Whether the orchestrator runs this stage itself rather than taking it
    /// from a profile's stage list.
    pub const fn is_implicit(&self) -> bool {
        matches!(self, Self::Orientation | Self::DateStamp)
    }

    /// Whether the stage draws from the random source.
    pub const fn is_random(&self) -> bool {
        matches!(self, Self::SensorNoise | Self::Scanlines)
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Run one profile stage on `image`, consuming it.
///
/// Implicit stages ([`StageKind::is_implicit`]) pass the image through; the
/// orchestrator runs those with inputs a profile does not carry.
pub fn run_stage<R: Rng + ?Sized>(
    kind: StageKind,
    image: RetroImage,
    profile: &LookProfile,
    rng: &mut R,
) -> RetroImage {
    match kind {
        StageKind::ColorMatrix => color_matrix::apply_color_matrix(image, &profile.color_matrix),
        StageKind::Softness => noise_reduction::apply_smear(image, &profile.softness),
        StageKind::NoiseReduction => noise_reduction::apply_smear(image, &profile.noise_reduction),
        StageKind::HaloSharpen => sharpen::apply_halo_sharpen(image, &profile.sharpen),
        StageKind::ToneCurve => tone_curve::apply_tone_curve(image, &profile.tone),
        StageKind::ChannelMisalign => misalign::apply_misalign(image, &profile.misalign),
        StageKind::WarmOverlay => overlay::apply_warm_overlay(image, &profile.warm_overlay),
        StageKind::LossyRoundTrip => lossy::apply_lossy_round_trip(image, profile.jpeg_quality),
        StageKind::SensorNoise => sensor_noise::apply_sensor_noise(image, &profile.noise, rng),
        StageKind::Vignette => vignette::apply_vignette(image, &profile.vignette),
        StageKind::Scanlines => scanlines::apply_scanlines(image, &profile.scanlines, rng),
        StageKind::HighlightCompression => {
            overlay::apply_highlight_compression(image, profile.highlight_alpha)
        }
        StageKind::Orientation | StageKind::DateStamp => image,
    }
}
