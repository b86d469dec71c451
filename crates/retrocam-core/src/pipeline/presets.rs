//! Built-in looks.

use crate::artifacts::scanlines::ScanlineParams;
use crate::artifacts::sensor_noise::{NoiseMode, NoiseParams};
use crate::artifacts::vignette::{VignetteMode, VignetteParams};
use crate::error::ProfileError;
use crate::filters::misalign::MisalignParams;
use crate::filters::noise_reduction::SmearParams;
use crate::filters::sharpen::SharpenParams;
use crate::grading::color_matrix::ColorMatrix;
use crate::grading::tone_curve::ToneParams;
use crate::image::Color;
use crate::overlay::date_stamp::{DateStampParams, Padding};
use crate::pipeline::params::LookProfile;
use crate::pipeline::stage::StageKind;

pub const CCD_BASIC: &str = "ccd-basic";
pub const CCD_RETRO_FULL: &str = "ccd-retro-full";
pub const PHONE_2014: &str = "phone-2014";

impl LookProfile {
    /// Names accepted by [`LookProfile::builtin`].
    pub fn builtin_names() -> &'static [&'static str] {
        const NAMES: [&str; 3] = [CCD_BASIC, CCD_RETRO_FULL, PHONE_2014];
        &NAMES
    }

    /// Look up a built-in profile by name.
    pub fn builtin(name: &str) -> Result<Self, ProfileError> {
        match name {
            CCD_BASIC => Ok(Self::ccd_basic()),
            CCD_RETRO_FULL => Ok(Self::ccd_retro_full()),
            PHONE_2014 => Ok(Self::phone_2014()),
            other => Err(ProfileError::UnknownProfile(other.to_string())),
        }
    }

    /// Warm matrix, white veil, overlay tint and colored speckle.
    pub fn ccd_basic() -> Self {
        Self {
            stages: vec![
                StageKind::ColorMatrix,
                StageKind::HighlightCompression,
                StageKind::WarmOverlay,
                StageKind::SensorNoise,
            ],
            color_matrix: ColorMatrix([
                [1.15, 0.0, 0.0, 12.0],
                [0.0, 1.08, 0.0, 6.0],
                [0.0, 0.0, 0.95, -2.0],
            ]),
            highlight_alpha: 12,
            noise: NoiseParams {
                cap_max: 15_000,
                divisor: 1000,
                alpha_range: [8, 17],
                mode: NoiseMode::FullRandom,
            },
            ..Self::empty(CCD_BASIC)
        }
    }

    /// The full CCD compact look: soft lens, registration error, vignette,
    /// grain and readout lines.
    pub fn ccd_retro_full() -> Self {
        Self {
            stages: vec![
                StageKind::ColorMatrix,
                StageKind::Softness,
                StageKind::ChannelMisalign,
                StageKind::Vignette,
                StageKind::SensorNoise,
                StageKind::Scanlines,
                StageKind::HighlightCompression,
            ],
            color_matrix: ColorMatrix([
                [1.07, 0.02, 0.0, 12.0],
                [0.0, 1.03, 0.0, 7.0],
                [0.0, 0.02, 0.90, -4.0],
            ]),
            softness: SmearParams::softness(),
            misalign: MisalignParams {
                shift: 0.6,
                alpha: 35,
            },
            vignette: VignetteParams {
                grid_step: 6,
                max_alpha: 70,
                mode: VignetteMode::Grid,
            },
            noise: NoiseParams {
                cap_max: 16_000,
                divisor: 32,
                alpha_range: [11, 11],
                mode: NoiseMode::Binary,
            },
            scanlines: ScanlineParams {
                spacing: 9,
                alpha_range: [3, 6],
            },
            highlight_alpha: 10,
            ..Self::empty(CCD_RETRO_FULL)
        }
    }

    /// Over-processed 2014 phone: smeared texture, haloed edges, punchy
    /// tone and JPEG blocking.
    pub fn phone_2014() -> Self {
        Self {
            stages: vec![
                StageKind::NoiseReduction,
                StageKind::HaloSharpen,
                StageKind::ToneCurve,
                StageKind::LossyRoundTrip,
            ],
            noise_reduction: SmearParams {
                downscale: 0.45,
                mix: 0.62,
            },
            sharpen: SharpenParams {
                amount: 1.75,
                threshold: 10,
                damping: 0.55,
                downscale: 0.70,
            },
            tone: ToneParams {
                contrast: 1.18,
                brightness: -6.0,
                saturation: 1.18,
                channel_gains: [1.0, 1.02, 1.03],
            },
            jpeg_quality: 74,
            date_stamp: DateStampParams {
                color: Color::rgba(255, 210, 0, 235),
                padding_x: Padding::OfWidth(0.04),
                padding_y: Padding::OfWidth(0.04),
                ..DateStampParams::default()
            },
            ..Self::empty(PHONE_2014)
        }
    }
}
