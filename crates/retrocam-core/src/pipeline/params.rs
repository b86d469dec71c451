//! Central configuration value for one stylization look.
//!
//! `LookProfile` bundles every numeric tunable the stages read plus the
//! ordered list of stages to run. Distinct looks are distinct values of this
//! struct; the orchestrator has no per-look code paths.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::artifacts::lossy::DEFAULT_QUALITY;
use crate::artifacts::scanlines::ScanlineParams;
use crate::artifacts::sensor_noise::NoiseParams;
use crate::artifacts::vignette::VignetteParams;
use crate::error::ProfileError;
use crate::filters::misalign::MisalignParams;
use crate::filters::noise_reduction::SmearParams;
use crate::filters::sharpen::SharpenParams;
use crate::grading::color_matrix::ColorMatrix;
use crate::grading::overlay::OverlayParams;
use crate::grading::tone_curve::ToneParams;
use crate::overlay::date_stamp::DateStampParams;
use crate::pipeline::stage::StageKind;

/// An immutable named stylization recipe.
///
/// Every parameter group has a default, so profiles can be written as
/// partial JSON naming only the stages and the values that differ.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookProfile {
    pub name: String,
    /// Stages in execution order. Orientation runs before these and the
    /// date stamp after them.
    #[serde(default)]
    pub stages: Vec<StageKind>,
    #[serde(default)]
    pub color_matrix: ColorMatrix,
    #[serde(default = "SmearParams::softness")]
    pub softness: SmearParams,
    #[serde(default)]
    pub noise_reduction: SmearParams,
    #[serde(default)]
    pub sharpen: SharpenParams,
    #[serde(default)]
    pub tone: ToneParams,
    /// JPEG quality for the lossy round-trip, clamped to `[1, 100]` on use.
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: i32,
    #[serde(default)]
    pub noise: NoiseParams,
    #[serde(default)]
    pub vignette: VignetteParams,
    #[serde(default)]
    pub scanlines: ScanlineParams,
    /// Alpha of the highlight-compression white veil.
    #[serde(default)]
    pub highlight_alpha: u8,
    #[serde(default)]
    pub misalign: MisalignParams,
    #[serde(default)]
    pub warm_overlay: OverlayParams,
    #[serde(default)]
    pub date_stamp: DateStampParams,
}

fn default_jpeg_quality() -> i32 {
    DEFAULT_QUALITY
}

impl LookProfile {
    /// A profile with default parameters and an empty stage list.
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stages: Vec::new(),
            color_matrix: ColorMatrix::IDENTITY,
            softness: SmearParams::softness(),
            noise_reduction: SmearParams::default(),
            sharpen: SharpenParams::default(),
            tone: ToneParams::default(),
            jpeg_quality: DEFAULT_QUALITY,
            noise: NoiseParams::default(),
            vignette: VignetteParams::default(),
            scanlines: ScanlineParams::default(),
            highlight_alpha: 0,
            misalign: MisalignParams::default(),
            warm_overlay: OverlayParams::default(),
            date_stamp: DateStampParams::default(),
        }
    }

    /// Copy of this profile without `kind` in its stage list.
    pub fn without_stage(mut self, kind: StageKind) -> Self {
        self.stages.retain(|s| *s != kind);
        self
    }

    /// Whether `kind` is in the stage list.
    pub fn has_stage(&self, kind: StageKind) -> bool {
        self.stages.contains(&kind)
    }

    /// Parse a profile from JSON and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, ProfileError> {
        let profile: Self = serde_json::from_str(json)?;
        profile.validate().map_err(ProfileError::Invalid)?;
        Ok(profile)
    }

    /// Read, parse and validate a JSON profile file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ProfileError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, ProfileError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every tunable against its documented range.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(kind) = self.stages.iter().find(|s| s.is_implicit()) {
            return Err(format!("{kind} always runs implicitly and cannot be listed as a stage"));
        }
        if !self.color_matrix.0.iter().flatten().all(|v| v.is_finite()) {
            return Err("color_matrix contains a non-finite value".into());
        }
        check_smear("softness", &self.softness)?;
        check_smear("noise_reduction", &self.noise_reduction)?;
        check_factor("sharpen.downscale", self.sharpen.downscale)?;
        check_non_negative("sharpen.amount", self.sharpen.amount)?;
        check_non_negative("sharpen.damping", self.sharpen.damping)?;

        let tone = &self.tone;
        check_non_negative("tone.contrast", tone.contrast)?;
        check_non_negative("tone.saturation", tone.saturation)?;
        if !tone.brightness.is_finite() {
            return Err("tone.brightness must be finite".into());
        }
        for gain in tone.channel_gains {
            check_non_negative("tone.channel_gains", gain)?;
        }

        if self.noise.divisor == 0 {
            return Err("noise.divisor must be at least 1".into());
        }
        check_band("noise.alpha_range", self.noise.alpha_range)?;
        if self.vignette.grid_step == 0 {
            return Err("vignette.grid_step must be at least 1".into());
        }
        if self.scanlines.spacing == 0 {
            return Err("scanlines.spacing must be at least 1".into());
        }
        check_band("scanlines.alpha_range", self.scanlines.alpha_range)?;
        if !self.misalign.shift.is_finite() {
            return Err("misalign.shift must be finite".into());
        }
        check_factor("date_stamp.text_size_ratio", self.date_stamp.text_size_ratio)?;
        Ok(())
    }
}

fn check_factor(field: &str, value: f32) -> Result<(), String> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(format!("{field} must be in (0, 1], got {value}"))
    }
}

fn check_non_negative(field: &str, value: f32) -> Result<(), String> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(format!("{field} must be finite and non-negative, got {value}"))
    }
}

fn check_smear(group: &str, params: &SmearParams) -> Result<(), String> {
    check_factor(&format!("{group}.downscale"), params.downscale)?;
    if (0.0..=1.0).contains(&params.mix) {
        Ok(())
    } else {
        Err(format!("{group}.mix must be in [0, 1], got {}", params.mix))
    }
}

fn check_band(field: &str, [lo, hi]: [u8; 2]) -> Result<(), String> {
    if lo <= hi {
        Ok(())
    } else {
        Err(format!("{field} is inverted: [{lo}, {hi}]"))
    }
}
