//! Pipeline orchestration: decode, orient, stylize, stamp.
//!
//! ```text
//! bytes ─decode─▶ RetroImage ─orient─▶ stage₁ ─▶ … ─▶ stageₙ ─▶ [date stamp] ─▶ out
//! ```
//!
//! Each stage takes the image by value and hands back the next one, so a
//! superseded buffer is dropped exactly once, at the point it is replaced.
//! Any error returns early and drops the in-flight buffer with it; callers
//! never see a partially processed image.

use std::time::Instant;

use chrono::{Local, NaiveDate};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::error::{PipelineError, StageError};
use crate::image::RetroImage;
use crate::orientation::{self, OrientationTag};
use crate::overlay::date_stamp::apply_date_stamp;
use crate::pipeline::params::LookProfile;
use crate::pipeline::stage::{StageKind, run_stage};

/// A configured pipeline. Holds no per-invocation state, so one value can
/// serve any number of calls.
#[derive(Debug, Clone)]
pub struct Pipeline {
    profile: LookProfile,
    seed: Option<u64>,
    date: Option<NaiveDate>,
}

impl Pipeline {
    pub fn new(profile: LookProfile) -> Self {
        Self {
            profile,
            seed: None,
            date: None,
        }
    }

    /// Seed the random stages. Without a seed every call draws fresh entropy.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Stamp `date` instead of today's local date.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn profile(&self) -> &LookProfile {
        &self.profile
    }

    /// Decode `source` and run the full pipeline on it.
    pub fn process(
        &self,
        source: &[u8],
        orientation: OrientationTag,
        draw_date: bool,
    ) -> Result<RetroImage, PipelineError> {
        self.check_profile()?;
        let image = RetroImage::decode(source)?;
        self.run(image, orientation, draw_date)
    }

    /// Like [`process`](Self::process), reading the orientation from the
    /// source's EXIF block.
    pub fn process_with_exif(
        &self,
        source: &[u8],
        draw_date: bool,
    ) -> Result<RetroImage, PipelineError> {
        self.process(source, OrientationTag::read_from_bytes(source), draw_date)
    }

    /// Run the pipeline on an already decoded image.
    pub fn process_image(
        &self,
        image: RetroImage,
        orientation: OrientationTag,
        draw_date: bool,
    ) -> Result<RetroImage, PipelineError> {
        self.check_profile()?;
        self.run(image, orientation, draw_date)
    }

    fn check_profile(&self) -> Result<(), PipelineError> {
        self.profile
            .validate()
            .map_err(|msg| PipelineError::InvalidProfile(format!("{}: {msg}", self.profile.name)))
    }

    fn run(
        &self,
        image: RetroImage,
        orientation: OrientationTag,
        draw_date: bool,
    ) -> Result<RetroImage, PipelineError> {
        let started = Instant::now();
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        image.validate().map_err(|source| stage_error(StageKind::Orientation, source))?;
        let mut image = orientation::normalize(image, orientation);
        tracing::debug!(
            "orientation {orientation}: {}x{}",
            image.width,
            image.height
        );

        for &kind in &self.profile.stages {
            image = self.run_checked(kind, image, |img| {
                run_stage(kind, img, &self.profile, &mut rng)
            })?;
        }

        if draw_date {
            let date = self.date.unwrap_or_else(|| Local::now().date_naive());
            let params = &self.profile.date_stamp;
            image = self.run_checked(StageKind::DateStamp, image, |img| {
                apply_date_stamp(img, date, params)
            })?;
        }

        tracing::info!(
            "{} look applied: {}x{} in {:.1} ms",
            self.profile.name,
            image.width,
            image.height,
            started.elapsed().as_secs_f64() * 1000.0
        );
        Ok(image)
    }

    /// Run one stage with its buffer checked before and after.
    fn run_checked(
        &self,
        kind: StageKind,
        image: RetroImage,
        stage: impl FnOnce(RetroImage) -> RetroImage,
    ) -> Result<RetroImage, PipelineError> {
        image.validate().map_err(|source| stage_error(kind, source))?;
        let (w, h) = (image.width, image.height);
        let started = Instant::now();

        let out = stage(image);

        out.validate().map_err(|source| stage_error(kind, source))?;
        if (out.width, out.height) != (w, h) {
            return Err(stage_error(
                kind,
                StageError::DimensionsChanged {
                    from_w: w,
                    from_h: h,
                    to_w: out.width,
                    to_h: out.height,
                },
            ));
        }
        tracing::debug!(
            "stage {kind}: {w}x{h} in {:.1} ms",
            started.elapsed().as_secs_f64() * 1000.0
        );
        Ok(out)
    }
}

fn stage_error(stage: StageKind, source: StageError) -> PipelineError {
    PipelineError::Stage { stage, source }
}

/// One-shot entry point: decode `source`, orient it, apply `profile` and
/// optionally stamp today's date.
pub fn process(
    source: &[u8],
    orientation: OrientationTag,
    profile: &LookProfile,
    draw_date: bool,
) -> Result<RetroImage, PipelineError> {
    Pipeline::new(profile.clone()).process(source, orientation, draw_date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::Color;

    fn gray(w: u32, h: u32) -> RetroImage {
        RetroImage::filled(w, h, Color::rgb(128, 128, 128))
    }

    #[test]
    fn test_empty_profile_only_orients() {
        let pipeline = Pipeline::new(LookProfile::empty("none"));
        let out = pipeline.process_image(gray(6, 4), OrientationTag::Rotate90, false).unwrap();
        assert_eq!((out.width, out.height), (4, 6));
        assert!(out.pixels.iter().all(|p| *p == [128, 128, 128, 255]));
    }

    #[test]
    fn test_invalid_profile_fails_before_any_work() {
        let mut profile = LookProfile::empty("broken");
        profile.scanlines.spacing = 0;
        let err = Pipeline::new(profile)
            .process(b"not an image", OrientationTag::Normal, false)
            .unwrap_err();
        assert!(matches!(err, PipelineError::InvalidProfile(_)), "{err}");
    }

    #[test]
    fn test_garbage_bytes_are_a_decode_error() {
        let err = Pipeline::new(LookProfile::phone_2014())
            .process(b"definitely not a jpeg", OrientationTag::Normal, false)
            .unwrap_err();
        assert!(matches!(err, PipelineError::Decode(_)), "{err}");
    }

    #[test]
    fn test_corrupt_buffer_reports_stage() {
        let mut image = gray(4, 4);
        image.pixels.pop();
        let err = Pipeline::new(LookProfile::ccd_basic())
            .process_image(image, OrientationTag::Normal, false)
            .unwrap_err();
        match err {
            PipelineError::Stage { stage, source } => {
                assert_eq!(stage, StageKind::Orientation);
                assert_eq!(
                    source,
                    StageError::BufferMismatch {
                        expected: 16,
                        actual: 15
                    }
                );
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_dimension_change_is_rejected() {
        let pipeline = Pipeline::new(LookProfile::empty("p"));
        let err = pipeline
            .run_checked(StageKind::Vignette, gray(4, 4), |_| gray(2, 2))
            .unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Stage {
                stage: StageKind::Vignette,
                source: StageError::DimensionsChanged { .. }
            }
        ));
    }

    #[test]
    fn test_seeded_runs_are_identical() {
        let pipeline = Pipeline::new(LookProfile::ccd_retro_full())
            .with_seed(42)
            .with_date(NaiveDate::from_ymd_opt(2009, 3, 14).unwrap());
        let a = pipeline.process_image(gray(64, 48), OrientationTag::Normal, true).unwrap();
        let b = pipeline.process_image(gray(64, 48), OrientationTag::Normal, true).unwrap();
        assert_eq!(a, b);
    }
}
