//! Retrocam Core: the pixel pipeline behind the retro camera looks.
//!
//! A decoded photo is rotated upright, pushed through the ordered stage list
//! of a [`LookProfile`] and optionally stamped with the date. Stages are pure
//! buffer transforms; everything tunable lives in the profile. No file or
//! network I/O happens here.

pub mod artifacts;
pub mod composite;
pub mod error;
pub mod filters;
pub mod grading;
pub mod image;
pub mod orientation;
pub mod overlay;
pub mod pipeline;

// Re-exports for convenience.
pub use crate::image::{Color, RetroImage};
pub use artifacts::vignette::VignetteMode;
pub use error::{PipelineError, ProfileError, StageError};
pub use orientation::{OrientationTag, normalize};
pub use overlay::date_stamp::DateStampLayout;
pub use pipeline::evaluate::{Pipeline, process};
pub use pipeline::params::LookProfile;
pub use pipeline::stage::StageKind;
