//! Per-pixel color grading: channel matrix, tone curve, uniform overlays.

pub mod color_matrix;
pub mod overlay;
pub mod tone_curve;
