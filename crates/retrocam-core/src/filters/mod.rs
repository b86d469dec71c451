//! Spatial filters built on a downscale/upscale blur reference.

pub mod misalign;
pub mod noise_reduction;
pub mod resample;
pub mod sharpen;
