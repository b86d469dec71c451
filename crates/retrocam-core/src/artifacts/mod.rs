//! Deliberate artifact injection: codec damage, grain, vignette, readout lines.

pub mod lossy;
pub mod scanlines;
pub mod sensor_noise;
pub mod vignette;
