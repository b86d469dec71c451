//! Text overlays drawn atop the finished image.

pub mod date_stamp;
