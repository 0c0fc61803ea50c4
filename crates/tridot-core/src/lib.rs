//! Core types and utilities for three-dot marker heading estimation.
//!
//! This crate is intentionally small. It holds the interleaved RGB(A)
//! buffer view the detectors scan, the angle helpers shared by the heading
//! math, and the logger setup. It does *not* depend on any concrete image
//! decoding crate.

mod angle;
mod image;
mod logger;

pub use angle::{normalize_deg_signed, signed_angle_deg};
pub use image::{ImageError, PixelLayout, RgbImage, RgbImageView};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::{init_with_level, log_tick, set_log_tick};
