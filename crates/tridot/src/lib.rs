//! High-level facade for three-dot marker heading estimation.
//!
//! A robot carries three colored dots on a line: red at the front, pink in
//! the middle, green at the rear. Each frame is scanned for the three dots,
//! the arrangement is validated, and the rotation needed to point the robot
//! at a target is reported.
//!
//! The lower-level crates are re-exported as [`core`] and [`detect`]. This
//! crate adds the per-frame [`pipeline`] (frame source -> detect -> validate
//! -> heading -> sink), a lock-free [`TargetCell`], headless sinks and, with
//! the `image` feature, decoding helpers plus a file-backed frame source.
//!
//! ## Quickstart
//!
//! ```no_run
//! # #[cfg(feature = "image")]
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use tridot::frames::load_frame;
//! use tridot::{FrameProcessor, TickContext};
//!
//! let frame = load_frame("frame.png")?;
//! let ctx = TickContext {
//!     target: Some(nalgebra::Point2::new(320.0, 40.0)),
//!     ..TickContext::default()
//! };
//! let result = FrameProcessor::default().process(&frame.view(), &ctx);
//! println!("{}", result.status());
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "image"))]
//! # fn main() {}
//! ```
//!
//! ## Features
//!
//! - `image` *(default)*: decoding helpers and [`frames::ImageFileSource`].
//! - `cli` *(default)*: the `tridot` binary.
//! - `tracing`: `tracing` spans across the pipeline.

pub use tridot_core as core;
pub use tridot_detect as detect;

pub mod pipeline;
pub mod sink;
mod target;

#[cfg(feature = "image")]
pub mod frames;

pub use pipeline::{
    ConfigProvider, FrameProcessor, FrameResult, FrameSource, MemorySource, Orchestrator,
    RenderSink, SourceUnavailable, TargetProvider, TickContext, TickOutcome,
};
pub use sink::{JsonLinesSink, LogSink};
pub use target::TargetCell;

pub use tridot_detect::{
    HeadingResult, InvalidReason, MarkerDetector, MarkerSet, SteeringMode, ToleranceConfig,
    TridotConfig, TurnDirection, ValidationResult,
};
