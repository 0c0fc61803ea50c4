//! Per-frame orchestration: frame source -> detect -> validate -> heading -> sink.
//!
//! The orchestrator is driven from outside, one [`Orchestrator::tick`] per
//! frame. Ticks never overlap and share nothing but the collaborators passed
//! in; stopping the pipeline means the driver stops calling `tick`.

use log::{debug, warn};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use tridot_core::{set_log_tick, RgbImage, RgbImageView};
use tridot_detect::{
    compute_heading, frame_status, measure_geometry, validate_markers, FrameReport,
    GeometryMeasurements, HeadingResult, MarkerDetection, MarkerDetector, ToleranceConfig,
    TridotConfig, ValidationResult,
};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// A frame source could not deliver a frame this tick.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("frame source unavailable: {reason}")]
pub struct SourceUnavailable {
    pub reason: String,
}

impl SourceUnavailable {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Supplies frames, one per tick.
pub trait FrameSource {
    fn next_frame(&mut self) -> Result<RgbImage, SourceUnavailable>;

    /// Optional label of the frame just returned (file name, sequence id).
    fn frame_label(&self) -> Option<String> {
        None
    }
}

/// Receives per-frame results for presentation.
pub trait RenderSink {
    fn render(&mut self, result: &FrameResult);

    fn skipped(&mut self, _err: &SourceUnavailable) {}
}

/// Current target point in frame coordinates, if any.
pub trait TargetProvider {
    fn current_target(&self) -> Option<Point2<f32>>;
}

impl TargetProvider for Option<Point2<f32>> {
    fn current_target(&self) -> Option<Point2<f32>> {
        *self
    }
}

/// Current tolerance values.
pub trait ConfigProvider {
    fn tolerances(&self) -> ToleranceConfig;
}

impl ConfigProvider for ToleranceConfig {
    fn tolerances(&self) -> ToleranceConfig {
        *self
    }
}

impl ConfigProvider for TridotConfig {
    fn tolerances(&self) -> ToleranceConfig {
        self.tolerances
    }
}

/// Inputs that may change between ticks, passed explicitly into each one.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TickContext {
    pub target: Option<Point2<f32>>,
    pub tolerances: ToleranceConfig,
}

impl TickContext {
    pub fn from_providers(target: &dyn TargetProvider, config: &dyn ConfigProvider) -> Self {
        Self {
            target: target.current_target(),
            tolerances: config.tolerances(),
        }
    }
}

/// Everything computed for one frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameResult {
    /// Source label of the frame (file path, sequence id), if known.
    #[serde(default)]
    pub label: Option<String>,
    pub width: usize,
    pub height: usize,
    pub detection: MarkerDetection,
    pub geometry: Option<GeometryMeasurements>,
    pub validation: ValidationResult,
    pub target: Option<Point2<f32>>,
    /// Present only for a valid marker set with a known target.
    pub heading: Option<HeadingResult>,
}

impl FrameResult {
    pub fn status(&self) -> String {
        frame_status(&self.validation, self.target, self.heading.as_ref())
    }

    pub fn to_report(&self) -> FrameReport {
        FrameReport {
            image_path: self.label.clone(),
            width: self.width,
            height: self.height,
            markers: self.detection.markers,
            clusters: self.detection.clusters.clone(),
            geometry: self.geometry,
            validation: self.validation,
            target: self.target,
            heading: self.heading,
            status: self.status(),
        }
    }
}

/// Stateless detect -> validate -> heading chain over one frame.
#[derive(Clone, Debug, Default)]
pub struct FrameProcessor {
    detector: MarkerDetector,
}

impl FrameProcessor {
    pub fn new(detector: MarkerDetector) -> Self {
        Self { detector }
    }

    pub fn from_config(config: &TridotConfig) -> Self {
        Self::new(config.build_detector())
    }

    pub fn detector(&self) -> &MarkerDetector {
        &self.detector
    }

    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, img, ctx), fields(width = img.width, height = img.height))
    )]
    pub fn process(&self, img: &RgbImageView<'_>, ctx: &TickContext) -> FrameResult {
        // the merge radius is a runtime tolerance, everything else is fixed
        let mut params = *self.detector.params();
        params.cluster.merge_radius = ctx.tolerances.cluster_radius;
        let detection = MarkerDetector::new(params).detect_with_clusters(img);

        let markers = &detection.markers;
        let geometry = markers
            .triple()
            .map(|(red, pink, green)| measure_geometry(red, pink, green));
        let validation = validate_markers(markers, &ctx.tolerances);
        let heading = match (validation, ctx.target) {
            (ValidationResult::Valid, Some(target)) => compute_heading(markers, target),
            _ => None,
        };
        debug!("frame {}x{}: {:?}", img.width, img.height, validation);

        FrameResult {
            label: None,
            width: img.width,
            height: img.height,
            detection,
            geometry,
            validation,
            target: ctx.target,
            heading,
        }
    }
}

/// Result of one tick.
#[derive(Clone, Debug, PartialEq)]
pub enum TickOutcome {
    Rendered(Box<FrameResult>),
    Skipped(SourceUnavailable),
}

impl TickOutcome {
    pub fn result(&self) -> Option<&FrameResult> {
        match self {
            TickOutcome::Rendered(res) => Some(&**res),
            TickOutcome::Skipped(_) => None,
        }
    }
}

/// Pulls a frame, runs the processor, forwards the result to the sink.
pub struct Orchestrator<S, R> {
    source: S,
    sink: R,
    processor: FrameProcessor,
    ticks: u64,
}

impl<S: FrameSource, R: RenderSink> Orchestrator<S, R> {
    pub fn new(source: S, sink: R, processor: FrameProcessor) -> Self {
        Self {
            source,
            sink,
            processor,
            ticks: 0,
        }
    }

    /// Number of ticks run so far, skipped ones included.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// One full pass. An unavailable frame skips the tick; nothing else
    /// is affected and the next tick retries from scratch.
    pub fn tick(&mut self, ctx: &TickContext) -> TickOutcome {
        self.ticks += 1;
        set_log_tick(self.ticks);
        let outcome = self.run_tick(ctx);
        set_log_tick(0);
        outcome
    }

    fn run_tick(&mut self, ctx: &TickContext) -> TickOutcome {
        let frame = match self.source.next_frame() {
            Ok(frame) => frame,
            Err(err) => {
                warn!("{err}; skipping tick");
                self.sink.skipped(&err);
                return TickOutcome::Skipped(err);
            }
        };
        let mut result = self.processor.process(&frame.view(), ctx);
        result.label = self.source.frame_label();
        self.sink.render(&result);
        TickOutcome::Rendered(Box::new(result))
    }

    /// `tick` with the context read from the collaborators.
    pub fn tick_with(
        &mut self,
        target: &dyn TargetProvider,
        config: &dyn ConfigProvider,
    ) -> TickOutcome {
        let ctx = TickContext::from_providers(target, config);
        self.tick(&ctx)
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn sink(&self) -> &R {
        &self.sink
    }

    pub fn into_parts(self) -> (S, R) {
        (self.source, self.sink)
    }
}

/// Frames held in memory; each tick pops one. An empty queue reports the
/// source as unavailable.
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    frames: VecDeque<Result<RgbImage, SourceUnavailable>>,
}

impl MemorySource {
    pub fn new(frames: impl IntoIterator<Item = RgbImage>) -> Self {
        Self {
            frames: frames.into_iter().map(Ok).collect(),
        }
    }

    pub fn push(&mut self, frame: RgbImage) {
        self.frames.push_back(Ok(frame));
    }

    /// Queue a failure in place of a frame.
    pub fn push_unavailable(&mut self, reason: impl Into<String>) {
        self.frames.push_back(Err(SourceUnavailable::new(reason)));
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl FrameSource for MemorySource {
    fn next_frame(&mut self) -> Result<RgbImage, SourceUnavailable> {
        self.frames
            .pop_front()
            .unwrap_or_else(|| Err(SourceUnavailable::new("no more frames")))
    }
}
