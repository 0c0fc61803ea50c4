//! Render sinks for headless use.

use log::{info, warn};
use std::io::Write;

use crate::pipeline::{FrameResult, RenderSink, SourceUnavailable};

/// Logs the status line of every frame at `info`.
#[derive(Clone, Debug, Default)]
pub struct LogSink {
    frames: usize,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> usize {
        self.frames
    }
}

impl RenderSink for LogSink {
    fn render(&mut self, result: &FrameResult) {
        self.frames += 1;
        let m = &result.detection.markers;
        info!(
            "frame {}: red={:?} pink={:?} green={:?} -> {}",
            self.frames,
            m.red.map(|p| (p.x, p.y)),
            m.pink.map(|p| (p.x, p.y)),
            m.green.map(|p| (p.x, p.y)),
            result.status()
        );
    }

    fn skipped(&mut self, err: &SourceUnavailable) {
        info!("frame skipped: {}", err.reason);
    }
}

/// Writes one compact JSON report per rendered frame.
///
/// Write failures are logged and counted; they never stop the pipeline.
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    out: W,
    written: usize,
    failures: usize,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            written: 0,
            failures: 0,
        }
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn failures(&self) -> usize {
        self.failures
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, result: &FrameResult) -> Result<(), std::io::Error> {
        let report = result.to_report();
        serde_json::to_writer(&mut self.out, &report)?;
        self.out.write_all(b"\n")?;
        self.out.flush()
    }
}

impl<W: Write> RenderSink for JsonLinesSink<W> {
    fn render(&mut self, result: &FrameResult) {
        match self.write_line(result) {
            Ok(()) => self.written += 1,
            Err(err) => {
                self.failures += 1;
                warn!("failed to write frame report: {err}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{FrameProcessor, TickContext};
    use tridot_core::RgbImage;
    use tridot_detect::FrameReport;

    #[test]
    fn one_report_per_line() {
        let processor = FrameProcessor::default();
        let img = RgbImage::filled(40, 30, [10, 10, 10]);
        let mut res = processor.process(&img.view(), &TickContext::default());

        let mut sink = JsonLinesSink::new(Vec::new());
        res.label = Some("a.png".to_string());
        sink.render(&res);
        res.label = None;
        sink.render(&res);
        assert_eq!(sink.written(), 2);
        assert_eq!(sink.failures(), 0);

        let text = String::from_utf8(sink.into_inner()).expect("utf8");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: FrameReport = serde_json::from_str(lines[0]).expect("report");
        assert_eq!(first.image_path.as_deref(), Some("a.png"));
        assert_eq!(first.width, 40);
        assert_eq!(first.status, res.status());
        let second: FrameReport = serde_json::from_str(lines[1]).expect("report");
        assert!(second.image_path.is_none());
    }

    #[test]
    fn log_sink_counts_frames() {
        let processor = FrameProcessor::default();
        let img = RgbImage::filled(8, 8, [0, 0, 0]);
        let res = processor.process(&img.view(), &TickContext::default());
        let mut sink = LogSink::new();
        sink.render(&res);
        sink.skipped(&SourceUnavailable::new("gone"));
        assert_eq!(sink.frames(), 1);
    }
}
