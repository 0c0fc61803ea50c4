//! Run the frame loop over still images while a second thread moves the
//! target around, printing the steering status of every tick.
//!
//! Usage: steer_image <image_path>...

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use nalgebra::Point2;
use tridot::frames::ImageFileSource;
use tridot::{FrameProcessor, LogSink, Orchestrator, TargetCell, TickOutcome, ToleranceConfig};

#[cfg(feature = "tracing")]
use tridot::core::init_tracing;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "tracing")]
    init_tracing(false, log::LevelFilter::Info);
    #[cfg(not(feature = "tracing"))]
    tridot::core::init_with_level(log::LevelFilter::Info)?;

    let paths: Vec<String> = std::env::args().skip(1).collect();
    if paths.is_empty() {
        eprintln!("Usage: steer_image <image_path>...");
        return Ok(());
    }

    let target = Arc::new(TargetCell::new());
    let writer = Arc::clone(&target);
    let mover = thread::spawn(move || {
        for i in 0..8u16 {
            let a = f32::from(i) * std::f32::consts::FRAC_PI_4;
            writer.set(Point2::new(320.0 + 200.0 * a.cos(), 240.0 + 200.0 * a.sin()));
            thread::sleep(Duration::from_millis(5));
        }
    });

    let tolerances = ToleranceConfig::default();
    let mut orch = Orchestrator::new(
        ImageFileSource::new(paths),
        LogSink::new(),
        FrameProcessor::default(),
    );
    while !orch.source().is_exhausted() {
        match orch.tick_with(target.as_ref(), &tolerances) {
            TickOutcome::Rendered(result) => println!("{}", result.status()),
            TickOutcome::Skipped(err) => println!("skipped: {err}"),
        }
    }

    mover.join().map_err(|_| "target thread panicked")?;
    Ok(())
}
