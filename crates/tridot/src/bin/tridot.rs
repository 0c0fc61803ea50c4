//! tridot CLI: detect the three-dot marker in still images and report the
//! turn needed to face a target.

use clap::{Args, Parser, Subcommand};
use log::{info, LevelFilter};
use nalgebra::Point2;
use std::path::PathBuf;

use tridot::frames::{load_frame, ImageFileSource};
use tridot::{FrameProcessor, JsonLinesSink, Orchestrator, TickContext, TickOutcome, TridotConfig};

#[cfg(feature = "tracing")]
use tracing_log::LogTracer;

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "tridot")]
#[command(about = "Three-dot marker detection and heading estimation")]
#[command(version)]
struct Cli {
    /// Log at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect the markers in one image and write a JSON report.
    Detect(DetectArgs),

    /// Process a sequence of images, one tick each, printing JSON lines.
    Run(RunArgs),

    /// Print the default configuration as JSON.
    DefaultConfig,
}

#[derive(Debug, Clone, Args)]
struct DetectArgs {
    /// Path to the input image.
    #[arg(long)]
    image: PathBuf,

    /// Target point in pixels, as `X,Y`.
    #[arg(long, value_parser = parse_point)]
    target: Option<Point2<f32>>,

    /// JSON configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where to write the report. Printed to stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Clustering scan stride (overrides the config).
    #[arg(long)]
    stride: Option<usize>,

    /// Cluster merge radius in pixels (overrides the config).
    #[arg(long)]
    merge_radius: Option<f32>,
}

#[derive(Debug, Clone, Args)]
struct RunArgs {
    /// Input images, processed in order.
    #[arg(long, num_args = 1.., required = true)]
    image: Vec<PathBuf>,

    /// Target point in pixels, as `X,Y`.
    #[arg(long, value_parser = parse_point)]
    target: Option<Point2<f32>>,

    /// JSON configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn parse_point(s: &str) -> Result<Point2<f32>, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got {s:?}"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f32>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| format!("invalid coordinate {v:?}"))
    };
    Ok(Point2::new(parse(x)?, parse(y)?))
}

fn load_config(path: Option<&PathBuf>) -> CliResult<TridotConfig> {
    match path {
        Some(path) => {
            info!("loading config {}", path.display());
            Ok(TridotConfig::load_json(path)?)
        }
        None => Ok(TridotConfig::default()),
    }
}

fn init_logging(verbose: bool) -> CliResult<()> {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    #[cfg(feature = "tracing")]
    {
        let _ = LogTracer::init();
        tridot::core::init_tracing(false, level);
    }
    #[cfg(not(feature = "tracing"))]
    tridot::core::init_with_level(level)?;
    Ok(())
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match cli.command {
        Commands::Detect(args) => run_detect(&args),
        Commands::Run(args) => run_sequence(&args),
        Commands::DefaultConfig => run_default_config(),
    }
}

fn run_detect(args: &DetectArgs) -> CliResult<()> {
    let mut config = load_config(args.config.as_ref())?;
    if let Some(stride) = args.stride {
        if stride == 0 {
            return Err("--stride must be at least 1".into());
        }
        config.stride = stride;
    }
    if let Some(radius) = args.merge_radius {
        config.tolerances.cluster_radius = radius;
    }
    config.validate()?;

    info!("loading image {}", args.image.display());
    let frame = load_frame(&args.image)?;
    info!("image size {}x{}", frame.width, frame.height);

    let ctx = TickContext {
        target: args.target,
        tolerances: config.tolerances,
    };
    let mut result = FrameProcessor::from_config(&config).process(&frame.view(), &ctx);
    result.label = Some(args.image.display().to_string());
    info!("{}", result.status());

    let report = result.to_report();
    match &args.out {
        Some(out) => {
            report.write_json(out)?;
            info!("report written to {}", out.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

fn run_sequence(args: &RunArgs) -> CliResult<()> {
    let config = load_config(args.config.as_ref())?;
    let source = ImageFileSource::new(args.image.iter().cloned());
    let sink = JsonLinesSink::new(std::io::stdout());
    let mut orch = Orchestrator::new(source, sink, FrameProcessor::from_config(&config));

    let mut skipped = 0usize;
    while !orch.source().is_exhausted() {
        if let TickOutcome::Skipped(_) = orch.tick_with(&args.target, &config) {
            skipped += 1;
        }
    }

    let (_, sink) = orch.into_parts();
    info!(
        "processed {} frame(s), skipped {}",
        sink.written(),
        skipped
    );
    if sink.failures() > 0 {
        return Err(format!("failed to write {} report(s)", sink.failures()).into());
    }
    Ok(())
}

fn run_default_config() -> CliResult<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(&TridotConfig::default())?
    );
    Ok(())
}
