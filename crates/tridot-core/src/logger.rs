//! Log setup for the binaries and demos.
//!
//! `init_with_level` installs an `env_logger` writing
//! `[elapsed LEVEL tick N target] message` lines to stderr. The tick number
//! is whatever the frame loop last published through [`set_log_tick`]; it is
//! omitted outside the loop. `RUST_LOG` overrides the level.
//!
//! With the `tracing` feature, `init_tracing` installs a `tracing-subscriber`
//! formatter instead.

use std::io::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;

use log::{LevelFilter, Record};

#[cfg(feature = "tracing")]
use tracing_subscriber::fmt::format::FmtSpan;
#[cfg(feature = "tracing")]
use tracing_subscriber::util::SubscriberInitExt;
#[cfg(feature = "tracing")]
use tracing_subscriber::{fmt, EnvFilter};

/// 0 means "not inside a tick".
static LOG_TICK: AtomicU64 = AtomicU64::new(0);
static STARTED: OnceLock<Instant> = OnceLock::new();

/// Publish the number of the tick being processed; 0 clears it.
pub fn set_log_tick(tick: u64) {
    LOG_TICK.store(tick, Ordering::Relaxed);
}

/// Tick currently shown in log lines.
pub fn log_tick() -> Option<u64> {
    match LOG_TICK.load(Ordering::Relaxed) {
        0 => None,
        n => Some(n),
    }
}

fn write_record<W: Write>(
    out: &mut W,
    elapsed: f64,
    tick: Option<u64>,
    record: &Record<'_>,
) -> std::io::Result<()> {
    match tick {
        Some(tick) => writeln!(
            out,
            "[{:7.3}s {:>5} tick {} {}] {}",
            elapsed,
            record.level(),
            tick,
            record.target(),
            record.args()
        ),
        None => writeln!(
            out,
            "[{:7.3}s {:>5} {}] {}",
            elapsed,
            record.level(),
            record.target(),
            record.args()
        ),
    }
}

/// Install the stderr logger with `level` as the default filter.
///
/// Calling this more than once is a no-op after the first call.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    if STARTED.get().is_some() {
        return Ok(());
    }
    let started = *STARTED.get_or_init(Instant::now);
    env_logger::Builder::new()
        .filter_level(level)
        .parse_env(env_logger::Env::default())
        .target(env_logger::Target::Stderr)
        .format(move |buf, record| {
            write_record(buf, started.elapsed().as_secs_f64(), log_tick(), record)
        })
        .try_init()
}

/// Install a `tracing` subscriber writing to stderr, filtered by `RUST_LOG`
/// or `default_level` when it is unset.
#[cfg(feature = "tracing")]
pub fn init_tracing(json: bool, default_level: LevelFilter) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.as_str().to_ascii_lowercase()));
    if json {
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_span_events(FmtSpan::CLOSE)
            .json()
            .flatten_event(true)
            .finish()
            .try_init();
    } else {
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_span_events(FmtSpan::CLOSE)
            .with_timer(fmt::time::Uptime::default())
            .finish()
            .try_init();
    }
}
