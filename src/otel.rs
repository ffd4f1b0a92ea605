//! Structured logging initialization and configuration
//!
//! The library only emits `tracing` events; it never installs a subscriber.
//! Binaries embedding the router (and the `segroute` CLI) call
//! [`init_logging_with_config`] once at startup.
//!
//! Provides:
//! - JSON output for production, pretty output for development
//! - Sampling of high-volume `info`/`debug` dispatch events (warn and error
//!   are never dropped)
//! - Optional non-blocking output via `tracing-appender`
//!
//! All output goes to stderr so that stdout stays free for command output.
//!
//! ## Environment Variables
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `SEGROUTE_LOG_LEVEL` | `info` | trace/debug/info/warn/error |
//! | `SEGROUTE_LOG_FORMAT` | `json` | json/pretty |
//! | `SEGROUTE_LOG_SAMPLING_MODE` | `all` | all/error-only/sampled |
//! | `SEGROUTE_LOG_SAMPLING_RATE` | `1.0` | fraction kept in `sampled` mode |
//! | `SEGROUTE_LOG_ASYNC` | `false` | non-blocking writer |
//! | `SEGROUTE_LOG_TARGET_FILTER` | unset | extra comma-separated directives |
//! | `SEGROUTE_LOG_INCLUDE_LOCATION` | `false` | file:line in output |
//!
//! `RUST_LOG`, when set, takes precedence over `SEGROUTE_LOG_LEVEL`.

use anyhow::{Context, Result};
use std::env;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use tracing::subscriber::Interest;
use tracing::Level;
use tracing::{Event, Metadata, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::{Context as LayerContext, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Flush guard for the non-blocking writer, held until [`shutdown`].
static WORKER_GUARD: Mutex<Option<WorkerGuard>> = Mutex::new(None);

/// Log format: JSON for production, pretty-print for development
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "pretty" => LogFormat::Pretty,
            _ => LogFormat::Json,
        }
    }
}

/// Sampling mode: how to decide which events to emit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplingMode {
    /// Log everything
    All,
    /// Log only WARN and ERROR levels
    ErrorOnly,
    /// Keep a fraction of lower-level events, log all warnings and errors
    Sampled,
}

impl SamplingMode {
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "sampled" => SamplingMode::Sampled,
            "error-only" | "error_only" => SamplingMode::ErrorOnly,
            _ => SamplingMode::All,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq)]
pub struct LogConfig {
    /// Log level: trace/debug/info/warn/error
    pub log_level: String,
    /// Log format: json/pretty
    pub format: LogFormat,
    /// Sampling mode: all/error-only/sampled
    pub sampling_mode: SamplingMode,
    /// Sampling rate (0.0-1.0) for Sampled mode
    pub sampling_rate: f64,
    /// Write through a background thread
    pub async_logging: bool,
    /// Extra filter directives (comma-separated)
    pub target_filter: Option<String>,
    /// Include file:line location
    pub include_location: bool,
}

impl LogConfig {
    /// Parse configuration from environment variables with defaults
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let flag = |key: &str| -> Option<bool> { lookup(key).and_then(|s| s.trim().parse().ok()) };
        Self {
            log_level: lookup("SEGROUTE_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            format: lookup("SEGROUTE_LOG_FORMAT")
                .map(|s| LogFormat::parse(&s))
                .unwrap_or(LogFormat::Json),
            sampling_mode: lookup("SEGROUTE_LOG_SAMPLING_MODE")
                .map(|s| SamplingMode::parse(&s))
                .unwrap_or(SamplingMode::All),
            sampling_rate: lookup("SEGROUTE_LOG_SAMPLING_RATE")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(1.0),
            async_logging: flag("SEGROUTE_LOG_ASYNC").unwrap_or(false),
            target_filter: lookup("SEGROUTE_LOG_TARGET_FILTER"),
            include_location: flag("SEGROUTE_LOG_INCLUDE_LOCATION").unwrap_or(false),
        }
    }

    /// Configuration for local development
    #[must_use]
    pub fn default_dev() -> Self {
        Self {
            log_level: "debug".to_string(),
            format: LogFormat::Pretty,
            sampling_mode: SamplingMode::All,
            sampling_rate: 1.0,
            async_logging: false,
            target_filter: None,
            include_location: true,
        }
    }

    /// Configuration for production services dispatching at high volume
    #[must_use]
    pub fn default_prod() -> Self {
        Self {
            log_level: "info".to_string(),
            format: LogFormat::Json,
            sampling_mode: SamplingMode::Sampled,
            sampling_rate: 0.1,
            async_logging: true,
            target_filter: None,
            include_location: false,
        }
    }
}

/// Sampling layer: decides whether to emit an event based on sampling rules
pub struct SamplingLayer {
    mode: SamplingMode,
    sampling_rate: f64,
    counter: AtomicU64,
}

impl SamplingLayer {
    #[must_use]
    pub fn new(mode: SamplingMode, sampling_rate: f64) -> Self {
        Self {
            mode,
            sampling_rate: sampling_rate.clamp(0.0, 1.0),
            counter: AtomicU64::new(0),
        }
    }

    fn should_sample(&self, metadata: &Metadata<'_>) -> bool {
        let important = matches!(*metadata.level(), Level::WARN | Level::ERROR);
        match self.mode {
            SamplingMode::All => true,
            SamplingMode::ErrorOnly => important,
            SamplingMode::Sampled => {
                if important {
                    return true;
                }
                if self.sampling_rate <= 0.0 {
                    return false;
                }
                let count = self.counter.fetch_add(1, Ordering::Relaxed);
                let sample_interval = (1.0 / self.sampling_rate).round() as u64;
                sample_interval > 0 && count % sample_interval == 0
            }
        }
    }
}

impl<S> Layer<S> for SamplingLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn register_callsite(&self, _metadata: &'static Metadata<'static>) -> Interest {
        // Decided per event; a cached `never` would stop sampling a callsite.
        Interest::sometimes()
    }

    fn enabled(&self, metadata: &Metadata<'_>, _ctx: LayerContext<'_, S>) -> bool {
        // Spans pass through; only events are sampled.
        !metadata.is_event() || self.should_sample(metadata)
    }

    fn on_event(&self, _event: &Event<'_>, _ctx: LayerContext<'_, S>) {}
}

fn parse_level(level: &str) -> Level {
    match level.trim().to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

fn build_filter(config: &LogConfig) -> EnvFilter {
    let level = parse_level(&config.log_level);
    let mut env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    if let Some(target_filter) = &config.target_filter {
        for filter in target_filter.split(',') {
            let filter = filter.trim();
            if filter.is_empty() {
                continue;
            }
            match filter.parse() {
                Ok(directive) => env_filter = env_filter.add_directive(directive),
                Err(_) => eprintln!("Warning: Invalid log filter directive: {}", filter),
            }
        }
    }
    env_filter
}

/// Initialize logging at `log_level`, taking everything else from the
/// environment.
///
/// # Example
///
/// ```no_run
/// use segroute::otel;
///
/// otel::init_logging("info").expect("Failed to initialize logging");
/// ```
pub fn init_logging(log_level: &str) -> Result<()> {
    let mut config = LogConfig::from_env();
    config.log_level = log_level.to_string();
    init_logging_with_config(&config)
}

/// Install the global subscriber described by `config`.
///
/// Fails if a global subscriber is already installed.
///
/// # Example
///
/// ```no_run
/// use segroute::otel::{init_logging_with_config, LogConfig};
///
/// let config = LogConfig::from_env();
/// init_logging_with_config(&config).expect("Failed to initialize logging");
/// ```
pub fn init_logging_with_config(config: &LogConfig) -> Result<()> {
    let registry = tracing_subscriber::registry()
        .with(build_filter(config))
        .with(SamplingLayer::new(config.sampling_mode, config.sampling_rate));

    let (writer, guard) = if config.async_logging {
        let (non_blocking, guard) = tracing_appender::non_blocking(std::io::stderr());
        (
            tracing_subscriber::fmt::writer::BoxMakeWriter::new(non_blocking),
            Some(guard),
        )
    } else {
        (
            tracing_subscriber::fmt::writer::BoxMakeWriter::new(std::io::stderr),
            None,
        )
    };

    let fmt_layer = match config.format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_target(true)
            .with_thread_ids(true)
            .with_span_list(true)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .with_writer(writer)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer()
            .pretty()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .with_writer(writer)
            .boxed(),
    };

    registry
        .with(fmt_layer)
        .try_init()
        .context("Failed to initialize logging")?;

    if let Some(guard) = guard {
        if let Ok(mut slot) = WORKER_GUARD.lock() {
            *slot = Some(guard);
        }
    }
    Ok(())
}

/// Flush buffered log output.
///
/// Call before process exit when `async_logging` is on; a no-op otherwise.
pub fn shutdown() {
    if let Ok(mut slot) = WORKER_GUARD.lock() {
        drop(slot.take());
    }
}
