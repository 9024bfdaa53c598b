//! # Tracing Setup
//!
//! Installs the global `tracing-subscriber` for the `kata` binary. Logs go
//! to stderr so that command results on stdout stay machine-readable.

use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

/// Log line format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable single-line events.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Build the level filter for a `-v` count.
///
/// With no `-v`, `RUST_LOG` is honoured when set; otherwise only warnings
/// are shown.
pub fn filter_for(verbose: u8) -> EnvFilter {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    filter_from(verbose, rust_log.as_deref())
}

/// Build the level filter from a `-v` count and the `RUST_LOG` value.
///
/// Any `-v` overrides `rust_log`. An empty or unparsable `rust_log` falls
/// back to `warn`.
pub fn filter_from(verbose: u8, rust_log: Option<&str>) -> EnvFilter {
    match verbose {
        0 => rust_log
            .filter(|directives| !directives.trim().is_empty())
            .and_then(|directives| EnvFilter::builder().parse(directives).ok())
            .unwrap_or_else(|| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    }
}

/// Install the global subscriber. Call once, at startup.
pub fn init(verbose: u8, format: LogFormat) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter_for(verbose))
        .with_target(false)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}
