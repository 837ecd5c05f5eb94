//! Logging setup for the launcher
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: filter directives (default: `info`)
//! - `DEVLAUNCH_LOG_FORMAT`: `compact` (default), `pretty` or `json`
//!
//! Colors are only written when stdout is a terminal.
//!
//! # Example
//!
//! ```text
//! DEVLAUNCH_LOG_FORMAT=json RUST_LOG=devlaunch=debug ./devlaunch
//! ```

use anyhow::{Context, Result};
use std::io::IsTerminal;
use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

pub const LOG_FORMAT_ENV: &str = "DEVLAUNCH_LOG_FORMAT";
const DEFAULT_FILTER: &str = "info";

/// Output format of the global subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One line per event, suits relayed dev-server output
    #[default]
    Compact,
    /// Multi-line, without source locations
    Pretty,
    /// Production: JSON structured logging
    Json,
}

impl LogFormat {
    /// Unknown values fall back to the default
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => LogFormat::Json,
            "pretty" => LogFormat::Pretty,
            "compact" => LogFormat::Compact,
            _ => LogFormat::default(),
        }
    }
}

/// Logging configuration, read once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub format: LogFormat,
    /// `RUST_LOG` value, if set
    pub filter: Option<String>,
    /// Write ANSI colors
    pub ansi: bool,
}

impl LogConfig {
    pub fn from_env() -> Self {
        Self {
            format: std::env::var(LOG_FORMAT_ENV)
                .map(|v| LogFormat::parse(&v))
                .unwrap_or_default(),
            filter: std::env::var(EnvFilter::DEFAULT_ENV).ok(),
            ansi: std::io::stdout().is_terminal(),
        }
    }

    fn env_filter(&self) -> Result<EnvFilter> {
        let directives = self.filter.as_deref().unwrap_or(DEFAULT_FILTER);
        EnvFilter::try_new(directives)
            .or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))
            .context("Failed to create env filter")
    }
}

/// Formatting layer for `config`, writing to `writer`
fn output_layer<S, W>(config: &LogConfig, writer: W) -> Box<dyn Layer<S> + Send + Sync + 'static>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = fmt::layer().with_writer(writer).with_ansi(config.ansi);

    match config.format {
        LogFormat::Json => layer.json().boxed(),
        LogFormat::Compact => layer.compact().boxed(),
        LogFormat::Pretty => layer
            .pretty()
            .with_file(false)
            .with_line_number(false)
            .boxed(),
    }
}

/// Install the global subscriber; must be called once
pub fn init_logging(config: &LogConfig) -> Result<()> {
    let env_filter = config.env_filter()?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(output_layer(config, std::io::stdout))
        .try_init()
        .context("Failed to install tracing subscriber")
}
