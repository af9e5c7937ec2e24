//! Structured Logger
//!
//! Wraps `tracing` to provide console output, optional JSON formatting, file
//! rotation (NDJSON), and environment-based level control.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// File name prefix for rolled log files.
const LOG_FILE_PREFIX: &str = "permcheck.log";

/// Logger settings, usually taken from the `logging` config section.
#[derive(Debug, Clone)]
pub struct LogOptions {
    pub level: String,
    pub json: bool,
    pub dir: Option<PathBuf>,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            dir: None,
        }
    }
}

/// Filter from `RUST_LOG`, falling back to `level`.
pub fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Initialize the global structured logger.
///
/// Console logs go to stderr so stdout stays free for check reports. When
/// `dir` is set, a JSON file layer writes `permcheck.log.YYYY-MM-DD` there.
/// Calling this more than once keeps the first subscriber.
///
/// Fails without installing anything if the log directory cannot be created.
pub fn init_logger(options: &LogOptions) -> Result<()> {
    let file_appender = options
        .dir
        .as_ref()
        .map(|dir| {
            RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix(LOG_FILE_PREFIX)
                .build(dir)
                .with_context(|| format!("Failed to open log directory: {}", dir.display()))
        })
        .transpose()?;

    let console_json = options.json.then(|| {
        fmt::layer()
            .json()
            .with_writer(std::io::stderr)
    });

    let console_text = (!options.json).then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_ansi(true)
    });

    let file_layer = file_appender.map(|file_appender| {
        fmt::layer()
            .json()
            .with_writer(file_appender)
            .with_ansi(false)
    });

    let _ = tracing_subscriber::registry()
        .with(env_filter(&options.level))
        .with(console_json)
        .with(console_text)
        .with(file_layer)
        .try_init();
    Ok(())
}
