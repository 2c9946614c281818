//! Logging setup on top of `tracing-subscriber`.
//!
//! Library crates only emit `tracing` events; the host process calls
//! [`init_logging`] once to decide where they go.
//!
//! # Log Levels
//!
//! - `warn`: degraded input (unrecognised row containers, skipped vocabulary rows)
//! - `info`: one summary per ingestion pass and per chart build
//! - `debug`: per-column classification and per-rule chart decisions
//! - `trace`: cell values, redacted unless `log_data` is enabled
//!
//! # Usage
//!
//! ```ignore
//! use dash_core::logging::{init_logging, LogConfig};
//!
//! let config = LogConfig::from_verbosity(1);
//! init_logging(&config)?;
//! ```

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tracing::Level;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, MakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::error::{CoreError, Result};

static LOG_DATA_ENABLED: AtomicBool = AtomicBool::new(false);

/// Placeholder logged instead of a cell value.
pub const REDACTED_VALUE: &str = "[REDACTED]";

/// Crates whose events follow the configured level; others stay at `warn`.
const OWN_CRATES: &[&str] = &[
    "dash_chart",
    "dash_core",
    "dash_ingest",
    "dash_map",
    "dash_model",
    "dash_standards",
];

/// Returns true if cell values may be logged.
pub fn log_data_enabled() -> bool {
    LOG_DATA_ENABLED.load(Ordering::Relaxed)
}

/// Returns the input value when data logging is enabled, otherwise a redacted token.
pub fn redact_value(value: &str) -> &str {
    if log_data_enabled() {
        value
    } else {
        REDACTED_VALUE
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable multi-line output.
    #[default]
    Pretty,
    /// Single-line output.
    Compact,
    /// One JSON object per event.
    Json,
}

/// The `[logging]` section of the settings file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// `error`, `warn`, `info`, `debug` or `trace`.
    pub level: String,
    pub format: LogFormat,
    pub timestamps: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
    /// Allow cell values in `trace` output.
    pub log_data: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
            timestamps: false,
            log_file: None,
            log_data: false,
        }
    }
}

/// Resolved logging configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: Level,
    pub with_timestamps: bool,
    /// Include the module path of each event.
    pub with_target: bool,
    pub with_ansi: bool,
    pub format: LogFormat,
    /// Append to this file instead of stderr.
    pub log_file: Option<PathBuf>,
    pub log_data: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            with_timestamps: false,
            with_target: false,
            with_ansi: true,
            format: LogFormat::default(),
            log_file: None,
            log_data: false,
        }
    }
}

impl LogConfig {
    /// Level from a verbosity count: 0 is info, 1 is debug, more is trace.
    #[must_use]
    pub fn from_verbosity(verbosity: u8) -> Self {
        let level = match verbosity {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        };
        Self {
            level,
            ..Default::default()
        }
    }

    /// Build from the settings file section. An unknown level reads as `info`.
    #[must_use]
    pub fn from_settings(settings: &LogSettings) -> Self {
        Self {
            level: Level::from_str(settings.level.trim()).unwrap_or(Level::INFO),
            with_timestamps: settings.timestamps,
            format: settings.format,
            log_file: settings.log_file.clone(),
            log_data: settings.log_data,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_ansi(mut self, enable: bool) -> Self {
        self.with_ansi = enable;
        self
    }

    #[must_use]
    pub fn with_log_data(mut self, enable: bool) -> Self {
        self.log_data = enable;
        self
    }
}

/// Install the global subscriber.
///
/// # Errors
///
/// Fails when the log file cannot be opened or a subscriber is already set.
pub fn init_logging(config: &LogConfig) -> Result<()> {
    match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|source| CoreError::LogFile {
                    path: path.clone(),
                    source,
                })?;
            init_logging_with_writer(config, SharedFileWriter::new(file))
        }
        None => init_logging_with_writer(config, io::stderr),
    }
}

/// Install the global subscriber writing to `writer`.
pub fn init_logging_with_writer<W>(config: &LogConfig, writer: W) -> Result<()>
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    LOG_DATA_ENABLED.store(config.log_data, Ordering::Release);
    let filter = build_env_filter(config.level);
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match (config.format, config.with_timestamps) {
        (LogFormat::Json, _) => registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(writer)
                    .with_target(config.with_target),
            )
            .try_init(),
        (LogFormat::Compact, true) => registry
            .with(
                fmt::layer()
                    .compact()
                    .with_writer(writer)
                    .with_ansi(config.with_ansi)
                    .with_target(config.with_target),
            )
            .try_init(),
        (LogFormat::Compact, false) => registry
            .with(
                fmt::layer()
                    .compact()
                    .without_time()
                    .with_writer(writer)
                    .with_ansi(config.with_ansi)
                    .with_target(config.with_target),
            )
            .try_init(),
        (LogFormat::Pretty, true) => registry
            .with(
                fmt::layer()
                    .with_writer(writer)
                    .with_ansi(config.with_ansi)
                    .with_target(config.with_target),
            )
            .try_init(),
        (LogFormat::Pretty, false) => registry
            .with(
                fmt::layer()
                    .without_time()
                    .with_writer(writer)
                    .with_ansi(config.with_ansi)
                    .with_target(config.with_target),
            )
            .try_init(),
    };
    installed.map_err(|err| CoreError::LoggingInit(err.to_string()))
}

#[derive(Clone)]
struct SharedFileWriter {
    file: Arc<Mutex<std::fs::File>>,
}

impl SharedFileWriter {
    fn new(file: std::fs::File) -> Self {
        Self {
            file: Arc::new(Mutex::new(file)),
        }
    }
}

struct SharedFileGuard {
    file: Arc<Mutex<std::fs::File>>,
}

impl Write for SharedFileGuard {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self
            .file
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?;
        guard.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut guard = self
            .file
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?;
        guard.flush()
    }
}

impl<'a> MakeWriter<'a> for SharedFileWriter {
    type Writer = SharedFileGuard;

    fn make_writer(&'a self) -> Self::Writer {
        SharedFileGuard {
            file: Arc::clone(&self.file),
        }
    }
}

/// `RUST_LOG` wins over the configured level.
fn build_env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(level)))
}

fn default_directives(level: Level) -> String {
    let level = level.as_str().to_lowercase();
    std::iter::once("warn".to_string())
        .chain(OWN_CRATES.iter().map(|krate| format!("{krate}={level}")))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_map_to_config() {
        let settings = LogSettings {
            level: "DEBUG".to_string(),
            format: LogFormat::Json,
            timestamps: true,
            log_file: None,
            log_data: false,
        };
        let config = LogConfig::from_settings(&settings);
        assert_eq!(config.level, Level::DEBUG);
        assert_eq!(config.format, LogFormat::Json);
        assert!(config.with_timestamps);
    }

    #[test]
    fn unknown_level_falls_back_to_info() {
        let settings = LogSettings {
            level: "chatty".to_string(),
            ..LogSettings::default()
        };
        assert_eq!(LogConfig::from_settings(&settings).level, Level::INFO);
    }

    #[test]
    fn verbosity_levels() {
        assert_eq!(LogConfig::from_verbosity(0).level, Level::INFO);
        assert_eq!(LogConfig::from_verbosity(1).level, Level::DEBUG);
        assert_eq!(LogConfig::from_verbosity(5).level, Level::TRACE);
    }

    #[test]
    fn directives_cover_own_crates() {
        let directives = default_directives(Level::DEBUG);
        assert!(directives.starts_with("warn,"));
        assert!(directives.contains("dash_chart=debug"));
        assert!(directives.contains("dash_standards=debug"));
    }

    #[test]
    fn values_are_redacted_by_default() {
        assert_eq!(redact_value("Alice"), REDACTED_VALUE);
    }
}
