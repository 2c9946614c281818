//! Error types for the dashboard core facade.

use std::path::PathBuf;
use thiserror::Error;

use dash_standards::StandardsError;

/// Errors raised while setting up the pipeline.
///
/// Analysis, mapping and chart building never fail; only loading the
/// vocabulary, settings or log sink can.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CoreError {
    /// The synonym vocabulary could not be loaded.
    #[error(transparent)]
    Standards(#[from] StandardsError),

    /// Failed to read a settings file.
    #[error("Failed to read settings {path}: {source}")]
    SettingsRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Settings file is not valid TOML for [`Settings`](crate::Settings).
    #[error("Failed to parse settings {path}: {source}")]
    SettingsParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The log file could not be opened.
    #[error("Failed to open log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A global subscriber was already installed.
    #[error("Failed to initialise logging: {0}")]
    LoggingInit(String),
}

/// Result type for facade operations.
pub type Result<T> = std::result::Result<T, CoreError>;
