//! Dashboard generation facade.
//!
//! Ties the analysis, mapping and chart crates into two calls:
//!
//! 1. [`Dashboard::ingest`] classifies every column of an upload, maps
//!    headers onto the canonical vocabulary and reports required-field gaps
//! 2. [`Dashboard::build_chart`] turns role assignments plus rows into a
//!    [`DynamicChartConfig`](dash_model::DynamicChartConfig)
//!
//! # Example
//!
//! ```rust,ignore
//! use dash_core::{Dashboard, Settings};
//! use dash_model::RoleOverrides;
//!
//! let dashboard = Dashboard::from_settings(Settings::load_from(path)?)?;
//! let result = dashboard.ingest(&headers, &rows);
//! let roles = dashboard.default_roles(&result);
//! let chart = dashboard.build_chart(&roles, &rows, &RoleOverrides::default());
//! ```

pub mod error;
pub mod logging;
pub mod pipeline;
pub mod settings;

// === Error Types ===
pub use error::{CoreError, Result};

// === Pipeline ===
pub use pipeline::{Dashboard, ingest};

// === Configuration ===
pub use logging::{LogConfig, LogFormat, LogSettings, init_logging};
pub use settings::{IngestOptions, Settings};
