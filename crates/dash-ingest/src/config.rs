//! Analyzer thresholds.

use serde::{Deserialize, Serialize};

/// Thresholds driving the type-detection cascade.
///
/// Ratios are measured over non-blank values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Share of values a date pattern must parse (default: 0.90).
    pub date_ratio: f64,
    /// Share of values that must parse as decimals (default: 0.95).
    pub numeric_ratio: f64,
    /// Unique ratio above which a column is an identifier (default: 0.95).
    pub id_unique_ratio: f64,
    /// Unique ratio below which a column is categorical (default: 0.20).
    pub categorical_ratio: f64,
    /// Cap on distinct values of a categorical column (default: 50).
    pub categorical_max_unique: usize,
    /// Distinct values kept as samples (default: 10).
    pub max_sample_values: usize,
    /// Rows inspected per ingestion pass (default: 100).
    pub sample_rows: usize,
    /// Share of integral values that makes a numeric column a quantity (default: 0.90).
    pub quantity_integral_ratio: f64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            date_ratio: 0.90,
            numeric_ratio: 0.95,
            id_unique_ratio: 0.95,
            categorical_ratio: 0.20,
            categorical_max_unique: 50,
            max_sample_values: 10,
            sample_rows: 100,
            quantity_integral_ratio: 0.90,
        }
    }
}

impl AnalyzerConfig {
    /// Stricter thresholds for clean, machine-generated exports.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            date_ratio: 0.98,
            numeric_ratio: 0.99,
            ..Self::default()
        }
    }

    /// Looser thresholds for hand-edited spreadsheets with stray cells.
    #[must_use]
    pub fn relaxed() -> Self {
        Self {
            date_ratio: 0.80,
            numeric_ratio: 0.85,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_sample_rows(mut self, sample_rows: usize) -> Self {
        self.sample_rows = sample_rows;
        self
    }
}
