//! Chart building options.

use serde::{Deserialize, Serialize};

/// Thresholds used by role resolution, chart-type inference and layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartOptions {
    /// Category count above which x-axis labels are rotated (default: 10).
    pub label_rotate_threshold: usize,
    /// Rotation applied to crowded x-axis labels (default: 45).
    pub label_rotate_degrees: u16,
    /// Distinct values a series field may have (default: 15).
    pub series_max_distinct: usize,
    /// Row count up to which a single measure renders as a pie (default: 6).
    pub pie_max_rows: usize,
    /// Row count a grouped chart must exceed to stack (default: 5).
    pub stacked_min_rows: usize,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            label_rotate_threshold: 10,
            label_rotate_degrees: 45,
            series_max_distinct: 15,
            pie_max_rows: 6,
            stacked_min_rows: 5,
        }
    }
}
