//! Chart role resolution and dynamic chart configuration.
//!
//! Building a chart is a pure transform:
//!
//! 1. [`assign_default_roles`] tags mapped fields with chart roles when the
//!    caller has no template of their own
//! 2. [`resolve_roles`] picks one X field, at most one series field and the
//!    ordered measures
//! 3. [`infer_chart_type`] chooses line, bar or pie
//! 4. [`ChartBuilder`] assembles axes, legend, series, tooltip and the
//!    switchable alternative-dimension lists
//!
//! Nothing is cached between calls.

pub mod assign;
pub mod builder;
pub mod chart_type;
pub mod options;
pub mod resolver;
pub mod rows;

// === Roles ===
pub use assign::assign_default_roles;
pub use resolver::{MeasureRule, ResolvedRoles, SeriesRule, XAxisRule, resolve_roles};

// === Chart type ===
pub use chart_type::{ChartTypeRule, infer_chart_type};

// === Building ===
pub use builder::{ChartBuilder, build_config, build_config_from_json};
pub use options::ChartOptions;
pub use rows::extract_rows;
