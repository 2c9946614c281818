//! Data model shared by the dashboard generation crates.
//!
//! Everything here is a plain value: features are produced once per
//! ingestion pass, mappings are recomputed wholesale, and chart configs are
//! pure projections rebuilt on every request.
//!
//! # Module Organization
//!
//! - [`value`]: tagged cell values, rows and the two-key row accessor
//! - [`enums`]: type, role, axis and status tags
//! - [`feature`]: per-column analysis output ([`DataFeature`])
//! - [`mapping`]: per-column canonical mapping ([`FieldMapping`])
//! - [`roles`]: chart role assignments and caller overrides
//! - [`chart`]: the renderable chart specification ([`DynamicChartConfig`])
//! - [`ingest`]: the ingestion pass result ([`IngestionResult`])

pub mod chart;
pub mod enums;
pub mod error;
pub mod feature;
pub mod ingest;
pub mod mapping;
pub mod roles;
pub mod value;

// === Error Types ===
pub use error::{ModelError, Result};

// === Tags ===
pub use enums::{ChartAxis, ChartType, DataType, FieldRole, IngestStatus, MappingSource, NumericSubType};

// === Values ===
pub use value::{CURRENCY_SYMBOLS, CellValue, FieldKey, Row, format_number, parse_decimal};

// === Analysis and Mapping ===
pub use feature::DataFeature;
pub use mapping::{FieldCandidate, FieldMapping};

// === Chart Roles ===
pub use roles::{DEFAULT_AXIS_PRIORITY, FieldRoleAssignment, RoleOverrides};

// === Chart Config ===
pub use chart::{
    AlternativeDimension, AxisLabel, AxisPointer, AxisPosition, AxisType, DynamicChartConfig,
    LegendOrient, LegendPosition, LegendSpec, SeriesDatum, SeriesSpec, SeriesType, TooltipSpec,
    TooltipTrigger, XAxisSpec, YAxisSpec,
};

// === Ingestion ===
pub use ingest::IngestionResult;
