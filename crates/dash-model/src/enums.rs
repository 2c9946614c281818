//! Type-safe tags for column types, chart roles and statuses.
//!
//! Every tag serializes in the wire form consumers expect and parses back
//! case-insensitively through [`FromStr`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

fn normalize_tag(s: &str) -> String {
    s.trim().to_uppercase().replace(['-', ' '], "_")
}

/// Semantic type inferred for a column. Exactly one per column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataType {
    /// Values parse as calendar dates under one supported pattern.
    Date,
    /// Values parse as decimals once decorations are stripped.
    Numeric,
    /// Identifier-like column (by name or near-total uniqueness).
    Id,
    /// Low-cardinality grouping column.
    Categorical,
    /// Free text fallback.
    Text,
}

impl DataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Date => "DATE",
            DataType::Numeric => "NUMERIC",
            DataType::Id => "ID",
            DataType::Categorical => "CATEGORICAL",
            DataType::Text => "TEXT",
        }
    }

    /// True for types usable as a grouping dimension.
    pub fn is_dimension_like(&self) -> bool {
        matches!(
            self,
            DataType::Date | DataType::Categorical | DataType::Text
        )
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_tag(s).as_str() {
            "DATE" | "DATETIME" | "TIME" => Ok(DataType::Date),
            "NUMERIC" | "NUMBER" | "DECIMAL" => Ok(DataType::Numeric),
            "ID" | "IDENTIFIER" => Ok(DataType::Id),
            "CATEGORICAL" | "CATEGORY" => Ok(DataType::Categorical),
            "TEXT" | "STRING" => Ok(DataType::Text),
            _ => Err(ModelError::unknown("data type", s)),
        }
    }
}

/// Refinement of [`DataType::Numeric`] columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NumericSubType {
    /// Monetary values (name keywords or currency symbols).
    Amount,
    /// Rates and ratios written with a percent sign.
    Percentage,
    /// Mostly integral counts.
    Quantity,
    General,
}

impl NumericSubType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NumericSubType::Amount => "AMOUNT",
            NumericSubType::Percentage => "PERCENTAGE",
            NumericSubType::Quantity => "QUANTITY",
            NumericSubType::General => "GENERAL",
        }
    }
}

impl fmt::Display for NumericSubType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NumericSubType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_tag(s).as_str() {
            "AMOUNT" => Ok(NumericSubType::Amount),
            "PERCENTAGE" | "PERCENT" => Ok(NumericSubType::Percentage),
            "QUANTITY" => Ok(NumericSubType::Quantity),
            "GENERAL" => Ok(NumericSubType::General),
            _ => Err(ModelError::unknown("numeric subtype", s)),
        }
    }
}

/// How a column arrived at its canonical field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MappingSource {
    /// Dictionary hit with full confidence.
    ExactMatch,
    /// Dictionary hit below full confidence.
    SynonymMatch,
    /// No dictionary hit; candidates inferred from the column's features.
    FeatureInfer,
}

impl MappingSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            MappingSource::ExactMatch => "EXACT_MATCH",
            MappingSource::SynonymMatch => "SYNONYM_MATCH",
            MappingSource::FeatureInfer => "FEATURE_INFER",
        }
    }
}

impl fmt::Display for MappingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MappingSource {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_tag(s).as_str() {
            "EXACT_MATCH" | "EXACT" => Ok(MappingSource::ExactMatch),
            "SYNONYM_MATCH" | "SYNONYM" => Ok(MappingSource::SynonymMatch),
            "FEATURE_INFER" | "INFERRED" => Ok(MappingSource::FeatureInfer),
            _ => Err(ModelError::unknown("mapping source", s)),
        }
    }
}

/// Analytical role of a field on a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldRole {
    Dimension,
    Metric,
    Time,
}

impl FieldRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldRole::Dimension => "DIMENSION",
            FieldRole::Metric => "METRIC",
            FieldRole::Time => "TIME",
        }
    }
}

impl fmt::Display for FieldRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldRole {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_tag(s).as_str() {
            "DIMENSION" => Ok(FieldRole::Dimension),
            "METRIC" | "MEASURE" => Ok(FieldRole::Metric),
            "TIME" => Ok(FieldRole::Time),
            _ => Err(ModelError::unknown("field role", s)),
        }
    }
}

/// Visual axis a field is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChartAxis {
    XAxis,
    Series,
    YAxis,
}

impl ChartAxis {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartAxis::XAxis => "X_AXIS",
            ChartAxis::Series => "SERIES",
            ChartAxis::YAxis => "Y_AXIS",
        }
    }
}

impl fmt::Display for ChartAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartAxis {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_tag(s).as_str() {
            "X_AXIS" | "X" => Ok(ChartAxis::XAxis),
            "SERIES" | "LEGEND" => Ok(ChartAxis::Series),
            "Y_AXIS" | "Y" => Ok(ChartAxis::YAxis),
            _ => Err(ModelError::unknown("chart axis", s)),
        }
    }
}

/// Chart family chosen for a resolved set of roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Line,
    #[default]
    Bar,
    Pie,
}

impl ChartType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartType::Line => "line",
            ChartType::Bar => "bar",
            ChartType::Pie => "pie",
        }
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_tag(s).as_str() {
            "LINE" => Ok(ChartType::Line),
            "BAR" | "STACKED_BAR" => Ok(ChartType::Bar),
            "PIE" => Ok(ChartType::Pie),
            _ => Err(ModelError::unknown("chart type", s)),
        }
    }
}

/// Outcome of an ingestion pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IngestStatus {
    /// Every required canonical field was matched.
    Complete,
    /// At least one required canonical field has no column.
    MissingFields,
    /// The input could not be analyzed at all.
    Error,
}

impl IngestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            IngestStatus::Complete => "COMPLETE",
            IngestStatus::MissingFields => "MISSING_FIELDS",
            IngestStatus::Error => "ERROR",
        }
    }
}

impl fmt::Display for IngestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IngestStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_tag(s).as_str() {
            "COMPLETE" => Ok(IngestStatus::Complete),
            "MISSING_FIELDS" => Ok(IngestStatus::MissingFields),
            "ERROR" => Ok(IngestStatus::Error),
            _ => Err(ModelError::unknown("ingest status", s)),
        }
    }
}
