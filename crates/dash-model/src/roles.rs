//! Chart role assignments.
//!
//! Assignments are recomputed for every chart-build request and may carry
//! caller overrides (axis tags, priorities, explicit [`RoleOverrides`]).

use serde::{Deserialize, Serialize};

use crate::enums::{ChartAxis, DataType, FieldRole};
use crate::mapping::FieldMapping;
use crate::value::FieldKey;

/// Priority given to fields nobody ranked. Lower is preferred.
pub const DEFAULT_AXIS_PRIORITY: u32 = 100;

/// A field mapping plus the role it plays on a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldRoleAssignment {
    #[serde(flatten)]
    pub mapping: FieldMapping,
    pub role: FieldRole,
    pub chart_axis: Option<ChartAxis>,
    pub axis_priority: u32,
    /// Distinct value count when known.
    pub unique_value_count: Option<usize>,
    pub is_date_type: bool,
    /// Whether the field may be used as a series (legend) split.
    pub series_suitable: bool,
    /// Excluded fields are never charted or offered as alternatives.
    pub excluded: bool,
}

impl FieldRoleAssignment {
    pub fn new(mapping: FieldMapping, role: FieldRole) -> Self {
        let is_date_type = mapping.data_type == DataType::Date;
        Self {
            mapping,
            role,
            chart_axis: None,
            axis_priority: DEFAULT_AXIS_PRIORITY,
            unique_value_count: None,
            is_date_type,
            series_suitable: true,
            excluded: false,
        }
    }

    pub fn with_axis(mut self, axis: ChartAxis, priority: u32) -> Self {
        self.chart_axis = Some(axis);
        self.axis_priority = priority;
        self
    }

    pub fn with_unique_count(mut self, count: usize) -> Self {
        self.unique_value_count = Some(count);
        self
    }

    pub fn mark_excluded(mut self) -> Self {
        self.excluded = true;
        self
    }

    pub fn key(&self) -> FieldKey<'_> {
        self.mapping.key()
    }

    pub fn field_name(&self) -> &str {
        self.mapping.field_name()
    }

    pub fn display_name(&self) -> &str {
        self.mapping.display_name()
    }

    pub fn data_type(&self) -> DataType {
        self.mapping.data_type
    }

    pub fn is_tagged(&self, axis: ChartAxis) -> bool {
        self.chart_axis == Some(axis)
    }

    pub fn is_numeric(&self) -> bool {
        self.mapping.data_type == DataType::Numeric
    }

    /// True when `name` is this field's original column or standard name.
    pub fn matches_name(&self, name: &str) -> bool {
        self.mapping.original_column == name
            || self.mapping.standard_field.as_deref() == Some(name)
    }
}

/// Explicit caller choices; these beat every default heuristic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoleOverrides {
    pub x_field: Option<String>,
    pub series_field: Option<String>,
    pub measure_fields: Vec<String>,
}

impl RoleOverrides {
    pub fn is_empty(&self) -> bool {
        self.x_field.is_none() && self.series_field.is_none() && self.measure_fields.is_empty()
    }
}
