//! Renderable chart specification.
//!
//! Field names and nesting follow the renderer's option tree:
//! `chartType`, `xAxis{type,name,data}`, `yAxis[]{type,name,position}`,
//! `legend{show,data,position,orient}`, `series[]{name,type,data,stack,smooth}`,
//! `tooltip{trigger,axisPointer}` and the `alternative*` lists.

use serde::{Deserialize, Serialize};

use crate::enums::{ChartAxis, ChartType, DataType};
use crate::mapping::FieldMapping;
use crate::value::Row;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisType {
    #[default]
    Category,
    Time,
    Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisPosition {
    #[default]
    Left,
    Right,
}

/// Label hints for crowded x axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisLabel {
    pub rotate: u16,
    pub interval: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct XAxisSpec {
    #[serde(rename = "type")]
    pub axis_type: AxisType,
    pub name: String,
    pub data: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub axis_label: Option<AxisLabel>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct YAxisSpec {
    #[serde(rename = "type")]
    pub axis_type: AxisType,
    pub name: String,
    pub position: AxisPosition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    #[default]
    Top,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendOrient {
    #[default]
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LegendSpec {
    pub show: bool,
    pub data: Vec<String>,
    pub position: LegendPosition,
    pub orient: LegendOrient,
}

impl LegendSpec {
    pub fn hidden() -> Self {
        Self::default()
    }

    pub fn showing(data: Vec<String>) -> Self {
        Self {
            show: true,
            data,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesType {
    Line,
    #[default]
    Bar,
    Pie,
}

impl From<ChartType> for SeriesType {
    fn from(chart_type: ChartType) -> Self {
        match chart_type {
            ChartType::Line => SeriesType::Line,
            ChartType::Bar => SeriesType::Bar,
            ChartType::Pie => SeriesType::Pie,
        }
    }
}

/// One point of a series: a bare value, or a named value for pie slices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeriesDatum {
    Named { name: String, value: f64 },
    Value(f64),
}

impl SeriesDatum {
    pub fn value(&self) -> f64 {
        match self {
            SeriesDatum::Named { value, .. } | SeriesDatum::Value(value) => *value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub series_type: SeriesType,
    pub data: Vec<SeriesDatum>,
    pub stack: Option<String>,
    pub smooth: bool,
    pub y_axis_index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TooltipTrigger {
    #[default]
    Axis,
    Item,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisPointer {
    #[serde(rename = "type")]
    pub pointer_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TooltipSpec {
    pub trigger: TooltipTrigger,
    pub axis_pointer: Option<AxisPointer>,
}

/// A field offered to the user as a switchable choice for one chart role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlternativeDimension {
    pub field_name: String,
    pub display_name: String,
    pub target_role: ChartAxis,
    pub data_type: DataType,
    pub time_flag: bool,
    pub selected: bool,
    pub priority: u32,
    pub distinct_count: Option<usize>,
}

/// Complete chart specification for an external renderer.
///
/// A pure projection of field roles and rows; owns no shared state.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicChartConfig {
    pub chart_type: ChartType,
    pub title: String,
    pub x_axis: XAxisSpec,
    /// At most two: index 0 on the left, index 1 on the right.
    pub y_axis: Vec<YAxisSpec>,
    pub legend: LegendSpec,
    pub series: Vec<SeriesSpec>,
    pub tooltip: TooltipSpec,
    pub alternative_x_fields: Vec<AlternativeDimension>,
    pub alternative_series_fields: Vec<AlternativeDimension>,
    pub alternative_measure_fields: Vec<AlternativeDimension>,
    pub data: Vec<Row>,
    pub field_mappings: Vec<FieldMapping>,
    pub row_count: usize,
}

impl DynamicChartConfig {
    /// Minimal config returned when there is nothing to chart.
    pub fn empty() -> Self {
        Self::default()
    }
}
