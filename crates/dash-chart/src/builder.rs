//! Dynamic chart configuration builder.

use std::collections::{BTreeMap, BTreeSet};

use dash_model::{
    AlternativeDimension, AxisLabel, AxisPointer, AxisPosition, AxisType, ChartAxis, ChartType,
    DynamicChartConfig, FieldKey, FieldRoleAssignment, LegendSpec, RoleOverrides, Row,
    SeriesDatum, SeriesSpec, SeriesType, TooltipSpec, TooltipTrigger, XAxisSpec, YAxisSpec,
};
use serde_json::Value;
use tracing::{debug, info};

use crate::chart_type::infer_chart_type;
use crate::options::ChartOptions;
use crate::resolver::{ResolvedRoles, resolve_roles};
use crate::rows::extract_rows;

/// Stack id shared by every bar of a grouped chart.
const STACK_ID: &str = "total";

/// Builds [`DynamicChartConfig`]s. Holds options only; every call is independent.
#[derive(Debug, Clone, Default)]
pub struct ChartBuilder {
    options: ChartOptions,
}

impl ChartBuilder {
    pub fn new(options: ChartOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ChartOptions {
        &self.options
    }

    pub fn build(&self, field_roles: &[FieldRoleAssignment], rows: &[Row]) -> DynamicChartConfig {
        self.build_with_overrides(field_roles, rows, &RoleOverrides::default())
    }

    /// Build from rows held in any accepted JSON container shape.
    pub fn build_from_json(
        &self,
        field_roles: &[FieldRoleAssignment],
        data: &Value,
        overrides: &RoleOverrides,
    ) -> DynamicChartConfig {
        let rows = extract_rows(data);
        self.build_with_overrides(field_roles, &rows, overrides)
    }

    /// Build a config. Fields missing from the rows read as blank or zero.
    pub fn build_with_overrides(
        &self,
        field_roles: &[FieldRoleAssignment],
        rows: &[Row],
        overrides: &RoleOverrides,
    ) -> DynamicChartConfig {
        if field_roles.is_empty() {
            debug!("no field roles, returning empty chart config");
            return DynamicChartConfig::empty();
        }

        let roles = resolve_roles(field_roles, overrides);
        let chart_type = infer_chart_type(&roles, rows.len(), &self.options);
        let categories = x_categories(&roles, rows);

        let (series, series_values) = match (chart_type, roles.series, roles.measures.first()) {
            (_, _, None) => (Vec::new(), Vec::new()),
            (ChartType::Pie, _, Some(measure)) => (vec![pie_series(&roles, measure, rows)], Vec::new()),
            (_, Some(series_field), Some(measure)) => {
                grouped_series(chart_type, &roles, series_field, measure, rows, &categories)
            }
            _ => (measure_series(chart_type, &roles, rows), Vec::new()),
        };

        let legend = if roles.has_series() {
            LegendSpec::showing(series_values)
        } else if roles.measures.len() > 1 {
            LegendSpec::showing(
                roles
                    .measures
                    .iter()
                    .map(|m| m.display_name().to_string())
                    .collect(),
            )
        } else {
            LegendSpec::hidden()
        };

        let (alternative_x_fields, alternative_series_fields, alternative_measure_fields) =
            self.alternatives(field_roles, &roles, rows);

        let config = DynamicChartConfig {
            chart_type,
            title: chart_title(&roles),
            x_axis: self.x_axis(&roles, categories),
            y_axis: y_axes(chart_type, &roles),
            legend,
            series,
            tooltip: tooltip(chart_type),
            alternative_x_fields,
            alternative_series_fields,
            alternative_measure_fields,
            data: rows.to_vec(),
            field_mappings: field_roles.iter().map(|f| f.mapping.clone()).collect(),
            row_count: rows.len(),
        };

        info!(
            chart_type = %config.chart_type,
            rows = config.row_count,
            categories = config.x_axis.data.len(),
            series = config.series.len(),
            x = roles.x.map(|f| f.field_name()),
            "built chart config"
        );
        config
    }

    fn x_axis(&self, roles: &ResolvedRoles<'_>, categories: Vec<String>) -> XAxisSpec {
        let axis_type = if roles.x_is_date() {
            AxisType::Time
        } else {
            AxisType::Category
        };
        // Time axes hold one label per category too, so both rotate.
        let axis_label = (categories.len() > self.options.label_rotate_threshold)
            .then_some(AxisLabel {
                rotate: self.options.label_rotate_degrees,
                interval: 0,
            });
        XAxisSpec {
            axis_type,
            name: roles
                .x
                .map(|x| x.display_name().to_string())
                .unwrap_or_default(),
            data: categories,
            axis_label,
        }
    }

    /// Every non-excluded field, once per list. Series candidates must have a
    /// bounded or unknown distinct count.
    fn alternatives(
        &self,
        field_roles: &[FieldRoleAssignment],
        roles: &ResolvedRoles<'_>,
        rows: &[Row],
    ) -> (
        Vec<AlternativeDimension>,
        Vec<AlternativeDimension>,
        Vec<AlternativeDimension>,
    ) {
        let is = |chosen: Option<&FieldRoleAssignment>, field: &FieldRoleAssignment| {
            chosen.is_some_and(|c| std::ptr::eq(c, field))
        };
        let mut x_fields = Vec::new();
        let mut series_fields = Vec::new();
        let mut measure_fields = Vec::new();

        for field in field_roles.iter().filter(|f| !f.excluded) {
            let distinct_count = if rows.is_empty() {
                field.unique_value_count
            } else {
                Some(distinct_values(field.key(), rows).len())
            };
            let option = |target_role: ChartAxis, selected: bool| AlternativeDimension {
                field_name: field.field_name().to_string(),
                display_name: field.display_name().to_string(),
                target_role,
                data_type: field.data_type(),
                time_flag: field.is_date_type,
                selected,
                priority: field.axis_priority,
                distinct_count,
            };

            x_fields.push(option(ChartAxis::XAxis, is(roles.x, field)));
            if distinct_count.is_none_or(|n| n <= self.options.series_max_distinct) {
                series_fields.push(option(ChartAxis::Series, is(roles.series, field)));
            }
            let measured = roles.measures.iter().any(|m| std::ptr::eq(*m, field));
            measure_fields.push(option(ChartAxis::YAxis, measured));
        }

        (x_fields, series_fields, measure_fields)
    }
}

/// Distinct non-blank display values in first-seen order.
fn distinct_values(key: FieldKey<'_>, rows: &[Row]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    rows.iter()
        .map(|row| key.display(row))
        .filter(|value| !value.is_empty() && seen.insert(value.clone()))
        .collect()
}

/// X-axis categories.
///
/// Without an X field, a grouped chart collapses onto one category named
/// after the first measure and anything else is indexed by row ordinal.
fn x_categories(roles: &ResolvedRoles<'_>, rows: &[Row]) -> Vec<String> {
    match (roles.x, roles.series) {
        (Some(x), _) => distinct_values(x.key(), rows),
        _ if rows.is_empty() => Vec::new(),
        (None, Some(_)) => vec![
            roles
                .measures
                .first()
                .map_or_else(|| "Total".to_string(), |m| m.display_name().to_string()),
        ],
        (None, None) => (1..=rows.len()).map(|n| n.to_string()).collect(),
    }
}

fn pie_series(roles: &ResolvedRoles<'_>, measure: &FieldRoleAssignment, rows: &[Row]) -> SeriesSpec {
    let data = rows
        .iter()
        .enumerate()
        .map(|(idx, row)| SeriesDatum::Named {
            name: roles
                .x
                .map_or_else(|| (idx + 1).to_string(), |x| x.key().display(row)),
            value: measure.key().number_or_zero(row),
        })
        .collect();
    SeriesSpec {
        name: measure.display_name().to_string(),
        series_type: SeriesType::Pie,
        data,
        stack: None,
        smooth: false,
        y_axis_index: 0,
    }
}

/// One series per distinct series value over the full category grid.
///
/// Duplicate (series, category) rows are summed; absent pairs stay zero.
fn grouped_series(
    chart_type: ChartType,
    roles: &ResolvedRoles<'_>,
    series_field: &FieldRoleAssignment,
    measure: &FieldRoleAssignment,
    rows: &[Row],
    categories: &[String],
) -> (Vec<SeriesSpec>, Vec<String>) {
    let series_key = series_field.key();
    let series_values = distinct_values(series_key, rows);
    let series_index: BTreeMap<&str, usize> = series_values
        .iter()
        .enumerate()
        .map(|(idx, value)| (value.as_str(), idx))
        .collect();
    let category_index: BTreeMap<&str, usize> = categories
        .iter()
        .enumerate()
        .map(|(idx, value)| (value.as_str(), idx))
        .collect();

    let mut grid = vec![vec![0.0_f64; categories.len()]; series_values.len()];
    for row in rows {
        let Some(&s) = series_index.get(series_key.display(row).as_str()) else {
            continue;
        };
        let c = match roles.x {
            Some(x) => match category_index.get(x.key().display(row).as_str()) {
                Some(&c) => c,
                None => continue,
            },
            None => 0,
        };
        if let Some(cell) = grid[s].get_mut(c) {
            *cell += measure.key().number_or_zero(row);
        }
    }

    let series_type = SeriesType::from(chart_type);
    let stack = (series_type == SeriesType::Bar).then(|| STACK_ID.to_string());
    let series = series_values
        .iter()
        .zip(grid)
        .map(|(name, values)| SeriesSpec {
            name: name.clone(),
            series_type,
            data: values.into_iter().map(SeriesDatum::Value).collect(),
            stack: stack.clone(),
            smooth: series_type == SeriesType::Line,
            y_axis_index: 0,
        })
        .collect();
    (series, series_values)
}

/// One series per measure, values in row order. The second and later
/// measures share the right-hand axis.
fn measure_series(
    chart_type: ChartType,
    roles: &ResolvedRoles<'_>,
    rows: &[Row],
) -> Vec<SeriesSpec> {
    let series_type = SeriesType::from(chart_type);
    roles
        .measures
        .iter()
        .enumerate()
        .map(|(idx, measure)| SeriesSpec {
            name: measure.display_name().to_string(),
            series_type,
            data: rows
                .iter()
                .map(|row| SeriesDatum::Value(measure.key().number_or_zero(row)))
                .collect(),
            stack: None,
            smooth: series_type == SeriesType::Line,
            y_axis_index: idx.min(1),
        })
        .collect()
}

fn y_axes(chart_type: ChartType, roles: &ResolvedRoles<'_>) -> Vec<YAxisSpec> {
    if chart_type == ChartType::Pie {
        return Vec::new();
    }
    let axis = |name: String, position: AxisPosition| YAxisSpec {
        axis_type: AxisType::Value,
        name,
        position,
    };
    match roles.measures.as_slice() {
        [first, rest @ ..] if !rest.is_empty() && !roles.has_series() => vec![
            axis(first.display_name().to_string(), AxisPosition::Left),
            axis(
                rest.iter()
                    .map(|m| m.display_name())
                    .collect::<Vec<_>>()
                    .join(" / "),
                AxisPosition::Right,
            ),
        ],
        [first, ..] => vec![axis(first.display_name().to_string(), AxisPosition::Left)],
        [] => vec![axis(String::new(), AxisPosition::Left)],
    }
}

fn tooltip(chart_type: ChartType) -> TooltipSpec {
    let pointer = |kind: &str| {
        Some(AxisPointer {
            pointer_type: kind.to_string(),
        })
    };
    match chart_type {
        ChartType::Pie => TooltipSpec {
            trigger: TooltipTrigger::Item,
            axis_pointer: None,
        },
        ChartType::Line => TooltipSpec {
            trigger: TooltipTrigger::Axis,
            axis_pointer: pointer("line"),
        },
        ChartType::Bar => TooltipSpec {
            trigger: TooltipTrigger::Axis,
            axis_pointer: pointer("shadow"),
        },
    }
}

/// `"<measures> by <x> and <series>"`, dropping the parts that did not resolve.
fn chart_title(roles: &ResolvedRoles<'_>) -> String {
    let measures = roles
        .measures
        .iter()
        .map(|m| m.display_name())
        .collect::<Vec<_>>()
        .join(", ");
    let groups = [roles.x, roles.series]
        .into_iter()
        .flatten()
        .map(|f| f.display_name())
        .collect::<Vec<_>>()
        .join(" and ");
    match (measures.is_empty(), groups.is_empty()) {
        (_, true) => measures,
        (true, false) => groups,
        (false, false) => format!("{measures} by {groups}"),
    }
}

/// Build with default options and no overrides.
pub fn build_config(field_roles: &[FieldRoleAssignment], rows: &[Row]) -> DynamicChartConfig {
    ChartBuilder::default().build(field_roles, rows)
}

/// Build from rows held in any accepted JSON container shape.
pub fn build_config_from_json(field_roles: &[FieldRoleAssignment], data: &Value) -> DynamicChartConfig {
    ChartBuilder::default().build_from_json(field_roles, data, &RoleOverrides::default())
}
