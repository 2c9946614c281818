//! Chart-type inference rules.

use dash_model::ChartType;
use tracing::debug;

use crate::options::ChartOptions;
use crate::resolver::ResolvedRoles;

/// Chart-type rules, evaluated in [`ChartTypeRule::ORDER`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartTypeRule {
    /// No rows: a dataless bar chart.
    EmptyRows,
    /// Date X axis: line.
    DateAxis,
    /// Series present with enough rows: stacked bar.
    GroupedSeries,
    /// Few rows, one measure, no series: pie.
    SingleMeasurePie,
    /// Everything else: bar.
    DefaultBar,
}

impl ChartTypeRule {
    pub const ORDER: [ChartTypeRule; 5] = [
        ChartTypeRule::EmptyRows,
        ChartTypeRule::DateAxis,
        ChartTypeRule::GroupedSeries,
        ChartTypeRule::SingleMeasurePie,
        ChartTypeRule::DefaultBar,
    ];

    pub fn evaluate(
        self,
        roles: &ResolvedRoles<'_>,
        row_count: usize,
        options: &ChartOptions,
    ) -> Option<ChartType> {
        let fires = match self {
            ChartTypeRule::EmptyRows => row_count == 0,
            ChartTypeRule::DateAxis => roles.x_is_date(),
            ChartTypeRule::GroupedSeries => {
                roles.has_series() && row_count > options.stacked_min_rows
            }
            ChartTypeRule::SingleMeasurePie => {
                row_count <= options.pie_max_rows
                    && roles.measures.len() == 1
                    && !roles.has_series()
            }
            ChartTypeRule::DefaultBar => true,
        };
        fires.then_some(match self {
            ChartTypeRule::DateAxis => ChartType::Line,
            ChartTypeRule::SingleMeasurePie => ChartType::Pie,
            ChartTypeRule::EmptyRows
            | ChartTypeRule::GroupedSeries
            | ChartTypeRule::DefaultBar => ChartType::Bar,
        })
    }
}

/// Chart type for resolved roles; a pure function of roles and row count.
pub fn infer_chart_type(
    roles: &ResolvedRoles<'_>,
    row_count: usize,
    options: &ChartOptions,
) -> ChartType {
    for rule in ChartTypeRule::ORDER {
        if let Some(chart_type) = rule.evaluate(roles, row_count, options) {
            debug!(rule = ?rule, %chart_type, row_count, "inferred chart type");
            return chart_type;
        }
    }
    ChartType::Bar
}

#[cfg(test)]
mod tests {
    use dash_model::{ChartAxis, DataType, FieldMapping, FieldRole, FieldRoleAssignment};

    use super::*;

    fn field(data_type: DataType) -> FieldRoleAssignment {
        FieldRoleAssignment::new(FieldMapping::unmatched("f", 0, data_type), FieldRole::Dimension)
            .with_axis(ChartAxis::XAxis, 1)
    }

    fn infer(roles: &ResolvedRoles<'_>, rows: usize) -> ChartType {
        infer_chart_type(roles, rows, &ChartOptions::default())
    }

    #[test]
    fn date_axis_is_line() {
        let day = field(DataType::Date);
        let measure = field(DataType::Numeric);
        let roles = ResolvedRoles {
            x: Some(&day),
            series: None,
            measures: vec![&measure],
        };
        assert_eq!(infer(&roles, 3), ChartType::Line);
        assert_eq!(infer(&roles, 0), ChartType::Bar);
    }

    #[test]
    fn small_single_measure_is_pie() {
        let region = field(DataType::Categorical);
        let measure = field(DataType::Numeric);
        let roles = ResolvedRoles {
            x: Some(&region),
            series: None,
            measures: vec![&measure],
        };
        assert_eq!(infer(&roles, 6), ChartType::Pie);
        assert_eq!(infer(&roles, 7), ChartType::Bar);
    }

    #[test]
    fn series_is_bar_at_any_size() {
        let region = field(DataType::Categorical);
        let channel = field(DataType::Categorical);
        let measure = field(DataType::Numeric);
        let roles = ResolvedRoles {
            x: Some(&region),
            series: Some(&channel),
            measures: vec![&measure],
        };
        assert_eq!(infer(&roles, 3), ChartType::Bar);
        assert_eq!(infer(&roles, 50), ChartType::Bar);
        assert_eq!(
            ChartTypeRule::GroupedSeries.evaluate(&roles, 3, &ChartOptions::default()),
            None
        );
        assert_eq!(
            ChartTypeRule::GroupedSeries.evaluate(&roles, 6, &ChartOptions::default()),
            Some(ChartType::Bar)
        );
    }
}
