//! Default role assignment for callers without a chart template.

use dash_model::{
    ChartAxis, DataFeature, DataType, FieldMapping, FieldRole, FieldRoleAssignment,
    NumericSubType,
};

use crate::options::ChartOptions;

const DATE_PRIORITY: u32 = 10;
const SECONDARY_DATE_PRIORITY: u32 = 50;
const CATEGORY_PRIORITY: u32 = 20;
const TEXT_PRIORITY: u32 = 80;

fn measure_priority(sub_type: Option<NumericSubType>) -> u32 {
    match sub_type.unwrap_or(NumericSubType::General) {
        NumericSubType::Amount => 10,
        NumericSubType::Quantity => 20,
        NumericSubType::Percentage => 30,
        NumericSubType::General => 40,
    }
}

/// Derive role assignments from mapped columns.
///
/// - the first `DATE` column is the time axis; later dates stay untagged
/// - the first `CATEGORICAL` column becomes the X axis when there is no
///   date, otherwise the first series-suitable one becomes the series
/// - `NUMERIC` columns are measures, amounts ranked first
/// - `ID` columns are excluded
pub fn assign_default_roles(
    mappings: &[FieldMapping],
    features: &[DataFeature],
    options: &ChartOptions,
) -> Vec<FieldRoleAssignment> {
    let has_date = mappings.iter().any(|m| m.data_type == DataType::Date);
    let mut date_taken = false;
    let mut category_taken = false;

    mappings
        .iter()
        .map(|mapping| {
            let unique = features
                .iter()
                .find(|f| f.column_index == mapping.column_index)
                .map(|f| f.unique_count);
            let series_suitable = unique.is_none_or(|n| n <= options.series_max_distinct);

            let assignment = match mapping.data_type {
                DataType::Date => {
                    let base = FieldRoleAssignment::new(mapping.clone(), FieldRole::Time);
                    if date_taken {
                        FieldRoleAssignment {
                            axis_priority: SECONDARY_DATE_PRIORITY,
                            ..base
                        }
                    } else {
                        date_taken = true;
                        base.with_axis(ChartAxis::XAxis, DATE_PRIORITY)
                    }
                }
                DataType::Numeric => FieldRoleAssignment::new(mapping.clone(), FieldRole::Metric)
                    .with_axis(ChartAxis::YAxis, measure_priority(mapping.sub_type)),
                DataType::Categorical => {
                    let base = FieldRoleAssignment::new(mapping.clone(), FieldRole::Dimension);
                    // Only the series slot needs a bounded distinct count.
                    if category_taken || (has_date && !series_suitable) {
                        base
                    } else {
                        category_taken = true;
                        let axis = if has_date {
                            ChartAxis::Series
                        } else {
                            ChartAxis::XAxis
                        };
                        base.with_axis(axis, CATEGORY_PRIORITY)
                    }
                }
                DataType::Text => FieldRoleAssignment {
                    axis_priority: TEXT_PRIORITY,
                    ..FieldRoleAssignment::new(mapping.clone(), FieldRole::Dimension)
                },
                DataType::Id => {
                    FieldRoleAssignment::new(mapping.clone(), FieldRole::Dimension).mark_excluded()
                }
            };

            FieldRoleAssignment {
                unique_value_count: unique,
                series_suitable,
                ..assignment
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(name: &str, index: usize, data_type: DataType) -> FieldMapping {
        FieldMapping::unmatched(name, index, data_type)
    }

    #[test]
    fn date_takes_x_and_category_becomes_series() {
        let mappings = vec![
            mapping("region", 0, DataType::Categorical),
            mapping("day", 1, DataType::Date),
            mapping("sales", 2, DataType::Numeric),
            mapping("order", 3, DataType::Id),
        ];
        let roles = assign_default_roles(&mappings, &[], &ChartOptions::default());

        assert_eq!(roles[0].chart_axis, Some(ChartAxis::Series));
        assert_eq!(roles[1].chart_axis, Some(ChartAxis::XAxis));
        assert_eq!(roles[1].role, FieldRole::Time);
        assert!(roles[1].is_date_type);
        assert_eq!(roles[2].chart_axis, Some(ChartAxis::YAxis));
        assert_eq!(roles[2].axis_priority, 40);
        assert!(roles[3].excluded);
    }

    #[test]
    fn without_date_first_category_is_x() {
        let mappings = vec![
            mapping("region", 0, DataType::Categorical),
            mapping("channel", 1, DataType::Categorical),
        ];
        let roles = assign_default_roles(&mappings, &[], &ChartOptions::default());
        assert_eq!(roles[0].chart_axis, Some(ChartAxis::XAxis));
        assert_eq!(roles[1].chart_axis, None);
        assert_eq!(roles[1].role, FieldRole::Dimension);
    }
}
