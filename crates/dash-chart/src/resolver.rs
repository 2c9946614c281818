//! Chart role resolver.
//!
//! Each role is chosen by an ordered rule list; the first rule that selects
//! something wins. Explicit [`RoleOverrides`] are always the first rule.
//! Excluded fields never take part.

use std::ptr;

use dash_model::{ChartAxis, FieldRole, FieldRoleAssignment, RoleOverrides};
use tracing::debug;

/// Fields picked for one chart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedRoles<'a> {
    pub x: Option<&'a FieldRoleAssignment>,
    pub series: Option<&'a FieldRoleAssignment>,
    /// Best first.
    pub measures: Vec<&'a FieldRoleAssignment>,
}

impl ResolvedRoles<'_> {
    pub fn x_is_date(&self) -> bool {
        self.x.is_some_and(|x| x.is_date_type)
    }

    pub fn has_series(&self) -> bool {
        self.series.is_some()
    }

    /// True when `field` is the chosen X or series field.
    fn is_used(&self, field: &FieldRoleAssignment) -> bool {
        self.x.is_some_and(|x| ptr::eq(x, field)) || self.series.is_some_and(|s| ptr::eq(s, field))
    }
}

fn find_by_name<'a>(
    fields: &[&'a FieldRoleAssignment],
    name: &str,
) -> Option<&'a FieldRoleAssignment> {
    fields.iter().copied().find(|f| f.matches_name(name))
}

// ============================================================================
// X axis
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XAxisRule {
    /// `RoleOverrides::x_field`.
    Override,
    /// Best-ranked date among X-tagged fields.
    TaggedDate,
    /// Best-ranked X-tagged field.
    TaggedPriority,
    /// First untagged dimension or time field in input order.
    DimensionFallback,
}

impl XAxisRule {
    pub const CASCADE: [XAxisRule; 4] = [
        XAxisRule::Override,
        XAxisRule::TaggedDate,
        XAxisRule::TaggedPriority,
        XAxisRule::DimensionFallback,
    ];

    pub fn select<'a>(
        self,
        fields: &[&'a FieldRoleAssignment],
        overrides: &RoleOverrides,
    ) -> Option<&'a FieldRoleAssignment> {
        let tagged = || fields.iter().copied().filter(|f| f.is_tagged(ChartAxis::XAxis));
        match self {
            XAxisRule::Override => overrides
                .x_field
                .as_deref()
                .and_then(|name| find_by_name(fields, name)),
            XAxisRule::TaggedDate => tagged()
                .filter(|f| f.is_date_type)
                .min_by_key(|f| f.axis_priority),
            XAxisRule::TaggedPriority => tagged().min_by_key(|f| f.axis_priority),
            XAxisRule::DimensionFallback => fields.iter().copied().find(|f| {
                f.chart_axis.is_none() && matches!(f.role, FieldRole::Dimension | FieldRole::Time)
            }),
        }
    }
}

// ============================================================================
// Series
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesRule {
    /// `RoleOverrides::series_field`, regardless of suitability.
    Override,
    /// Best-ranked series-suitable field tagged as series.
    Tagged,
}

impl SeriesRule {
    pub const CASCADE: [SeriesRule; 2] = [SeriesRule::Override, SeriesRule::Tagged];

    pub fn select<'a>(
        self,
        fields: &[&'a FieldRoleAssignment],
        overrides: &RoleOverrides,
        x: Option<&FieldRoleAssignment>,
    ) -> Option<&'a FieldRoleAssignment> {
        let not_x = |f: &FieldRoleAssignment| x.is_none_or(|x| !ptr::eq(x, f));
        match self {
            SeriesRule::Override => overrides
                .series_field
                .as_deref()
                .and_then(|name| find_by_name(fields, name))
                .filter(|f| not_x(*f)),
            SeriesRule::Tagged => fields
                .iter()
                .copied()
                .filter(|f| f.is_tagged(ChartAxis::Series) && f.series_suitable && not_x(*f))
                .min_by_key(|f| f.axis_priority),
        }
    }
}

// ============================================================================
// Measures
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureRule {
    /// `RoleOverrides::measure_fields`, in the given order.
    Override,
    /// Every Y-tagged or metric field by ascending priority.
    Tagged,
    /// First metric or numeric field.
    NumericFallback,
}

impl MeasureRule {
    pub const CASCADE: [MeasureRule; 3] = [
        MeasureRule::Override,
        MeasureRule::Tagged,
        MeasureRule::NumericFallback,
    ];

    /// Selected measures; empty means the rule did not apply.
    pub fn select<'a>(
        self,
        fields: &[&'a FieldRoleAssignment],
        overrides: &RoleOverrides,
        roles: &ResolvedRoles<'a>,
    ) -> Vec<&'a FieldRoleAssignment> {
        let free = || fields.iter().copied().filter(|f| !roles.is_used(f));
        match self {
            MeasureRule::Override => overrides
                .measure_fields
                .iter()
                .filter_map(|name| find_by_name(fields, name))
                .filter(|f| !roles.is_used(f))
                .collect(),
            MeasureRule::Tagged => {
                let mut measures: Vec<_> = free()
                    .filter(|f| f.is_tagged(ChartAxis::YAxis) || f.role == FieldRole::Metric)
                    .collect();
                measures.sort_by_key(|f| f.axis_priority);
                measures
            }
            MeasureRule::NumericFallback => free()
                .find(|f| f.role == FieldRole::Metric || f.is_numeric())
                .into_iter()
                .collect(),
        }
    }
}

/// Pick X, series and measures from the candidate assignments.
///
/// Explicit overrides are claimed before any heuristic runs, so a field an
/// override names is never taken by another role's heuristic. When two
/// overrides name the same field, X wins over series and series over
/// measures. Having no X field, no series or no measures are all valid
/// outcomes.
pub fn resolve_roles<'a>(
    field_roles: &'a [FieldRoleAssignment],
    overrides: &RoleOverrides,
) -> ResolvedRoles<'a> {
    let fields: Vec<&FieldRoleAssignment> = field_roles.iter().filter(|f| !f.excluded).collect();

    let mut claimed = ResolvedRoles {
        x: XAxisRule::Override.select(&fields, overrides),
        ..ResolvedRoles::default()
    };
    claimed.series = SeriesRule::Override.select(&fields, overrides, claimed.x);
    claimed.measures = MeasureRule::Override.select(&fields, overrides, &claimed);

    let mut roles = ResolvedRoles::default();

    let x_pool = unclaimed(&fields, claimed.series, &claimed.measures);
    if let Some((rule, field)) = XAxisRule::CASCADE
        .iter()
        .find_map(|rule| rule.select(&x_pool, overrides).map(|f| (rule, f)))
    {
        debug!(rule = ?rule, field = field.field_name(), "resolved x axis");
        roles.x = Some(field);
    }

    let series_pool = unclaimed(&fields, None, &claimed.measures);
    if let Some((rule, field)) = SeriesRule::CASCADE
        .iter()
        .find_map(|rule| rule.select(&series_pool, overrides, roles.x).map(|f| (rule, f)))
    {
        debug!(rule = ?rule, field = field.field_name(), "resolved series");
        roles.series = Some(field);
    }

    for rule in MeasureRule::CASCADE {
        let measures = rule.select(&fields, overrides, &roles);
        if !measures.is_empty() {
            debug!(rule = ?rule, count = measures.len(), "resolved measures");
            roles.measures = measures;
            break;
        }
    }

    roles
}

/// `fields` without the ones an override already gave to another role.
fn unclaimed<'a>(
    fields: &[&'a FieldRoleAssignment],
    series: Option<&FieldRoleAssignment>,
    measures: &[&FieldRoleAssignment],
) -> Vec<&'a FieldRoleAssignment> {
    fields
        .iter()
        .copied()
        .filter(|f| {
            series.is_none_or(|s| !ptr::eq(s, *f)) && !measures.iter().any(|m| ptr::eq(*m, *f))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use dash_model::{DataType, FieldMapping};

    use super::*;
    use crate::assign::assign_default_roles;
    use crate::options::ChartOptions;

    fn field(name: &str, data_type: DataType, role: FieldRole) -> FieldRoleAssignment {
        FieldRoleAssignment::new(FieldMapping::unmatched(name, 0, data_type), role)
    }

    #[test]
    fn date_beats_better_ranked_category() {
        let fields = vec![
            field("region", DataType::Categorical, FieldRole::Dimension)
                .with_axis(ChartAxis::XAxis, 1),
            field("day", DataType::Date, FieldRole::Time).with_axis(ChartAxis::XAxis, 50),
        ];
        let roles = resolve_roles(&fields, &RoleOverrides::default());
        assert_eq!(roles.x.map(|f| f.field_name()), Some("day"));
        assert!(roles.x_is_date());
    }

    #[test]
    fn fallback_skips_tagged_fields() {
        let fields = vec![
            field("region", DataType::Categorical, FieldRole::Dimension)
                .with_axis(ChartAxis::Series, 1),
            field("note", DataType::Text, FieldRole::Dimension),
        ];
        let roles = resolve_roles(&fields, &RoleOverrides::default());
        assert_eq!(roles.x.map(|f| f.field_name()), Some("note"));
        assert_eq!(roles.series.map(|f| f.field_name()), Some("region"));
    }

    #[test]
    fn unsuitable_series_is_skipped() {
        let mut wide = field("customer", DataType::Categorical, FieldRole::Dimension)
            .with_axis(ChartAxis::Series, 1);
        wide.series_suitable = false;
        let fields = [wide];
        let roles = resolve_roles(&fields, &RoleOverrides::default());
        assert!(roles.series.is_none());
        assert!(roles.x.is_none());
    }

    #[test]
    fn measures_sorted_by_priority_then_input_order() {
        let fields = vec![
            field("b", DataType::Numeric, FieldRole::Metric).with_axis(ChartAxis::YAxis, 20),
            field("a", DataType::Numeric, FieldRole::Metric).with_axis(ChartAxis::YAxis, 10),
            field("c", DataType::Numeric, FieldRole::Metric),
            field("d", DataType::Numeric, FieldRole::Metric).with_axis(ChartAxis::YAxis, 20),
        ];
        let roles = resolve_roles(&fields, &RoleOverrides::default());
        let names: Vec<_> = roles.measures.iter().map(|f| f.field_name()).collect();
        assert_eq!(names, ["a", "b", "d", "c"]);
    }

    #[test]
    fn numeric_dimension_is_a_fallback_measure() {
        let fields = vec![field("score", DataType::Numeric, FieldRole::Dimension)];
        let roles = resolve_roles(&fields, &RoleOverrides::default());
        // An untagged dimension is the X fallback first, so nothing remains.
        assert_eq!(roles.x.map(|f| f.field_name()), Some("score"));
        assert!(roles.measures.is_empty());

        let mut fields = vec![
            field("score", DataType::Numeric, FieldRole::Dimension)
                .with_axis(ChartAxis::Series, 1),
        ];
        fields[0].series_suitable = false;
        let roles = resolve_roles(&fields, &RoleOverrides::default());
        assert_eq!(roles.measures.len(), 1);
    }

    #[test]
    fn excluded_fields_never_resolve() {
        let fields = vec![
            field("id", DataType::Id, FieldRole::Dimension)
                .with_axis(ChartAxis::XAxis, 1)
                .mark_excluded(),
        ];
        let roles = resolve_roles(&fields, &RoleOverrides::default());
        assert_eq!(roles, ResolvedRoles::default());
    }

    #[test]
    fn overrides_beat_heuristics() {
        let fields = vec![
            field("day", DataType::Date, FieldRole::Time).with_axis(ChartAxis::XAxis, 1),
            field("region", DataType::Categorical, FieldRole::Dimension),
            field("channel", DataType::Categorical, FieldRole::Dimension)
                .with_axis(ChartAxis::Series, 1),
            field("sales", DataType::Numeric, FieldRole::Metric).with_axis(ChartAxis::YAxis, 1),
            field("cost", DataType::Numeric, FieldRole::Metric).with_axis(ChartAxis::YAxis, 2),
        ];
        let overrides = RoleOverrides {
            x_field: Some("region".to_string()),
            series_field: Some("day".to_string()),
            measure_fields: vec!["cost".to_string()],
        };
        let roles = resolve_roles(&fields, &overrides);
        assert_eq!(roles.x.map(|f| f.field_name()), Some("region"));
        assert_eq!(roles.series.map(|f| f.field_name()), Some("day"));
        let names: Vec<_> = roles.measures.iter().map(|f| f.field_name()).collect();
        assert_eq!(names, ["cost"]);
    }

    // ========================================================================
    // Overrides against default assignments
    // ========================================================================

    fn defaults(columns: &[(&str, DataType)]) -> Vec<FieldRoleAssignment> {
        let mappings: Vec<FieldMapping> = columns
            .iter()
            .enumerate()
            .map(|(idx, (name, data_type))| FieldMapping::unmatched(*name, idx, *data_type))
            .collect();
        assign_default_roles(&mappings, &[], &ChartOptions::default())
    }

    #[test]
    fn series_override_takes_the_default_x_field() {
        let fields = defaults(&[("Region", DataType::Categorical), ("Revenue", DataType::Numeric)]);
        assert_eq!(fields[0].chart_axis, Some(ChartAxis::XAxis));

        let overrides = RoleOverrides {
            series_field: Some("Region".to_string()),
            ..RoleOverrides::default()
        };
        let roles = resolve_roles(&fields, &overrides);
        assert_eq!(roles.series.map(|f| f.field_name()), Some("Region"));
        assert!(roles.x.is_none());
        let names: Vec<_> = roles.measures.iter().map(|f| f.field_name()).collect();
        assert_eq!(names, ["Revenue"]);
    }

    #[test]
    fn measure_override_takes_the_default_x_field() {
        let fields = vec![
            field("year", DataType::Numeric, FieldRole::Dimension).with_axis(ChartAxis::XAxis, 10),
            field("region", DataType::Categorical, FieldRole::Dimension),
            field("sales", DataType::Numeric, FieldRole::Metric).with_axis(ChartAxis::YAxis, 10),
        ];
        let overrides = RoleOverrides {
            measure_fields: vec!["year".to_string()],
            ..RoleOverrides::default()
        };
        let roles = resolve_roles(&fields, &overrides);
        let names: Vec<_> = roles.measures.iter().map(|f| f.field_name()).collect();
        assert_eq!(names, ["year"]);
        assert_eq!(roles.x.map(|f| f.field_name()), Some("region"));
    }

    #[test]
    fn conflicting_overrides_prefer_x() {
        let fields = defaults(&[("Region", DataType::Categorical), ("Revenue", DataType::Numeric)]);
        let overrides = RoleOverrides {
            x_field: Some("Region".to_string()),
            series_field: Some("Region".to_string()),
            measure_fields: Vec::new(),
        };
        let roles = resolve_roles(&fields, &overrides);
        assert_eq!(roles.x.map(|f| f.field_name()), Some("Region"));
        assert!(roles.series.is_none());
    }
}
