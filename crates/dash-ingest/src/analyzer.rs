//! Column feature analyzer.

use std::collections::BTreeSet;

use dash_model::{CellValue, DataFeature, DataType, Row};
use tracing::{debug, trace};

use crate::config::AnalyzerConfig;
use crate::dates::detect_date_pattern;
use crate::numeric::{NumericEvidence, detect_sub_type, name_tokens};

/// Column-name keywords marking an identifier.
const ID_KEYWORDS: &[&str] = &["id", "编号", "编码", "no", "code", "sn", "uuid", "key"];

/// Value statistics shared by every cascade rule.
#[derive(Debug, Clone)]
pub struct ColumnProfile<'a> {
    pub column_name: &'a str,
    pub total_count: usize,
    pub null_count: usize,
    /// Non-blank cells in input order.
    pub values: Vec<&'a CellValue>,
    /// Distinct display strings, first seen first.
    pub distinct: Vec<String>,
}

impl<'a> ColumnProfile<'a> {
    pub fn new(column_name: &'a str, cells: &'a [CellValue]) -> Self {
        let mut values = Vec::with_capacity(cells.len());
        let mut seen = BTreeSet::new();
        let mut distinct = Vec::new();
        for cell in cells {
            if cell.is_blank() {
                continue;
            }
            let display = cell.to_display_string();
            if seen.insert(display.clone()) {
                distinct.push(display);
            }
            values.push(cell);
        }
        Self {
            column_name,
            total_count: cells.len(),
            null_count: cells.len() - values.len(),
            values,
            distinct,
        }
    }

    pub fn non_null_count(&self) -> usize {
        self.values.len()
    }

    pub fn unique_ratio(&self) -> f64 {
        if self.values.is_empty() {
            0.0
        } else {
            self.distinct.len() as f64 / self.values.len() as f64
        }
    }

    fn has_id_name(&self) -> bool {
        let lowered = self.column_name.to_lowercase();
        let tokens = name_tokens(&lowered);
        ID_KEYWORDS.iter().any(|kw| {
            if kw.is_ascii() {
                tokens.iter().any(|t| t == kw)
            } else {
                lowered.contains(kw)
            }
        })
    }
}

/// Outcome of the first rule that fired.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub data_type: DataType,
    pub confidence: u8,
    pub date_format: Option<&'static str>,
}

impl Detection {
    fn of(data_type: DataType, confidence: u8) -> Self {
        Self {
            data_type,
            confidence,
            date_format: None,
        }
    }
}

/// Type-detection cascade. Rules run in [`TypeRule::CASCADE`] order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeRule {
    Date,
    Numeric,
    Id,
    Categorical,
    Text,
}

impl TypeRule {
    pub const CASCADE: [TypeRule; 5] = [
        TypeRule::Date,
        TypeRule::Numeric,
        TypeRule::Id,
        TypeRule::Categorical,
        TypeRule::Text,
    ];

    pub fn confidence(self) -> u8 {
        match self {
            TypeRule::Date => 95,
            TypeRule::Numeric => 90,
            TypeRule::Id => 85,
            TypeRule::Categorical => 80,
            TypeRule::Text => 70,
        }
    }

    /// Evaluate this rule alone. Only [`TypeRule::Text`] accepts an all-blank column.
    pub fn evaluate(self, profile: &ColumnProfile<'_>, config: &AnalyzerConfig) -> Option<Detection> {
        if self != TypeRule::Text && profile.values.is_empty() {
            return None;
        }
        match self {
            TypeRule::Date => detect_date_pattern(&profile.values, config.date_ratio).map(
                |(pattern, _)| Detection {
                    date_format: Some(pattern.name()),
                    ..Detection::of(DataType::Date, self.confidence())
                },
            ),
            TypeRule::Numeric => {
                let parsed = profile.values.iter().filter(|c| c.as_f64().is_some()).count();
                let ratio = parsed as f64 / profile.non_null_count() as f64;
                (ratio >= config.numeric_ratio)
                    .then(|| Detection::of(DataType::Numeric, self.confidence()))
            }
            TypeRule::Id => (profile.has_id_name()
                || profile.unique_ratio() > config.id_unique_ratio)
                .then(|| Detection::of(DataType::Id, self.confidence())),
            TypeRule::Categorical => (profile.unique_ratio() < config.categorical_ratio
                && profile.distinct.len() <= config.categorical_max_unique)
                .then(|| Detection::of(DataType::Categorical, self.confidence())),
            TypeRule::Text => Some(Detection::of(DataType::Text, self.confidence())),
        }
    }
}

/// Classifies columns with a fixed [`AnalyzerConfig`].
#[derive(Debug, Clone, Default)]
pub struct ColumnAnalyzer {
    config: AnalyzerConfig,
}

impl ColumnAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Classify one column from its sampled cells.
    pub fn analyze_column(
        &self,
        column_name: &str,
        column_index: usize,
        cells: &[CellValue],
    ) -> DataFeature {
        let profile = ColumnProfile::new(column_name, cells);
        let detection = TypeRule::CASCADE
            .iter()
            .find_map(|rule| rule.evaluate(&profile, &self.config))
            .unwrap_or_else(|| Detection::of(DataType::Text, TypeRule::Text.confidence()));

        let mut feature = DataFeature {
            column_name: column_name.to_string(),
            column_index,
            data_type: detection.data_type,
            sub_type: None,
            date_format: detection.date_format.map(str::to_string),
            min_value: None,
            max_value: None,
            sample_values: profile
                .distinct
                .iter()
                .take(self.config.max_sample_values)
                .cloned()
                .collect(),
            unique_values: Vec::new(),
            total_count: profile.total_count,
            unique_count: profile.distinct.len(),
            null_count: profile.null_count,
            confidence: detection.confidence,
        };

        match detection.data_type {
            DataType::Numeric => {
                let evidence = NumericEvidence {
                    column_name: column_name.to_string(),
                    raw: profile.values.iter().map(|c| c.to_display_string()).collect(),
                    parsed: profile.values.iter().filter_map(|c| c.as_f64()).collect(),
                };
                feature.sub_type = Some(detect_sub_type(&evidence, &self.config));
                feature.min_value = evidence.parsed.iter().copied().reduce(f64::min);
                feature.max_value = evidence.parsed.iter().copied().reduce(f64::max);
            }
            DataType::Categorical => {
                feature.unique_values = profile
                    .distinct
                    .iter()
                    .take(self.config.categorical_max_unique)
                    .cloned()
                    .collect();
            }
            _ => {}
        }

        debug!(
            column = column_name,
            data_type = %feature.data_type,
            sub_type = ?feature.sub_type,
            date_format = ?feature.date_format,
            confidence = feature.confidence,
            non_null = profile.non_null_count(),
            unique = feature.unique_count,
            "classified column"
        );
        feature
    }

    /// Classify every header over at most `sample_rows` rows.
    ///
    /// A header missing from a row counts as a blank cell.
    pub fn analyze_columns(&self, headers: &[String], rows: &[Row]) -> Vec<DataFeature> {
        let sampled = &rows[..rows.len().min(self.config.sample_rows)];
        trace!(
            columns = headers.len(),
            rows = sampled.len(),
            "analyzing sampled rows"
        );
        headers
            .iter()
            .enumerate()
            .map(|(idx, header)| {
                let cells: Vec<CellValue> = sampled
                    .iter()
                    .map(|row| row.get(header).cloned().unwrap_or_default())
                    .collect();
                self.analyze_column(header, idx, &cells)
            })
            .collect()
    }
}

/// Classify one column with the default thresholds.
pub fn analyze_column(column_name: &str, cells: &[CellValue]) -> DataFeature {
    ColumnAnalyzer::default().analyze_column(column_name, 0, cells)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(values: &[&str]) -> Vec<CellValue> {
        values.iter().map(|v| CellValue::text(*v)).collect()
    }

    #[test]
    fn blanks_are_counted_as_nulls() {
        let feature = analyze_column("city", &texts(&["A", "", "  ", "A"]));
        assert_eq!(feature.total_count, 4);
        assert_eq!(feature.null_count, 2);
        assert_eq!(feature.unique_count, 1);
        assert_eq!(feature.sample_values, vec!["A".to_string()]);
    }

    #[test]
    fn empty_input_is_text() {
        let feature = analyze_column("anything", &[]);
        assert_eq!(feature.data_type, DataType::Text);
        assert_eq!(feature.confidence, 70);
        assert_eq!(feature.total_count, 0);
        assert_eq!(feature.unique_count, 0);
        assert_eq!(feature.null_count, 0);
    }

    #[test]
    fn id_by_name() {
        let feature = analyze_column("Order No", &texts(&["A-1", "A-1", "B-2", "B-2"]));
        assert_eq!(feature.data_type, DataType::Id);
        assert_eq!(feature.confidence, 85);
    }

    #[test]
    fn id_by_uniqueness() {
        let values: Vec<CellValue> = (0..40).map(|i| CellValue::text(format!("K{i:03}x"))).collect();
        assert_eq!(analyze_column("ref", &values).data_type, DataType::Id);
    }

    #[test]
    fn numeric_carries_range_and_subtype() {
        let feature = analyze_column("Sales", &texts(&["1,000", "250.5", "-20"]));
        assert_eq!(feature.data_type, DataType::Numeric);
        assert_eq!(feature.confidence, 90);
        assert_eq!(feature.sub_type, Some(dash_model::NumericSubType::Amount));
        assert_eq!(feature.min_value, Some(-20.0));
        assert_eq!(feature.max_value, Some(1000.0));
    }

    #[test]
    fn rules_are_independent() {
        let cells = texts(&["2024-01-01", "2024-01-02"]);
        let profile = ColumnProfile::new("d", &cells);
        let config = AnalyzerConfig::default();
        assert!(TypeRule::Date.evaluate(&profile, &config).is_some());
        assert!(TypeRule::Numeric.evaluate(&profile, &config).is_none());
        assert!(TypeRule::Id.evaluate(&profile, &config).is_some());
    }

    #[test]
    fn samples_are_bounded() {
        let values: Vec<CellValue> = (0..30).map(|i| CellValue::text(format!("v{i}"))).collect();
        let feature = analyze_column("notes", &values);
        assert_eq!(feature.sample_values.len(), 10);
        assert_eq!(feature.sample_values[0], "v0");
    }
}
