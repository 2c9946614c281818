//! Ingestion pass and chart building entry points.

use std::time::Instant;

use dash_chart::{ChartBuilder, assign_default_roles};
use dash_ingest::ColumnAnalyzer;
use dash_map::{FieldMapper, check_required};
use dash_model::{
    CellValue, DynamicChartConfig, FieldRoleAssignment, IngestStatus, IngestionResult,
    RoleOverrides, Row,
};
use dash_standards::{StandardDictionary, SynonymDictionary};
use serde_json::Value;
use tracing::{info, trace, warn};

use crate::error::Result;
use crate::logging::redact_value;
use crate::settings::Settings;

/// Analyze, map and gap-check one upload.
///
/// Only the first `settings.analyzer.sample_rows` rows are analyzed;
/// `row_count` still reports every row. Never fails: an upload without
/// headers comes back with [`IngestStatus::Error`] and a message.
pub fn ingest<D: StandardDictionary + ?Sized>(
    dictionary: &D,
    headers: &[String],
    rows: &[Row],
    settings: &Settings,
) -> IngestionResult {
    let started = Instant::now();
    let preview_rows: Vec<Row> = rows.iter().take(settings.ingest.preview_rows).cloned().collect();

    if headers.is_empty() {
        warn!(rows = rows.len(), "upload has no header row");
        return IngestionResult {
            headers: Vec::new(),
            row_count: rows.len(),
            column_count: 0,
            features: Vec::new(),
            mappings: Vec::new(),
            missing_required: Vec::new(),
            status: IngestStatus::Error,
            message: Some("no header row found".to_string()),
            preview_rows,
            elapsed_ms: elapsed_ms(started),
        };
    }

    if let Some(first) = rows.first() {
        for header in headers {
            let value = first
                .get(header)
                .map(CellValue::to_display_string)
                .unwrap_or_default();
            trace!(column = %header, value = redact_value(&value), "first row");
        }
    }

    let features = ColumnAnalyzer::new(settings.analyzer).analyze_columns(headers, rows);
    let mappings = FieldMapper::with_config(dictionary, settings.mapper).map_fields(headers, &features);
    let check = check_required(dictionary, &mappings);

    let result = IngestionResult {
        headers: headers.to_vec(),
        row_count: rows.len(),
        column_count: headers.len(),
        features,
        mappings,
        missing_required: check.missing,
        status: check.status,
        message: None,
        preview_rows,
        elapsed_ms: elapsed_ms(started),
    };

    info!(
        columns = result.column_count,
        rows = result.row_count,
        status = %result.status,
        missing = result.missing_required.len(),
        pending = result.pending_confirmation().count(),
        elapsed_ms = result.elapsed_ms,
        "ingestion pass complete"
    );
    result
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

/// A configured pipeline owning its vocabulary.
///
/// Holds no per-upload state; calls are independent of each other.
#[derive(Debug, Clone)]
pub struct Dashboard {
    dictionary: SynonymDictionary,
    settings: Settings,
}

impl Dashboard {
    pub fn new(dictionary: SynonymDictionary, settings: Settings) -> Self {
        Self {
            dictionary,
            settings,
        }
    }

    /// Load the vocabulary named by `settings`.
    pub fn from_settings(settings: Settings) -> Result<Self> {
        let dictionary = settings.load_dictionary()?;
        info!(
            source = %dictionary.source().describe(),
            fields = dictionary.len(),
            "loaded vocabulary"
        );
        Ok(Self::new(dictionary, settings))
    }

    pub fn dictionary(&self) -> &SynonymDictionary {
        &self.dictionary
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Re-read the vocabulary from its source. On failure the loaded one stays.
    pub fn reload_dictionary(&mut self) -> Result<()> {
        Ok(self.dictionary.reload()?)
    }

    pub fn ingest(&self, headers: &[String], rows: &[Row]) -> IngestionResult {
        ingest(&self.dictionary, headers, rows, &self.settings)
    }

    /// Role assignments derived from an ingestion result.
    pub fn default_roles(&self, result: &IngestionResult) -> Vec<FieldRoleAssignment> {
        assign_default_roles(&result.mappings, &result.features, &self.settings.chart)
    }

    pub fn build_chart(
        &self,
        field_roles: &[FieldRoleAssignment],
        rows: &[Row],
        overrides: &RoleOverrides,
    ) -> DynamicChartConfig {
        self.chart_builder()
            .build_with_overrides(field_roles, rows, overrides)
    }

    /// Build from rows held in any accepted JSON container shape.
    pub fn build_chart_from_json(
        &self,
        field_roles: &[FieldRoleAssignment],
        data: &Value,
        overrides: &RoleOverrides,
    ) -> DynamicChartConfig {
        self.chart_builder().build_from_json(field_roles, data, overrides)
    }

    fn chart_builder(&self) -> ChartBuilder {
        ChartBuilder::new(self.settings.chart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dashboard() -> Dashboard {
        let dictionary = SynonymDictionary::embedded().unwrap();
        Dashboard::new(dictionary, Settings::default())
    }

    #[test]
    fn no_headers_is_an_error_result() {
        let rows = vec![Row::new().with("a", 1.0)];
        let result = dashboard().ingest(&[], &rows);
        assert_eq!(result.status, IngestStatus::Error);
        assert!(result.message.is_some());
        assert_eq!(result.row_count, 1);
        assert_eq!(result.preview_rows.len(), 1);
    }

    #[test]
    fn no_rows_still_maps_headers() {
        let headers = vec!["日期".to_string(), "备注".to_string()];
        let result = dashboard().ingest(&headers, &[]);
        assert_eq!(result.column_count, 2);
        assert_eq!(result.mappings.len(), 2);
        assert_eq!(result.mappings[0].standard_field.as_deref(), Some("order_date"));
        assert_eq!(result.status, IngestStatus::MissingFields);
        assert!(result.missing_required.contains(&"amount".to_string()));
    }

    #[test]
    fn preview_is_capped() {
        let mut settings = Settings::default();
        settings.ingest.preview_rows = 3;
        let dashboard = Dashboard::new(SynonymDictionary::embedded().unwrap(), settings);
        let headers = vec!["qty".to_string()];
        let rows: Vec<Row> = (0..20)
            .map(|i| Row::new().with("qty", CellValue::Number(f64::from(i))))
            .collect();
        let result = dashboard.ingest(&headers, &rows);
        assert_eq!(result.preview_rows.len(), 3);
        assert_eq!(result.row_count, 20);
    }
}
