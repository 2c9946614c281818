//! Ingestion and chart building through the facade.

use std::io::Write;

use chrono::{Days, NaiveDate};
use dash_core::{CoreError, Dashboard, Settings};
use dash_model::{
    AxisType, ChartType, DataType, IngestStatus, MappingSource, RoleOverrides, Row,
};
use dash_standards::SynonymDictionary;
use tempfile::NamedTempFile;

fn headers(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| (*s).to_string()).collect()
}

fn daily_sales() -> Vec<Row> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    (0..10u32)
        .map(|offset| {
            let day = start + Days::new(u64::from(offset));
            Row::new()
                .with("日期", day.format("%Y-%m-%d").to_string().as_str())
                .with("销售额", format!("{}.5", 1000 + offset * 37).as_str())
        })
        .collect()
}

fn dashboard() -> Dashboard {
    Dashboard::new(SynonymDictionary::embedded().unwrap(), Settings::default())
}

fn write_temp(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

// ============================================================================
// Ingestion to chart
// ============================================================================

#[test]
fn daily_sales_become_a_line_chart() {
    let dashboard = dashboard();
    let rows = daily_sales();
    let result = dashboard.ingest(&headers(&["日期", "销售额"]), &rows);

    assert_eq!(result.status, IngestStatus::Complete);
    assert!(result.missing_required.is_empty());
    assert_eq!(result.features[0].data_type, DataType::Date);
    assert_eq!(result.features[0].date_format.as_deref(), Some("yyyy-MM-dd"));
    assert_eq!(result.features[1].data_type, DataType::Numeric);
    assert_eq!(result.mappings[0].standard_field.as_deref(), Some("order_date"));
    assert_eq!(result.mappings[1].standard_field.as_deref(), Some("amount"));
    assert_eq!(result.mappings[1].mapping_source, MappingSource::SynonymMatch);
    assert_eq!(result.preview_rows.len(), 10);

    let roles = dashboard.default_roles(&result);
    let chart = dashboard.build_chart(&roles, &rows, &RoleOverrides::default());

    assert_eq!(chart.chart_type, ChartType::Line);
    assert_eq!(chart.x_axis.axis_type, AxisType::Time);
    assert_eq!(chart.x_axis.data.len(), 10);
    assert_eq!(chart.x_axis.data.first().map(String::as_str), Some("2024-01-01"));
    assert_eq!(chart.x_axis.data.last().map(String::as_str), Some("2024-01-10"));
    let mut sorted = chart.x_axis.data.clone();
    sorted.sort();
    assert_eq!(sorted, chart.x_axis.data);
    assert_eq!(chart.series.len(), 1);
    assert_eq!(chart.series[0].data[0].value(), 1000.5);
    assert_eq!(chart.title, "Sales Amount by Order Date");
}

#[test]
fn json_rows_chart_with_overrides() {
    let dashboard = dashboard();
    let rows = vec![
        Row::new().with("Region", "East").with("Revenue", 100.0),
        Row::new().with("Region", "West").with("Revenue", 200.0),
        Row::new().with("Region", "East").with("Revenue", 150.0),
    ];
    let result = dashboard.ingest(&headers(&["Region", "Revenue"]), &rows);
    let roles = dashboard.default_roles(&result);
    let overrides = RoleOverrides {
        series_field: Some("Region".to_string()),
        ..RoleOverrides::default()
    };
    let data = serde_json::json!({
        "content": [
            {"Region": "East", "Revenue": 100},
            {"Region": "West", "Revenue": 200},
            {"Region": "East", "Revenue": 150},
        ]
    });
    let chart = dashboard.build_chart_from_json(&roles, &data, &overrides);

    let names: Vec<_> = chart.series.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["East", "West"]);
    let totals: Vec<f64> = chart
        .series
        .iter()
        .map(|s| s.data.iter().map(|d| d.value()).sum())
        .collect();
    assert_eq!(totals, [250.0, 200.0]);
    assert_eq!(chart.legend.data, ["East", "West"]);
    assert_eq!(chart.x_axis.data, ["Sales Amount"]);
}

#[test]
fn no_headers_reports_error_status() {
    let result = dashboard().ingest(&[], &daily_sales());
    assert_eq!(result.status, IngestStatus::Error);
    assert!(result.mappings.is_empty());
    assert_eq!(result.row_count, 10);
}

#[test]
fn sampling_limits_analysis_not_row_count() {
    let mut settings = Settings::default();
    settings.analyzer.sample_rows = 4;
    let dashboard = Dashboard::new(SynonymDictionary::embedded().unwrap(), settings);
    let result = dashboard.ingest(&headers(&["日期", "销售额"]), &daily_sales());
    assert_eq!(result.row_count, 10);
    assert_eq!(result.features[0].total_count, 4);
}

// ============================================================================
// Settings and vocabulary files
// ============================================================================

#[test]
fn settings_file_points_at_custom_vocabulary() {
    let vocabulary = write_temp(
        "Field,Label,Data Type,Required,Synonyms\n\
         units_sold,Units Sold,NUMERIC,yes,units|pieces\n\
         store,Store,CATEGORICAL,no,shop|branch\n",
    );
    let settings_file = write_temp(&format!(
        "dictionary_path = {:?}\n\n[ingest]\npreview_rows = 1\n",
        vocabulary.path().display().to_string()
    ));

    let settings = Settings::load_from(settings_file.path()).unwrap();
    assert_eq!(settings.ingest.preview_rows, 1);
    let dashboard = Dashboard::from_settings(settings).unwrap();
    assert_eq!(dashboard.dictionary().len(), 2);

    let rows = vec![
        Row::new().with("shop", "A").with("pieces", 3.0),
        Row::new().with("shop", "B").with("pieces", 4.0),
    ];
    let result = dashboard.ingest(&headers(&["shop", "pieces"]), &rows);
    assert_eq!(result.status, IngestStatus::Complete);
    assert_eq!(result.mappings[1].standard_field.as_deref(), Some("units_sold"));
    assert_eq!(result.mappings[1].standard_label.as_deref(), Some("Units Sold"));
    assert_eq!(result.preview_rows.len(), 1);
}

#[test]
fn missing_settings_file_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Settings::load_from(&dir.path().join("dash.toml")).unwrap_err();
    assert!(matches!(err, CoreError::SettingsRead { .. }));
}

#[test]
fn malformed_settings_file_is_a_parse_error() {
    let file = write_temp("[chart\npie_max_rows = 3");
    let err = Settings::load_from(file.path()).unwrap_err();
    assert!(matches!(err, CoreError::SettingsParse { .. }));
    assert!(err.to_string().contains("Failed to parse settings"));
}

#[test]
fn missing_vocabulary_file_fails_setup() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings {
        dictionary_path: Some(dir.path().join("absent.csv")),
        ..Settings::default()
    };
    let err = Dashboard::from_settings(settings).unwrap_err();
    assert!(matches!(err, CoreError::Standards(_)));
}
