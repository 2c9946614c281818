//! Pipeline settings persisted as TOML.
//!
//! Every section is optional; missing keys fall back to the built-in
//! thresholds, so an empty file is a valid configuration.

use std::path::{Path, PathBuf};

use dash_chart::ChartOptions;
use dash_ingest::AnalyzerConfig;
use dash_map::MapperConfig;
use dash_standards::{DictionarySource, SynonymDictionary};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::logging::LogSettings;

/// All tunables for one pipeline instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Vocabulary CSV overriding the embedded one and `DASH_DICTIONARY_PATH`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dictionary_path: Option<PathBuf>,

    /// Column type detection thresholds.
    pub analyzer: AnalyzerConfig,

    /// Field mapping thresholds.
    pub mapper: MapperConfig,

    /// Chart building thresholds.
    pub chart: ChartOptions,

    /// Ingestion pass options.
    pub ingest: IngestOptions,

    /// Log output.
    pub logging: LogSettings,
}

impl Settings {
    /// Parse settings from TOML text.
    pub fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load settings from a TOML file.
    ///
    /// Unlike a missing key, a missing or malformed file is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| CoreError::SettingsRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| CoreError::SettingsParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Serialize to pretty TOML.
    pub fn to_toml_string(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Vocabulary source: explicit path, then `DASH_DICTIONARY_PATH`, then embedded.
    pub fn dictionary_source(&self) -> DictionarySource {
        match &self.dictionary_path {
            Some(path) => DictionarySource::Path(path.clone()),
            None => DictionarySource::from_env(),
        }
    }

    pub fn load_dictionary(&self) -> Result<SynonymDictionary> {
        Ok(SynonymDictionary::load(&self.dictionary_source())?)
    }
}

/// Ingestion pass options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestOptions {
    /// Leading rows echoed back in the ingestion result.
    pub preview_rows: usize,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self { preview_rows: 10 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_is_default() {
        let settings = Settings::from_toml_str("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.ingest.preview_rows, 10);
        assert_eq!(settings.chart.series_max_distinct, 15);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let settings = Settings::from_toml_str(
            r#"
            dictionary_path = "vocab.csv"

            [analyzer]
            sample_rows = 20

            [mapper]
            confirmation_threshold = 80
            "#,
        )
        .unwrap();
        assert_eq!(settings.analyzer.sample_rows, 20);
        assert_eq!(settings.analyzer.date_ratio, AnalyzerConfig::default().date_ratio);
        assert_eq!(settings.mapper.confirmation_threshold, 80);
        assert_eq!(settings.mapper.max_candidates, 5);
        assert_eq!(
            settings.dictionary_source(),
            DictionarySource::Path(PathBuf::from("vocab.csv"))
        );
    }

    #[test]
    fn toml_round_trip() {
        let mut settings = Settings::default();
        settings.chart.pie_max_rows = 4;
        let text = settings.to_toml_string().unwrap();
        assert_eq!(Settings::from_toml_str(&text).unwrap(), settings);
    }

    #[test]
    fn unknown_value_type_is_rejected() {
        assert!(Settings::from_toml_str("[chart]\npie_max_rows = \"six\"").is_err());
    }
}
