//! Synonym dictionary backed by a vocabulary CSV.
//!
//! The dictionary owns its lookup indexes. There is no process-wide cache:
//! callers hold a [`SynonymDictionary`] value and call
//! [`SynonymDictionary::reload`] when the vocabulary changes on disk.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};
use std::io::Cursor;

use dash_model::DataType;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::embedded::{SYNONYMS_CSV, SYNONYMS_FILE_NAME};
use crate::error::{Result, StandardsError};
use crate::matching::{contains_phrase, normalize_text, similarity};
use crate::paths::DictionarySource;
use crate::traits::StandardDictionary;

/// Confidence of a match on the canonical name or preferred label.
const EXACT_CONFIDENCE: u8 = 100;
/// Confidence of a match on any other synonym.
const SYNONYM_CONFIDENCE: u8 = 90;
/// Confidence when a synonym occurs inside a longer header.
const CONTAINS_CONFIDENCE: u8 = 75;
/// Fuzzy matches always land below the confirmation threshold.
const FUZZY_MAX_CONFIDENCE: u8 = 69;
const FUZZY_MIN_SIMILARITY: f64 = 0.90;

/// One canonical field of the vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardField {
    pub name: String,
    /// Preferred display label.
    pub label: String,
    pub data_type: DataType,
    pub required: bool,
    pub synonyms: Vec<String>,
}

impl StandardField {
    /// Name, label and synonyms, normalized and de-duplicated.
    fn phrases(&self) -> Vec<String> {
        let mut seen = BTreeSet::new();
        std::iter::once(self.name.as_str())
            .chain(std::iter::once(self.label.as_str()))
            .chain(self.synonyms.iter().map(String::as_str))
            .map(normalize_text)
            .filter(|phrase| !phrase.is_empty() && seen.insert(phrase.clone()))
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct SynonymCsvRow {
    #[serde(rename = "Field")]
    field: String,
    #[serde(rename = "Label", default)]
    label: String,
    #[serde(rename = "Data Type")]
    data_type: String,
    #[serde(rename = "Required", default)]
    required: String,
    #[serde(rename = "Synonyms", default)]
    synonyms: String,
}

/// Canonical vocabulary with normalized synonym lookup.
#[derive(Debug, Clone)]
pub struct SynonymDictionary {
    source: DictionarySource,
    fields: Vec<StandardField>,
    by_name: BTreeMap<String, usize>,
    /// Normalized phrase to field index. The first field declaring a phrase owns it.
    phrases: BTreeMap<String, usize>,
}

impl SynonymDictionary {
    /// Load the vocabulary from `source`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or unreadable, or if any row
    /// carries an unknown data type or a duplicate field name.
    pub fn load(source: &DictionarySource) -> Result<Self> {
        let fields = match source {
            DictionarySource::Embedded => parse_vocabulary(SYNONYMS_CSV, SYNONYMS_FILE_NAME)?,
            DictionarySource::Path(path) => {
                if !path.is_file() {
                    return Err(StandardsError::FileNotFound { path: path.clone() });
                }
                let content =
                    std::fs::read_to_string(path).map_err(|source| StandardsError::FileRead {
                        path: path.clone(),
                        source,
                    })?;
                parse_vocabulary(&content, &path.display().to_string())?
            }
        };
        info!(
            source = %source.describe(),
            fields = fields.len(),
            "loaded synonym dictionary"
        );
        let mut dictionary = Self::from_fields(fields);
        dictionary.source = source.clone();
        Ok(dictionary)
    }

    /// The vocabulary compiled into the binary.
    pub fn embedded() -> Result<Self> {
        Self::load(&DictionarySource::Embedded)
    }

    /// Parse vocabulary CSV content. `file` only labels errors.
    pub fn from_csv_str(content: &str, file: &str) -> Result<Self> {
        Ok(Self::from_fields(parse_vocabulary(content, file)?))
    }

    /// Build the lookup indexes over an in-memory vocabulary.
    pub fn from_fields(fields: Vec<StandardField>) -> Self {
        let mut by_name = BTreeMap::new();
        let mut phrases = BTreeMap::new();
        for (idx, field) in fields.iter().enumerate() {
            by_name.entry(field.name.clone()).or_insert(idx);
            for phrase in field.phrases() {
                phrases.entry(phrase).or_insert(idx);
            }
        }
        Self {
            source: DictionarySource::Embedded,
            fields,
            by_name,
            phrases,
        }
    }

    /// Re-read the vocabulary from the source it was loaded from.
    ///
    /// On failure the current content stays in place.
    pub fn reload(&mut self) -> Result<()> {
        let fresh = Self::load(&self.source)?;
        *self = fresh;
        Ok(())
    }

    pub fn source(&self) -> &DictionarySource {
        &self.source
    }

    pub fn fields(&self) -> &[StandardField] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&StandardField> {
        self.by_name.get(name).map(|&idx| &self.fields[idx])
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn contained_match(&self, normalized: &str) -> Option<usize> {
        self.phrases
            .iter()
            .filter(|(phrase, _)| contains_phrase(normalized, phrase))
            .max_by_key(|(phrase, idx)| (phrase.chars().count(), Reverse(**idx)))
            .map(|(_, idx)| *idx)
    }

    fn fuzzy_match(&self, normalized: &str) -> Option<(usize, f64)> {
        if !normalized.is_ascii() {
            return None;
        }
        let mut best: Option<(usize, f64)> = None;
        for (phrase, &idx) in &self.phrases {
            if !phrase.is_ascii() {
                continue;
            }
            let score = similarity(normalized, phrase);
            if score >= FUZZY_MIN_SIMILARITY && best.is_none_or(|(_, current)| score > current) {
                best = Some((idx, score));
            }
        }
        best
    }
}

impl StandardDictionary for SynonymDictionary {
    fn find_standard_field(&self, header: &str) -> Option<String> {
        let normalized = normalize_text(header);
        if normalized.is_empty() {
            return None;
        }
        let idx = self
            .phrases
            .get(&normalized)
            .copied()
            .or_else(|| self.contained_match(&normalized))
            .or_else(|| self.fuzzy_match(&normalized).map(|(idx, _)| idx))?;
        let name = self.fields[idx].name.clone();
        debug!(header, field = %name, "header matched vocabulary");
        Some(name)
    }

    fn match_confidence(&self, header: &str, standard_field: &str) -> u8 {
        let Some(field) = self.field(standard_field) else {
            return 0;
        };
        let normalized = normalize_text(header);
        if normalized.is_empty() {
            return 0;
        }
        if normalized == normalize_text(&field.name) || normalized == normalize_text(&field.label) {
            return EXACT_CONFIDENCE;
        }
        let phrases = field.phrases();
        if phrases.iter().any(|phrase| *phrase == normalized) {
            return SYNONYM_CONFIDENCE;
        }
        if phrases
            .iter()
            .any(|phrase| contains_phrase(&normalized, phrase))
        {
            return CONTAINS_CONFIDENCE;
        }
        let best = phrases
            .iter()
            .filter(|phrase| phrase.is_ascii() && normalized.is_ascii())
            .map(|phrase| similarity(&normalized, phrase))
            .fold(0.0_f64, f64::max);
        if best >= FUZZY_MIN_SIMILARITY {
            ((best * 70.0).round() as u8).min(FUZZY_MAX_CONFIDENCE)
        } else {
            0
        }
    }

    fn data_type_of(&self, standard_field: &str) -> Option<DataType> {
        self.field(standard_field).map(|f| f.data_type)
    }

    fn is_required(&self, standard_field: &str) -> bool {
        self.field(standard_field).is_some_and(|f| f.required)
    }

    fn missing_required_fields(&self, matched: &BTreeSet<String>) -> Vec<String> {
        self.fields
            .iter()
            .filter(|f| f.required && !matched.contains(&f.name))
            .map(|f| f.name.clone())
            .collect()
    }

    fn all_synonyms(&self, standard_field: &str) -> Vec<String> {
        let Some(field) = self.field(standard_field) else {
            return Vec::new();
        };
        let mut out = Vec::with_capacity(field.synonyms.len() + 1);
        out.push(field.label.clone());
        for synonym in &field.synonyms {
            if !out.contains(synonym) {
                out.push(synonym.clone());
            }
        }
        out
    }

    fn field_names(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.name.clone()).collect()
    }
}

fn parse_vocabulary(content: &str, file: &str) -> Result<Vec<StandardField>> {
    let cursor = Cursor::new(content.as_bytes());
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(cursor);

    let mut fields: Vec<StandardField> = Vec::new();
    let mut seen = BTreeSet::new();
    let mut skipped = 0usize;
    for (index, result) in reader.deserialize::<SynonymCsvRow>().enumerate() {
        // Line 1 is the header.
        let line = index + 2;
        let row = match result {
            Ok(row) => row,
            Err(e) => {
                warn!(file, line, error = %e, "skipping malformed vocabulary row");
                skipped += 1;
                continue;
            }
        };
        let name = row.field.trim().trim_matches('\u{feff}').to_string();
        if name.is_empty() {
            warn!(file, line, "skipping vocabulary row without a field name");
            skipped += 1;
            continue;
        }
        let Ok(data_type) = row.data_type.parse::<DataType>() else {
            warn!(
                file,
                line,
                field = %name,
                data_type = %row.data_type,
                "skipping vocabulary row with unknown data type"
            );
            skipped += 1;
            continue;
        };
        if !seen.insert(name.clone()) {
            return Err(StandardsError::DuplicateField {
                field: name,
                file: file.to_string(),
            });
        }
        let label = if row.label.trim().is_empty() {
            name.clone()
        } else {
            row.label.trim().to_string()
        };
        let synonyms = row
            .synonyms
            .split('|')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        fields.push(StandardField {
            name,
            label,
            data_type,
            required: parse_flag(&row.required),
            synonyms,
        });
    }
    if fields.is_empty() {
        return Err(StandardsError::EmptyVocabulary {
            file: file.to_string(),
            skipped,
        });
    }
    Ok(fields)
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "yes" | "y" | "true" | "1" | "required"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dictionary() -> SynonymDictionary {
        SynonymDictionary::embedded().expect("embedded vocabulary loads")
    }

    #[test]
    fn exact_name_scores_full_confidence() {
        let dict = dictionary();
        assert_eq!(dict.find_standard_field("Region").as_deref(), Some("region"));
        assert_eq!(dict.match_confidence("Region", "region"), 100);
        assert_eq!(dict.match_confidence("Order Date", "order_date"), 100);
    }

    #[test]
    fn synonym_scores_below_exact() {
        let dict = dictionary();
        assert_eq!(dict.find_standard_field("销售额").as_deref(), Some("amount"));
        assert_eq!(dict.match_confidence("销售额", "amount"), 90);
        assert_eq!(dict.find_standard_field("日期").as_deref(), Some("order_date"));
    }

    #[test]
    fn contained_synonym_is_found() {
        let dict = dictionary();
        assert_eq!(dict.find_standard_field("销售额（元）").as_deref(), Some("amount"));
        assert_eq!(dict.match_confidence("销售额（元）", "amount"), 75);
    }

    #[test]
    fn unrelated_header_is_a_miss() {
        let dict = dictionary();
        assert_eq!(dict.find_standard_field("zzz"), None);
        assert_eq!(dict.find_standard_field("   "), None);
        assert_eq!(dict.match_confidence("zzz", "amount"), 0);
        assert_eq!(dict.match_confidence("Region", "no_such_field"), 0);
    }

    #[test]
    fn labels_come_first_in_synonyms() {
        let dict = dictionary();
        let synonyms = dict.all_synonyms("amount");
        assert_eq!(synonyms.first().map(String::as_str), Some("Sales Amount"));
        assert!(synonyms.iter().any(|s| s == "销售额"));
        assert_eq!(dict.preferred_label("region").as_deref(), Some("Region"));
    }

    #[test]
    fn missing_required_follows_vocabulary_order() {
        let dict = dictionary();
        let matched = BTreeSet::from(["region".to_string()]);
        assert_eq!(
            dict.missing_required_fields(&matched),
            vec!["order_date".to_string(), "amount".to_string()]
        );
        let matched = BTreeSet::from(["order_date".to_string(), "amount".to_string()]);
        assert!(dict.missing_required_fields(&matched).is_empty());
    }

    #[test]
    fn skips_rows_with_unknown_data_type() {
        let csv = "Field,Label,Data Type,Required,Synonyms\n\
                   foo,Foo,BLOB,no,\n\
                   fee,Fee,NUMERIC,no,charge\n";
        let dict = SynonymDictionary::from_csv_str(csv, "test.csv").unwrap();
        assert_eq!(dict.len(), 1);
        assert!(dict.field("foo").is_none());
        assert_eq!(dict.find_standard_field("charge").as_deref(), Some("fee"));
    }

    #[test]
    fn skips_rows_with_wrong_field_count() {
        let csv = "Field,Label,Data Type,Required,Synonyms\n\
                   broken,Broken\n\
                   fee,Fee,NUMERIC,no,charge\n";
        let dict = SynonymDictionary::from_csv_str(csv, "test.csv").unwrap();
        assert_eq!(dict.field_names(), ["fee"]);
    }

    #[test]
    fn vocabulary_without_usable_rows_is_an_error() {
        let csv = "Field,Label,Data Type,Required,Synonyms\nfoo,Foo,BLOB,no,\n";
        let err = SynonymDictionary::from_csv_str(csv, "test.csv").unwrap_err();
        assert!(matches!(err, StandardsError::EmptyVocabulary { skipped: 1, .. }));
    }

    #[test]
    fn rejects_duplicate_fields() {
        let csv = "Field,Label,Data Type,Required,Synonyms\nfoo,Foo,TEXT,no,\nfoo,Foo,TEXT,no,\n";
        let err = SynonymDictionary::from_csv_str(csv, "test.csv").unwrap_err();
        assert!(matches!(err, StandardsError::DuplicateField { .. }));
    }
}
