use serde::{Deserialize, Serialize};

use crate::enums::{DataType, MappingSource, NumericSubType};
use crate::value::FieldKey;

/// A ranked canonical-field suggestion for an unmatched column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldCandidate {
    pub standard_field: String,
    pub label: String,
    /// 0 to 100.
    pub score: u8,
    pub reason: String,
}

/// Mapping of one source column onto the canonical vocabulary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMapping {
    pub original_column: String,
    pub column_index: usize,
    pub standard_field: Option<String>,
    pub standard_label: Option<String>,
    /// 0 to 100.
    pub confidence: u8,
    pub mapping_source: MappingSource,
    pub data_type: DataType,
    pub sub_type: Option<NumericSubType>,
    pub is_required: bool,
    pub requires_confirmation: bool,
    /// At most five, best first. Only populated for unmatched columns.
    #[serde(default)]
    pub candidates: Vec<FieldCandidate>,
}

impl FieldMapping {
    /// A mapping with no dictionary hit, typed from the column alone.
    pub fn unmatched(original_column: impl Into<String>, column_index: usize, data_type: DataType) -> Self {
        Self {
            original_column: original_column.into(),
            column_index,
            standard_field: None,
            standard_label: None,
            confidence: 0,
            mapping_source: MappingSource::FeatureInfer,
            data_type,
            sub_type: None,
            is_required: false,
            requires_confirmation: true,
            candidates: Vec::new(),
        }
    }

    pub fn is_matched(&self) -> bool {
        self.standard_field.is_some()
    }

    /// Row accessor trying the original column name, then the standard field.
    pub fn key(&self) -> FieldKey<'_> {
        FieldKey::new(&self.original_column, self.standard_field.as_deref())
    }

    /// Standard field name when matched, else the original column name.
    pub fn field_name(&self) -> &str {
        self.standard_field
            .as_deref()
            .unwrap_or(&self.original_column)
    }

    /// Preferred label when matched, else the original column name.
    pub fn display_name(&self) -> &str {
        self.standard_label
            .as_deref()
            .unwrap_or(&self.original_column)
    }
}
