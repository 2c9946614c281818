use serde::{Deserialize, Serialize};

use crate::enums::{DataType, NumericSubType};

/// Analysis result for one source column.
///
/// Produced once per ingestion pass and never updated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataFeature {
    pub column_name: String,
    pub column_index: usize,
    pub data_type: DataType,
    /// Only set for [`DataType::Numeric`].
    pub sub_type: Option<NumericSubType>,
    /// Display name of the winning pattern, e.g. `yyyy-MM-dd`. Only set for [`DataType::Date`].
    pub date_format: Option<String>,
    /// Only set for [`DataType::Numeric`].
    pub min_value: Option<f64>,
    /// Only set for [`DataType::Numeric`].
    pub max_value: Option<f64>,
    /// Bounded list of distinct non-blank values, first seen first.
    pub sample_values: Vec<String>,
    /// Distinct values of a categorical column (bounded). Empty for other types.
    pub unique_values: Vec<String>,
    pub total_count: usize,
    pub unique_count: usize,
    pub null_count: usize,
    /// 0 to 100.
    pub confidence: u8,
}

impl DataFeature {
    pub fn non_null_count(&self) -> usize {
        self.total_count.saturating_sub(self.null_count)
    }

    /// Distinct over non-blank values; `0.0` for an all-blank column.
    pub fn unique_ratio(&self) -> f64 {
        let non_null = self.non_null_count();
        if non_null == 0 {
            0.0
        } else {
            self.unique_count as f64 / non_null as f64
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.data_type == DataType::Numeric
    }

    pub fn is_date(&self) -> bool {
        self.data_type == DataType::Date
    }
}
