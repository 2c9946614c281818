use serde::{Deserialize, Serialize};

use crate::enums::IngestStatus;
use crate::feature::DataFeature;
use crate::mapping::FieldMapping;
use crate::value::Row;

/// Everything one ingestion pass reports back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestionResult {
    pub headers: Vec<String>,
    pub row_count: usize,
    pub column_count: usize,
    pub features: Vec<DataFeature>,
    pub mappings: Vec<FieldMapping>,
    pub missing_required: Vec<String>,
    pub status: IngestStatus,
    /// Reason for an [`IngestStatus::Error`] outcome.
    pub message: Option<String>,
    pub preview_rows: Vec<Row>,
    pub elapsed_ms: u64,
}

impl IngestionResult {
    pub fn is_complete(&self) -> bool {
        self.status == IngestStatus::Complete
    }

    /// Mappings the user still needs to confirm.
    pub fn pending_confirmation(&self) -> impl Iterator<Item = &FieldMapping> {
        self.mappings.iter().filter(|m| m.requires_confirmation)
    }
}
