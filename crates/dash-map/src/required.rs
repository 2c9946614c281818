//! Required-field gap check.

use std::collections::BTreeSet;

use dash_model::{FieldMapping, IngestStatus};
use dash_standards::StandardDictionary;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequiredFieldCheck {
    pub status: IngestStatus,
    /// Required canonical fields no column mapped onto, in vocabulary order.
    pub missing: Vec<String>,
}

impl RequiredFieldCheck {
    pub fn is_complete(&self) -> bool {
        self.status == IngestStatus::Complete
    }
}

/// Compare matched canonical names against the dictionary's required set.
///
/// A gap is reported as data, never as an error.
pub fn check_required<D: StandardDictionary + ?Sized>(
    dictionary: &D,
    mappings: &[FieldMapping],
) -> RequiredFieldCheck {
    let matched: BTreeSet<String> = mappings
        .iter()
        .filter_map(|m| m.standard_field.clone())
        .collect();
    let missing = dictionary.missing_required_fields(&matched);
    let status = if missing.is_empty() {
        IngestStatus::Complete
    } else {
        IngestStatus::MissingFields
    };
    RequiredFieldCheck { status, missing }
}
