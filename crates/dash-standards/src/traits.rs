//! Lookup seam between the field mapper and the vocabulary.

use std::collections::BTreeSet;

use dash_model::DataType;

/// Read-only canonical-name lookup.
///
/// Implementations own whatever caching they need; callers only ever read.
pub trait StandardDictionary {
    /// Canonical field a raw header maps to, if any.
    fn find_standard_field(&self, header: &str) -> Option<String>;

    /// How well `header` matches `standard_field`, 0 to 100.
    ///
    /// 100 means an exact match on the canonical name or its preferred label.
    fn match_confidence(&self, header: &str, standard_field: &str) -> u8;

    /// Declared data type of a canonical field.
    fn data_type_of(&self, standard_field: &str) -> Option<DataType>;

    fn is_required(&self, standard_field: &str) -> bool;

    /// Required canonical fields absent from `matched`, in vocabulary order.
    fn missing_required_fields(&self, matched: &BTreeSet<String>) -> Vec<String>;

    /// Label followed by every synonym. The first entry is the preferred label.
    fn all_synonyms(&self, standard_field: &str) -> Vec<String>;

    /// Every canonical field name, in vocabulary order.
    fn field_names(&self) -> Vec<String>;

    fn preferred_label(&self, standard_field: &str) -> Option<String> {
        self.all_synonyms(standard_field).into_iter().next()
    }
}
