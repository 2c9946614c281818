//! Confidence categorisation for field mappings.

use std::collections::BTreeMap;

use dash_model::{FieldMapping, MappingSource};
use serde::Serialize;

/// Confidence level categories for mapping quality assessment.
///
/// - `High`: safe to use without review
/// - `Medium`: good match, worth a glance
/// - `Low`: needs manual confirmation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

/// Boundaries between confidence levels on the 0 to 100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfidenceThresholds {
    /// Minimum score for [`ConfidenceLevel::High`] (default: 90).
    pub high: u8,
    /// Minimum score for [`ConfidenceLevel::Medium`] (default: 70).
    pub medium: u8,
}

impl Default for ConfidenceThresholds {
    fn default() -> Self {
        Self {
            high: 90,
            medium: 70,
        }
    }
}

impl ConfidenceThresholds {
    /// Only exact name or label matches count as high.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            high: 100,
            medium: 90,
        }
    }

    #[must_use]
    pub fn relaxed() -> Self {
        Self {
            high: 75,
            medium: 50,
        }
    }

    #[must_use]
    pub fn categorize(&self, confidence: u8) -> ConfidenceLevel {
        if confidence >= self.high {
            ConfidenceLevel::High
        } else if confidence >= self.medium {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        }
    }
}

/// Counts over one ingestion pass's mappings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingSummary {
    pub total: usize,
    pub exact: usize,
    pub synonym: usize,
    pub inferred: usize,
    pub requiring_confirmation: usize,
    pub by_level: BTreeMap<ConfidenceLevel, usize>,
}

impl MappingSummary {
    pub fn from_mappings(mappings: &[FieldMapping], thresholds: &ConfidenceThresholds) -> Self {
        let mut summary = Self {
            total: mappings.len(),
            ..Self::default()
        };
        for mapping in mappings {
            match mapping.mapping_source {
                MappingSource::ExactMatch => summary.exact += 1,
                MappingSource::SynonymMatch => summary.synonym += 1,
                MappingSource::FeatureInfer => summary.inferred += 1,
            }
            if mapping.requires_confirmation {
                summary.requiring_confirmation += 1;
            }
            *summary
                .by_level
                .entry(thresholds.categorize(mapping.confidence))
                .or_insert(0) += 1;
        }
        summary
    }

    pub fn matched(&self) -> usize {
        self.exact + self.synonym
    }
}
