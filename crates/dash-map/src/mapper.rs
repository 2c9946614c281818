//! Field mapper.

use dash_model::{DataFeature, DataType, FieldMapping, MappingSource, NumericSubType};
use dash_standards::StandardDictionary;
use tracing::{debug, info};

use crate::candidates::candidates_for;
use crate::config::MapperConfig;

const EXACT_CONFIDENCE: u8 = 100;

/// Maps headers onto canonical fields through a dictionary.
///
/// Stateless apart from its borrowed dictionary; the same input always
/// yields the same mappings.
#[derive(Debug)]
pub struct FieldMapper<'d, D: StandardDictionary + ?Sized> {
    dictionary: &'d D,
    config: MapperConfig,
}

impl<'d, D: StandardDictionary + ?Sized> FieldMapper<'d, D> {
    pub fn new(dictionary: &'d D) -> Self {
        Self::with_config(dictionary, MapperConfig::default())
    }

    pub fn with_config(dictionary: &'d D, config: MapperConfig) -> Self {
        Self { dictionary, config }
    }

    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    /// One mapping per header, in header order.
    ///
    /// Features are paired by column index, falling back to column name.
    /// A header without a feature is treated as `TEXT`.
    pub fn map_fields(&self, headers: &[String], features: &[DataFeature]) -> Vec<FieldMapping> {
        let mappings: Vec<FieldMapping> = headers
            .iter()
            .enumerate()
            .map(|(idx, header)| {
                let feature = features
                    .iter()
                    .find(|f| f.column_index == idx && f.column_name == *header)
                    .or_else(|| features.iter().find(|f| f.column_name == *header));
                self.map_field(header, idx, feature)
            })
            .collect();

        let matched = mappings.iter().filter(|m| m.is_matched()).count();
        info!(
            columns = mappings.len(),
            matched,
            unmatched = mappings.len() - matched,
            "mapped fields"
        );
        mappings
    }

    pub fn map_field(
        &self,
        header: &str,
        column_index: usize,
        feature: Option<&DataFeature>,
    ) -> FieldMapping {
        let detected_type = feature.map_or(DataType::Text, |f| f.data_type);
        let detected_sub_type = feature.and_then(|f| f.sub_type);

        let Some(standard) = self.dictionary.find_standard_field(header) else {
            let mut mapping = FieldMapping::unmatched(header, column_index, detected_type);
            mapping.sub_type = detected_sub_type;
            mapping.candidates = candidates_for(
                self.dictionary,
                detected_type,
                detected_sub_type,
                self.config.max_candidates,
            );
            debug!(
                header,
                data_type = %detected_type,
                candidates = mapping.candidates.len(),
                "no dictionary match"
            );
            return mapping;
        };

        let confidence = self.dictionary.match_confidence(header, &standard).min(100);
        let data_type = self
            .dictionary
            .data_type_of(&standard)
            .unwrap_or(detected_type);
        let sub_type = (data_type == DataType::Numeric)
            .then(|| detected_sub_type.unwrap_or(NumericSubType::General));
        let mapping_source = if confidence == EXACT_CONFIDENCE {
            MappingSource::ExactMatch
        } else {
            MappingSource::SynonymMatch
        };
        debug!(
            header,
            field = %standard,
            confidence,
            source = %mapping_source,
            "dictionary match"
        );

        FieldMapping {
            original_column: header.to_string(),
            column_index,
            standard_label: self.dictionary.preferred_label(&standard),
            is_required: self.dictionary.is_required(&standard),
            standard_field: Some(standard),
            confidence,
            mapping_source,
            data_type,
            sub_type,
            requires_confirmation: confidence < self.config.confirmation_threshold,
            candidates: Vec::new(),
        }
    }
}

/// Map headers with the default [`MapperConfig`].
pub fn map_fields<D: StandardDictionary + ?Sized>(
    dictionary: &D,
    headers: &[String],
    features: &[DataFeature],
) -> Vec<FieldMapping> {
    FieldMapper::new(dictionary).map_fields(headers, features)
}
