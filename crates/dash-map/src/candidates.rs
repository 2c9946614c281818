//! Fixed candidate table for columns the dictionary does not recognise.

use dash_model::{DataType, FieldCandidate, NumericSubType};
use dash_standards::StandardDictionary;

/// One static suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateEntry {
    pub standard_field: &'static str,
    pub score: u8,
    pub reason: &'static str,
}

const fn entry(standard_field: &'static str, score: u8, reason: &'static str) -> CandidateEntry {
    CandidateEntry {
        standard_field,
        score,
        reason,
    }
}

const DATE: &[CandidateEntry] = &[
    entry("order_date", 60, "date values"),
    entry("ship_date", 40, "date values"),
];

const AMOUNT: &[CandidateEntry] = &[
    entry("amount", 60, "currency-valued numbers"),
    entry("cost", 45, "currency-valued numbers"),
    entry("profit", 40, "currency-valued numbers"),
];

const PERCENTAGE: &[CandidateEntry] = &[
    entry("profit_rate", 55, "percentage values"),
    entry("discount_rate", 45, "percentage values"),
    entry("growth_rate", 40, "percentage values"),
];

const QUANTITY: &[CandidateEntry] = &[
    entry("quantity", 55, "whole-number counts"),
    entry("order_count", 45, "whole-number counts"),
];

const GENERAL: &[CandidateEntry] = &[
    entry("amount", 40, "numeric values"),
    entry("quantity", 35, "numeric values"),
    entry("price", 30, "numeric values"),
];

const ID: &[CandidateEntry] = &[
    entry("order_id", 50, "identifier-like values"),
    entry("customer_id", 40, "identifier-like values"),
    entry("product_id", 35, "identifier-like values"),
];

const CATEGORICAL: &[CandidateEntry] = &[
    entry("region", 45, "low-cardinality labels"),
    entry("category", 40, "low-cardinality labels"),
    entry("product", 35, "low-cardinality labels"),
    entry("channel", 30, "low-cardinality labels"),
    entry("salesperson", 25, "low-cardinality labels"),
];

const TEXT: &[CandidateEntry] = &[
    entry("customer_name", 35, "free text"),
    entry("product", 30, "free text"),
    entry("remark", 25, "free text"),
];

/// Static suggestions for a detected type, best first.
///
/// Numeric columns are keyed by subtype; a numeric column without one uses
/// the `GENERAL` row.
pub fn candidate_entries(
    data_type: DataType,
    sub_type: Option<NumericSubType>,
) -> &'static [CandidateEntry] {
    match data_type {
        DataType::Date => DATE,
        DataType::Numeric => match sub_type.unwrap_or(NumericSubType::General) {
            NumericSubType::Amount => AMOUNT,
            NumericSubType::Percentage => PERCENTAGE,
            NumericSubType::Quantity => QUANTITY,
            NumericSubType::General => GENERAL,
        },
        DataType::Id => ID,
        DataType::Categorical => CATEGORICAL,
        DataType::Text => TEXT,
    }
}

/// Candidates present in `dictionary`, labelled with its preferred labels.
pub fn candidates_for<D: StandardDictionary + ?Sized>(
    dictionary: &D,
    data_type: DataType,
    sub_type: Option<NumericSubType>,
    max_candidates: usize,
) -> Vec<FieldCandidate> {
    candidate_entries(data_type, sub_type)
        .iter()
        .filter_map(|entry| {
            let label = dictionary.preferred_label(entry.standard_field)?;
            Some(FieldCandidate {
                standard_field: entry.standard_field.to_string(),
                label,
                score: entry.score,
                reason: entry.reason.to_string(),
            })
        })
        .take(max_candidates)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_are_ranked_and_bounded() {
        for data_type in [
            DataType::Date,
            DataType::Numeric,
            DataType::Id,
            DataType::Categorical,
            DataType::Text,
        ] {
            let entries = candidate_entries(data_type, None);
            assert!(!entries.is_empty() && entries.len() <= 5);
            assert!(entries.windows(2).all(|w| w[0].score >= w[1].score));
        }
    }

    #[test]
    fn amount_subtype_row() {
        let names: Vec<_> = candidate_entries(DataType::Numeric, Some(NumericSubType::Amount))
            .iter()
            .map(|e| e.standard_field)
            .collect();
        assert_eq!(names, ["amount", "cost", "profit"]);
    }
}
