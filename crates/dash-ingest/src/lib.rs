//! Column feature analysis for schema-less spreadsheet exports.
//!
//! Every column is classified by a strict cascade, first matching rule wins:
//!
//! 1. `DATE` when a date pattern parses enough values
//! 2. `NUMERIC` when enough values parse as decimals
//! 3. `ID` for identifier-like names or nearly unique values
//! 4. `CATEGORICAL` for low-cardinality columns
//! 5. `TEXT` otherwise
//!
//! Analysis never fails. Ambiguous columns fall through to `TEXT`.

pub mod analyzer;
pub mod config;
pub mod dates;
pub mod numeric;

// === Analysis ===
pub use analyzer::{ColumnAnalyzer, ColumnProfile, Detection, TypeRule, analyze_column};

// === Configuration ===
pub use config::AnalyzerConfig;

// === Parsing rules ===
pub use dates::{DatePattern, date_patterns, detect_date_pattern};
pub use numeric::{NumericEvidence, SubTypeRule, detect_sub_type};
