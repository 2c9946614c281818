//! Embedded vocabulary data.
//!
//! The default vocabulary is embedded at compile time using `include_str!()`
//! so the dictionary works without any file on disk.

/// Name reported for the embedded vocabulary in errors and logs.
pub const SYNONYMS_FILE_NAME: &str = "synonyms.csv";

/// Default canonical vocabulary with synonyms.
pub const SYNONYMS_CSV: &str = include_str!("../data/synonyms.csv");
