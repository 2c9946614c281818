//! Canonical business vocabulary and synonym dictionary.
//!
//! This crate provides:
//!
//! - **[`StandardDictionary`]**: the lookup seam the field mapper talks to
//! - **[`SynonymDictionary`]**: the default implementation, built from a
//!   vocabulary CSV (embedded at compile time or read from disk)
//! - **Header matching** helpers shared by lookup and confidence scoring
//!
//! # Vocabulary Format
//!
//! ```text
//! Field,Label,Data Type,Required,Synonyms
//! amount,Sales Amount,NUMERIC,yes,销售额|金额|revenue|sales
//! ```
//!
//! The label is the preferred display name; synonyms are pipe-separated.
//!
//! # Example
//!
//! ```rust,ignore
//! use dash_standards::{DictionarySource, StandardDictionary, SynonymDictionary};
//!
//! let dictionary = SynonymDictionary::load(&DictionarySource::from_env())?;
//! assert_eq!(dictionary.find_standard_field("销售额").as_deref(), Some("amount"));
//! ```

pub mod dictionary;
pub mod embedded;
pub mod error;
pub mod matching;
pub mod paths;
pub mod traits;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use dictionary::{StandardField, SynonymDictionary};
pub use error::{Result, StandardsError};
pub use matching::{normalize_text, similarity};
pub use paths::{DICTIONARY_ENV_VAR, DictionarySource};
pub use traits::StandardDictionary;
