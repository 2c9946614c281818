//! Field mapping onto the canonical vocabulary.
//!
//! [`FieldMapper`] combines each column's [`DataFeature`](dash_model::DataFeature)
//! with a [`StandardDictionary`](dash_standards::StandardDictionary) lookup and
//! produces one [`FieldMapping`](dash_model::FieldMapping) per header, in header
//! order. Columns the dictionary does not recognise get ranked candidate
//! suggestions keyed by their detected type.

pub mod candidates;
pub mod confidence;
pub mod config;
pub mod mapper;
pub mod required;

// === Mapping ===
pub use mapper::{FieldMapper, map_fields};

// === Candidates ===
pub use candidates::{CandidateEntry, candidate_entries, candidates_for};

// === Confidence ===
pub use confidence::{ConfidenceLevel, ConfidenceThresholds, MappingSummary};

// === Required fields ===
pub use required::{RequiredFieldCheck, check_required};

pub use config::MapperConfig;
