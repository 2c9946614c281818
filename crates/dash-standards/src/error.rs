//! Error types for vocabulary loading operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading the synonym dictionary.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StandardsError {
    /// Vocabulary file not found.
    #[error("Vocabulary file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read the vocabulary file.
    #[error("Failed to read vocabulary {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Every row of the vocabulary was skipped, or there were none.
    #[error("Vocabulary {file} has no usable rows ({skipped} skipped)")]
    EmptyVocabulary { file: String, skipped: usize },

    /// The vocabulary defines the same field twice.
    #[error("Duplicate field '{field}' in {file}")]
    DuplicateField { field: String, file: String },
}

/// Result type for vocabulary loading operations.
pub type Result<T> = std::result::Result<T, StandardsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StandardsError::FileNotFound {
            path: PathBuf::from("/path/to/synonyms.csv"),
        };
        assert_eq!(
            err.to_string(),
            "Vocabulary file not found: /path/to/synonyms.csv"
        );
    }
}
