//! Vocabulary source resolution.

use std::path::PathBuf;

/// Environment variable for overriding the vocabulary file.
pub const DICTIONARY_ENV_VAR: &str = "DASH_DICTIONARY_PATH";

/// Where a [`SynonymDictionary`](crate::SynonymDictionary) reads its vocabulary from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DictionarySource {
    /// The vocabulary compiled into the binary.
    #[default]
    Embedded,
    /// A vocabulary CSV on disk.
    Path(PathBuf),
}

impl DictionarySource {
    /// Resolve the source.
    ///
    /// Resolution order:
    /// 1. `DASH_DICTIONARY_PATH` environment variable
    /// 2. the embedded vocabulary
    pub fn from_env() -> Self {
        match std::env::var(DICTIONARY_ENV_VAR) {
            Ok(path) if !path.trim().is_empty() => Self::Path(PathBuf::from(path)),
            _ => Self::Embedded,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Embedded => crate::embedded::SYNONYMS_FILE_NAME.to_string(),
            Self::Path(path) => path.display().to_string(),
        }
    }
}
