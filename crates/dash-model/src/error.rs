use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("unknown {kind} tag: {value}")]
    UnknownTag { kind: &'static str, value: String },
}

impl ModelError {
    pub(crate) fn unknown(kind: &'static str, value: &str) -> Self {
        Self::UnknownTag {
            kind,
            value: value.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ModelError>;
