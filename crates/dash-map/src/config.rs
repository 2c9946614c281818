use serde::{Deserialize, Serialize};

/// Field mapper settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperConfig {
    /// Mappings scoring below this need user confirmation (default: 70).
    pub confirmation_threshold: u8,
    /// Cap on candidate suggestions per unmatched column (default: 5).
    pub max_candidates: usize,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            confirmation_threshold: 70,
            max_candidates: 5,
        }
    }
}
