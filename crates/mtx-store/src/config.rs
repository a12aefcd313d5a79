use serde::{Deserialize, Serialize};

/// Ingestion limits, passed explicitly into wire translation.
///
/// Deliberately a plain value handed to the caller rather than ambient
/// process state: whoever accepts an upload decides the limits.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Maximum total cell count (columns × rows) accepted per table.
    pub max_cells: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            max_cells: 1_000_000,
        }
    }
}

impl IngestConfig {
    /// No limits. Used when reading back documents this service wrote.
    pub fn unlimited() -> Self {
        Self {
            max_cells: usize::MAX,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limit() {
        assert_eq!(IngestConfig::default().max_cells, 1_000_000);
    }

    #[test]
    fn serde_roundtrip() {
        let config = IngestConfig { max_cells: 42 };
        let toml_like = serde_json::to_string(&config).unwrap();
        let parsed: IngestConfig = serde_json::from_str(&toml_like).unwrap();
        assert_eq!(parsed.max_cells, 42);
    }
}
