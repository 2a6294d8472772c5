//! Configuration types for the indexer build

use serde::{Deserialize, Serialize};

/// Tunables for the index build phases.
///
/// All fields have defaults suitable for national checklist archives
/// (a few million concepts); none are required.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexerConfig {
    /// Heap budget handed to each index writer, in bytes
    #[serde(default = "default_writer_heap_bytes")]
    pub writer_heap_bytes: usize,

    /// How often to log row-processing progress
    #[serde(default = "default_log_interval")]
    pub log_interval: u64,
}

fn default_writer_heap_bytes() -> usize {
    64 * 1024 * 1024
}

fn default_log_interval() -> u64 {
    1000
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            writer_heap_bytes: default_writer_heap_bytes(),
            log_interval: default_log_interval(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = IndexerConfig::default();
        assert_eq!(config.writer_heap_bytes, 64 * 1024 * 1024);
        assert_eq!(config.log_interval, 1000);
    }

    #[test]
    fn test_partial_deserialization() {
        let config: IndexerConfig = serde_json::from_str(r#"{"log_interval": 50}"#).unwrap();
        assert_eq!(config.log_interval, 50);
        assert_eq!(config.writer_heap_bytes, 64 * 1024 * 1024);
    }
}
