//! Board runtime configuration.

use crate::search::deferred::DEFAULT_SEARCH_DEBOUNCE;
use std::time::Duration;

/// Storage slot holding the serialized topic collection.
pub const DEFAULT_STORAGE_KEY: &str = "memory-board-topics";

/// Settings for one board session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardConfig {
    /// Key of the durable slot the board is mirrored into.
    pub storage_key: String,
    /// Quiet period before search input becomes the active query.
    pub search_debounce: Duration,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            search_debounce: DEFAULT_SEARCH_DEBOUNCE,
        }
    }
}
