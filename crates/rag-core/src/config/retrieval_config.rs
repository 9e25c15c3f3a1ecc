use serde::{Deserialize, Serialize};

use super::defaults;

/// Retrieval subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// RRF k-value for rank fusion.
    pub rrf_k: u32,
    /// `top_k` used when a request does not specify one.
    pub default_top_k: usize,
    /// Largest `top_k` a request may ask for.
    pub max_top_k: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            rrf_k: defaults::DEFAULT_RRF_K,
            default_top_k: defaults::DEFAULT_TOP_K,
            max_top_k: defaults::DEFAULT_MAX_TOP_K,
        }
    }
}
