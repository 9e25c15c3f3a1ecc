//! Configuration. TOML file with one table per subsystem, every field
//! defaulted, plus `RAG_*` environment overrides.

pub mod defaults;

mod chunking_config;
mod embedding_config;
mod observability_config;
mod retrieval_config;
mod storage_config;

pub use chunking_config::ChunkingConfig;
pub use embedding_config::EmbeddingConfig;
pub use observability_config::ObservabilityConfig;
pub use retrieval_config::RetrievalConfig;
pub use storage_config::StorageConfig;

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{RagError, RagResult};

/// Names the TOML file `from_env` loads before applying overrides.
pub const CONFIG_PATH_ENV: &str = "RAG_CONFIG";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RagConfig {
    pub storage: StorageConfig,
    pub embedding: EmbeddingConfig,
    pub chunking: ChunkingConfig,
    pub retrieval: RetrievalConfig,
    pub observability: ObservabilityConfig,
}

impl RagConfig {
    /// Parse a TOML string. Missing tables and fields take defaults.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Read and parse a TOML file.
    pub fn from_file(path: &Path) -> RagResult<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| RagError::ConfigError(format!("{}: {e}", path.display())))?;
        Self::from_toml(&raw).map_err(|e| RagError::ConfigError(e.to_string()))
    }

    /// Load from `RAG_CONFIG` (when set) and then the process environment.
    pub fn from_env() -> RagResult<Self> {
        let mut config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.is_empty() => Self::from_file(Path::new(&path))?,
            _ => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `RAG_*` overrides read through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> RagResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("RAG_DB_PATH") {
            self.storage.db_path = v;
        }
        if let Some(v) = lookup("RAG_EMBEDDING_DIM") {
            self.embedding.dimensions = parse_var("RAG_EMBEDDING_DIM", &v)?;
        }
        if let Some(v) = lookup("RAG_CHUNK_SIZE") {
            self.chunking.chunk_size = parse_var("RAG_CHUNK_SIZE", &v)?;
        }
        if let Some(v) = lookup("RAG_CHUNK_OVERLAP") {
            self.chunking.chunk_overlap = parse_var("RAG_CHUNK_OVERLAP", &v)?;
        }
        if let Some(v) = lookup("RAG_RRF_K") {
            self.retrieval.rrf_k = parse_var("RAG_RRF_K", &v)?;
        }
        if let Some(v) = lookup("RAG_LOG_LEVEL") {
            self.observability.log_level = v;
        }
        if let Some(v) = lookup("RAG_LOG_FORMAT") {
            self.observability.log_format = v;
        }
        Ok(())
    }

    /// Reject combinations the engines cannot run with.
    pub fn validate(&self) -> RagResult<()> {
        if self.embedding.dimensions == 0 {
            return Err(RagError::ConfigError(
                "embedding.dimensions must be positive".into(),
            ));
        }
        if self.chunking.chunk_size == 0 {
            return Err(RagError::ConfigError(
                "chunking.chunk_size must be positive".into(),
            ));
        }
        if self.chunking.chunk_overlap >= self.chunking.chunk_size {
            return Err(RagError::ConfigError(format!(
                "chunking.chunk_overlap ({}) must be < chunk_size ({})",
                self.chunking.chunk_overlap, self.chunking.chunk_size
            )));
        }
        if self.retrieval.rrf_k == 0 {
            return Err(RagError::ConfigError(
                "retrieval.rrf_k must be positive".into(),
            ));
        }
        if self.retrieval.default_top_k == 0
            || self.retrieval.default_top_k > self.retrieval.max_top_k
        {
            return Err(RagError::ConfigError(format!(
                "retrieval.default_top_k must be within 1..={}",
                self.retrieval.max_top_k
            )));
        }
        Ok(())
    }
}

fn parse_var<T>(key: &str, raw: &str) -> RagResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| RagError::ConfigError(format!("{key}={raw:?}: {e}")))
}
