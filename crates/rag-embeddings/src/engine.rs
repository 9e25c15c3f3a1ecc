//! EmbeddingEngine: the entry point for rag-embeddings.
//!
//! Wraps the configured provider with the L1 cache and checks every vector
//! against the configured width. Implements `IEmbeddingProvider`, so it can
//! stand in for a provider anywhere.

use rag_core::config::EmbeddingConfig;
use rag_core::errors::{EmbeddingError, RagResult};
use rag_core::traits::IEmbeddingProvider;
use tracing::{debug, info};

use crate::cache::{content_key, L1MemoryCache};
use crate::providers;

pub struct EmbeddingEngine {
    provider: Box<dyn IEmbeddingProvider>,
    cache: L1MemoryCache,
    config: EmbeddingConfig,
}

impl EmbeddingEngine {
    /// Build the engine with the provider named in `config`.
    pub fn new(config: EmbeddingConfig) -> RagResult<Self> {
        let provider = providers::create_provider(&config)?;
        Self::with_provider(provider, config)
    }

    /// Build the engine around an explicit provider. The provider's width
    /// must equal `config.dimensions`.
    pub fn with_provider(
        provider: Box<dyn IEmbeddingProvider>,
        config: EmbeddingConfig,
    ) -> RagResult<Self> {
        if provider.dimensions() != config.dimensions {
            return Err(EmbeddingError::DimensionMismatch {
                expected: config.dimensions,
                actual: provider.dimensions(),
            }
            .into());
        }
        if !provider.is_available() {
            return Err(EmbeddingError::ProviderUnavailable {
                provider: provider.name().to_string(),
            }
            .into());
        }

        let cache = L1MemoryCache::new(config.l1_cache_size);
        info!(
            provider = provider.name(),
            dims = config.dimensions,
            l1_cache_size = config.l1_cache_size,
            "EmbeddingEngine initialized"
        );

        Ok(Self {
            provider,
            cache,
            config,
        })
    }

    /// Name of the wrapped provider.
    pub fn active_provider(&self) -> &str {
        self.provider.name()
    }

    pub fn config(&self) -> &EmbeddingConfig {
        &self.config
    }

    pub fn cache(&self) -> &L1MemoryCache {
        &self.cache
    }
}

impl IEmbeddingProvider for EmbeddingEngine {
    fn embed(&self, text: &str) -> RagResult<Vec<f32>> {
        let key = content_key(text);
        if let Some(vec) = self.cache.get(&key) {
            debug!(hash = %key, "embedding cache hit");
            return Ok(vec);
        }

        let embedding = self.provider.embed(text)?;
        validate_dimensions(&embedding, self.config.dimensions)?;
        self.cache.insert(key, embedding.clone());
        Ok(embedding)
    }

    fn embed_batch(&self, texts: &[String]) -> RagResult<Vec<Vec<f32>>> {
        let keys: Vec<String> = texts.iter().map(|t| content_key(t)).collect();
        let mut out: Vec<Option<Vec<f32>>> = keys.iter().map(|k| self.cache.get(k)).collect();

        let missing: Vec<usize> = (0..texts.len()).filter(|&i| out[i].is_none()).collect();
        debug!(
            total = texts.len(),
            misses = missing.len(),
            "embedding batch"
        );

        if !missing.is_empty() {
            let to_embed: Vec<String> = missing.iter().map(|&i| texts[i].clone()).collect();
            let fresh = self.provider.embed_batch(&to_embed)?;
            if fresh.len() != to_embed.len() {
                return Err(EmbeddingError::BatchMismatch {
                    sent: to_embed.len(),
                    received: fresh.len(),
                }
                .into());
            }
            for (slot, embedding) in missing.into_iter().zip(fresh) {
                validate_dimensions(&embedding, self.config.dimensions)?;
                self.cache.insert(keys[slot].clone(), embedding.clone());
                out[slot] = Some(embedding);
            }
        }

        Ok(out.into_iter().flatten().collect())
    }

    fn dimensions(&self) -> usize {
        self.config.dimensions
    }

    fn name(&self) -> &str {
        self.provider.name()
    }

    fn is_available(&self) -> bool {
        self.provider.is_available()
    }
}

/// `DimensionMismatch` unless `embedding.len() == expected`.
pub fn validate_dimensions(embedding: &[f32], expected: usize) -> RagResult<()> {
    if embedding.len() != expected {
        return Err(EmbeddingError::DimensionMismatch {
            expected,
            actual: embedding.len(),
        }
        .into());
    }
    Ok(())
}
