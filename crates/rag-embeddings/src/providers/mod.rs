//! Provider registry. `"hash"` is the only provider.

pub mod hash_embedder;

pub use hash_embedder::HashEmbedder;

use rag_core::config::EmbeddingConfig;
use rag_core::errors::{EmbeddingError, RagResult};
use rag_core::traits::IEmbeddingProvider;
use tracing::info;

/// Create the provider named by `config.provider`.
pub fn create_provider(config: &EmbeddingConfig) -> RagResult<Box<dyn IEmbeddingProvider>> {
    match config.provider.as_str() {
        "hash" => {
            info!(
                provider = "hash",
                dims = config.dimensions,
                "embedding provider loaded"
            );
            Ok(Box::new(HashEmbedder::new(config.dimensions)))
        }
        other => Err(EmbeddingError::ProviderUnavailable {
            provider: other.to_string(),
        }
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_provider_is_created_with_configured_dims() {
        let config = EmbeddingConfig {
            dimensions: 64,
            ..Default::default()
        };
        let provider = create_provider(&config).unwrap();
        assert_eq!(provider.dimensions(), 64);
        assert_eq!(provider.name(), "hash");
    }

    #[test]
    fn unknown_provider_is_unavailable() {
        let config = EmbeddingConfig {
            provider: "onnx".to_string(),
            ..Default::default()
        };
        let err = create_provider(&config).err().unwrap();
        assert!(err.to_string().contains("onnx"));
    }
}
