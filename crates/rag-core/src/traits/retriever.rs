use crate::errors::RagResult;
use crate::models::ScoredChunk;

/// Hybrid retrieval.
pub trait IRetriever: Send + Sync {
    /// At most `top_k` chunks, best first.
    fn retrieve(&self, query: &str, top_k: usize) -> RagResult<Vec<ScoredChunk>>;
}
