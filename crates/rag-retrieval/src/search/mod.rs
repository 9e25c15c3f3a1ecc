//! HybridSearcher coordinating vector + keyword channels and RRF.

pub mod keyword_search;
pub mod rrf_fusion;
pub mod vector_search;

use std::collections::HashMap;

use rag_core::constants::CANDIDATE_MULTIPLIER;
use rag_core::errors::{RagResult, RetrievalError};
use rag_core::models::ChunkRecord;
use rag_core::traits::IChunkStorage;
use tracing::{debug, warn};

/// A candidate after RRF fusion.
#[derive(Debug, Clone)]
pub struct FusedCandidate {
    pub chunk: ChunkRecord,
    /// Fused RRF score (higher = more relevant), unrounded.
    pub rrf_score: f64,
}

/// Hybrid search combining vector similarity and keyword matching via
/// Reciprocal Rank Fusion.
pub struct HybridSearcher<'a> {
    storage: &'a dyn IChunkStorage,
    /// RRF smoothing constant (default 60).
    rrf_k: u32,
}

impl<'a> HybridSearcher<'a> {
    pub fn new(storage: &'a dyn IChunkStorage, rrf_k: u32) -> Self {
        Self { storage, rrf_k }
    }

    /// Run both channels concurrently and fuse their rankings.
    ///
    /// Each channel is asked for `limit * CANDIDATE_MULTIPLIER` candidates.
    /// Returns at most `limit` candidates sorted by fused score descending.
    /// A failure in either channel fails the whole search.
    pub fn search(
        &self,
        query: &str,
        query_embedding: &[f32],
        limit: usize,
    ) -> RagResult<Vec<FusedCandidate>> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let candidate_limit = limit.saturating_mul(CANDIDATE_MULTIPLIER);

        let (vector, keyword) = rayon::join(
            || vector_search::search_vector(self.storage, query_embedding, candidate_limit),
            || keyword_search::search_keywords(self.storage, query, candidate_limit),
        );
        let vector = vector.inspect_err(|e| warn!(channel = "vector", error = %e, "channel failed"))?;
        let keyword =
            keyword.inspect_err(|e| warn!(channel = "keyword", error = %e, "channel failed"))?;

        debug!(
            vector = vector.len(),
            keyword = keyword.len(),
            "channel candidates"
        );

        let vector_ranked: Vec<String> = vector.iter().map(|r| r.chunk.id.clone()).collect();
        let keyword_ranked: Vec<String> = keyword.iter().map(|r| r.chunk.id.clone()).collect();

        let mut lookup: HashMap<String, ChunkRecord> = HashMap::new();
        for chunk in vector
            .into_iter()
            .map(|r| r.chunk)
            .chain(keyword.into_iter().map(|r| r.chunk))
        {
            lookup.entry(chunk.id.clone()).or_insert(chunk);
        }

        let mut fused = rrf_fusion::fuse_ranked(&[vector_ranked, keyword_ranked], self.rrf_k);
        fused.truncate(limit);

        fused
            .into_iter()
            .map(|(id, rrf_score)| match lookup.remove(&id) {
                Some(chunk) => Ok(FusedCandidate { chunk, rrf_score }),
                None => Err(RetrievalError::MissingCandidate { id }.into()),
            })
            .collect()
    }
}
