//! RetrievalEngine: implements IRetriever.
//!
//! Pipeline: embed query → hybrid search (vector + keyword → RRF) → round
//! scores → `ScoredChunk`.

use rag_core::config::RetrievalConfig;
use rag_core::constants::SCORE_DECIMALS;
use rag_core::errors::RagResult;
use rag_core::models::ScoredChunk;
use rag_core::traits::{IChunkStorage, IEmbeddingProvider, IRetriever};
use rag_observability::RequestContext;
use tracing::{debug, info};

use crate::search::HybridSearcher;

pub struct RetrievalEngine<'a> {
    storage: &'a dyn IChunkStorage,
    embedder: &'a dyn IEmbeddingProvider,
    config: RetrievalConfig,
}

impl<'a> RetrievalEngine<'a> {
    pub fn new(
        storage: &'a dyn IChunkStorage,
        embedder: &'a dyn IEmbeddingProvider,
        config: RetrievalConfig,
    ) -> Self {
        Self {
            storage,
            embedder,
            config,
        }
    }

    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    /// Run the full pipeline under `ctx`. The deadline is checked after the
    /// query is embedded and before storage is touched.
    pub fn retrieve_with_context(
        &self,
        ctx: &RequestContext,
        query: &str,
        top_k: usize,
    ) -> RagResult<Vec<ScoredChunk>> {
        let _span = rag_observability::retrieval_span!(query, top_k).entered();
        if top_k == 0 {
            return Ok(Vec::new());
        }

        let query_embedding = self.embedder.embed(query)?;
        debug!(dims = query_embedding.len(), "query embedded");

        ctx.check_deadline("search")?;
        let searcher = HybridSearcher::new(self.storage, self.config.rrf_k);
        let candidates = searcher.search(query, &query_embedding, top_k)?;

        let results: Vec<ScoredChunk> = candidates
            .iter()
            .map(|c| ScoredChunk::from_record(&c.chunk, round_score(c.rrf_score)))
            .collect();

        info!(
            results = results.len(),
            top_k,
            rrf_k = self.config.rrf_k,
            "retrieval complete"
        );
        Ok(results)
    }
}

impl<'a> IRetriever for RetrievalEngine<'a> {
    fn retrieve(&self, query: &str, top_k: usize) -> RagResult<Vec<ScoredChunk>> {
        self.retrieve_with_context(&RequestContext::new("retrieve"), query, top_k)
    }
}

/// Round to `SCORE_DECIMALS` places.
pub fn round_score(score: f64) -> f64 {
    let scale = 10f64.powi(SCORE_DECIMALS);
    (score * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::round_score;

    #[test]
    fn rounds_to_six_places() {
        assert_eq!(round_score(1.0 / 61.0), 0.016393);
        assert_eq!(round_score(0.0), 0.0);
        assert_eq!(round_score(0.032787_4), 0.032787);
    }
}
