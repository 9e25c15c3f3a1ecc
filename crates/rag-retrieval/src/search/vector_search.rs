//! Vector channel: brute-force cosine similarity over stored embeddings.

use rag_core::errors::RagResult;
use rag_core::models::ChunkRecord;
use rag_core::traits::IChunkStorage;

/// Result from vector similarity search.
#[derive(Debug, Clone)]
pub struct VectorResult {
    pub chunk: ChunkRecord,
    /// Cosine similarity in [-1.0, 1.0].
    pub similarity: f64,
    /// Positional rank in the result set.
    pub rank: usize,
}

/// Run vector similarity search using a pre-computed query embedding.
/// Returns results ordered by cosine similarity descending.
pub fn search_vector(
    storage: &dyn IChunkStorage,
    query_embedding: &[f32],
    limit: usize,
) -> RagResult<Vec<VectorResult>> {
    if query_embedding.is_empty() || limit == 0 {
        return Ok(Vec::new());
    }

    let results = storage.vector_search(query_embedding, limit)?;

    Ok(results
        .into_iter()
        .enumerate()
        .map(|(rank, (chunk, similarity))| VectorResult {
            chunk,
            similarity,
            rank,
        })
        .collect())
}
