//! Keyword channel: chunks containing every query term.

use rag_core::errors::RagResult;
use rag_core::models::ChunkRecord;
use rag_core::traits::IChunkStorage;

/// Result from keyword search.
#[derive(Debug, Clone)]
pub struct KeywordResult {
    pub chunk: ChunkRecord,
    /// Positional rank (storage returns matches in insertion order).
    pub rank: usize,
}

/// Whitespace-separated query terms. Empty or blank queries have none.
pub fn split_terms(query: &str) -> Vec<String> {
    query.split_whitespace().map(str::to_string).collect()
}

/// Case-insensitive AND match of every term in `query`.
pub fn search_keywords(
    storage: &dyn IChunkStorage,
    query: &str,
    limit: usize,
) -> RagResult<Vec<KeywordResult>> {
    let terms = split_terms(query);
    if terms.is_empty() || limit == 0 {
        return Ok(Vec::new());
    }

    let chunks = storage.keyword_search(&terms, limit)?;

    Ok(chunks
        .into_iter()
        .enumerate()
        .map(|(rank, chunk)| KeywordResult { chunk, rank })
        .collect())
}
