use serde::{Deserialize, Serialize};

/// Outcome of one ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestReceipt {
    pub document_id: String,
    pub chunk_count: usize,
}

/// Outcome of a full re-embedding pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReindexReport {
    /// Chunks present when the pass started.
    pub total: usize,
    /// Rows whose embedding was rewritten.
    pub updated: usize,
    pub batches: usize,
}
