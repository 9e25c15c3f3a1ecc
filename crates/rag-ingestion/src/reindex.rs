//! Re-embed every stored chunk with the current embedder.

use rag_core::errors::{EmbeddingError, RagError, RagResult};
use rag_core::models::ReindexReport;
use rag_core::traits::{IChunkStorage, IEmbeddingProvider};
use rag_observability::tracing_setup::events;
use rag_observability::RequestContext;
use tracing::info;

pub struct Reindexer<'a> {
    storage: &'a dyn IChunkStorage,
    embedder: &'a dyn IEmbeddingProvider,
}

impl<'a> Reindexer<'a> {
    pub fn new(storage: &'a dyn IChunkStorage, embedder: &'a dyn IEmbeddingProvider) -> Self {
        Self { storage, embedder }
    }

    pub fn run(&self, batch_size: usize) -> RagResult<ReindexReport> {
        self.run_with_context(&RequestContext::new("reindex"), batch_size)
    }

    /// Pages through chunks in insertion order. Each page is embedded with
    /// one `embed_batch` call and written in one transaction.
    pub fn run_with_context(
        &self,
        ctx: &RequestContext,
        batch_size: usize,
    ) -> RagResult<ReindexReport> {
        if batch_size == 0 {
            return Err(RagError::invalid_argument("batch_size must be positive"));
        }
        let _span = rag_observability::reindex_span!(batch_size).entered();

        let total = self.storage.count_chunks()?;
        info!(
            total,
            embedding_dim = self.embedder.dimensions(),
            "reindex started"
        );

        let mut report = ReindexReport {
            total,
            ..Default::default()
        };
        let mut offset = 0;
        loop {
            ctx.check_deadline("reindex_batch")?;
            let page = self.storage.list_chunks(offset, batch_size)?;
            if page.is_empty() {
                break;
            }

            let texts: Vec<String> = page.iter().map(|c| c.text.clone()).collect();
            let embeddings = self.embedder.embed_batch(&texts)?;
            if embeddings.len() != page.len() {
                return Err(EmbeddingError::BatchMismatch {
                    sent: page.len(),
                    received: embeddings.len(),
                }
                .into());
            }

            let updates: Vec<(String, Vec<f32>)> = page
                .iter()
                .map(|c| c.id.clone())
                .zip(embeddings)
                .collect();
            report.updated += self.storage.update_embeddings(&updates)?;
            report.batches += 1;
            offset += page.len();

            events::reindex_batch(report.batches, report.updated, total);
        }

        info!(
            updated = report.updated,
            batches = report.batches,
            "reindex finished"
        );
        Ok(report)
    }
}
