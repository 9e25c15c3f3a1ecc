//! Chunk → embed → persist as one unit.

use rag_core::config::ChunkingConfig;
use rag_core::errors::{EmbeddingError, RagResult};
use rag_core::models::{IngestReceipt, NewChunk};
use rag_core::traits::{IChunkStorage, IEmbeddingProvider};
use rag_observability::tracing_setup::events;
use rag_observability::RequestContext;
use tracing::debug;

use crate::chunker::Chunker;

pub struct IngestionPipeline<'a> {
    storage: &'a dyn IChunkStorage,
    embedder: &'a dyn IEmbeddingProvider,
    chunker: Chunker,
}

impl<'a> IngestionPipeline<'a> {
    pub fn new(
        storage: &'a dyn IChunkStorage,
        embedder: &'a dyn IEmbeddingProvider,
        config: &ChunkingConfig,
    ) -> RagResult<Self> {
        Ok(Self {
            storage,
            embedder,
            chunker: Chunker::from_config(config)?,
        })
    }

    pub fn with_chunker(
        storage: &'a dyn IChunkStorage,
        embedder: &'a dyn IEmbeddingProvider,
        chunker: Chunker,
    ) -> Self {
        Self {
            storage,
            embedder,
            chunker,
        }
    }

    /// Ingest without a deadline.
    pub fn ingest(&self, text: &str, source: &str) -> RagResult<IngestReceipt> {
        self.ingest_with_context(&RequestContext::new("ingest"), text, source)
    }

    /// Store `text` as a document plus its embedded chunks. Either all rows
    /// are written or none are, and nothing commits once the deadline in
    /// `ctx` has passed.
    pub fn ingest_with_context(
        &self,
        ctx: &RequestContext,
        text: &str,
        source: &str,
    ) -> RagResult<IngestReceipt> {
        let _span = rag_observability::ingestion_span!(source, text.len()).entered();

        let chunks = self.chunker.chunk(text);
        debug!(chunks = chunks.len(), "text chunked");

        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let embeddings = self.embedder.embed_batch(&texts)?;
        if embeddings.len() != texts.len() {
            return Err(EmbeddingError::BatchMismatch {
                sent: texts.len(),
                received: embeddings.len(),
            }
            .into());
        }

        let rows: Vec<NewChunk> = chunks
            .into_iter()
            .zip(embeddings)
            .map(|(chunk, embedding)| NewChunk {
                text: chunk.text,
                chunk_index: chunk.index,
                source: source.to_string(),
                embedding,
            })
            .collect();

        ctx.check_deadline("persist")?;
        let (doc, count) = self.storage.store_document_with_chunks_checked(
            source,
            text,
            &rows,
            &|| ctx.check_deadline("commit"),
        )?;

        events::document_ingested(&doc.id, source, count);
        Ok(IngestReceipt {
            document_id: doc.id,
            chunk_count: count,
        })
    }
}
