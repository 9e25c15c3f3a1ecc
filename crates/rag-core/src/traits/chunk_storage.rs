use std::sync::Arc;

use crate::errors::RagResult;
use crate::models::{ChunkRecord, Document, NewChunk};

/// Documents + chunks + the two search channels + maintenance reads.
pub trait IChunkStorage: Send + Sync {
    // --- Writes ---
    fn insert_document(&self, source: &str, raw_text: &str) -> RagResult<Document>;
    fn insert_chunks(&self, document_id: &str, rows: &[NewChunk]) -> RagResult<usize>;
    /// Document and all of its chunks in one transaction. Nothing is kept
    /// if any row fails.
    fn store_document_with_chunks(
        &self,
        source: &str,
        raw_text: &str,
        rows: &[NewChunk],
    ) -> RagResult<(Document, usize)> {
        self.store_document_with_chunks_checked(source, raw_text, rows, &|| Ok(()))
    }
    /// Like `store_document_with_chunks`, but runs `pre_commit` after every
    /// row is written and immediately before the commit. An error from
    /// `pre_commit` rolls the whole unit back and is returned unchanged.
    fn store_document_with_chunks_checked(
        &self,
        source: &str,
        raw_text: &str,
        rows: &[NewChunk],
        pre_commit: &dyn Fn() -> RagResult<()>,
    ) -> RagResult<(Document, usize)>;
    /// Replace only the embedding of each listed chunk. Returns rows touched.
    fn update_embeddings(&self, updates: &[(String, Vec<f32>)]) -> RagResult<usize>;

    // --- Search ---
    /// Nearest chunks by cosine similarity, best first, with the similarity.
    fn vector_search(&self, embedding: &[f32], limit: usize)
        -> RagResult<Vec<(ChunkRecord, f64)>>;
    /// Chunks containing every term (case-insensitive), in insertion order.
    /// No terms means no results.
    fn keyword_search(&self, terms: &[String], limit: usize) -> RagResult<Vec<ChunkRecord>>;

    // --- Reads ---
    fn get_document(&self, id: &str) -> RagResult<Option<Document>>;
    fn get_chunks(&self, document_id: &str) -> RagResult<Vec<ChunkRecord>>;
    fn list_chunks(&self, offset: usize, limit: usize) -> RagResult<Vec<ChunkRecord>>;

    // --- Aggregation ---
    fn count_documents(&self) -> RagResult<usize>;
    fn count_chunks(&self) -> RagResult<usize>;
}

impl<T: IChunkStorage + ?Sized> IChunkStorage for Arc<T> {
    fn insert_document(&self, source: &str, raw_text: &str) -> RagResult<Document> {
        (**self).insert_document(source, raw_text)
    }

    fn insert_chunks(&self, document_id: &str, rows: &[NewChunk]) -> RagResult<usize> {
        (**self).insert_chunks(document_id, rows)
    }

    fn store_document_with_chunks_checked(
        &self,
        source: &str,
        raw_text: &str,
        rows: &[NewChunk],
        pre_commit: &dyn Fn() -> RagResult<()>,
    ) -> RagResult<(Document, usize)> {
        (**self).store_document_with_chunks_checked(source, raw_text, rows, pre_commit)
    }

    fn update_embeddings(&self, updates: &[(String, Vec<f32>)]) -> RagResult<usize> {
        (**self).update_embeddings(updates)
    }

    fn vector_search(
        &self,
        embedding: &[f32],
        limit: usize,
    ) -> RagResult<Vec<(ChunkRecord, f64)>> {
        (**self).vector_search(embedding, limit)
    }

    fn keyword_search(&self, terms: &[String], limit: usize) -> RagResult<Vec<ChunkRecord>> {
        (**self).keyword_search(terms, limit)
    }

    fn get_document(&self, id: &str) -> RagResult<Option<Document>> {
        (**self).get_document(id)
    }

    fn get_chunks(&self, document_id: &str) -> RagResult<Vec<ChunkRecord>> {
        (**self).get_chunks(document_id)
    }

    fn list_chunks(&self, offset: usize, limit: usize) -> RagResult<Vec<ChunkRecord>> {
        (**self).list_chunks(offset, limit)
    }

    fn count_documents(&self) -> RagResult<usize> {
        (**self).count_documents()
    }

    fn count_chunks(&self) -> RagResult<usize> {
        (**self).count_chunks()
    }
}
