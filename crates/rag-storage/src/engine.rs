//! StorageEngine: owns the ConnectionPool and implements IChunkStorage.

use std::path::Path;

use tracing::{debug, info};

use rag_core::config::StorageConfig;
use rag_core::errors::RagResult;
use rag_core::models::{ChunkRecord, Document, NewChunk};
use rag_core::traits::IChunkStorage;

use crate::migrations;
use crate::pool::ConnectionPool;
use crate::queries::{chunk_ops, document_ops, keyword_search, vector_search};
use crate::to_storage_err;

/// Path that selects an in-memory database.
const MEMORY_PATH: &str = ":memory:";

pub struct StorageEngine {
    pool: ConnectionPool,
    /// File-backed engines read through the pool. In-memory engines route
    /// reads through the writer, since pool connections would be separate
    /// databases.
    use_read_pool: bool,
}

impl StorageEngine {
    /// Open a file-backed engine with default settings.
    pub fn open(path: &Path) -> RagResult<Self> {
        Self::open_at(path, &StorageConfig::default())
    }

    /// Open an in-memory engine (tests, throwaway runs).
    pub fn open_in_memory() -> RagResult<Self> {
        Self::open_in_memory_with(&StorageConfig::default())
    }

    /// Open whatever `config.db_path` names. `":memory:"` gives an
    /// in-memory engine.
    pub fn open_with_config(config: &StorageConfig) -> RagResult<Self> {
        if config.db_path == MEMORY_PATH {
            Self::open_in_memory_with(config)
        } else {
            Self::open_at(Path::new(&config.db_path), config)
        }
    }

    fn open_at(path: &Path, config: &StorageConfig) -> RagResult<Self> {
        let pool = ConnectionPool::open(path, config)?;
        let engine = Self {
            pool,
            use_read_pool: true,
        };
        engine.initialize()?;
        info!(path = %path.display(), readers = engine.pool.readers.size(), "storage opened");
        Ok(engine)
    }

    fn open_in_memory_with(config: &StorageConfig) -> RagResult<Self> {
        let pool = ConnectionPool::open_in_memory(config)?;
        let engine = Self {
            pool,
            use_read_pool: false,
        };
        engine.initialize()?;
        debug!("in-memory storage opened");
        Ok(engine)
    }

    fn initialize(&self) -> RagResult<()> {
        self.pool.writer.with_conn_sync(|conn| {
            migrations::run_migrations(conn)?;
            Ok(())
        })
    }

    /// The connection pool, for callers that need raw access.
    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    pub fn schema_version(&self) -> RagResult<u32> {
        self.pool
            .writer
            .with_conn_sync(migrations::current_version)
    }

    fn with_reader<F, T>(&self, f: F) -> RagResult<T>
    where
        F: FnOnce(&rusqlite::Connection) -> RagResult<T>,
    {
        if self.use_read_pool {
            self.pool.readers.with_conn(f)
        } else {
            self.pool.writer.with_conn_sync(f)
        }
    }
}

impl IChunkStorage for StorageEngine {
    fn insert_document(&self, source: &str, raw_text: &str) -> RagResult<Document> {
        let doc = Document::new(source, raw_text);
        self.pool
            .writer
            .with_conn_sync(|conn| document_ops::insert_document(conn, &doc))?;
        Ok(doc)
    }

    fn insert_chunks(&self, document_id: &str, rows: &[NewChunk]) -> RagResult<usize> {
        self.pool.writer.with_conn_sync(|conn| {
            let tx = conn
                .unchecked_transaction()
                .map_err(|e| to_storage_err(format!("insert_chunks begin: {e}")))?;
            let n = chunk_ops::insert_chunks(&tx, document_id, rows, chrono::Utc::now())?;
            tx.commit()
                .map_err(|e| to_storage_err(format!("insert_chunks commit: {e}")))?;
            Ok(n)
        })
    }

    fn store_document_with_chunks_checked(
        &self,
        source: &str,
        raw_text: &str,
        rows: &[NewChunk],
        pre_commit: &dyn Fn() -> RagResult<()>,
    ) -> RagResult<(Document, usize)> {
        let doc = Document::new(source, raw_text);
        let count = self.pool.writer.with_conn_sync(|conn| {
            // Dropping `tx` on any early return rolls everything back.
            let tx = conn
                .unchecked_transaction()
                .map_err(|e| to_storage_err(format!("store_document begin: {e}")))?;
            document_ops::insert_document(&tx, &doc)?;
            let n = chunk_ops::insert_chunks(&tx, &doc.id, rows, doc.created_at)?;
            pre_commit()?;
            tx.commit()
                .map_err(|e| to_storage_err(format!("store_document commit: {e}")))?;
            Ok(n)
        })?;
        debug!(document_id = %doc.id, chunks = count, "document stored");
        Ok((doc, count))
    }

    fn update_embeddings(&self, updates: &[(String, Vec<f32>)]) -> RagResult<usize> {
        self.pool
            .writer
            .with_conn_sync(|conn| chunk_ops::update_embeddings(conn, updates))
    }

    fn vector_search(
        &self,
        embedding: &[f32],
        limit: usize,
    ) -> RagResult<Vec<(ChunkRecord, f64)>> {
        self.with_reader(|conn| vector_search::search_vector(conn, embedding, limit))
    }

    fn keyword_search(&self, terms: &[String], limit: usize) -> RagResult<Vec<ChunkRecord>> {
        self.with_reader(|conn| keyword_search::search_keywords(conn, terms, limit))
    }

    fn get_document(&self, id: &str) -> RagResult<Option<Document>> {
        self.with_reader(|conn| document_ops::get_document(conn, id))
    }

    fn get_chunks(&self, document_id: &str) -> RagResult<Vec<ChunkRecord>> {
        self.with_reader(|conn| chunk_ops::get_chunks(conn, document_id))
    }

    fn list_chunks(&self, offset: usize, limit: usize) -> RagResult<Vec<ChunkRecord>> {
        self.with_reader(|conn| chunk_ops::list_chunks(conn, offset, limit))
    }

    fn count_documents(&self) -> RagResult<usize> {
        self.with_reader(document_ops::count_documents)
    }

    fn count_chunks(&self) -> RagResult<usize> {
        self.with_reader(chunk_ops::count_chunks)
    }
}
