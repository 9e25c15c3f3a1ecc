//! Connection pool managing read/write connections.

pub mod functions;
pub mod pragmas;
pub mod read_pool;
pub mod write_connection;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rag_core::config::StorageConfig;
use rag_core::errors::RagResult;

pub use read_pool::ReadPool;
pub use write_connection::WriteConnection;

/// The single write connection plus the read connection pool.
pub struct ConnectionPool {
    pub writer: Arc<WriteConnection>,
    pub readers: Arc<ReadPool>,
    pub db_path: Option<PathBuf>,
}

impl ConnectionPool {
    /// Open a pool for the given database file. The writer is opened first so
    /// the file exists before the read-only connections attach.
    pub fn open(path: &Path, config: &StorageConfig) -> RagResult<Self> {
        let writer = Arc::new(WriteConnection::open(path, config)?);
        let readers = Arc::new(ReadPool::open(path, config)?);
        Ok(Self {
            writer,
            readers,
            db_path: Some(path.to_path_buf()),
        })
    }

    /// In-memory pool. Readers would be separate databases, so callers must
    /// route reads through the writer.
    pub fn open_in_memory(config: &StorageConfig) -> RagResult<Self> {
        let writer = Arc::new(WriteConnection::open_in_memory(config)?);
        let readers = Arc::new(ReadPool::open_in_memory(config)?);
        Ok(Self {
            writer,
            readers,
            db_path: None,
        })
    }
}
