//! Single write connection behind `tokio::sync::Mutex`.

use std::path::Path;

use rusqlite::Connection;
use tokio::sync::Mutex;

use rag_core::config::StorageConfig;
use rag_core::errors::RagResult;

use super::functions::register_functions;
use super::pragmas::apply_pragmas;
use crate::to_storage_err;

pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    pub fn open(path: &Path, config: &StorageConfig) -> RagResult<Self> {
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&conn, config)?;
        register_functions(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory(config: &StorageConfig) -> RagResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&conn, config)?;
        register_functions(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Acquire the write lock and execute a closure with the connection.
    pub async fn with_conn<F, T>(&self, f: F) -> RagResult<T>
    where
        F: FnOnce(&Connection) -> RagResult<T>,
    {
        let guard = self.conn.lock().await;
        f(&guard)
    }

    /// Synchronous access. Must not be called from inside an async task;
    /// async callers go through `spawn_blocking` or `with_conn`.
    pub fn with_conn_sync<F, T>(&self, f: F) -> RagResult<T>
    where
        F: FnOnce(&Connection) -> RagResult<T>,
    {
        let guard = self.conn.blocking_lock();
        f(&guard)
    }
}
