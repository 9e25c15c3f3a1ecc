//! PRAGMA configuration applied to every SQLite connection.

use rusqlite::Connection;

use rag_core::config::StorageConfig;
use rag_core::errors::RagResult;

use crate::to_storage_err;

/// Pragmas for the write connection.
pub fn apply_pragmas(conn: &Connection, config: &StorageConfig) -> RagResult<()> {
    let journal = if config.wal_mode { "WAL" } else { "DELETE" };
    conn.execute_batch(&format!(
        "
        PRAGMA journal_mode = {journal};
        PRAGMA synchronous = NORMAL;
        PRAGMA mmap_size = {mmap};
        PRAGMA cache_size = {cache};
        PRAGMA busy_timeout = {busy};
        PRAGMA foreign_keys = ON;
        ",
        mmap = config.mmap_size,
        cache = config.cache_size,
        busy = config.busy_timeout_ms,
    ))
    .map_err(|e| to_storage_err(e.to_string()))
}

/// Pragmas for read connections. Skips the write-side settings.
pub fn apply_read_pragmas(conn: &Connection, config: &StorageConfig) -> RagResult<()> {
    conn.execute_batch(&format!(
        "
        PRAGMA query_only = ON;
        PRAGMA mmap_size = {mmap};
        PRAGMA cache_size = {cache};
        PRAGMA busy_timeout = {busy};
        PRAGMA temp_store = MEMORY;
        ",
        mmap = config.mmap_size,
        cache = config.cache_size,
        busy = config.busy_timeout_ms,
    ))
    .map_err(|e| to_storage_err(e.to_string()))
}

/// Whether the connection is in WAL mode.
pub fn verify_wal_mode(conn: &Connection) -> RagResult<bool> {
    let mode: String = conn
        .pragma_query_value(None, "journal_mode", |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(mode.eq_ignore_ascii_case("wal"))
}
