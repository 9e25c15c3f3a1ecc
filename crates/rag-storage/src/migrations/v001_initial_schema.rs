//! v001: documents and chunks.

use rusqlite::Connection;

use rag_core::errors::RagResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> RagResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS documents (
            id          TEXT PRIMARY KEY,
            source      TEXT NOT NULL,
            raw_text    TEXT NOT NULL,
            created_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS chunks (
            id           TEXT PRIMARY KEY,
            document_id  TEXT NOT NULL,
            text         TEXT NOT NULL,
            chunk_index  INTEGER NOT NULL,
            source       TEXT NOT NULL,
            embedding    BLOB NOT NULL,
            dimensions   INTEGER NOT NULL,
            created_at   TEXT NOT NULL,
            UNIQUE (document_id, chunk_index),
            FOREIGN KEY (document_id) REFERENCES documents(id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_chunks_document ON chunks(document_id);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
