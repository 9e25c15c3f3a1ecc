//! v002: when each chunk was last embedded, plus a width index for the
//! vector scan.

use rusqlite::Connection;

use rag_core::errors::RagResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> RagResult<()> {
    conn.execute_batch(
        "
        ALTER TABLE chunks ADD COLUMN embedded_at TEXT;
        UPDATE chunks SET embedded_at = created_at WHERE embedded_at IS NULL;
        CREATE INDEX IF NOT EXISTS idx_chunks_dimensions ON chunks(dimensions);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
