//! Insert, get, count for documents.

use rusqlite::{params, Connection, OptionalExtension};

use rag_core::errors::RagResult;
use rag_core::models::Document;

use super::parse_timestamp;
use crate::to_storage_err;

pub fn insert_document(conn: &Connection, doc: &Document) -> RagResult<()> {
    conn.execute(
        "INSERT INTO documents (id, source, raw_text, created_at) VALUES (?1, ?2, ?3, ?4)",
        params![doc.id, doc.source, doc.raw_text, doc.created_at.to_rfc3339()],
    )
    .map_err(|e| to_storage_err(format!("insert_document: {e}")))?;
    Ok(())
}

pub fn get_document(conn: &Connection, id: &str) -> RagResult<Option<Document>> {
    let row = conn
        .query_row(
            "SELECT id, source, raw_text, created_at FROM documents WHERE id = ?1",
            params![id],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                ))
            },
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;

    row.map(|(id, source, raw_text, created_at)| {
        Ok(Document {
            id,
            source,
            raw_text,
            created_at: parse_timestamp(&created_at)?,
        })
    })
    .transpose()
}

pub fn count_documents(conn: &Connection) -> RagResult<usize> {
    let n: i64 = conn
        .query_row("SELECT COUNT(*) FROM documents", [], |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(n as usize)
}
