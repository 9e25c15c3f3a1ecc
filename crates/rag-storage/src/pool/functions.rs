//! Scalar SQL functions registered on every connection.

use rusqlite::functions::FunctionFlags;
use rusqlite::Connection;

use rag_core::errors::RagResult;

use crate::to_storage_err;

/// `contains_folded(text, term)`: whether `text` contains `term` after
/// Unicode lowercasing. `term` is expected to be lowercased already.
pub const CONTAINS_FOLDED: &str = "contains_folded";

pub fn register_functions(conn: &Connection) -> RagResult<()> {
    conn.create_scalar_function(
        CONTAINS_FOLDED,
        2,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let text: String = ctx.get(0)?;
            let term: String = ctx.get(1)?;
            Ok(text.to_lowercase().contains(&term))
        },
    )
    .map_err(|e| to_storage_err(format!("register {CONTAINS_FOLDED}: {e}")))
}
