//! Versioned schema migrations, tracked in `schema_version`.

mod v001_initial_schema;
mod v002_embedding_metadata;

use rusqlite::{params, Connection};
use tracing::info;

use rag_core::errors::{RagResult, StorageError};

use crate::to_storage_err;

type MigrationFn = fn(&Connection) -> RagResult<()>;

const MIGRATIONS: &[(u32, &str, MigrationFn)] = &[
    (1, "initial_schema", v001_initial_schema::migrate),
    (2, "embedding_metadata", v002_embedding_metadata::migrate),
];

/// Highest schema version this build knows about.
pub const LATEST_VERSION: u32 = 2;

/// Version recorded in the database, 0 for a fresh file.
pub fn current_version(conn: &Connection) -> RagResult<u32> {
    ensure_version_table(conn)?;
    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )
    .map_err(|e| to_storage_err(e.to_string()))
}

/// Apply every pending migration, each in its own transaction.
/// Returns the resulting version.
pub fn run_migrations(conn: &Connection) -> RagResult<u32> {
    let mut version = current_version(conn)?;

    for &(target, name, migrate) in MIGRATIONS {
        if target <= version {
            continue;
        }
        let fail = |reason: String| StorageError::MigrationFailed {
            version: target,
            reason,
        };

        let tx = conn
            .unchecked_transaction()
            .map_err(|e| fail(e.to_string()))?;
        migrate(&tx).map_err(|e| fail(e.to_string()))?;
        tx.execute(
            "INSERT INTO schema_version (version) VALUES (?1)",
            params![target],
        )
        .map_err(|e| fail(e.to_string()))?;
        tx.commit().map_err(|e| fail(e.to_string()))?;

        info!(version = target, name, "migration applied");
        version = target;
    }

    Ok(version)
}

fn ensure_version_table(conn: &Connection) -> RagResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS schema_version (
            version     INTEGER PRIMARY KEY,
            applied_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))
}
