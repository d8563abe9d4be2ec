//! Versioned schema migrations, applied in order on open.

mod v001_catalog;
mod v002_history;
mod v003_assignments;

use rusqlite::{params, Connection};

use sequencer_core::errors::{SequencerError, SequencerResult, StorageError};

use crate::to_storage_err;

type Migration = fn(&Connection) -> SequencerResult<()>;

const MIGRATIONS: &[(u32, Migration)] = &[
    (1, v001_catalog::migrate),
    (2, v002_history::migrate),
    (3, v003_assignments::migrate),
];

/// Latest schema version this build knows about.
pub const LATEST_VERSION: u32 = 3;

/// Apply every migration newer than the recorded schema version.
pub fn run_migrations(conn: &Connection) -> SequencerResult<u32> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version     INTEGER PRIMARY KEY,
            applied_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    let current = current_version(conn)?;
    for (version, migrate) in MIGRATIONS.iter().filter(|(v, _)| *v > current) {
        migrate(conn).map_err(|e| {
            SequencerError::Storage(StorageError::MigrationFailed {
                version: *version,
                reason: e.to_string(),
            })
        })?;
        conn.execute(
            "INSERT INTO schema_version (version) VALUES (?1)",
            params![version],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
        tracing::debug!(version, "applied migration");
    }

    current_version(conn)
}

/// Highest applied schema version, 0 for a fresh database.
pub fn current_version(conn: &Connection) -> SequencerResult<u32> {
    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )
    .map_err(|e| to_storage_err(e.to_string()))
}
