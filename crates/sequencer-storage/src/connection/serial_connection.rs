//! The store's only SQLite handle.
//!
//! Reads and writes share it, so a rollover's history read always sees the
//! last committed write. Sync callers block on the mutex and must stay off
//! async worker threads.

use std::path::Path;

use rusqlite::Connection;
use tokio::sync::Mutex;

use sequencer_core::errors::SequencerResult;

use super::pragmas::apply_pragmas;
use crate::to_storage_err;

/// Location label reported for in-memory databases.
pub const IN_MEMORY: &str = ":memory:";

pub struct SerialConnection {
    conn: Mutex<Connection>,
    location: String,
}

impl SerialConnection {
    pub fn open(path: &Path, busy_timeout_ms: u32) -> SequencerResult<Self> {
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        Self::configured(conn, path.display().to_string(), busy_timeout_ms)
    }

    /// No busy timeout: nothing else can hold an in-memory database.
    pub fn open_in_memory() -> SequencerResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        Self::configured(conn, IN_MEMORY.to_string(), 0)
    }

    fn configured(conn: Connection, location: String, busy_timeout_ms: u32) -> SequencerResult<Self> {
        apply_pragmas(&conn, busy_timeout_ms)?;
        tracing::debug!(location = %location, busy_timeout_ms, "sqlite connection ready");
        Ok(Self {
            conn: Mutex::new(conn),
            location,
        })
    }

    /// File path the connection was opened on, or [`IN_MEMORY`].
    pub fn location(&self) -> &str {
        &self.location
    }

    pub async fn with_conn<F, T>(&self, f: F) -> SequencerResult<T>
    where
        F: FnOnce(&Connection) -> SequencerResult<T>,
    {
        let guard = self.conn.lock().await;
        f(&guard)
    }

    /// Blocking variant used by the rollover pipeline and migrations.
    /// Inside a runtime, call it from `spawn_blocking`.
    pub fn with_conn_sync<F, T>(&self, f: F) -> SequencerResult<T>
    where
        F: FnOnce(&Connection) -> SequencerResult<T>,
    {
        let guard = self.conn.blocking_lock();
        f(&guard)
    }
}
