//! StorageEngine: owns the serialized connection, runs migrations on open, and
//! implements [`ISequencerStorage`].

use std::path::Path;

use chrono::NaiveDate;

use sequencer_core::config::StorageConfig;
use sequencer_core::errors::SequencerResult;
use sequencer_core::models::{
    Assignment, CommitOutcome, ConfidenceRecord, EvalScore, HistorySnapshot, ProMove,
    RolloverWrite, WeekSet,
};
use sequencer_core::traits::ISequencerStorage;

use crate::connection::{SerialConnection, IN_MEMORY};
use crate::migrations;
use crate::queries::{assignment_ops, catalog_ops, history_ops};

/// SQLite-backed sequencer store.
///
/// Every statement goes through one serialized connection, so reads inside a
/// rollover always observe the store's latest committed state.
pub struct StorageEngine {
    conn: SerialConnection,
}

impl StorageEngine {
    /// Open a storage engine backed by a file on disk.
    pub fn open(path: &Path, busy_timeout_ms: u32) -> SequencerResult<Self> {
        let engine = Self {
            conn: SerialConnection::open(path, busy_timeout_ms)?,
        };
        engine.initialize()?;
        Ok(engine)
    }

    /// Open an in-memory storage engine (for testing).
    pub fn open_in_memory() -> SequencerResult<Self> {
        let engine = Self {
            conn: SerialConnection::open_in_memory()?,
        };
        engine.initialize()?;
        Ok(engine)
    }

    /// Open per configuration; `:memory:` selects an in-memory database.
    pub fn from_config(config: &StorageConfig) -> SequencerResult<Self> {
        if config.db_path == IN_MEMORY {
            Self::open_in_memory()
        } else {
            Self::open(Path::new(&config.db_path), config.busy_timeout_ms)
        }
    }

    fn initialize(&self) -> SequencerResult<()> {
        self.conn.with_conn_sync(|conn| {
            let version = migrations::run_migrations(conn)?;
            tracing::debug!(schema_version = version, "storage initialized");
            Ok(())
        })
    }

    /// The underlying connection, for async callers.
    pub fn connection(&self) -> &SerialConnection {
        &self.conn
    }

    pub fn schema_version(&self) -> SequencerResult<u32> {
        self.conn.with_conn_sync(migrations::current_version)
    }

    // --- Ingestion ---

    pub fn upsert_pro_move(&self, pro_move: &ProMove) -> SequencerResult<()> {
        self.conn
            .with_conn_sync(|conn| catalog_ops::upsert_pro_move(conn, pro_move))
    }

    /// Mark a move inactive; it stays in history but is no longer eligible.
    pub fn retire_pro_move(&self, id: i64) -> SequencerResult<bool> {
        self.conn
            .with_conn_sync(|conn| catalog_ops::retire_pro_move(conn, id))
    }

    pub fn record_confidence(&self, record: &ConfidenceRecord) -> SequencerResult<bool> {
        self.conn
            .with_conn_sync(|conn| history_ops::record_confidence(conn, record))
    }

    pub fn record_confidence_bulk(&self, records: &[ConfidenceRecord]) -> SequencerResult<usize> {
        self.conn
            .with_conn_sync(|conn| history_ops::record_confidence_bulk(conn, records))
    }

    pub fn set_eval_score(&self, score: &EvalScore) -> SequencerResult<()> {
        self.conn
            .with_conn_sync(|conn| history_ops::set_eval_score(conn, score))
    }

    // --- Admin ---

    pub fn all_assignments(&self, role_id: i64) -> SequencerResult<Vec<Assignment>> {
        self.conn
            .with_conn_sync(|conn| assignment_ops::all_assignments(conn, role_id))
    }

    /// Delete every row of a week, locked or not.
    pub fn delete_week(&self, role_id: i64, week_start: NaiveDate) -> SequencerResult<usize> {
        self.conn
            .with_conn_sync(|conn| assignment_ops::delete_week(conn, role_id, week_start))
    }

    /// Async read of one week, for callers already on a runtime.
    pub async fn load_week_async(
        &self,
        role_id: i64,
        week_start: NaiveDate,
    ) -> SequencerResult<Option<WeekSet>> {
        self.conn
            .with_conn(|conn| assignment_ops::load_week(conn, role_id, week_start))
            .await
    }
}

impl ISequencerStorage for StorageEngine {
    fn eligible_moves(&self, role_id: i64) -> SequencerResult<Vec<ProMove>> {
        self.conn
            .with_conn_sync(|conn| catalog_ops::eligible_moves(conn, role_id))
    }

    fn get_pro_moves(&self, ids: &[i64]) -> SequencerResult<Vec<ProMove>> {
        self.conn
            .with_conn_sync(|conn| catalog_ops::get_pro_moves(conn, ids))
    }

    fn load_history(
        &self,
        role_id: i64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> SequencerResult<HistorySnapshot> {
        self.conn
            .with_conn_sync(|conn| history_ops::load_history(conn, role_id, from, to))
    }

    fn load_week(&self, role_id: i64, week_start: NaiveDate) -> SequencerResult<Option<WeekSet>> {
        self.conn
            .with_conn_sync(|conn| assignment_ops::load_week(conn, role_id, week_start))
    }

    fn commit_rollover(&self, write: &RolloverWrite) -> SequencerResult<CommitOutcome> {
        self.conn
            .with_conn_sync(|conn| assignment_ops::commit_rollover(conn, write))
    }

    fn replace_proposed(&self, set: &WeekSet) -> SequencerResult<CommitOutcome> {
        self.conn
            .with_conn_sync(|conn| assignment_ops::replace_proposed(conn, set))
    }
}
