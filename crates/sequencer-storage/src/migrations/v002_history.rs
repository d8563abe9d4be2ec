//! v002: confidence_records (append-only), eval_scores (latest per competency).

use rusqlite::Connection;

use sequencer_core::errors::SequencerResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> SequencerResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS confidence_records (
            pro_move_id  INTEGER NOT NULL REFERENCES pro_moves(id),
            week_start   TEXT NOT NULL,
            staff_id     TEXT NOT NULL,
            score        REAL NOT NULL CHECK (score >= 0.0 AND score <= 1.0),
            recorded_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            PRIMARY KEY (pro_move_id, week_start, staff_id)
        );

        CREATE INDEX IF NOT EXISTS idx_confidence_week ON confidence_records(week_start);

        CREATE TABLE IF NOT EXISTS eval_scores (
            competency_id  INTEGER PRIMARY KEY,
            score          REAL NOT NULL CHECK (score >= 0.0 AND score <= 1.0),
            updated_at     TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
