//! v003: assignments (one row per pick per role-week), pro_move_selection.
//!
//! The unique keys make a duplicate display order or a repeated move within a
//! week impossible to persist.

use rusqlite::Connection;

use sequencer_core::errors::SequencerResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> SequencerResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS assignments (
            role_id        INTEGER NOT NULL,
            week_start     TEXT NOT NULL,
            display_order  INTEGER NOT NULL CHECK (display_order >= 1),
            pro_move_id    INTEGER NOT NULL REFERENCES pro_moves(id),
            status         TEXT NOT NULL CHECK (status IN ('proposed', 'locked')),
            source         TEXT NOT NULL CHECK (source IN ('auto', 'manual')),
            overridden     INTEGER NOT NULL DEFAULT 0,
            locked_at      TEXT,
            PRIMARY KEY (role_id, week_start, display_order),
            UNIQUE (role_id, week_start, pro_move_id)
        );

        CREATE INDEX IF NOT EXISTS idx_assignments_status ON assignments(role_id, status, week_start);

        CREATE TABLE IF NOT EXISTS pro_move_selection (
            role_id                  INTEGER NOT NULL,
            pro_move_id              INTEGER NOT NULL REFERENCES pro_moves(id),
            last_selected_week_start TEXT NOT NULL,
            PRIMARY KEY (role_id, pro_move_id)
        );
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
