//! v001: pro_moves catalog.

use rusqlite::Connection;

use sequencer_core::errors::SequencerResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> SequencerResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS pro_moves (
            id             INTEGER PRIMARY KEY,
            statement      TEXT NOT NULL,
            competency_id  INTEGER NOT NULL,
            domain_id      INTEGER NOT NULL,
            domain_name    TEXT NOT NULL,
            role_id        INTEGER NOT NULL,
            active         INTEGER NOT NULL DEFAULT 1
        );

        CREATE INDEX IF NOT EXISTS idx_pro_moves_role ON pro_moves(role_id, active);
        CREATE INDEX IF NOT EXISTS idx_pro_moves_competency ON pro_moves(competency_id);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
