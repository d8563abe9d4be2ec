//! Pro-move catalog reads and writes.

use rusqlite::{params, params_from_iter, Connection, Row};

use sequencer_core::errors::SequencerResult;
use sequencer_core::models::ProMove;

use crate::to_storage_err;

const SELECT_COLUMNS: &str =
    "id, statement, competency_id, domain_id, domain_name, role_id, active";

fn row_to_pro_move(row: &Row<'_>) -> rusqlite::Result<ProMove> {
    Ok(ProMove {
        id: row.get(0)?,
        statement: row.get(1)?,
        competency_id: row.get(2)?,
        domain_id: row.get(3)?,
        domain_name: row.get(4)?,
        role_id: row.get(5)?,
        active: row.get::<_, i32>(6)? != 0,
    })
}

/// Insert or replace a move definition.
pub fn upsert_pro_move(conn: &Connection, pro_move: &ProMove) -> SequencerResult<()> {
    conn.execute(
        "INSERT INTO pro_moves (id, statement, competency_id, domain_id, domain_name, role_id, active)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
         ON CONFLICT(id) DO UPDATE SET
            statement = excluded.statement,
            competency_id = excluded.competency_id,
            domain_id = excluded.domain_id,
            domain_name = excluded.domain_name,
            role_id = excluded.role_id,
            active = excluded.active",
        params![
            pro_move.id,
            pro_move.statement,
            pro_move.competency_id,
            pro_move.domain_id,
            pro_move.domain_name,
            pro_move.role_id,
            pro_move.active as i32,
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Mark a move inactive. Returns false if the id is unknown.
pub fn retire_pro_move(conn: &Connection, id: i64) -> SequencerResult<bool> {
    let changed = conn
        .execute("UPDATE pro_moves SET active = 0 WHERE id = ?1", params![id])
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(changed > 0)
}

/// Active moves for a role, ordered by id.
pub fn eligible_moves(conn: &Connection, role_id: i64) -> SequencerResult<Vec<ProMove>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {SELECT_COLUMNS} FROM pro_moves
             WHERE role_id = ?1 AND active = 1
             ORDER BY id"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![role_id], row_to_pro_move)
        .map_err(|e| to_storage_err(e.to_string()))?;
    rows.collect::<rusqlite::Result<Vec<_>>>()
        .map_err(|e| to_storage_err(e.to_string()))
}

/// Moves by id regardless of status, ordered by id.
pub fn get_pro_moves(conn: &Connection, ids: &[i64]) -> SequencerResult<Vec<ProMove>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let placeholders = vec!["?"; ids.len()].join(", ");
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {SELECT_COLUMNS} FROM pro_moves WHERE id IN ({placeholders}) ORDER BY id"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params_from_iter(ids.iter()), row_to_pro_move)
        .map_err(|e| to_storage_err(e.to_string()))?;
    rows.collect::<rusqlite::Result<Vec<_>>>()
        .map_err(|e| to_storage_err(e.to_string()))
}
