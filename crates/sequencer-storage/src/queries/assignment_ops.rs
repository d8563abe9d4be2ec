//! Weekly assignment rows and the conditional rollover write.

use chrono::NaiveDate;
use rusqlite::{params, Connection, Transaction, TransactionBehavior};

use sequencer_core::errors::SequencerResult;
use sequencer_core::models::{
    Assignment, AssignmentStatus, CommitOutcome, GenerationSource, RolloverWrite, WeekSet,
};

use super::{date_from_sql, date_to_sql, timestamp_from_sql};
use crate::{corruption, to_storage_err};

/// All rows for one (role, week), or `None` when the week is empty.
pub fn load_week(
    conn: &Connection,
    role_id: i64,
    week_start: NaiveDate,
) -> SequencerResult<Option<WeekSet>> {
    let rows = query_rows(
        conn,
        "SELECT role_id, week_start, display_order, pro_move_id, status, source, overridden, locked_at
         FROM assignments WHERE role_id = ?1 AND week_start = ?2
         ORDER BY display_order",
        params![role_id, date_to_sql(week_start)],
    )?;
    if rows.is_empty() {
        return Ok(None);
    }
    Ok(Some(WeekSet::from_rows(role_id, week_start, rows)))
}

/// Every row for a role, ordered by week then display order.
pub fn all_assignments(conn: &Connection, role_id: i64) -> SequencerResult<Vec<Assignment>> {
    query_rows(
        conn,
        "SELECT role_id, week_start, display_order, pro_move_id, status, source, overridden, locked_at
         FROM assignments WHERE role_id = ?1
         ORDER BY week_start, display_order",
        params![role_id],
    )
}

/// Remove every row of a week regardless of status. Returns rows deleted.
pub fn delete_week(conn: &Connection, role_id: i64, week_start: NaiveDate) -> SequencerResult<usize> {
    conn.execute(
        "DELETE FROM assignments WHERE role_id = ?1 AND week_start = ?2",
        params![role_id, date_to_sql(week_start)],
    )
    .map_err(|e| to_storage_err(e.to_string()))
}

/// Apply a rollover write inside one `BEGIN IMMEDIATE` transaction.
///
/// The locked check runs after the write lock is taken, so two concurrent
/// rollovers for the same role cannot both lock the week. Any early return
/// drops the transaction, which rolls back whatever was already written.
pub fn commit_rollover(conn: &Connection, write: &RolloverWrite) -> SequencerResult<CommitOutcome> {
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)
        .map_err(|e| to_storage_err(format!("commit_rollover begin: {e}")))?;

    if let Some(lock) = &write.lock {
        if write.require_unlocked && week_has_locked(&tx, write.role_id, lock.week_start)? {
            return Ok(CommitOutcome::AlreadyLocked);
        }
        replace_rows(&tx, lock)?;
        record_selections(&tx, lock)?;
    }

    if let Some(propose) = &write.propose {
        if week_has_locked(&tx, write.role_id, propose.week_start)? {
            return Ok(CommitOutcome::AlreadyLocked);
        }
        if week_has_manual(&tx, write.role_id, propose.week_start)? {
            tracing::debug!(
                role_id = write.role_id,
                week = %propose.week_start,
                "manual proposal present; keeping it"
            );
        } else {
            replace_rows(&tx, propose)?;
        }
    }

    tx.commit()
        .map_err(|e| to_storage_err(format!("commit_rollover commit: {e}")))?;
    Ok(CommitOutcome::Committed)
}

/// Replace a week's rows with `set` unless the week is locked.
pub fn replace_proposed(conn: &Connection, set: &WeekSet) -> SequencerResult<CommitOutcome> {
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)
        .map_err(|e| to_storage_err(format!("replace_proposed begin: {e}")))?;

    if week_has_locked(&tx, set.role_id, set.week_start)? {
        return Ok(CommitOutcome::AlreadyLocked);
    }
    replace_rows(&tx, set)?;

    tx.commit()
        .map_err(|e| to_storage_err(format!("replace_proposed commit: {e}")))?;
    Ok(CommitOutcome::Committed)
}

fn week_has_locked(conn: &Connection, role_id: i64, week_start: NaiveDate) -> SequencerResult<bool> {
    week_has(conn, role_id, week_start, "status = 'locked'")
}

fn week_has_manual(conn: &Connection, role_id: i64, week_start: NaiveDate) -> SequencerResult<bool> {
    week_has(conn, role_id, week_start, "source = 'manual'")
}

fn week_has(
    conn: &Connection,
    role_id: i64,
    week_start: NaiveDate,
    predicate: &str,
) -> SequencerResult<bool> {
    conn.query_row(
        &format!(
            "SELECT EXISTS(SELECT 1 FROM assignments
             WHERE role_id = ?1 AND week_start = ?2 AND {predicate})"
        ),
        params![role_id, date_to_sql(week_start)],
        |row| row.get(0),
    )
    .map_err(|e| to_storage_err(e.to_string()))
}

fn replace_rows(conn: &Connection, set: &WeekSet) -> SequencerResult<()> {
    conn.execute(
        "DELETE FROM assignments WHERE role_id = ?1 AND week_start = ?2",
        params![set.role_id, date_to_sql(set.week_start)],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    let mut stmt = conn
        .prepare_cached(
            "INSERT INTO assignments (
                role_id, week_start, display_order, pro_move_id, status, source, overridden, locked_at
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    for row in &set.rows {
        stmt.execute(params![
            row.role_id,
            date_to_sql(row.week_start),
            row.display_order,
            row.pro_move_id,
            row.status.as_str(),
            row.source.as_str(),
            row.overridden as i32,
            row.locked_at.map(|t| t.to_rfc3339()),
        ])
        .map_err(|e| to_storage_err(e.to_string()))?;
    }
    Ok(())
}

fn record_selections(conn: &Connection, set: &WeekSet) -> SequencerResult<()> {
    let week = date_to_sql(set.week_start);
    for row in &set.rows {
        conn.execute(
            "INSERT INTO pro_move_selection (role_id, pro_move_id, last_selected_week_start)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(role_id, pro_move_id) DO UPDATE SET
                last_selected_week_start = MAX(last_selected_week_start, excluded.last_selected_week_start)",
            params![set.role_id, row.pro_move_id, week],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    }
    Ok(())
}

struct RawAssignment {
    role_id: i64,
    week_start: String,
    display_order: u8,
    pro_move_id: i64,
    status: String,
    source: String,
    overridden: bool,
    locked_at: Option<String>,
}

fn query_rows<P: rusqlite::Params>(
    conn: &Connection,
    sql: &str,
    params: P,
) -> SequencerResult<Vec<Assignment>> {
    let mut stmt = conn.prepare(sql).map_err(|e| to_storage_err(e.to_string()))?;
    let raw = stmt
        .query_map(params, |row| {
            Ok(RawAssignment {
                role_id: row.get(0)?,
                week_start: row.get(1)?,
                display_order: row.get(2)?,
                pro_move_id: row.get(3)?,
                status: row.get(4)?,
                source: row.get(5)?,
                overridden: row.get::<_, i32>(6)? != 0,
                locked_at: row.get(7)?,
            })
        })
        .map_err(|e| to_storage_err(e.to_string()))?
        .collect::<rusqlite::Result<Vec<_>>>()
        .map_err(|e| to_storage_err(e.to_string()))?;

    raw.into_iter().map(decode).collect()
}

fn decode(raw: RawAssignment) -> SequencerResult<Assignment> {
    let status = AssignmentStatus::parse(&raw.status)
        .ok_or_else(|| corruption(format!("unknown assignment status {:?}", raw.status)))?;
    let source = GenerationSource::parse(&raw.source)
        .ok_or_else(|| corruption(format!("unknown assignment source {:?}", raw.source)))?;
    Ok(Assignment {
        role_id: raw.role_id,
        week_start: date_from_sql(&raw.week_start)?,
        display_order: raw.display_order,
        pro_move_id: raw.pro_move_id,
        status,
        source,
        overridden: raw.overridden,
        locked_at: raw.locked_at.as_deref().map(timestamp_from_sql).transpose()?,
    })
}
