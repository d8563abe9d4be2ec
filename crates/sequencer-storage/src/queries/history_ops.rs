//! Confidence and eval ingestion plus the one-pass history read.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rusqlite::{params, Connection};

use sequencer_core::errors::SequencerResult;
use sequencer_core::models::{ConfidenceRecord, EvalScore, HistorySnapshot, WeekAggregate};

use super::{date_from_sql, date_to_sql};
use crate::to_storage_err;

/// Append one self-rating. A repeat for the same (move, week, staff) is
/// ignored; returns whether a row was written.
pub fn record_confidence(conn: &Connection, record: &ConfidenceRecord) -> SequencerResult<bool> {
    let inserted = conn
        .execute(
            "INSERT OR IGNORE INTO confidence_records (pro_move_id, week_start, staff_id, score)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                record.pro_move_id,
                date_to_sql(record.week_start),
                record.staff_id,
                record.score,
            ],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(inserted > 0)
}

/// Append many self-ratings in one transaction. Returns the number written.
pub fn record_confidence_bulk(
    conn: &Connection,
    records: &[ConfidenceRecord],
) -> SequencerResult<usize> {
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| to_storage_err(format!("record_confidence_bulk begin: {e}")))?;
    let mut written = 0;
    for record in records {
        if record_confidence(&tx, record)? {
            written += 1;
        }
    }
    tx.commit()
        .map_err(|e| to_storage_err(format!("record_confidence_bulk commit: {e}")))?;
    Ok(written)
}

/// Set the latest eval urgency for a competency.
pub fn set_eval_score(conn: &Connection, score: &EvalScore) -> SequencerResult<()> {
    conn.execute(
        "INSERT INTO eval_scores (competency_id, score, updated_at)
         VALUES (?1, ?2, strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
         ON CONFLICT(competency_id) DO UPDATE SET
            score = excluded.score,
            updated_at = excluded.updated_at",
        params![score.competency_id, score.score.clamp(0.0, 1.0)],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Read confidence, eval, selection and domain history for a role.
///
/// Confidence and domain appearances are limited to `[from, to)`. Last
/// selection and eval scores are not windowed.
pub fn load_history(
    conn: &Connection,
    role_id: i64,
    from: NaiveDate,
    to: NaiveDate,
) -> SequencerResult<HistorySnapshot> {
    let from_sql = date_to_sql(from);
    let to_sql = date_to_sql(to);

    let mut snapshot = HistorySnapshot {
        confidence: load_confidence(conn, role_id, &from_sql, &to_sql)?,
        ..HistorySnapshot::default()
    };

    // Eval scores for competencies the role's moves belong to.
    {
        let mut stmt = conn
            .prepare(
                "SELECT e.competency_id, e.score FROM eval_scores e
                 WHERE e.competency_id IN (
                    SELECT competency_id FROM pro_moves WHERE role_id = ?1
                 )",
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
        let rows = stmt
            .query_map(params![role_id], |row| {
                Ok((row.get::<_, i64>(0)?, row.get::<_, f64>(1)?))
            })
            .map_err(|e| to_storage_err(e.to_string()))?;
        for row in rows {
            let (competency_id, score) = row.map_err(|e| to_storage_err(e.to_string()))?;
            snapshot.eval_scores.insert(competency_id, score);
        }
    }

    {
        let mut stmt = conn
            .prepare(
                "SELECT pro_move_id, last_selected_week_start FROM pro_move_selection
                 WHERE role_id = ?1",
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
        let rows = stmt
            .query_map(params![role_id], |row| {
                Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
            })
            .map_err(|e| to_storage_err(e.to_string()))?;
        for row in rows {
            let (pro_move_id, week) = row.map_err(|e| to_storage_err(e.to_string()))?;
            snapshot
                .last_selected
                .insert(pro_move_id, date_from_sql(&week)?);
        }
    }

    {
        let mut stmt = conn
            .prepare(
                "SELECT DISTINCT p.domain_id, a.week_start
                 FROM assignments a JOIN pro_moves p ON p.id = a.pro_move_id
                 WHERE a.role_id = ?1 AND a.status = 'locked'
                   AND a.week_start >= ?2 AND a.week_start < ?3",
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
        let rows = stmt
            .query_map(params![role_id, from_sql, to_sql], |row| {
                Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
            })
            .map_err(|e| to_storage_err(e.to_string()))?;
        for row in rows {
            let (domain_id, week) = row.map_err(|e| to_storage_err(e.to_string()))?;
            snapshot
                .domain_weeks
                .entry(domain_id)
                .or_default()
                .insert(date_from_sql(&week)?);
        }
    }

    Ok(snapshot)
}

fn load_confidence(
    conn: &Connection,
    role_id: i64,
    from: &str,
    to: &str,
) -> SequencerResult<BTreeMap<i64, Vec<WeekAggregate>>> {
    let mut stmt = conn
        .prepare(
            "SELECT c.pro_move_id, c.week_start, AVG(c.score), COUNT(*)
             FROM confidence_records c JOIN pro_moves p ON p.id = c.pro_move_id
             WHERE p.role_id = ?1 AND c.week_start >= ?2 AND c.week_start < ?3
             GROUP BY c.pro_move_id, c.week_start
             ORDER BY c.pro_move_id, c.week_start",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![role_id, from, to], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, f64>(2)?,
                row.get::<_, u32>(3)?,
            ))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut confidence: BTreeMap<i64, Vec<WeekAggregate>> = BTreeMap::new();
    for row in rows {
        let (pro_move_id, week, avg, n) = row.map_err(|e| to_storage_err(e.to_string()))?;
        confidence
            .entry(pro_move_id)
            .or_default()
            .push(WeekAggregate::new(date_from_sql(&week)?, avg, n));
    }
    Ok(confidence)
}
