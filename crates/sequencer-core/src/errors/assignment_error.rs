use chrono::NaiveDate;

/// Violations of the week-set invariants, raised when building a set or
/// applying a manual override.
#[derive(Debug, thiserror::Error)]
pub enum AssignmentError {
    #[error("week {week_start} for role {role_id} is already locked")]
    WeekLocked { role_id: i64, week_start: NaiveDate },

    #[error("expected {expected} picks, got {actual}")]
    WrongPickCount { expected: usize, actual: usize },

    #[error("pro-move {pro_move_id} appears more than once in the week")]
    DuplicateMove { pro_move_id: i64 },

    #[error("pro-move {pro_move_id} does not exist for role {role_id}")]
    UnknownMove { pro_move_id: i64, role_id: i64 },

    #[error("pro-move {pro_move_id} is retired")]
    InactiveMove { pro_move_id: i64 },
}
