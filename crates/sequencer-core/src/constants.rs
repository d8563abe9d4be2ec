/// Sequencer version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// `weeks_since` value reported for a move that has never been selected.
pub const NEVER_SELECTED_WEEKS: u32 = 999;

/// Scores closer than this are treated as tied and ordered by id.
pub const SCORE_TIE_EPSILON: f64 = 1e-4;

/// Days per scheduling week.
pub const DAYS_PER_WEEK: i64 = 7;

/// Upper bound on picks per week; display order is stored as `u8`.
pub const MAX_PICK_COUNT: usize = 16;
