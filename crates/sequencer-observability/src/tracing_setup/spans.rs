//! Span definitions per pipeline stage: rollover, scoring, selection.

/// Create a rollover span.
#[macro_export]
macro_rules! rollover_span {
    ($role_id:expr, $week:expr) => {
        tracing::info_span!("sequencer.rollover", role_id = $role_id, week = %$week)
    };
}

/// Create a scoring span.
#[macro_export]
macro_rules! scoring_span {
    ($candidates:expr) => {
        tracing::debug_span!("sequencer.scoring", candidates = $candidates)
    };
}

/// Create a selection span.
#[macro_export]
macro_rules! selection_span {
    ($eligible:expr, $pick_count:expr) => {
        tracing::debug_span!("sequencer.selection", eligible = $eligible, pick_count = $pick_count)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const ROLLOVER: &str = "sequencer.rollover";
    pub const SCORING: &str = "sequencer.scoring";
    pub const SELECTION: &str = "sequencer.selection";
}
