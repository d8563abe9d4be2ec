//! SQL for each table group. Functions take a `&Connection` so callers can
//! pass either a plain connection or a transaction.

pub mod assignment_ops;
pub mod catalog_ops;
pub mod history_ops;

use chrono::{DateTime, NaiveDate, Utc};

use sequencer_core::errors::SequencerResult;

use crate::corruption;

const DATE_FORMAT: &str = "%Y-%m-%d";

pub(crate) fn date_to_sql(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub(crate) fn date_from_sql(value: &str) -> SequencerResult<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|e| corruption(format!("bad week_start {value:?}: {e}")))
}

pub(crate) fn timestamp_from_sql(value: &str) -> SequencerResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| corruption(format!("bad timestamp {value:?}: {e}")))
}
