use chrono::NaiveDate;
use sequencer_core::errors::*;

#[test]
fn storage_errors_convert_into_sequencer_error() {
    let err: SequencerError = StorageError::Unavailable {
        reason: "connection refused".to_string(),
    }
    .into();
    assert!(matches!(err, SequencerError::Storage(_)));
    assert_eq!(
        err.to_string(),
        "history store unavailable: connection refused"
    );
}

#[test]
fn assignment_errors_render_week() {
    let err = AssignmentError::WeekLocked {
        role_id: 7,
        week_start: NaiveDate::from_ymd_opt(2025, 3, 17).unwrap(),
    };
    assert_eq!(err.to_string(), "week 2025-03-17 for role 7 is already locked");
}

#[test]
fn calendar_error_names_zone() {
    let err: SequencerError = CalendarError::UnknownTimezone {
        name: "Nowhere/Land".to_string(),
    }
    .into();
    assert!(err.to_string().contains("Nowhere/Land"));
}
