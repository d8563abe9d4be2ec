/// Week calendar errors.
#[derive(Debug, thiserror::Error)]
pub enum CalendarError {
    #[error("unknown timezone: {name}")]
    UnknownTimezone { name: String },
}
