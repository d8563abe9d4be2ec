mod assignment_error;
mod calendar_error;
mod config_error;
mod storage_error;

pub use assignment_error::AssignmentError;
pub use calendar_error::CalendarError;
pub use config_error::ConfigError;
pub use storage_error::StorageError;

/// Top-level error for every sequencer operation.
///
/// Only genuine failures land here. Degraded outcomes (short pools, relaxed
/// diversity, no-op promotion) are reported through summaries instead.
#[derive(Debug, thiserror::Error)]
pub enum SequencerError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Calendar(#[from] CalendarError),

    #[error(transparent)]
    Assignment(#[from] AssignmentError),

    #[error("serialization error: {0}")]
    Serialization(String),

    /// A caller-imposed deadline passed before the commit; nothing was written.
    #[error("rollover for role {role_id} timed out before commit")]
    Timeout { role_id: i64 },

    /// The blocking task running a rollover panicked or was cancelled.
    #[error("rollover task aborted: {reason}")]
    Aborted { reason: String },
}

impl From<serde_json::Error> for SequencerError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

pub type SequencerResult<T> = Result<T, SequencerError>;
