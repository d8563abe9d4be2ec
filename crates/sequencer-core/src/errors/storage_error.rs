/// Storage-layer errors. Any of these aborts the invocation with no
/// partial state written.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("migration failed at version {version}: {reason}")]
    MigrationFailed { version: u32, reason: String },

    #[error("database corruption detected: {details}")]
    CorruptionDetected { details: String },

    #[error("history store unavailable: {reason}")]
    Unavailable { reason: String },
}
