/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("failed to parse config: {reason}")]
    Parse { reason: String },

    #[error("failed to read config file {path}: {reason}")]
    Io { path: String, reason: String },
}
