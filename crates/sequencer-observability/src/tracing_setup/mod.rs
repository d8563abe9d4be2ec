//! Subscriber installation for hosts that drive rollovers.
//!
//! The library crates only emit spans and events; the host decides where they
//! go. JSON is the default so scheduled runs land in log pipelines as-is.

pub mod events;
pub mod spans;

use tracing_subscriber::EnvFilter;

/// Filter directive, e.g. `info` or `sequencer_rollover=debug`.
pub const LOG_ENV_VAR: &str = "SEQUENCER_LOG";
/// `json` (default) or `compact`.
pub const LOG_FORMAT_ENV_VAR: &str = "SEQUENCER_LOG_FORMAT";

const DEFAULT_FILTER: &str = "info";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Json,
    Compact,
}

impl LogFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "compact" | "text" => Some(Self::Compact),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingOptions {
    pub filter: String,
    pub format: LogFormat,
    /// Attach file, line and thread id to every event.
    pub source_locations: bool,
}

impl Default for TracingOptions {
    fn default() -> Self {
        Self {
            filter: DEFAULT_FILTER.to_string(),
            format: LogFormat::default(),
            source_locations: false,
        }
    }
}

impl TracingOptions {
    pub fn with_filter(filter: impl Into<String>) -> Self {
        Self {
            filter: filter.into(),
            ..Self::default()
        }
    }

    /// Read [`LOG_ENV_VAR`] and [`LOG_FORMAT_ENV_VAR`]. Unset or unparseable
    /// values fall back to the defaults.
    pub fn from_env() -> Self {
        let filter = std::env::var(LOG_ENV_VAR)
            .ok()
            .filter(|f| !f.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_FILTER.to_string());
        let format = std::env::var(LOG_FORMAT_ENV_VAR)
            .ok()
            .and_then(|v| LogFormat::parse(&v))
            .unwrap_or_default();
        Self {
            filter,
            format,
            source_locations: true,
        }
    }
}

/// Install a global subscriber. Returns `false` when one is already set.
///
/// An invalid filter directive falls back to `info` rather than failing.
pub fn try_init(options: &TracingOptions) -> bool {
    let filter =
        EnvFilter::try_new(&options.filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(options.source_locations)
        .with_file(options.source_locations)
        .with_line_number(options.source_locations);

    match options.format {
        LogFormat::Json => builder.json().try_init().is_ok(),
        LogFormat::Compact => builder.compact().try_init().is_ok(),
    }
}

/// Install from the environment, keeping any subscriber already in place.
pub fn init_tracing() {
    if !try_init(&TracingOptions::from_env()) {
        tracing::debug!("tracing subscriber already installed");
    }
}

pub fn try_init_tracing_with_filter(filter: &str) -> bool {
    try_init(&TracingOptions::with_filter(filter))
}
