//! # sequencer-observability
//!
//! Structured tracing for the sequencer. Subscriber setup reads the
//! `SEQUENCER_LOG` filter and `SEQUENCER_LOG_FORMAT`. Span macros wrap each
//! pipeline stage, and named events mark rollover milestones.

pub mod tracing_setup;

pub use tracing_setup::{
    init_tracing, try_init, try_init_tracing_with_filter, LogFormat, TracingOptions,
};
