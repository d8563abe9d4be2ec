//! # sequencer-rollover
//!
//! The weekly rollover state machine. Each invocation reads a role's history
//! once, locks the location's current week (promoting its proposal or
//! synthesizing one), proposes the following week, and persists both with a
//! single conditional write. Re-running for a locked week is a no-op unless
//! forced.

pub mod engine;
mod machine;
mod proposal;
mod snapshot;
pub mod trace;

pub use engine::RolloverEngine;
pub use trace::TraceLog;
