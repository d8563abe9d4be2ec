//! # sequencer-core
//!
//! Foundation crate for the Pro-Move Sequencer.
//! Defines the domain types, the storage trait, errors, config, constants,
//! and the location-aware week calendar. Every other crate depends on this.

pub mod calendar;
pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::SequencerConfig;
pub use errors::{SequencerError, SequencerResult};
pub use models::{
    AlertStatus, Assignment, AssignmentStatus, GenerationSource, HistorySnapshot, ProMove,
    RankedCandidate, RolloverSummary, RolloverTrigger, WeekAggregate, WeekSet,
};
