//! # sequencer-storage
//!
//! SQLite-backed implementation of [`ISequencerStorage`].
//! Single serialized write connection, versioned migrations, history
//! aggregation in SQL, and all-or-nothing rollover commits guarded by an
//! already-locked check inside the transaction.
//!
//! [`ISequencerStorage`]: sequencer_core::traits::ISequencerStorage

pub mod connection;
pub mod engine;
pub mod migrations;
pub mod queries;

pub use engine::StorageEngine;

use sequencer_core::errors::{SequencerError, StorageError};

/// Wrap a SQLite failure message as a sequencer error.
pub(crate) fn to_storage_err(message: String) -> SequencerError {
    SequencerError::Storage(StorageError::SqliteError { message })
}

/// Stored values that fail to decode.
pub(crate) fn corruption(details: String) -> SequencerError {
    SequencerError::Storage(StorageError::CorruptionDetected { details })
}
