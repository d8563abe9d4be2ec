//! # sequencer-selection
//!
//! Picks exactly k candidates from a ranked list.
//! Cooldown exclusion first, then a greedy diversity walk, then logged
//! relaxation of diversity when the walk comes up short.

pub mod cooldown;
pub mod diversity;
pub mod selector;

pub use selector::{select, Selection, SelectionParams};
