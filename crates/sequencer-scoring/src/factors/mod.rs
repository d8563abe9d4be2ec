//! The four per-candidate ranking features, each in [0, 1].

pub mod confidence;
pub mod domain;
pub mod eval;
pub mod recency;
