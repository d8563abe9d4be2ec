//! # sequencer-scoring
//!
//! Turns a role's history into a ranked, classified candidate list.
//!
//! - Confidence estimator: trimmed weekly means shrunk toward a prior.
//! - Feature scorer: confidence need, recency, eval urgency, domain coverage,
//!   combined by a normalized weight vector with a deterministic ordering.
//! - Low-confidence classifier: advisory critical/watch/ok alerts.

pub mod classifier;
pub mod digest;
pub mod estimator;
pub mod factors;
pub mod scorer;

pub use classifier::{classify, Classification};
pub use digest::ranking_digest;
pub use estimator::{ConfidenceEstimate, EstimatorParams};
pub use scorer::FeatureScorer;
