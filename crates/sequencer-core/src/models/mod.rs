mod assignment;
mod history;
mod pro_move;
mod ranking;
mod rollover;

pub use assignment::{Assignment, AssignmentStatus, GenerationSource, WeekSet};
pub use history::{ConfidenceRecord, EvalScore, HistorySnapshot, RatingScale, WeekAggregate};
pub use pro_move::ProMove;
pub use ranking::{AlertStatus, Driver, FeatureVector, RankedCandidate};
pub use rollover::{CommitOutcome, RolloverSummary, RolloverTrigger, RolloverWrite};
