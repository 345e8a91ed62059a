//! Posting-pattern analysis engine.
//!
//! Turns a raw post batch into a [`Report`]: normalization, weekday/hour
//! distributions, ranked posting-slot suggestions, and caption signals.
//! Everything here is synchronous and side-effect free; callers own any I/O.

pub mod error;
pub mod normalize;
pub mod rank;
pub mod report;
pub mod temporal;

pub use error::{AnalysisError, InvalidRecordError};
pub use normalize::{normalize_post, normalize_posts, NormalizedBatch};
pub use rank::{best_slot, suggest_slots, Slot, SuggestedSlot};
pub use report::{assemble_report, build_report, resolve_lexicon, MediaMix, PostRow, Report};
pub use temporal::TemporalDistribution;
