//! Shared types, configuration, and the lexicon resource for postpulse.
//!
//! Everything here is plain data: the canonical [`Post`] shape the engine
//! works on, the loose [`RawPost`] shape handed over by fetch collaborators,
//! and the configuration surface consumed by the analysis crate.

pub mod calendar;
pub mod config;
pub mod error;
pub mod lexicon;
pub mod posts;
pub mod source;

pub use calendar::{weekday_name, WEEKDAYS};
pub use config::{
    clamp_slot_count, load_analysis_config, load_analysis_config_from_env, AnalysisConfig,
    RankingMode, DEFAULT_KEYWORD_LIMIT, DEFAULT_SLOT_COUNT, MAX_SLOT_COUNT, MIN_SLOT_COUNT,
};
pub use error::{ConfigError, SourceError};
pub use lexicon::{default_lexicon, load_lexicon, Lexicon};
pub use posts::{MediaType, Post, RawPost, CAPTION_PREVIEW_CHARS};
pub use source::{normalize_account_name, PostSource};
