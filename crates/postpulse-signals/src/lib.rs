//! Caption text signals for postpulse.
//!
//! Extracts hashtags, scores coarse sentiment against the shared lexicon,
//! and ranks frequent keywords across a batch of normalized posts.

pub mod extract;
pub mod hashtags;
pub mod keywords;
pub mod scorer;
pub mod types;

pub use extract::{extract_post_signals, extract_text_signals};
pub use hashtags::{extract_hashtags, hashtag_frequency};
pub use keywords::top_keywords;
pub use scorer::{classify_sentiment, sentiment_score};
pub use types::{KeywordCount, PostSignals, Sentiment, SentimentBreakdown, TextSignals};
