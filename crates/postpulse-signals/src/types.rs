use std::collections::BTreeMap;

use serde::Serialize;

/// Coarse caption sentiment from lexicon matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// Label for a net lexicon score: `> 0` positive, `< 0` negative.
    #[must_use]
    pub fn from_score(score: i32) -> Self {
        match score {
            s if s > 0 => Sentiment::Positive,
            s if s < 0 => Sentiment::Negative,
            _ => Sentiment::Neutral,
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sentiment::Positive => write!(f, "positive"),
            Sentiment::Negative => write!(f, "negative"),
            Sentiment::Neutral => write!(f, "neutral"),
        }
    }
}

/// Signals derived from one post's caption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostSignals {
    pub post_id: String,
    /// Lowercased tags in caption order, duplicates kept.
    pub hashtags: Vec<String>,
    pub sentiment: Sentiment,
    /// Net lexicon score the label was derived from.
    pub sentiment_score: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordCount {
    pub keyword: String,
    pub count: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SentimentBreakdown {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

impl SentimentBreakdown {
    pub fn record(&mut self, sentiment: Sentiment) {
        match sentiment {
            Sentiment::Positive => self.positive += 1,
            Sentiment::Negative => self.negative += 1,
            Sentiment::Neutral => self.neutral += 1,
        }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.positive + self.negative + self.neutral
    }
}

/// Per-post signals plus batch-level aggregates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TextSignals {
    pub posts: Vec<PostSignals>,
    /// Tag -> occurrences across the batch.
    pub hashtag_frequency: BTreeMap<String, u64>,
    /// Most frequent caption keywords, most frequent first.
    pub top_keywords: Vec<KeywordCount>,
    pub sentiment_breakdown: SentimentBreakdown,
}
