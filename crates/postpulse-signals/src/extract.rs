use postpulse_core::{Lexicon, Post};

use crate::hashtags::{extract_hashtags, hashtag_frequency};
use crate::keywords::top_keywords;
use crate::scorer::sentiment_score;
use crate::types::{PostSignals, Sentiment, SentimentBreakdown, TextSignals};

/// Hashtags and sentiment for a single post.
#[must_use]
pub fn extract_post_signals(post: &Post, lexicon: &Lexicon) -> PostSignals {
    let score = sentiment_score(&post.caption, lexicon);
    PostSignals {
        post_id: post.id.clone(),
        hashtags: extract_hashtags(&post.caption),
        sentiment: Sentiment::from_score(score),
        sentiment_score: score,
    }
}

/// Per-post signals plus batch aggregates for a normalized batch.
///
/// An empty batch yields empty signals, not an error.
#[must_use]
pub fn extract_text_signals(
    posts: &[Post],
    lexicon: &Lexicon,
    keyword_limit: usize,
) -> TextSignals {
    let per_post: Vec<PostSignals> = posts
        .iter()
        .map(|post| extract_post_signals(post, lexicon))
        .collect();

    let mut sentiment_breakdown = SentimentBreakdown::default();
    for signals in &per_post {
        sentiment_breakdown.record(signals.sentiment);
    }

    let hashtag_frequency = hashtag_frequency(per_post.iter().map(|s| s.hashtags.as_slice()));
    let top_keywords = top_keywords(
        posts.iter().map(|p| p.caption.as_str()),
        lexicon,
        keyword_limit,
    );

    tracing::debug!(
        posts = posts.len(),
        distinct_hashtags = hashtag_frequency.len(),
        keywords = top_keywords.len(),
        "extracted text signals"
    );

    TextSignals {
        posts: per_post,
        hashtag_frequency,
        top_keywords,
        sentiment_breakdown,
    }
}
