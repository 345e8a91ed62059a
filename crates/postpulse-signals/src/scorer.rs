//! Lexicon scorer for caption sentiment.

use postpulse_core::Lexicon;

use crate::types::Sentiment;

/// Net lexicon score of a caption.
///
/// Splits on whitespace and compares each whole token case-insensitively,
/// adding `+1` per positive match and `-1` per negative match. A token that
/// carries punctuation (`great!`, `#sad`) matches nothing. Returns `0` for
/// empty or unknown text.
#[must_use]
pub fn sentiment_score(text: &str, lexicon: &Lexicon) -> i32 {
    text.split_whitespace()
        .map(|word| lexicon.polarity(word))
        .sum()
}

/// Sentiment label for a caption.
#[must_use]
pub fn classify_sentiment(text: &str, lexicon: &Lexicon) -> Sentiment {
    Sentiment::from_score(sentiment_score(text, lexicon))
}
