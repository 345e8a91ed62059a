//! Word lists shared by sentiment scoring and keyword extraction.
//!
//! One [`Lexicon`] is built per process: either the built-in lists via
//! [`default_lexicon`], or a YAML file loaded once at startup with
//! [`load_lexicon`]. Both are immutable after construction.

use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;

use serde::Deserialize;

use crate::ConfigError;

const POSITIVE_WORDS: &[&str] = &[
    "amazing",
    "awesome",
    "beautiful",
    "best",
    "blessed",
    "cute",
    "enjoy",
    "excellent",
    "excited",
    "fantastic",
    "fun",
    "good",
    "grateful",
    "great",
    "happy",
    "love",
    "loved",
    "lovely",
    "perfect",
    "proud",
    "thankful",
    "win",
    "wonderful",
];

const NEGATIVE_WORDS: &[&str] = &[
    "angry",
    "awful",
    "bad",
    "boring",
    "broken",
    "disappointed",
    "fail",
    "failed",
    "hate",
    "horrible",
    "lost",
    "pain",
    "sad",
    "sick",
    "sorry",
    "terrible",
    "tired",
    "ugly",
    "upset",
    "worst",
];

const STOP_WORDS: &[&str] = &[
    "about", "all", "also", "and", "are", "been", "but", "can", "for", "from", "get", "got",
    "had", "has", "have", "her", "him", "his", "how", "into", "its", "just", "more", "not", "now",
    "our", "out", "she", "some", "than", "that", "the", "their", "them", "then", "there", "they",
    "this", "too", "very", "was", "were", "what", "when", "who", "why", "will", "with", "you",
    "your",
];

static DEFAULT_LEXICON: LazyLock<Lexicon> = LazyLock::new(Lexicon::builtin);

/// The built-in lexicon, constructed on first use and shared for the
/// lifetime of the process.
#[must_use]
pub fn default_lexicon() -> &'static Lexicon {
    &DEFAULT_LEXICON
}

/// Positive/negative sentiment words plus keyword stop words.
///
/// All entries are stored lowercase; lookups lowercase their input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexicon {
    positive: HashSet<String>,
    negative: HashSet<String>,
    stop_words: HashSet<String>,
}

impl Lexicon {
    /// The compiled-in word lists.
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_words(
            POSITIVE_WORDS.iter().copied(),
            NEGATIVE_WORDS.iter().copied(),
            STOP_WORDS.iter().copied(),
        )
    }

    /// Build a lexicon from arbitrary word lists. Words are trimmed and
    /// lowercased; blanks are dropped.
    #[must_use]
    pub fn from_words<'a>(
        positive: impl IntoIterator<Item = &'a str>,
        negative: impl IntoIterator<Item = &'a str>,
        stop_words: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        Self {
            positive: to_word_set(positive),
            negative: to_word_set(negative),
            stop_words: to_word_set(stop_words),
        }
    }

    #[must_use]
    pub fn is_positive(&self, word: &str) -> bool {
        self.positive.contains(&word.to_lowercase())
    }

    #[must_use]
    pub fn is_negative(&self, word: &str) -> bool {
        self.negative.contains(&word.to_lowercase())
    }

    #[must_use]
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(&word.to_lowercase())
    }

    /// `+1` for a positive word, `-1` for a negative word, `0` otherwise.
    #[must_use]
    pub fn polarity(&self, word: &str) -> i32 {
        let lower = word.to_lowercase();
        if self.positive.contains(&lower) {
            1
        } else if self.negative.contains(&lower) {
            -1
        } else {
            0
        }
    }

    #[must_use]
    pub fn positive_len(&self) -> usize {
        self.positive.len()
    }

    #[must_use]
    pub fn negative_len(&self) -> usize {
        self.negative.len()
    }

    #[must_use]
    pub fn stop_word_len(&self) -> usize {
        self.stop_words.len()
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::builtin()
    }
}

fn to_word_set<'a>(words: impl IntoIterator<Item = &'a str>) -> HashSet<String> {
    words
        .into_iter()
        .map(|w| w.trim().to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}

/// On-disk lexicon shape. `stop_words` falls back to the built-in list.
#[derive(Debug, Deserialize)]
struct LexiconFile {
    positive: Vec<String>,
    negative: Vec<String>,
    #[serde(default)]
    stop_words: Option<Vec<String>>,
}

/// Load and validate a lexicon from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_lexicon(path: &Path) -> Result<Lexicon, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LexiconFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_lexicon(&content)
}

fn parse_lexicon(content: &str) -> Result<Lexicon, ConfigError> {
    let file: LexiconFile = serde_yaml::from_str(content)?;

    let lexicon = match &file.stop_words {
        Some(stop_words) => Lexicon::from_words(
            file.positive.iter().map(String::as_str),
            file.negative.iter().map(String::as_str),
            stop_words.iter().map(String::as_str),
        ),
        None => Lexicon::from_words(
            file.positive.iter().map(String::as_str),
            file.negative.iter().map(String::as_str),
            STOP_WORDS.iter().copied(),
        ),
    };

    validate_lexicon(&lexicon)?;
    Ok(lexicon)
}

fn validate_lexicon(lexicon: &Lexicon) -> Result<(), ConfigError> {
    if lexicon.positive.is_empty() {
        return Err(ConfigError::Validation(
            "positive word list must be non-empty".to_string(),
        ));
    }
    if lexicon.negative.is_empty() {
        return Err(ConfigError::Validation(
            "negative word list must be non-empty".to_string(),
        ));
    }

    let mut overlap: Vec<&str> = lexicon
        .positive
        .intersection(&lexicon.negative)
        .map(String::as_str)
        .collect();
    if !overlap.is_empty() {
        overlap.sort_unstable();
        return Err(ConfigError::Validation(format!(
            "words listed as both positive and negative: {}",
            overlap.join(", ")
        )));
    }

    Ok(())
}
