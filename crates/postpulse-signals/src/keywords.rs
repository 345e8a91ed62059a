use std::collections::HashMap;
use std::sync::LazyLock;

use postpulse_core::Lexicon;
use regex::Regex;

use crate::types::KeywordCount;

/// Tokens shorter than this many characters are ignored.
const MIN_KEYWORD_CHARS: usize = 3;

static WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").expect("valid word regex"));

/// The `limit` most frequent caption keywords.
///
/// Captions are case-folded and split into runs of word characters. Short
/// tokens and stop words are dropped. Ties keep first-seen order.
#[must_use]
pub fn top_keywords<'a>(
    captions: impl IntoIterator<Item = &'a str>,
    lexicon: &Lexicon,
    limit: usize,
) -> Vec<KeywordCount> {
    if limit == 0 {
        return Vec::new();
    }

    // keyword -> (count, first-seen position)
    let mut counts: HashMap<String, (u64, usize)> = HashMap::new();
    let mut seen = 0_usize;

    for caption in captions {
        let lower = caption.to_lowercase();
        for token in WORD_RE.find_iter(&lower).map(|m| m.as_str()) {
            if token.chars().count() < MIN_KEYWORD_CHARS || lexicon.is_stop_word(token) {
                continue;
            }
            let entry = counts.entry(token.to_string()).or_insert((0, seen));
            entry.0 += 1;
            seen += 1;
        }
    }

    let mut ranked: Vec<(String, u64, usize)> = counts
        .into_iter()
        .map(|(keyword, (count, first))| (keyword, count, first))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    ranked.truncate(limit);

    ranked
        .into_iter()
        .map(|(keyword, count, _)| KeywordCount { keyword, count })
        .collect()
}
