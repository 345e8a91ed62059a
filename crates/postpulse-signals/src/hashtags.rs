use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

static HASHTAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#(\w+)").expect("valid hashtag regex"));

/// Hashtags in a caption, lowercased, in order of appearance.
///
/// A tag is `#` followed by one or more word characters. Duplicates are kept.
#[must_use]
pub fn extract_hashtags(caption: &str) -> Vec<String> {
    let lower = caption.to_lowercase();
    HASHTAG_RE
        .captures_iter(&lower)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Count tag occurrences across many per-post hashtag sequences.
#[must_use]
pub fn hashtag_frequency<'a, I, S>(sequences: I) -> BTreeMap<String, u64>
where
    I: IntoIterator<Item = &'a [S]>,
    S: AsRef<str> + 'a,
{
    let mut counts = BTreeMap::new();
    for tags in sequences {
        for tag in tags {
            *counts.entry(tag.as_ref().to_lowercase()).or_insert(0) += 1;
        }
    }
    counts
}
