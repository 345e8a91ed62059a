//! File-backed [`PostSource`]: reads raw post records saved as JSON.

use std::path::PathBuf;

use postpulse_core::{PostSource, RawPost, SourceError};
use serde::Deserialize;
use serde_json::Value;

/// Accepts either a bare array of records or `{"posts": [...]}`.
///
/// Records stay untyped here so one malformed entry cannot reject the file.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PostFile {
    Bare(Vec<Value>),
    Wrapped { posts: Vec<Value> },
}

/// A record that is not a JSON object becomes an empty [`RawPost`], which the
/// normalizer then reports as an invalid record at the same index.
fn to_raw_post(index: usize, record: Value) -> RawPost {
    serde_json::from_value(record).unwrap_or_else(|e| {
        tracing::warn!(index, error = %e, "raw post is not an object");
        RawPost::default()
    })
}

#[derive(Debug, Clone)]
pub(crate) struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File stem, used as the account name when none is given.
    pub(crate) fn default_account(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

impl PostSource for JsonFileSource {
    fn fetch(&self, account: &str, limit: Option<usize>) -> Result<Vec<RawPost>, SourceError> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SourceError::NotFound {
                    account: account.to_string(),
                }
            } else {
                SourceError::Io {
                    path: self.path.display().to_string(),
                    source: e,
                }
            }
        })?;

        let file: PostFile = serde_json::from_str(&content).map_err(|e| SourceError::Parse {
            context: format!("{account} ({})", self.path.display()),
            source: e,
        })?;

        let records = match file {
            PostFile::Bare(posts) | PostFile::Wrapped { posts } => posts,
        };
        let posts: Vec<RawPost> = records
            .into_iter()
            .take(limit.unwrap_or(usize::MAX))
            .enumerate()
            .map(|(index, record)| to_raw_post(index, record))
            .collect();

        tracing::debug!(
            account,
            path = %self.path.display(),
            records = posts.len(),
            "read raw posts"
        );
        Ok(posts)
    }
}
