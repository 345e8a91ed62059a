//! Normalization from loose [`RawPost`] records to canonical [`Post`]s.
//!
//! Counters default to zero, captions to empty text, and view counts are
//! kept only for video posts. A record is rejected only when its timestamp
//! cannot be interpreted or its id collides with an earlier record.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use postpulse_core::{MediaType, Post, RawPost};
use serde_json::Value;

use crate::error::InvalidRecordError;

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
];
const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M"];

/// Result of normalizing a raw batch: accepted posts plus rejected records,
/// both in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedBatch {
    pub posts: Vec<Post>,
    pub skipped: Vec<InvalidRecordError>,
}

impl NormalizedBatch {
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

/// Normalizes every record in `raw`, collecting failures instead of
/// stopping at the first one.
///
/// Explicit ids must be unique. Records without an id get `post-{n}`; when
/// that label is already used by an explicit id, a `-{k}` suffix is added.
#[must_use]
pub fn normalize_posts(raw: &[RawPost]) -> NormalizedBatch {
    let mut batch = NormalizedBatch::default();
    let explicit_ids: HashSet<String> = raw
        .iter()
        .filter_map(|record| record.id.as_ref().and_then(id_from_value))
        .collect();
    let mut seen_ids = HashSet::new();

    for (index, record) in raw.iter().enumerate() {
        let has_explicit_id = record.id.as_ref().and_then(id_from_value).is_some();
        let result = normalize_post(record, index).and_then(|mut post| {
            if !has_explicit_id {
                post.id = free_fallback_id(&post.id, &explicit_ids, &seen_ids);
            }
            if seen_ids.insert(post.id.clone()) {
                Ok(post)
            } else {
                Err(InvalidRecordError {
                    index,
                    id: Some(post.id.clone()),
                    reason: format!("duplicate post id \"{}\"", post.id),
                })
            }
        });

        match result {
            Ok(post) => batch.posts.push(post),
            Err(err) => {
                tracing::warn!(index, id = ?err.id, reason = %err.reason, "skipping post record");
                batch.skipped.push(err);
            }
        }
    }

    tracing::debug!(
        accepted = batch.posts.len(),
        skipped = batch.skipped.len(),
        "normalized post batch"
    );
    batch
}

fn free_fallback_id(
    base: &str,
    explicit_ids: &HashSet<String>,
    seen_ids: &HashSet<String>,
) -> String {
    let taken = |id: &str| explicit_ids.contains(id) || seen_ids.contains(id);
    if !taken(base) {
        return base.to_string();
    }
    (2_usize..)
        .map(|k| format!("{base}-{k}"))
        .find(|candidate| !taken(candidate))
        .unwrap_or_else(|| base.to_string())
}

/// Normalizes one raw record. `index` is its position in the batch and is
/// used for the fallback id and for error reporting.
///
/// # Errors
///
/// Returns [`InvalidRecordError`] if the timestamp is missing or unparseable.
pub fn normalize_post(raw: &RawPost, index: usize) -> Result<Post, InvalidRecordError> {
    let raw_id = raw.id.as_ref().and_then(id_from_value);

    let timestamp = parse_timestamp(raw).map_err(|reason| InvalidRecordError {
        index,
        id: raw_id.clone(),
        reason,
    })?;

    let media_type = parse_media_type(raw);
    let views = match media_type {
        MediaType::Video => raw.views.as_ref().and_then(parse_count),
        MediaType::Image => None,
    };

    Ok(Post {
        id: raw_id.unwrap_or_else(|| format!("post-{}", index + 1)),
        timestamp,
        likes: raw.likes.as_ref().and_then(parse_count).unwrap_or(0),
        comments: raw.comments.as_ref().and_then(parse_count).unwrap_or(0),
        views,
        media_type,
        caption: raw.caption.as_ref().and_then(text_from_value).unwrap_or_default(),
    })
}

fn id_from_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        other => Some(other.to_string()),
    }
}

/// Non-negative integer counters. Numeric strings are accepted; anything
/// else (`"N/A"`, negatives, fractions) is treated as unknown.
fn parse_count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().replace(',', "").parse::<u64>().ok(),
        _ => None,
    }
}

/// String payload of a field; non-string values count as absent.
fn text_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

/// `is_video: true` marks a video; anything else defers to `media_type`.
fn parse_media_type(raw: &RawPost) -> MediaType {
    if raw.is_video.as_ref() == Some(&Value::Bool(true)) {
        return MediaType::Video;
    }
    match raw
        .media_type
        .as_ref()
        .and_then(text_from_value)
        .map(|m| m.trim().to_ascii_lowercase())
        .as_deref()
    {
        Some("video" | "graphvideo" | "reel" | "clip") => MediaType::Video,
        _ => MediaType::Image,
    }
}

fn parse_timestamp(raw: &RawPost) -> Result<DateTime<Utc>, String> {
    match &raw.timestamp {
        Some(Value::String(s)) => parse_timestamp_str(s),
        Some(Value::Number(n)) => {
            let secs = n
                .as_i64()
                .ok_or_else(|| format!("timestamp {n} is not an integer epoch"))?;
            DateTime::<Utc>::from_timestamp(secs, 0)
                .ok_or_else(|| format!("timestamp {secs} is out of range"))
        }
        Some(Value::Null) | None => parse_split_date_time(raw),
        Some(other) => Err(format!("unsupported timestamp value {other}")),
    }
}

fn parse_timestamp_str(s: &str) -> Result<DateTime<Utc>, String> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| format!("unparseable timestamp \"{s}\""))
}

fn parse_split_date_time(raw: &RawPost) -> Result<DateTime<Utc>, String> {
    let date = raw.date.as_ref().and_then(text_from_value);
    let time = raw.time.as_ref().and_then(text_from_value);
    let (Some(date), Some(time)) = (date.as_deref(), time.as_deref()) else {
        return Err("missing timestamp".to_string());
    };
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|e| format!("unparseable date \"{date}\": {e}"))?;
    let time = TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(time.trim(), fmt).ok())
        .ok_or_else(|| format!("unparseable time \"{time}\""))?;
    Ok(date.and_time(time).and_utc())
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
