use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Number of caption characters kept in [`Post::caption_preview`].
pub const CAPTION_PREVIEW_CHARS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaType::Image => write!(f, "image"),
            MediaType::Video => write!(f, "video"),
        }
    }
}

/// A post record that has passed validation and defaulting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Opaque identifier, unique within one batch.
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub likes: u64,
    pub comments: u64,
    /// Present only for video posts with a numeric view count.
    pub views: Option<u64>,
    pub media_type: MediaType,
    /// Empty when the source had no caption.
    pub caption: String,
}

impl Post {
    /// Calendar weekday of the UTC timestamp.
    #[must_use]
    pub fn weekday(&self) -> Weekday {
        self.timestamp.weekday()
    }

    /// UTC hour of day, `0..=23`.
    #[must_use]
    pub fn hour(&self) -> u32 {
        self.timestamp.hour()
    }

    #[must_use]
    pub fn is_video(&self) -> bool {
        self.media_type == MediaType::Video
    }

    /// First [`CAPTION_PREVIEW_CHARS`] characters of the caption.
    #[must_use]
    pub fn caption_preview(&self) -> &str {
        match self.caption.char_indices().nth(CAPTION_PREVIEW_CHARS) {
            Some((byte_idx, _)) => &self.caption[..byte_idx],
            None => &self.caption,
        }
    }
}

/// A post as handed over by a fetch collaborator, before normalization.
///
/// Every field is kept as a raw JSON value because sources disagree on
/// types (`"N/A"` view counts, numeric strings, nulls). A wrongly typed
/// field never fails deserialization; the normalizer decides per record.
/// The timestamp can arrive either as a single `timestamp` value or as
/// separate `date` and `time` strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawPost {
    pub id: Option<Value>,
    #[serde(alias = "date_utc", alias = "taken_at")]
    pub timestamp: Option<Value>,
    pub date: Option<Value>,
    pub time: Option<Value>,
    #[serde(alias = "like_count")]
    pub likes: Option<Value>,
    #[serde(alias = "comment_count")]
    pub comments: Option<Value>,
    #[serde(alias = "video_view_count", alias = "view_count")]
    pub views: Option<Value>,
    pub media_type: Option<Value>,
    pub is_video: Option<Value>,
    pub caption: Option<Value>,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn post_with_caption(caption: &str) -> Post {
        Post {
            id: "p1".to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 3, 4, 18, 30, 0).unwrap(),
            likes: 0,
            comments: 0,
            views: None,
            media_type: MediaType::Image,
            caption: caption.to_string(),
        }
    }

    #[test]
    fn weekday_and_hour_come_from_utc_timestamp() {
        let post = post_with_caption("");
        assert_eq!(post.weekday(), Weekday::Mon);
        assert_eq!(post.hour(), 18);
    }

    #[test]
    fn caption_preview_keeps_short_captions() {
        let post = post_with_caption("sunset walk");
        assert_eq!(post.caption_preview(), "sunset walk");
    }

    #[test]
    fn caption_preview_truncates_on_char_boundary() {
        let caption = "é".repeat(60);
        let post = post_with_caption(&caption);
        assert_eq!(post.caption_preview().chars().count(), CAPTION_PREVIEW_CHARS);
    }

    #[test]
    fn raw_post_accepts_aliases() {
        let raw: RawPost = serde_json::from_str(
            r#"{"date_utc": "2024-03-04T18:30:00Z", "like_count": 5, "video_view_count": "N/A"}"#,
        )
        .unwrap();
        assert!(raw.timestamp.is_some());
        assert_eq!(raw.likes, Some(Value::from(5)));
        assert_eq!(raw.views, Some(Value::from("N/A")));
    }

    #[test]
    fn raw_post_missing_fields_are_none() {
        let raw: RawPost = serde_json::from_str("{}").unwrap();
        assert!(raw.id.is_none());
        assert!(raw.caption.is_none());
        assert!(raw.is_video.is_none());
    }

    #[test]
    fn raw_post_tolerates_wrongly_typed_fields() {
        let raw: Vec<RawPost> = serde_json::from_str(
            r#"[{"id": "a", "caption": "fine"}, {"id": "b", "caption": 12345, "is_video": "yes", "date": 20240304}]"#,
        )
        .unwrap();
        assert_eq!(raw.len(), 2);
        assert_eq!(raw[1].caption, Some(Value::from(12345)));
        assert_eq!(raw[1].is_video, Some(Value::from("yes")));
    }

    #[test]
    fn media_type_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&MediaType::Video).unwrap(), "\"video\"");
    }
}
