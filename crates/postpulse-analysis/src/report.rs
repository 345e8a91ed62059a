//! Report assembly: composes normalization, temporal aggregation, text
//! signals, and suggestions into one immutable [`Report`].

use std::borrow::Cow;

use postpulse_core::{
    default_lexicon, load_lexicon, weekday_name, AnalysisConfig, Lexicon, MediaType, Post,
    RankingMode, RawPost,
};
use postpulse_signals::{extract_text_signals, TextSignals};
use serde::Serialize;

use crate::error::{AnalysisError, InvalidRecordError};
use crate::normalize::{normalize_posts, NormalizedBatch};
use crate::rank::{suggest_slots, SuggestedSlot};
use crate::temporal::TemporalDistribution;

/// Everything computed for one analysis request.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Account the batch belongs to, when the caller supplied one.
    pub account: Option<String>,
    pub total_posts: usize,
    /// Raw records dropped during lenient normalization.
    pub skipped_records: usize,
    pub skipped: Vec<InvalidRecordError>,
    pub total_likes: u64,
    pub total_comments: u64,
    /// 0.0 for an empty batch.
    pub mean_likes: f64,
    /// 0.0 for an empty batch.
    pub mean_comments: f64,
    /// Mean over video posts with a known view count.
    pub mean_views: Option<f64>,
    pub media_mix: MediaMix,
    pub most_common_day: Option<String>,
    pub most_common_hour: Option<u32>,
    pub temporal: TemporalDistribution,
    pub text: TextSignals,
    pub ranking_mode: RankingMode,
    pub suggestions: Vec<SuggestedSlot>,
    pub posts: Vec<PostRow>,
}

impl Report {
    /// `true` when no post survived normalization.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_posts == 0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MediaMix {
    pub image: usize,
    pub video: usize,
}

/// One post flattened for row-per-post export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostRow {
    pub id: String,
    /// `YYYY-MM-DD`, UTC.
    pub date: String,
    /// `HH:MM:SS`, UTC.
    pub time: String,
    pub day: String,
    pub likes: u64,
    pub comments: u64,
    pub views: Option<u64>,
    pub media_type: MediaType,
    /// Caption truncated to 50 characters.
    pub caption: String,
}

impl From<&Post> for PostRow {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id.clone(),
            date: post.timestamp.format("%Y-%m-%d").to_string(),
            time: post.timestamp.format("%H:%M:%S").to_string(),
            day: weekday_name(post.weekday()).to_string(),
            likes: post.likes,
            comments: post.comments,
            views: post.views,
            media_type: post.media_type,
            caption: post.caption_preview().to_string(),
        }
    }
}

/// The lexicon named by `config.lexicon_path`, or the built-in one.
///
/// Call once at startup and share the result across requests.
///
/// # Errors
///
/// Returns [`AnalysisError::Configuration`] if the lexicon file cannot be
/// read, parsed, or validated.
pub fn resolve_lexicon(config: &AnalysisConfig) -> Result<Cow<'static, Lexicon>, AnalysisError> {
    match &config.lexicon_path {
        Some(path) => {
            let lexicon = load_lexicon(path)?;
            tracing::info!(
                path = %path.display(),
                positive = lexicon.positive_len(),
                negative = lexicon.negative_len(),
                "loaded lexicon"
            );
            Ok(Cow::Owned(lexicon))
        }
        None => Ok(Cow::Borrowed(default_lexicon())),
    }
}

/// Normalize `raw` and build a report from it.
///
/// `config.post_limit` truncates the raw batch first. In strict mode the
/// first invalid record aborts the analysis; otherwise invalid records are
/// counted in [`Report::skipped_records`].
///
/// # Errors
///
/// Returns [`AnalysisError::InvalidRecord`] in strict mode when any record
/// fails normalization.
pub fn assemble_report(
    account: Option<&str>,
    raw: &[RawPost],
    config: &AnalysisConfig,
    lexicon: &Lexicon,
) -> Result<Report, AnalysisError> {
    let limited = match config.post_limit {
        Some(limit) if limit < raw.len() => &raw[..limit],
        _ => raw,
    };

    let batch = normalize_posts(limited);
    if config.strict_normalization {
        if let Some(first) = batch.skipped.first() {
            return Err(first.clone().into());
        }
    }

    Ok(build_report(account, batch, config, lexicon))
}

/// Build a report from an already-normalized batch.
#[must_use]
pub fn build_report(
    account: Option<&str>,
    batch: NormalizedBatch,
    config: &AnalysisConfig,
    lexicon: &Lexicon,
) -> Report {
    let NormalizedBatch { posts, skipped } = batch;

    let temporal = TemporalDistribution::from_posts(&posts);
    let text = extract_text_signals(&posts, lexicon, config.keyword_limit);
    let suggestions = suggest_slots(&temporal, config.requested_slot_count, config.ranking_mode);

    let likes_sum: u128 = posts.iter().map(|p| u128::from(p.likes)).sum();
    let comments_sum: u128 = posts.iter().map(|p| u128::from(p.comments)).sum();
    let views: Vec<u64> = posts.iter().filter_map(|p| p.views).collect();
    let views_sum: u128 = views.iter().copied().map(u128::from).sum();

    let media_mix = posts.iter().fold(MediaMix::default(), |mut mix, post| {
        match post.media_type {
            MediaType::Image => mix.image += 1,
            MediaType::Video => mix.video += 1,
        }
        mix
    });

    let report = Report {
        account: account.map(str::to_string),
        total_posts: posts.len(),
        skipped_records: skipped.len(),
        skipped,
        total_likes: saturate(likes_sum),
        total_comments: saturate(comments_sum),
        mean_likes: mean(likes_sum, posts.len()),
        mean_comments: mean(comments_sum, posts.len()),
        mean_views: (!views.is_empty()).then(|| mean(views_sum, views.len())),
        media_mix,
        most_common_day: temporal
            .mode_weekday()
            .ok()
            .map(|day| weekday_name(day).to_string()),
        most_common_hour: temporal.mode_hour().ok(),
        temporal,
        text,
        ranking_mode: config.ranking_mode,
        suggestions,
        posts: posts.iter().map(PostRow::from).collect(),
    };

    tracing::info!(
        account = report.account.as_deref().unwrap_or("-"),
        posts = report.total_posts,
        skipped = report.skipped_records,
        suggestions = report.suggestions.len(),
        "assembled report"
    );

    report
}

/// Totals are reported as `u64`; a sum past `u64::MAX` is pinned there.
fn saturate(sum: u128) -> u64 {
    u64::try_from(sum).unwrap_or(u64::MAX)
}

/// Means are taken over the unclamped `u128` sum.
#[allow(clippy::cast_precision_loss)]
fn mean(sum: u128, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}

#[cfg(test)]
#[path = "report_test.rs"]
mod tests;
