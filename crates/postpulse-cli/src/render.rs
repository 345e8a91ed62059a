//! Plain-text report summary for terminal output.

use std::fmt::Write;

use postpulse_analysis::Report;

const TOP_HASHTAGS: usize = 5;

/// Human-readable summary of a report.
pub(crate) fn render_summary(report: &Report) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    write_summary(&mut out, report)?;
    Ok(out)
}

fn write_summary(out: &mut String, report: &Report) -> std::fmt::Result {
    writeln!(out, "Account: {}", report.account.as_deref().unwrap_or("-"))?;
    writeln!(
        out,
        "Posts analyzed: {} (skipped {})",
        report.total_posts, report.skipped_records
    )?;

    if report.is_empty() {
        writeln!(out, "No posts to analyze; insufficient data for suggestions.")?;
        return Ok(());
    }

    writeln!(
        out,
        "Mean likes: {:.1}  Mean comments: {:.1}",
        report.mean_likes, report.mean_comments
    )?;
    if let Some(views) = report.mean_views {
        writeln!(out, "Mean video views: {views:.1}")?;
    }
    writeln!(
        out,
        "Media: {} image, {} video",
        report.media_mix.image, report.media_mix.video
    )?;
    if let (Some(day), Some(hour)) = (&report.most_common_day, report.most_common_hour) {
        writeln!(out, "Most common day: {day}  Most common hour: {hour:02}:00 UTC")?;
    }

    writeln!(out, "Suggested slots ({}):", report.ranking_mode)?;
    for suggestion in &report.suggestions {
        writeln!(
            out,
            "  {}. {} ({} posts)",
            suggestion.rank, suggestion.slot, suggestion.score
        )?;
    }

    let mut hashtags: Vec<(&String, &u64)> = report.text.hashtag_frequency.iter().collect();
    hashtags.sort_by(|a, b| b.1.cmp(a.1));
    if !hashtags.is_empty() {
        let top: Vec<String> = hashtags
            .iter()
            .take(TOP_HASHTAGS)
            .map(|(tag, count)| format!("#{tag} ({count})"))
            .collect();
        writeln!(out, "Top hashtags: {}", top.join(", "))?;
    }

    if !report.text.top_keywords.is_empty() {
        let keywords: Vec<String> = report
            .text
            .top_keywords
            .iter()
            .map(|k| format!("{} ({})", k.keyword, k.count))
            .collect();
        writeln!(out, "Top keywords: {}", keywords.join(", "))?;
    }

    let sentiment = report.text.sentiment_breakdown;
    writeln!(
        out,
        "Sentiment: {} positive, {} negative, {} neutral",
        sentiment.positive, sentiment.negative, sentiment.neutral
    )?;

    Ok(())
}
