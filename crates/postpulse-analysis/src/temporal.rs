//! Weekday and hour-of-day posting histograms.

use chrono::Weekday;
use postpulse_core::{weekday_name, Post, WEEKDAYS};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::error::AnalysisError;

pub(crate) const HOURS: u32 = 24;

/// Posting counts by weekday, by hour, and by weekday-hour cell.
///
/// Every weekday and every hour is always present, zero or not, so the
/// three views always sum to [`TemporalDistribution::total`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemporalDistribution {
    total: u64,
    #[serde(serialize_with = "serialize_weekdays")]
    by_weekday: [u64; 7],
    #[serde(serialize_with = "serialize_hours")]
    by_hour: [u64; 24],
    #[serde(serialize_with = "serialize_grid")]
    weekday_hour: [[u64; 24]; 7],
}

impl Default for TemporalDistribution {
    fn default() -> Self {
        Self::empty()
    }
}

impl TemporalDistribution {
    /// All-zero distribution.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            total: 0,
            by_weekday: [0; 7],
            by_hour: [0; 24],
            weekday_hour: [[0; 24]; 7],
        }
    }

    /// Bucket posts by the weekday and hour of their UTC timestamp.
    #[must_use]
    pub fn from_posts(posts: &[Post]) -> Self {
        let mut dist = Self::empty();
        for post in posts {
            dist.record(post.weekday(), post.hour());
        }
        dist
    }

    fn record(&mut self, weekday: Weekday, hour: u32) {
        let day = weekday.num_days_from_monday() as usize;
        let hour = hour as usize;
        self.total += 1;
        self.by_weekday[day] += 1;
        self.by_hour[hour] += 1;
        self.weekday_hour[day][hour] += 1;
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.total
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    #[must_use]
    pub fn weekday_count(&self, weekday: Weekday) -> u64 {
        self.by_weekday[weekday.num_days_from_monday() as usize]
    }

    /// Count for `hour`; hours outside `0..24` have no posts.
    #[must_use]
    pub fn hour_count(&self, hour: u32) -> u64 {
        self.by_hour.get(hour as usize).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn weekday_hour_count(&self, weekday: Weekday, hour: u32) -> u64 {
        self.weekday_hour[weekday.num_days_from_monday() as usize]
            .get(hour as usize)
            .copied()
            .unwrap_or(0)
    }

    /// `(weekday, count)` in Monday-first order.
    pub fn weekday_counts(&self) -> impl Iterator<Item = (Weekday, u64)> + '_ {
        WEEKDAYS.iter().copied().zip(self.by_weekday.iter().copied())
    }

    /// `(hour, count)` for hours `0..24`.
    pub fn hour_counts(&self) -> impl Iterator<Item = (u32, u64)> + '_ {
        (0..HOURS).zip(self.by_hour.iter().copied())
    }

    /// `(hour, count)` for one weekday.
    pub fn hours_for(&self, weekday: Weekday) -> impl Iterator<Item = (u32, u64)> + '_ {
        let day = weekday.num_days_from_monday() as usize;
        (0..HOURS).zip(self.weekday_hour[day].iter().copied())
    }

    /// Weekday with the most posts; ties go to the earliest weekday.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::EmptyDistribution`] when there are no posts.
    pub fn mode_weekday(&self) -> Result<Weekday, AnalysisError> {
        if self.is_empty() {
            return Err(AnalysisError::EmptyDistribution("weekday"));
        }
        first_max(self.weekday_counts())
            .map(|(day, _)| day)
            .ok_or(AnalysisError::EmptyDistribution("weekday"))
    }

    /// Hour with the most posts; ties go to the lowest hour.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::EmptyDistribution`] when there are no posts.
    pub fn mode_hour(&self) -> Result<u32, AnalysisError> {
        if self.is_empty() {
            return Err(AnalysisError::EmptyDistribution("hour"));
        }
        first_max(self.hour_counts())
            .map(|(hour, _)| hour)
            .ok_or(AnalysisError::EmptyDistribution("hour"))
    }
}

/// Entry with the highest count, keeping the first one on ties.
pub(crate) fn first_max<K: Copy>(entries: impl IntoIterator<Item = (K, u64)>) -> Option<(K, u64)> {
    let mut best: Option<(K, u64)> = None;
    for (key, count) in entries {
        if best.is_none_or(|(_, top)| count > top) {
            best = Some((key, count));
        }
    }
    best
}

fn serialize_weekdays<S: Serializer>(counts: &[u64; 7], serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(counts.len()))?;
    for (day, count) in WEEKDAYS.iter().zip(counts) {
        map.serialize_entry(weekday_name(*day), count)?;
    }
    map.end()
}

fn serialize_hours<S: Serializer>(counts: &[u64; 24], serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(counts.len()))?;
    for (hour, count) in (0..HOURS).zip(counts) {
        map.serialize_entry(&hour, count)?;
    }
    map.end()
}

fn serialize_grid<S: Serializer>(grid: &[[u64; 24]; 7], serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(grid.len()))?;
    for (day, row) in WEEKDAYS.iter().zip(grid) {
        map.serialize_entry(weekday_name(*day), &row[..])?;
    }
    map.end()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use postpulse_core::MediaType;

    use super::*;

    /// 2024-03-04 is a Monday.
    fn post_at(day_offset: u32, hour: u32) -> Post {
        Post {
            id: format!("{day_offset}-{hour}"),
            timestamp: Utc
                .with_ymd_and_hms(2024, 3, 4 + day_offset, hour, 0, 0)
                .unwrap(),
            likes: 0,
            comments: 0,
            views: None,
            media_type: MediaType::Image,
            caption: String::new(),
        }
    }

    #[test]
    fn empty_distribution_has_every_key_at_zero() {
        let dist = TemporalDistribution::from_posts(&[]);
        assert_eq!(dist.weekday_counts().count(), 7);
        assert_eq!(dist.hour_counts().count(), 24);
        assert!(dist.weekday_counts().all(|(_, c)| c == 0));
        assert!(dist.hour_counts().all(|(_, c)| c == 0));
        assert_eq!(dist, TemporalDistribution::empty());
    }

    #[test]
    fn histogram_sums_match_post_count() {
        let posts: Vec<Post> = (0..7).flat_map(|d| [post_at(d, d), post_at(d, 23)]).collect();
        let dist = TemporalDistribution::from_posts(&posts);
        let weekday_sum: u64 = dist.weekday_counts().map(|(_, c)| c).sum();
        let hour_sum: u64 = dist.hour_counts().map(|(_, c)| c).sum();
        assert_eq!(weekday_sum, posts.len() as u64);
        assert_eq!(hour_sum, posts.len() as u64);
        assert_eq!(dist.total(), posts.len() as u64);
    }

    #[test]
    fn buckets_by_utc_weekday_and_hour() {
        let dist = TemporalDistribution::from_posts(&[post_at(0, 18), post_at(0, 18), post_at(2, 9)]);
        assert_eq!(dist.weekday_count(Weekday::Mon), 2);
        assert_eq!(dist.weekday_count(Weekday::Wed), 1);
        assert_eq!(dist.hour_count(18), 2);
        assert_eq!(dist.weekday_hour_count(Weekday::Mon, 18), 2);
        assert_eq!(dist.weekday_hour_count(Weekday::Wed, 18), 0);
        assert_eq!(dist.hour_count(99), 0);
    }

    #[test]
    fn mode_hour_ties_go_to_lowest_hour() {
        let posts = vec![post_at(0, 5), post_at(1, 5), post_at(2, 3), post_at(3, 3), post_at(4, 7)];
        let dist = TemporalDistribution::from_posts(&posts);
        for _ in 0..5 {
            assert_eq!(dist.mode_hour().unwrap(), 3);
        }
    }

    #[test]
    fn mode_weekday_ties_go_to_earliest_weekday() {
        let posts = vec![post_at(4, 1), post_at(4, 2), post_at(1, 1), post_at(1, 2)];
        let dist = TemporalDistribution::from_posts(&posts);
        assert_eq!(dist.mode_weekday().unwrap(), Weekday::Tue);
    }

    #[test]
    fn modes_on_empty_distribution_fail() {
        let dist = TemporalDistribution::empty();
        assert!(matches!(
            dist.mode_weekday(),
            Err(AnalysisError::EmptyDistribution("weekday"))
        ));
        assert!(matches!(
            dist.mode_hour(),
            Err(AnalysisError::EmptyDistribution("hour"))
        ));
    }

    #[test]
    fn serializes_in_fixed_order() {
        let dist = TemporalDistribution::from_posts(&[post_at(6, 0)]);
        let json = serde_json::to_string(&dist).unwrap();
        let monday = json.find("\"Monday\"").unwrap();
        let sunday = json.find("\"Sunday\"").unwrap();
        assert!(monday < sunday);
        assert!(json.contains("\"by_hour\":{\"0\":1,\"1\":0"), "got: {json}");

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["by_weekday"]["Sunday"], 1);
        assert_eq!(value["weekday_hour"]["Sunday"][0], 1);
        assert_eq!(value["by_weekday"].as_object().unwrap().len(), 7);
        assert_eq!(value["by_hour"].as_object().unwrap().len(), 24);
    }
}
