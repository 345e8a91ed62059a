//! Ranked posting-slot suggestions from a [`TemporalDistribution`].

use chrono::Weekday;
use postpulse_core::{clamp_slot_count, weekday_name, RankingMode, WEEKDAYS};
use serde::{Serialize, Serializer};

use crate::error::AnalysisError;
use crate::temporal::{first_max, TemporalDistribution};

/// A recommended posting time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Slot {
    WeekdayHour {
        #[serde(serialize_with = "serialize_weekday")]
        weekday: Weekday,
        hour: u32,
    },
    Hour {
        hour: u32,
    },
}

impl Slot {
    #[must_use]
    pub fn hour(&self) -> u32 {
        match self {
            Slot::WeekdayHour { hour, .. } | Slot::Hour { hour } => *hour,
        }
    }

    #[must_use]
    pub fn weekday(&self) -> Option<Weekday> {
        match self {
            Slot::WeekdayHour { weekday, .. } => Some(*weekday),
            Slot::Hour { .. } => None,
        }
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Slot::WeekdayHour { weekday, hour } => {
                write!(f, "{} {hour:02}:00 UTC", weekday_name(*weekday))
            }
            Slot::Hour { hour } => write!(f, "{hour:02}:00 UTC"),
        }
    }
}

/// One ranked suggestion. `rank` is 1-based; `score` is the historical
/// post count behind the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SuggestedSlot {
    pub rank: usize,
    pub slot: Slot,
    pub score: u64,
}

/// Rank posting slots by historical frequency.
///
/// `requested` is clamped to `1..=5`. Ties keep the earlier weekday or the
/// lower hour. An empty distribution yields no suggestions.
#[must_use]
pub fn suggest_slots(
    dist: &TemporalDistribution,
    requested: i64,
    mode: RankingMode,
) -> Vec<SuggestedSlot> {
    if dist.is_empty() {
        tracing::debug!("no posts in distribution; returning no suggestions");
        return Vec::new();
    }

    let mut candidates: Vec<(Slot, u64)> = match mode {
        RankingMode::WeekdayHourPairs => weekday_peaks(dist),
        RankingMode::HourlyOnly => dist
            .hour_counts()
            .map(|(hour, count)| (Slot::Hour { hour }, count))
            .collect(),
    };

    // Candidates are generated in canonical order; a stable sort keeps that
    // order among equal counts.
    candidates.sort_by(|a, b| b.1.cmp(&a.1));

    candidates
        .into_iter()
        .take(clamp_slot_count(requested))
        .enumerate()
        .map(|(idx, (slot, score))| SuggestedSlot {
            rank: idx + 1,
            slot,
            score,
        })
        .collect()
}

/// The single top-ranked slot.
///
/// # Errors
///
/// Returns [`AnalysisError::EmptyDistribution`] when there are no posts.
pub fn best_slot(
    dist: &TemporalDistribution,
    mode: RankingMode,
) -> Result<SuggestedSlot, AnalysisError> {
    suggest_slots(dist, 1, mode)
        .into_iter()
        .next()
        .ok_or(AnalysisError::EmptyDistribution("slot"))
}

/// Each weekday's busiest hour, in Monday-first order.
fn weekday_peaks(dist: &TemporalDistribution) -> Vec<(Slot, u64)> {
    WEEKDAYS
        .iter()
        .filter_map(|&weekday| {
            first_max(dist.hours_for(weekday))
                .map(|(hour, count)| (Slot::WeekdayHour { weekday, hour }, count))
        })
        .collect()
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn serialize_weekday<S: Serializer>(weekday: &Weekday, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(weekday_name(*weekday))
}
