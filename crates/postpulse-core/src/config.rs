use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

pub const MIN_SLOT_COUNT: usize = 1;
pub const MAX_SLOT_COUNT: usize = 5;
pub const DEFAULT_SLOT_COUNT: i64 = 3;
pub const DEFAULT_KEYWORD_LIMIT: usize = 10;

/// How the suggestion ranker turns a temporal distribution into slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingMode {
    /// Each weekday's peak hour, ranked across weekdays.
    #[default]
    WeekdayHourPairs,
    /// Hour-of-day totals summed across all weekdays.
    HourlyOnly,
}

impl std::fmt::Display for RankingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RankingMode::WeekdayHourPairs => write!(f, "weekday_hour_pairs"),
            RankingMode::HourlyOnly => write!(f, "hourly_only"),
        }
    }
}

impl FromStr for RankingMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "weekday_hour_pairs" => Ok(RankingMode::WeekdayHourPairs),
            "hourly_only" => Ok(RankingMode::HourlyOnly),
            _ => Err(ConfigError::UnknownRankingMode(s.to_string())),
        }
    }
}

/// Configuration surface consumed by one analysis request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// Requested number of suggestions. Stored raw; the ranker clamps it to
    /// `MIN_SLOT_COUNT..=MAX_SLOT_COUNT`.
    pub requested_slot_count: i64,
    pub ranking_mode: RankingMode,
    pub keyword_limit: usize,
    pub strict_normalization: bool,
    /// Analyze only the first N raw records when set.
    pub post_limit: Option<usize>,
    pub lexicon_path: Option<PathBuf>,
    pub log_level: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            requested_slot_count: DEFAULT_SLOT_COUNT,
            ranking_mode: RankingMode::default(),
            keyword_limit: DEFAULT_KEYWORD_LIMIT,
            strict_normalization: false,
            post_limit: None,
            lexicon_path: None,
            log_level: "info".to_string(),
        }
    }
}

impl AnalysisConfig {
    /// The requested slot count clamped into the supported range.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        clamp_slot_count(self.requested_slot_count)
    }
}

/// Clamp a requested suggestion count to `MIN_SLOT_COUNT..=MAX_SLOT_COUNT`.
#[must_use]
pub fn clamp_slot_count(requested: i64) -> usize {
    usize::try_from(requested).map_or(MIN_SLOT_COUNT, |n| n.clamp(MIN_SLOT_COUNT, MAX_SLOT_COUNT))
}

/// Load analysis configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_analysis_config() -> Result<AnalysisConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_analysis_config_from_env()
}

/// Load analysis configuration from environment variables already in the process.
///
/// Unlike [`load_analysis_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_analysis_config_from_env() -> Result<AnalysisConfig, ConfigError> {
    build_analysis_config(|key| std::env::var(key))
}

/// Build configuration using the provided env-var lookup function.
///
/// Every variable is optional; defaults match [`AnalysisConfig::default`].
fn build_analysis_config<F>(lookup: F) -> Result<AnalysisConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let defaults = AnalysisConfig::default();

    let requested_slot_count = match lookup("POSTPULSE_SLOT_COUNT") {
        Ok(raw) => raw
            .trim()
            .parse::<i64>()
            .map_err(|e| invalid("POSTPULSE_SLOT_COUNT", e.to_string()))?,
        Err(_) => defaults.requested_slot_count,
    };

    let ranking_mode = match lookup("POSTPULSE_RANKING_MODE") {
        Ok(raw) => raw.parse::<RankingMode>()?,
        Err(_) => defaults.ranking_mode,
    };

    let keyword_limit = match lookup("POSTPULSE_KEYWORD_LIMIT") {
        Ok(raw) => raw
            .trim()
            .parse::<usize>()
            .map_err(|e| invalid("POSTPULSE_KEYWORD_LIMIT", e.to_string()))?,
        Err(_) => defaults.keyword_limit,
    };

    let strict_normalization = match lookup("POSTPULSE_STRICT") {
        Ok(raw) => parse_bool(&raw).ok_or_else(|| {
            invalid(
                "POSTPULSE_STRICT",
                format!("expected true/false, got \"{raw}\""),
            )
        })?,
        Err(_) => defaults.strict_normalization,
    };

    let post_limit = match lookup("POSTPULSE_POST_LIMIT") {
        Ok(raw) => Some(
            raw.trim()
                .parse::<usize>()
                .map_err(|e| invalid("POSTPULSE_POST_LIMIT", e.to_string()))?,
        ),
        Err(_) => None,
    };

    let lexicon_path = lookup("POSTPULSE_LEXICON_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);

    let log_level = lookup("POSTPULSE_LOG_LEVEL").unwrap_or(defaults.log_level);

    Ok(AnalysisConfig {
        requested_slot_count,
        ranking_mode,
        keyword_limit,
        strict_normalization,
        post_limit,
        lexicon_path,
        log_level,
    })
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
