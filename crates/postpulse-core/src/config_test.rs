use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn empty_env_yields_defaults() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_analysis_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg, AnalysisConfig::default());
    assert_eq!(cfg.requested_slot_count, 3);
    assert_eq!(cfg.ranking_mode, RankingMode::WeekdayHourPairs);
    assert_eq!(cfg.keyword_limit, 10);
    assert!(!cfg.strict_normalization);
    assert!(cfg.post_limit.is_none());
    assert!(cfg.lexicon_path.is_none());
    assert_eq!(cfg.log_level, "info");
}

#[test]
fn slot_count_override() {
    let mut map = HashMap::new();
    map.insert("POSTPULSE_SLOT_COUNT", "5");
    let cfg = build_analysis_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.requested_slot_count, 5);
}

#[test]
fn slot_count_out_of_range_is_kept_raw_and_clamped_on_use() {
    let mut map = HashMap::new();
    map.insert("POSTPULSE_SLOT_COUNT", "99");
    let cfg = build_analysis_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.requested_slot_count, 99);
    assert_eq!(cfg.slot_count(), MAX_SLOT_COUNT);
}

#[test]
fn slot_count_invalid() {
    let mut map = HashMap::new();
    map.insert("POSTPULSE_SLOT_COUNT", "three");
    let result = build_analysis_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "POSTPULSE_SLOT_COUNT"),
        "expected InvalidEnvVar(POSTPULSE_SLOT_COUNT), got: {result:?}"
    );
}

#[test]
fn ranking_mode_override() {
    let mut map = HashMap::new();
    map.insert("POSTPULSE_RANKING_MODE", "hourly_only");
    let cfg = build_analysis_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.ranking_mode, RankingMode::HourlyOnly);
}

#[test]
fn ranking_mode_unknown_is_configuration_error() {
    let mut map = HashMap::new();
    map.insert("POSTPULSE_RANKING_MODE", "best_minute");
    let result = build_analysis_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::UnknownRankingMode(ref m)) if m == "best_minute"),
        "expected UnknownRankingMode, got: {result:?}"
    );
}

#[test]
fn keyword_limit_invalid() {
    let mut map = HashMap::new();
    map.insert("POSTPULSE_KEYWORD_LIMIT", "-1");
    let result = build_analysis_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "POSTPULSE_KEYWORD_LIMIT"),
        "expected InvalidEnvVar(POSTPULSE_KEYWORD_LIMIT), got: {result:?}"
    );
}

#[test]
fn strict_accepts_common_spellings() {
    for (raw, expected) in [("true", true), ("1", true), ("YES", true), ("off", false)] {
        let mut map = HashMap::new();
        map.insert("POSTPULSE_STRICT", raw);
        let cfg = build_analysis_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.strict_normalization, expected, "input {raw}");
    }
}

#[test]
fn strict_invalid() {
    let mut map = HashMap::new();
    map.insert("POSTPULSE_STRICT", "maybe");
    let result = build_analysis_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "POSTPULSE_STRICT"),
        "expected InvalidEnvVar(POSTPULSE_STRICT), got: {result:?}"
    );
}

#[test]
fn post_limit_and_lexicon_path_override() {
    let mut map = HashMap::new();
    map.insert("POSTPULSE_POST_LIMIT", "25");
    map.insert("POSTPULSE_LEXICON_PATH", "./config/lexicon.yaml");
    let cfg = build_analysis_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.post_limit, Some(25));
    assert_eq!(
        cfg.lexicon_path.as_deref(),
        Some(std::path::Path::new("./config/lexicon.yaml"))
    );
}

#[test]
fn clamp_slot_count_bounds() {
    assert_eq!(clamp_slot_count(-4), 1);
    assert_eq!(clamp_slot_count(0), 1);
    assert_eq!(clamp_slot_count(1), 1);
    assert_eq!(clamp_slot_count(3), 3);
    assert_eq!(clamp_slot_count(5), 5);
    assert_eq!(clamp_slot_count(99), 5);
}

#[test]
fn ranking_mode_parses_hyphenated_and_cased_input() {
    assert_eq!(
        "Weekday-Hour-Pairs".parse::<RankingMode>().unwrap(),
        RankingMode::WeekdayHourPairs
    );
    assert_eq!(RankingMode::HourlyOnly.to_string(), "hourly_only");
}
