//! `analyze` command handler.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use postpulse_analysis::{assemble_report, resolve_lexicon, Report};
use postpulse_core::{normalize_account_name, AnalysisConfig, PostSource, RankingMode};

use crate::render::render_summary;
use crate::source::JsonFileSource;
use crate::OutputFormat;

/// CLI flags layered over the environment configuration.
#[derive(Debug, Default)]
pub(crate) struct Overrides {
    pub slots: Option<i64>,
    pub mode: Option<RankingMode>,
    pub keywords: Option<usize>,
    pub limit: Option<usize>,
    pub strict: bool,
    pub lexicon: Option<PathBuf>,
}

pub(crate) fn apply_overrides(mut config: AnalysisConfig, overrides: Overrides) -> AnalysisConfig {
    if let Some(slots) = overrides.slots {
        config.requested_slot_count = slots;
    }
    if let Some(mode) = overrides.mode {
        config.ranking_mode = mode;
    }
    if let Some(keywords) = overrides.keywords {
        config.keyword_limit = keywords;
    }
    if overrides.limit.is_some() {
        config.post_limit = overrides.limit;
    }
    if overrides.strict {
        config.strict_normalization = true;
    }
    if overrides.lexicon.is_some() {
        config.lexicon_path = overrides.lexicon;
    }
    config
}

/// Analyze every input file and print the reports.
///
/// Files are analyzed concurrently on the blocking pool; each analysis is
/// independent and shares only the read-only config and lexicon.
///
/// # Errors
///
/// Returns an error if the lexicon cannot be loaded, any input cannot be
/// read, or strict normalization rejects a record.
pub(crate) async fn run_analyze(
    config: AnalysisConfig,
    overrides: Overrides,
    inputs: Vec<PathBuf>,
    account: Option<&str>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let config = Arc::new(apply_overrides(config, overrides));
    let lexicon = Arc::new(resolve_lexicon(&config)?.into_owned());

    if account.is_some() && inputs.len() > 1 {
        tracing::warn!("--account applies to every input file");
    }

    let tasks = inputs.into_iter().map(|path| {
        let config = Arc::clone(&config);
        let lexicon = Arc::clone(&lexicon);
        let source = JsonFileSource::new(path);
        let account = account.map_or_else(|| source.default_account(), normalize_account_name);
        tokio::task::spawn_blocking(move || analyze_source(&source, &account, &config, &lexicon))
    });

    let reports = futures::future::try_join_all(tasks)
        .await
        .context("analysis task panicked")?
        .into_iter()
        .collect::<anyhow::Result<Vec<Report>>>()?;

    match format {
        OutputFormat::Json => {
            let json = if let [single] = reports.as_slice() {
                serde_json::to_string_pretty(single)?
            } else {
                serde_json::to_string_pretty(&reports)?
            };
            println!("{json}");
        }
        OutputFormat::Text => {
            for report in &reports {
                println!("{}", render_summary(report)?);
            }
        }
    }

    Ok(())
}

fn analyze_source(
    source: &impl PostSource,
    account: &str,
    config: &AnalysisConfig,
    lexicon: &postpulse_core::Lexicon,
) -> anyhow::Result<Report> {
    let raw = source
        .fetch(account, config.post_limit)
        .with_context(|| format!("failed to load posts for {account}"))?;
    let report = assemble_report(Some(account), &raw, config, lexicon)
        .with_context(|| format!("analysis failed for {account}"))?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_env_values() {
        let config = apply_overrides(
            AnalysisConfig::default(),
            Overrides {
                slots: Some(5),
                mode: Some(RankingMode::HourlyOnly),
                keywords: Some(3),
                limit: Some(12),
                strict: true,
                lexicon: Some(PathBuf::from("lexicon.yaml")),
            },
        );
        assert_eq!(config.requested_slot_count, 5);
        assert_eq!(config.ranking_mode, RankingMode::HourlyOnly);
        assert_eq!(config.keyword_limit, 3);
        assert_eq!(config.post_limit, Some(12));
        assert!(config.strict_normalization);
        assert_eq!(config.lexicon_path, Some(PathBuf::from("lexicon.yaml")));
    }

    #[test]
    fn absent_overrides_keep_env_values() {
        let env = AnalysisConfig {
            requested_slot_count: 2,
            strict_normalization: true,
            post_limit: Some(7),
            ..AnalysisConfig::default()
        };
        let config = apply_overrides(env.clone(), Overrides::default());
        assert_eq!(config, env);
    }

    #[test]
    fn analyze_source_reports_missing_input() {
        let source = JsonFileSource::new("/nonexistent/postpulse.json");
        let err = analyze_source(
            &source,
            "ghost",
            &AnalysisConfig::default(),
            postpulse_core::default_lexicon(),
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("ghost"), "got: {err:#}");
    }
}
