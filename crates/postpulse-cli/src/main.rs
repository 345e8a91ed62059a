mod analyze;
mod render;
mod source;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use postpulse_core::RankingMode;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "postpulse")]
#[command(about = "Posting-pattern analysis and posting-time suggestions")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Analyze one or more JSON files of raw posts
    Analyze {
        /// JSON files holding raw post records; each file is one account
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Account name (a leading `@` is ignored); defaults to the file stem
        #[arg(long)]
        account: Option<String>,

        /// Number of suggested slots, clamped to 1..=5
        #[arg(long, allow_hyphen_values = true)]
        slots: Option<i64>,

        /// Ranking mode: weekday_hour_pairs or hourly_only
        #[arg(long)]
        mode: Option<RankingMode>,

        /// Number of top keywords to report
        #[arg(long)]
        keywords: Option<usize>,

        /// Analyze only the first N records of each file
        #[arg(long)]
        limit: Option<usize>,

        /// Fail on the first invalid record instead of skipping it
        #[arg(long)]
        strict: bool,

        /// YAML lexicon replacing the built-in word lists
        #[arg(long)]
        lexicon: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = postpulse_core::load_analysis_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Analyze {
            inputs,
            account,
            slots,
            mode,
            keywords,
            limit,
            strict,
            lexicon,
            format,
        }) => {
            let overrides = analyze::Overrides {
                slots,
                mode,
                keywords,
                limit,
                strict,
                lexicon,
            };
            analyze::run_analyze(config, overrides, inputs, account.as_deref(), format).await?;
        }
        None => println!("postpulse: run `postpulse analyze <FILE>...` or `postpulse --help`"),
    }

    Ok(())
}
