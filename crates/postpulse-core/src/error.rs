use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("unknown ranking mode \"{0}\"; expected weekday_hour_pairs or hourly_only")]
    UnknownRankingMode(String),

    #[error("failed to read lexicon file {path}: {source}")]
    LexiconFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse lexicon file: {0}")]
    LexiconFileParse(#[from] serde_yaml::Error),

    #[error("lexicon validation failed: {0}")]
    Validation(String),
}

/// Failure reported by a [`crate::PostSource`] collaborator.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("no posts found for account \"{account}\"")]
    NotFound { account: String },

    #[error("failed to read posts from {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse posts for {context}: {source}")]
    Parse {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
