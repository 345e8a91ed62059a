use postpulse_core::ConfigError;
use serde::Serialize;
use thiserror::Error;

/// A raw record that could not be normalized.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("invalid post record at index {index}: {reason}")]
pub struct InvalidRecordError {
    /// Position of the record in the raw batch.
    pub index: usize,
    /// Identifier from the raw record, when it had one.
    pub id: Option<String>,
    pub reason: String,
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    InvalidRecord(#[from] InvalidRecordError),

    #[error("cannot select the {0} mode of an empty distribution")]
    EmptyDistribution(&'static str),

    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),
}
