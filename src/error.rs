//! Error handling for the tech-fit scoring tool

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TechFitError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Text processing error: {0}")]
    TextProcessing(String),

    #[error("Vectorizer error: {0}")]
    Vectorizer(String),

    #[error("Classifier error: {0}")]
    Classifier(String),

    #[error("Artifact loading error: {0}")]
    ArtifactLoading(String),

    #[error("Training error: {0}")]
    Training(String),

    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, TechFitError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for TechFitError {
    fn from(err: anyhow::Error) -> Self {
        TechFitError::TextProcessing(err.to_string())
    }
}
