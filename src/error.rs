//! Error handling for cvsense

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CvSenseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("Skill vocabulary error: {0}")]
    Vocabulary(String),

    #[error("Text processing error: {0}")]
    TextProcessing(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

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

pub type Result<T> = std::result::Result<T, CvSenseError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for CvSenseError {
    fn from(err: anyhow::Error) -> Self {
        CvSenseError::TextProcessing(err.to_string())
    }
}
