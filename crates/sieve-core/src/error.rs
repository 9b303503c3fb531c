//! Errors surfaced by the extractor.

use crate::parser::ParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    SizeExceeded,
    Extraction,
    InvalidPattern,
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("File size ({size} bytes) exceeds maximum allowed size ({max} bytes)")]
    SizeExceeded { size: usize, max: usize },
    #[error("Extraction failed: {0}")]
    Extraction(String),
    #[error("Invalid pattern '{name}': {message}")]
    InvalidPattern { name: String, message: String },
}

impl ExtractError {
    pub fn empty_input() -> Self {
        Self::InvalidInput("Code must be a non-empty string".to_string())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::SizeExceeded { .. } => ErrorKind::SizeExceeded,
            Self::Extraction(_) => ErrorKind::Extraction,
            Self::InvalidPattern { .. } => ErrorKind::InvalidPattern,
        }
    }
}

impl From<ParseError> for ExtractError {
    fn from(error: ParseError) -> Self {
        Self::Extraction(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ExtractError>;
