//! Output formatters for extraction reports

pub mod json;
pub mod pretty;

use serde::Serialize;
use sieve_core::ExtractionOutput;

/// One file that extracted successfully.
#[derive(Debug, Serialize)]
pub struct FileReport {
    pub path: String,
    #[serde(flatten)]
    pub output: ExtractionOutput,
}

/// One file that could not be read or extracted.
#[derive(Debug, Serialize)]
pub struct FileFailure {
    pub path: String,
    pub error: String,
}
