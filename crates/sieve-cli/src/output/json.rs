//! JSON output formatter
//!
//! One document holding every file's results, the failures and the
//! extractor statistics.

use serde::Serialize;
use sieve_core::Statistics;

use super::{FileFailure, FileReport};

#[derive(Serialize)]
pub struct JsonOutput<'a> {
    pub version: &'static str,
    pub metadata: JsonMetadata,
    pub files: &'a [FileReport],
    #[serde(skip_serializing_if = "no_failures")]
    pub failures: &'a [FileFailure],
    pub statistics: &'a Statistics,
}

fn no_failures(failures: &&[FileFailure]) -> bool {
    failures.is_empty()
}

#[derive(Serialize)]
pub struct JsonMetadata {
    pub sieve_version: &'static str,
    pub working_directory: String,
}

pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn format(
        &self,
        reports: &[FileReport],
        failures: &[FileFailure],
        statistics: &Statistics,
    ) -> String {
        let output = JsonOutput {
            version: "1.0",
            metadata: self.build_metadata(),
            files: reports,
            failures,
            statistics,
        };
        serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
    }

    fn build_metadata(&self) -> JsonMetadata {
        JsonMetadata {
            sieve_version: env!("CARGO_PKG_VERSION"),
            working_directory: std::env::current_dir()
                .map(|p| p.to_string_lossy().to_string())
                .unwrap_or_default(),
        }
    }
}
