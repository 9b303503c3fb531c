//! Extraction entry point
//!
//! Validates input, parses once, runs the enabled category extractors plus
//! the pattern, comment and metadata passes, then records the result.

use std::time::Instant;

use regex::Regex;
use serde::Serialize;

use crate::config::{Config, ConfigError};
use crate::error::{ExtractError, Result};
use crate::extract::{
    ClassExtractor, ExportExtractor, ExtractionResults, FunctionExtractor, ImportExtractor,
    StringExtractor, VariableExtractor, collect_comments, detect_metadata, run,
};
use crate::options::{ExtractorOptions, OptionsUpdate};
use crate::parser::{SourceParser, SwcParser};
use crate::patterns::{PatternRegistry, match_patterns};
use crate::store::{ExtractionRecord, IdGenerator, ResultStore, Statistics};
use crate::visitor::VisitorContext;

/// What one successful `extract` call returns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractionOutput {
    pub id: String,
    pub results: ExtractionResults,
    /// Wall-clock milliseconds.
    pub duration: f64,
}

pub struct Extractor<P: SourceParser = SwcParser> {
    parser: P,
    options: ExtractorOptions,
    patterns: PatternRegistry,
    store: ResultStore,
    ids: IdGenerator,
}

impl Extractor<SwcParser> {
    pub fn new() -> Self {
        Self::with_options(ExtractorOptions::default())
    }

    pub fn with_options(options: ExtractorOptions) -> Self {
        Self::with_parser(SwcParser::new(), options)
    }

    /// Options and extra patterns from a loaded `sieve.toml`.
    pub fn from_config(config: &Config) -> std::result::Result<Self, ConfigError> {
        let mut extractor = Self::with_options(config.to_options()?);
        extractor.patterns = config.pattern_registry()?;
        Ok(extractor)
    }
}

impl Default for Extractor<SwcParser> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: SourceParser> Extractor<P> {
    pub fn with_parser(parser: P, options: ExtractorOptions) -> Self {
        Self {
            parser,
            options,
            patterns: PatternRegistry::with_defaults(),
            store: ResultStore::new(),
            ids: IdGenerator::new(),
        }
    }

    pub fn extract(&mut self, code: &str) -> Result<ExtractionOutput> {
        self.extract_with(code, &OptionsUpdate::default())
    }

    /// Extracts with `overrides` applied on top of the instance options.
    pub fn extract_with(
        &mut self,
        code: &str,
        overrides: &OptionsUpdate,
    ) -> Result<ExtractionOutput> {
        let options = self.options.merged(overrides);

        if code.is_empty() {
            return Err(ExtractError::empty_input());
        }
        if code.len() > options.max_file_size {
            return Err(ExtractError::SizeExceeded {
                size: code.len(),
                max: options.max_file_size,
            });
        }

        let id = self.ids.next_id();
        let _span = tracing::debug_span!("extract", id = %id, bytes = code.len()).entered();
        let start = Instant::now();

        let results = self.run_passes(code, &options).inspect_err(|error| {
            tracing::debug!(%error, "extraction failed");
        })?;

        let duration = start.elapsed().as_secs_f64() * 1000.0;
        self.store.record(id.clone(), results.clone(), duration);
        tracing::debug!(duration_ms = duration, "extraction recorded");

        Ok(ExtractionOutput {
            id,
            results,
            duration,
        })
    }

    fn run_passes(&self, code: &str, options: &ExtractorOptions) -> Result<ExtractionResults> {
        let parsed = self.parser.parse(code, &options.parse_options)?;
        let ctx = VisitorContext::new(&parsed);

        let strings = options.extract_strings.then(|| {
            tracing::trace!("extracting strings");
            run(
                StringExtractor::new(options.string_min_length, &options.exclude_patterns),
                &ctx,
            )
        });
        let functions = options.extract_functions.then(|| {
            tracing::trace!("extracting functions");
            run(FunctionExtractor::new(), &ctx)
        });
        let variables = options.extract_variables.then(|| {
            tracing::trace!("extracting variables");
            run(VariableExtractor::new(), &ctx)
        });
        let classes = options.extract_classes.then(|| {
            tracing::trace!("extracting classes");
            run(ClassExtractor::new(), &ctx)
        });
        let imports = options.extract_imports.then(|| {
            tracing::trace!("extracting imports");
            run(ImportExtractor::new(), &ctx)
        });
        let exports = options.extract_exports.then(|| {
            tracing::trace!("extracting exports");
            run(ExportExtractor::new(), &ctx)
        });

        Ok(ExtractionResults {
            strings,
            functions,
            variables,
            classes,
            imports,
            exports,
            patterns: match_patterns(&self.patterns, code),
            comments: collect_comments(&parsed),
            metadata: detect_metadata(parsed.module()),
        })
    }

    pub fn register_pattern(&mut self, name: &str, regex: Regex) -> Result<()> {
        self.patterns.register(name, regex).map(|_| ())
    }

    /// Compiles `source` and registers it under `name`.
    pub fn register_pattern_source(&mut self, name: &str, source: &str) -> Result<()> {
        self.patterns.register_source(name, source).map(|_| ())
    }

    pub fn unregister_pattern(&mut self, name: &str) -> bool {
        self.patterns.unregister(name)
    }

    pub fn get_pattern(&self, name: &str) -> Option<&Regex> {
        self.patterns.get(name)
    }

    pub fn list_patterns(&self) -> Vec<&str> {
        self.patterns.list()
    }

    pub fn patterns(&self) -> &PatternRegistry {
        &self.patterns
    }

    pub fn get_results(&self, id: &str) -> Option<&ExtractionRecord> {
        self.store.get(id)
    }

    pub fn get_all_results(&self) -> &[ExtractionRecord] {
        self.store.all()
    }

    pub fn get_statistics(&self) -> Statistics {
        self.store.statistics()
    }

    /// Drops stored records; returns how many were dropped.
    pub fn clear_results(&mut self) -> usize {
        self.store.clear()
    }

    pub fn reset(&mut self) {
        self.store.reset();
    }

    pub fn set_options(&mut self, update: OptionsUpdate) {
        self.options.apply(update);
    }

    pub fn options(&self) -> &ExtractorOptions {
        &self.options
    }

    /// Releases records, statistics and patterns. The extractor is consumed.
    pub fn dispose(mut self) {
        self.store.reset();
        self.patterns.clear();
        tracing::debug!("extractor disposed");
    }
}
