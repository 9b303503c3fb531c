//! Extractor options and the partial updates that override them.

use regex::Regex;

use crate::parser::ParseOptions;

pub const DEFAULT_MAX_FILE_SIZE: usize = 10 * 1024 * 1024;
pub const DEFAULT_STRING_MIN_LENGTH: usize = 1;

#[derive(Debug, Clone)]
pub struct ExtractorOptions {
    pub parse_options: ParseOptions,
    pub extract_strings: bool,
    pub extract_functions: bool,
    pub extract_variables: bool,
    pub extract_classes: bool,
    pub extract_imports: bool,
    pub extract_exports: bool,
    /// Largest accepted input, in bytes.
    pub max_file_size: usize,
    /// Shortest string literal kept, in UTF-16 units.
    pub string_min_length: usize,
    /// String literals matching any of these are dropped.
    pub exclude_patterns: Vec<Regex>,
}

impl Default for ExtractorOptions {
    fn default() -> Self {
        Self {
            parse_options: ParseOptions::default(),
            extract_strings: true,
            extract_functions: true,
            extract_variables: true,
            extract_classes: true,
            extract_imports: true,
            extract_exports: true,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            string_min_length: DEFAULT_STRING_MIN_LENGTH,
            exclude_patterns: Vec::new(),
        }
    }
}

/// A partial set of options. Used both as a per-call override and as the
/// argument to `Extractor::set_options`.
#[derive(Debug, Clone, Default)]
pub struct OptionsUpdate {
    pub parse_options: Option<ParseOptions>,
    pub extract_strings: Option<bool>,
    pub extract_functions: Option<bool>,
    pub extract_variables: Option<bool>,
    pub extract_classes: Option<bool>,
    pub extract_imports: Option<bool>,
    pub extract_exports: Option<bool>,
    pub max_file_size: Option<usize>,
    pub string_min_length: Option<usize>,
    pub exclude_patterns: Option<Vec<Regex>>,
}

impl OptionsUpdate {
    pub fn is_empty(&self) -> bool {
        self.parse_options.is_none()
            && self.extract_strings.is_none()
            && self.extract_functions.is_none()
            && self.extract_variables.is_none()
            && self.extract_classes.is_none()
            && self.extract_imports.is_none()
            && self.extract_exports.is_none()
            && self.max_file_size.is_none()
            && self.string_min_length.is_none()
            && self.exclude_patterns.is_none()
    }
}

impl ExtractorOptions {
    /// Effective options for one call: every field set in `update` wins.
    pub fn merged(&self, update: &OptionsUpdate) -> Self {
        let mut merged = self.clone();
        merged.apply(update.clone());
        merged
    }

    pub fn apply(&mut self, update: OptionsUpdate) {
        let OptionsUpdate {
            parse_options,
            extract_strings,
            extract_functions,
            extract_variables,
            extract_classes,
            extract_imports,
            extract_exports,
            max_file_size,
            string_min_length,
            exclude_patterns,
        } = update;

        if let Some(parse_options) = parse_options {
            self.parse_options = parse_options;
        }
        if let Some(value) = extract_strings {
            self.extract_strings = value;
        }
        if let Some(value) = extract_functions {
            self.extract_functions = value;
        }
        if let Some(value) = extract_variables {
            self.extract_variables = value;
        }
        if let Some(value) = extract_classes {
            self.extract_classes = value;
        }
        if let Some(value) = extract_imports {
            self.extract_imports = value;
        }
        if let Some(value) = extract_exports {
            self.extract_exports = value;
        }
        if let Some(value) = max_file_size {
            self.max_file_size = value;
        }
        if let Some(value) = string_min_length {
            self.string_min_length = value;
        }
        if let Some(patterns) = exclude_patterns {
            self.exclude_patterns = patterns;
        }
    }
}
