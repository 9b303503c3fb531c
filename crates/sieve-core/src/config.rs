//! Configuration loading and parsing for Sieve
//!
//! Provides functionality to load and parse `sieve.toml` configuration files.

use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::options::{DEFAULT_MAX_FILE_SIZE, DEFAULT_STRING_MIN_LENGTH, ExtractorOptions};
use crate::parser::ParseOptions;
use crate::patterns::PatternRegistry;

pub const CONFIG_FILENAME: &str = "sieve.toml";

const KNOWN_TOP_LEVEL_KEYS: &[&str] = &["max_file_size", "parse", "extract", "strings", "patterns"];
const KNOWN_SECTION_KEYS: &[(&str, &[&str])] = &[
    ("parse", &["source_type", "plugins"]),
    (
        "extract",
        &[
            "strings",
            "functions",
            "variables",
            "classes",
            "imports",
            "exports",
        ],
    ),
    ("strings", &["min_length", "exclude"]),
];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid TOML in '{path}': {message}")]
    ParseError { path: PathBuf, message: String },
    #[error("Invalid regex for '{name}': {message}")]
    InvalidPattern { name: String, message: String },
}

#[derive(Debug, Clone, Default)]
pub struct ConfigResult {
    pub config: Config,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub max_file_size: usize,
    pub parse: ParseOptions,
    pub extract: ExtractConfig,
    pub strings: StringsConfig,
    /// Extra patterns registered on top of the defaults, by name.
    pub patterns: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            parse: ParseOptions::default(),
            extract: ExtractConfig::default(),
            strings: StringsConfig::default(),
            patterns: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExtractConfig {
    pub strings: bool,
    pub functions: bool,
    pub variables: bool,
    pub classes: bool,
    pub imports: bool,
    pub exports: bool,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            strings: true,
            functions: true,
            variables: true,
            classes: true,
            imports: true,
            exports: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct StringsConfig {
    pub min_length: usize,
    pub exclude: Vec<String>,
}

impl Default for StringsConfig {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_STRING_MIN_LENGTH,
            exclude: Vec::new(),
        }
    }
}

impl Config {
    /// Compiles the exclude regexes into extractor options.
    pub fn to_options(&self) -> Result<ExtractorOptions, ConfigError> {
        let exclude_patterns = self
            .strings
            .exclude
            .iter()
            .map(|source| compile("strings.exclude", source))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ExtractorOptions {
            parse_options: self.parse.clone(),
            extract_strings: self.extract.strings,
            extract_functions: self.extract.functions,
            extract_variables: self.extract.variables,
            extract_classes: self.extract.classes,
            extract_imports: self.extract.imports,
            extract_exports: self.extract.exports,
            max_file_size: self.max_file_size,
            string_min_length: self.strings.min_length,
            exclude_patterns,
        })
    }

    /// Default patterns plus the `[patterns]` table, in name order.
    pub fn pattern_registry(&self) -> Result<PatternRegistry, ConfigError> {
        let mut registry = PatternRegistry::with_defaults();
        for (name, source) in &self.patterns {
            let regex = compile(name, source)?;
            registry
                .register(name, regex)
                .map_err(|e| ConfigError::InvalidPattern {
                    name: name.clone(),
                    message: e.to_string(),
                })?;
        }
        Ok(registry)
    }
}

fn compile(name: &str, source: &str) -> Result<Regex, ConfigError> {
    Regex::new(source).map_err(|e| ConfigError::InvalidPattern {
        name: name.to_string(),
        message: e.to_string(),
    })
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();
    loop {
        let config_path = current.join(CONFIG_FILENAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if !current.pop() {
            return None;
        }
    }
}

fn read_config(path: &Path) -> Result<(Config, String), ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    let config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        message: e.message().to_string(),
    })?;

    Ok((config, content))
}

pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    read_config(path).map(|(config, _)| config)
}

pub fn load_config_with_warnings(path: &Path) -> Result<ConfigResult, ConfigError> {
    let (config, content) = read_config(path)?;
    let warnings = detect_unknown_keys(&content);
    for warning in &warnings {
        tracing::warn!(path = %path.display(), "{}", warning);
    }

    Ok(ConfigResult { config, warnings })
}

fn detect_unknown_keys(content: &str) -> Vec<String> {
    let mut warnings = Vec::new();

    let table: toml::Table = match content.parse() {
        Ok(t) => t,
        Err(_) => return warnings,
    };

    let known_top: HashSet<&str> = KNOWN_TOP_LEVEL_KEYS.iter().copied().collect();
    for key in table.keys() {
        if !known_top.contains(key.as_str()) {
            warnings.push(format!("Unknown config option: '{}'", key));
        }
    }

    for (section, known_keys) in KNOWN_SECTION_KEYS {
        if let Some(toml::Value::Table(values)) = table.get(*section) {
            for key in values.keys() {
                if !known_keys.contains(&key.as_str()) {
                    warnings.push(format!(
                        "Unknown config option in [{}]: '{}'",
                        section, key
                    ));
                }
            }
        }
    }

    warnings
}

pub fn load_config_or_default(start_dir: &Path) -> Config {
    find_config_file(start_dir)
        .and_then(|path| load_config(&path).ok())
        .unwrap_or_default()
}

pub fn load_config_or_default_with_warnings(start_dir: &Path) -> ConfigResult {
    match find_config_file(start_dir) {
        Some(path) => load_config_with_warnings(&path).unwrap_or_default(),
        None => ConfigResult::default(),
    }
}
