//! Named regex patterns and the raw-text matcher that runs them.

use regex::Regex;
use serde::Serialize;
use serde::ser::Serializer;

use crate::error::{ExtractError, Result};

pub const DEFAULT_PATTERNS: &[(&str, &str)] = &[
    ("url", r#"https?://[^\s"']+"#),
    ("email", r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}"),
    ("ip", r"\b(?:[0-9]{1,3}\.){3}[0-9]{1,3}\b"),
    ("path", r#"["'](?:\./|/|\\\\|~/)[^"']*["']"#),
    ("hash", r#"["'][a-fA-F0-9]{32,}["']"#),
];

/// Insertion-ordered registry of named patterns.
#[derive(Debug, Clone, Default)]
pub struct PatternRegistry {
    entries: Vec<(String, Regex)>,
}

impl PatternRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry seeded with `url`, `email`, `ip`, `path` and `hash`.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for (name, source) in DEFAULT_PATTERNS {
            if let Err(error) = registry.register_source(name, source) {
                tracing::error!(%error, "default pattern failed to compile");
            }
        }
        registry
    }

    /// Inserts `regex` under `name`; an existing entry keeps its position.
    pub fn register(&mut self, name: &str, regex: Regex) -> Result<&mut Self> {
        if name.is_empty() {
            return Err(ExtractError::InvalidPattern {
                name: name.to_string(),
                message: "pattern name must be a non-empty string".to_string(),
            });
        }

        match self.entries.iter_mut().find(|(existing, _)| existing == name) {
            Some(entry) => entry.1 = regex,
            None => self.entries.push((name.to_string(), regex)),
        }
        tracing::debug!(pattern = name, "registered pattern");
        Ok(self)
    }

    pub fn register_source(&mut self, name: &str, source: &str) -> Result<&mut Self> {
        let regex = Regex::new(source).map_err(|e| ExtractError::InvalidPattern {
            name: name.to_string(),
            message: e.to_string(),
        })?;
        self.register(name, regex)
    }

    /// Removes `name`; returns whether it was present.
    pub fn unregister(&mut self, name: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(existing, _)| existing != name);
        before != self.entries.len()
    }

    pub fn get(&self, name: &str) -> Option<&Regex> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, regex)| regex)
    }

    pub fn list(&self) -> Vec<&str> {
        self.entries.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Regex)> {
        self.entries.iter().map(|(name, regex)| (name.as_str(), regex))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternMatch {
    pub value: String,
    /// Byte offset of the match in the source text.
    pub offset: usize,
    pub line_number: usize,
}

/// Matches per pattern name, in registry order. Serializes as a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternMatches(Vec<(String, Vec<PatternMatch>)>);

impl PatternMatches {
    pub fn get(&self, name: &str) -> Option<&[PatternMatch]> {
        self.0
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, matches)| matches.as_slice())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(name, _)| name.as_str())
    }

    pub fn total(&self) -> usize {
        self.0.iter().map(|(_, matches)| matches.len()).sum()
    }
}

impl Serialize for PatternMatches {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(name, matches)| (name, matches)))
    }
}

/// Runs every registered pattern over the raw source text. Every pattern
/// gets an entry, possibly empty.
pub fn match_patterns(registry: &PatternRegistry, source: &str) -> PatternMatches {
    let mut newlines = Vec::new();
    for (offset, byte) in source.bytes().enumerate() {
        if byte == b'\n' {
            newlines.push(offset);
        }
    }
    let line_of = |offset: usize| 1 + newlines.partition_point(|&nl| nl < offset);

    PatternMatches(
        registry
            .iter()
            .map(|(name, regex)| {
                let matches = regex
                    .find_iter(source)
                    .map(|found| PatternMatch {
                        value: found.as_str().to_string(),
                        offset: found.start(),
                        line_number: line_of(found.start()),
                    })
                    .collect();
                (name.to_string(), matches)
            })
            .collect(),
    )
}
