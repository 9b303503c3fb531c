//! String and template literal extraction with categorization.

use std::ops::ControlFlow;

use regex::Regex;
use serde::Serialize;
use swc_common::Span;
use swc_ecma_ast::{Str, Tpl};

use super::Extract;
use super::helpers::js_length;
use crate::context::ValueContext;
use crate::parser::Location;
use crate::visitor::{AstVisitor, VisitorContext};

/// Strings longer than this (in UTF-16 units) are treated as messages.
const MESSAGE_MIN_LENGTH: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StringKind {
    String,
    Template,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StringEntry {
    pub value: String,
    pub length: usize,
    pub location: Location,
    pub kind: StringKind,
    pub context: ValueContext,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringCategory {
    Url,
    Path,
    Message,
    Identifier,
    Other,
}

impl StringCategory {
    /// First matching rule wins: url, path, message, identifier, other.
    pub fn of(entry: &StringEntry) -> Self {
        let value = entry.value.as_str();
        if value.starts_with("http://") || value.starts_with("https://") {
            Self::Url
        } else if value.starts_with(['.', '/', '\\']) {
            Self::Path
        } else if entry.length > MESSAGE_MIN_LENGTH {
            Self::Message
        } else if is_identifier(value) {
            Self::Identifier
        } else {
            Self::Other
        }
    }
}

fn is_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StringResults {
    pub urls: Vec<StringEntry>,
    pub paths: Vec<StringEntry>,
    pub messages: Vec<StringEntry>,
    pub identifiers: Vec<StringEntry>,
    pub other: Vec<StringEntry>,
    pub all: Vec<StringEntry>,
}

impl StringResults {
    pub fn from_entries(all: Vec<StringEntry>) -> Self {
        let mut results = Self::default();
        for entry in &all {
            let bucket = match StringCategory::of(entry) {
                StringCategory::Url => &mut results.urls,
                StringCategory::Path => &mut results.paths,
                StringCategory::Message => &mut results.messages,
                StringCategory::Identifier => &mut results.identifiers,
                StringCategory::Other => &mut results.other,
            };
            bucket.push(entry.clone());
        }
        results.all = all;
        results
    }
}

pub struct StringExtractor<'o> {
    min_length: usize,
    exclude: &'o [Regex],
    entries: Vec<StringEntry>,
}

impl<'o> StringExtractor<'o> {
    pub fn new(min_length: usize, exclude: &'o [Regex]) -> Self {
        Self {
            min_length,
            exclude,
            entries: Vec::new(),
        }
    }

    fn push(&mut self, value: String, kind: StringKind, span: Span, ctx: &VisitorContext) {
        let length = js_length(&value);
        if length < self.min_length {
            return;
        }
        if self.exclude.iter().any(|pattern| pattern.is_match(&value)) {
            return;
        }
        self.entries.push(StringEntry {
            value,
            length,
            location: ctx.span_to_location(span),
            kind,
            context: ctx.value_context(span),
        });
    }
}

impl AstVisitor for StringExtractor<'_> {
    fn visit_str(&mut self, node: &Str, ctx: &VisitorContext) -> ControlFlow<()> {
        self.push(node.value.to_string(), StringKind::String, node.span, ctx);
        ControlFlow::Continue(())
    }

    fn visit_tpl(&mut self, node: &Tpl, ctx: &VisitorContext) -> ControlFlow<()> {
        if let [quasi] = node.quasis.as_slice() {
            if let Some(cooked) = &quasi.cooked {
                self.push(cooked.to_string(), StringKind::Template, node.span, ctx);
            }
        }
        ControlFlow::Continue(())
    }
}

impl Extract for StringExtractor<'_> {
    type Output = StringResults;

    fn finish(self, _ctx: &VisitorContext) -> StringResults {
        StringResults::from_entries(self.entries)
    }
}
