//! Visitor context providing file information during AST traversal.

use std::cell::OnceCell;

use swc_common::Span;

use crate::context::{ContextResolver, ValueContext};
use crate::parser::{Location, ParsedSource};
use crate::semantic::{Binding, ScopeBuilder, SemanticModel};

/// Shared, read-only view of the file being walked.
///
/// The semantic model and the value-context index are built on first use and
/// shared by every extractor that walks the same file.
pub struct VisitorContext<'a> {
    file: &'a ParsedSource,
    semantic: OnceCell<SemanticModel>,
    values: OnceCell<ContextResolver>,
}

impl<'a> VisitorContext<'a> {
    pub fn new(file: &'a ParsedSource) -> Self {
        Self {
            file,
            semantic: OnceCell::new(),
            values: OnceCell::new(),
        }
    }

    pub fn file(&self) -> &ParsedSource {
        self.file
    }

    pub fn span_to_location(&self, span: Span) -> Location {
        self.file.location(span)
    }

    pub fn get_source_text(&self, span: Span) -> Option<&str> {
        self.file.text(span)
    }

    pub fn semantic(&self) -> &SemanticModel {
        self.semantic
            .get_or_init(|| ScopeBuilder::build(self.file.module()))
    }

    /// Binding summary for the identifier declared at `span`.
    pub fn binding_at(&self, span: Span) -> Option<Binding> {
        self.semantic().binding_at(span)
    }

    /// Syntactic role of the value node at `span` within its parent.
    pub fn value_context(&self, span: Span) -> ValueContext {
        self.values
            .get_or_init(|| ContextResolver::build(self.file.module()))
            .resolve(span)
    }
}
