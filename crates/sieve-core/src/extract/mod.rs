//! Per-category extractors and the composite result they feed.
//!
//! Each extractor is an [`AstVisitor`] that accumulates entries during a
//! [`walk_ast`] and turns them into its output in [`Extract::finish`].

pub mod classes;
pub mod comments;
pub mod functions;
pub mod helpers;
pub mod metadata;
pub mod modules;
pub mod strings;
pub mod variables;

pub use classes::{ClassBody, ClassEntry, ClassExtractor, ClassKind};
pub use comments::{CommentEntry, CommentKind, collect_comments};
pub use functions::{BodyShape, FunctionEntry, FunctionExtractor, FunctionKind, MethodKind};
pub use metadata::{Metadata, detect_metadata};
pub use modules::{
    ExportEntry, ExportExtractor, ExportKind, ImportEntry, ImportExtractor, ImportKind,
    ImportSpecifierEntry,
};
pub use strings::{StringCategory, StringEntry, StringExtractor, StringKind, StringResults};
pub use variables::{DeclarationKind, VariableEntry, VariableExtractor, VariableResults};

use serde::Serialize;

use crate::patterns::PatternMatches;
use crate::visitor::{AstVisitor, VisitorContext, walk_ast};

pub trait Extract: AstVisitor {
    type Output;

    fn finish(self, ctx: &VisitorContext) -> Self::Output;
}

/// Walks the context's module with `extractor` and returns its output.
pub fn run<E: Extract>(mut extractor: E, ctx: &VisitorContext) -> E::Output {
    walk_ast(ctx.file().module(), &mut extractor, ctx);
    extractor.finish(ctx)
}

/// Everything one extraction produced. Disabled categories are `None` and
/// left out of the serialized form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractionResults {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strings: Option<StringResults>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub functions: Option<Vec<FunctionEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<VariableResults>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classes: Option<Vec<ClassEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imports: Option<Vec<ImportEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exports: Option<Vec<ExportEntry>>,
    pub patterns: PatternMatches,
    pub comments: Vec<CommentEntry>,
    pub metadata: Metadata,
}

impl ExtractionResults {
    pub fn string_count(&self) -> usize {
        self.strings.as_ref().map_or(0, |s| s.all.len())
    }

    pub fn function_count(&self) -> usize {
        self.functions.as_ref().map_or(0, Vec::len)
    }

    pub fn variable_count(&self) -> usize {
        self.variables.as_ref().map_or(0, |v| v.all.len())
    }

    pub fn class_count(&self) -> usize {
        self.classes.as_ref().map_or(0, Vec::len)
    }

    pub fn import_count(&self) -> usize {
        self.imports.as_ref().map_or(0, Vec::len)
    }

    pub fn export_count(&self) -> usize {
        self.exports.as_ref().map_or(0, Vec::len)
    }
}
