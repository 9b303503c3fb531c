//! Semantic analysis module
//!
//! Provides scope analysis and per-binding usage counts.

pub mod bindings;
pub mod builder;
pub mod scope;

pub use bindings::{BindingId, BindingKind, BindingRecord, BindingTable};
pub use builder::ScopeBuilder;
pub use scope::{AncestorIter, Scope, ScopeId, ScopeKind, ScopeTree};

use swc_common::Span;

pub struct SemanticModel {
    pub scopes: ScopeTree,
    pub bindings: BindingTable,
}

/// Usage summary of one binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub references: usize,
    pub constant_violations: usize,
    pub referenced: bool,
}

impl SemanticModel {
    /// Summary for the binding declared by the identifier at `span`.
    pub fn binding_at(&self, span: Span) -> Option<Binding> {
        let record = self.bindings.get(self.bindings.by_span(span)?);
        Some(Binding {
            references: record.references.len(),
            constant_violations: record.mutations.len(),
            referenced: !record.references.is_empty(),
        })
    }
}
