//! Binding table: declared names, their scopes and how they are used.

use std::collections::HashMap;

use id_arena::{Arena, Id};
use swc_common::Span;

use super::scope::{ScopeId, ScopeTree};

pub type BindingId = Id<BindingRecord>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    Var,
    Let,
    Const,
    Function,
    Class,
    Parameter,
    Import,
}

#[derive(Debug)]
pub struct BindingRecord {
    pub id: BindingId,
    pub name: String,
    pub kind: BindingKind,
    pub scope: ScopeId,
    pub span: Span,
    pub references: Vec<Span>,
    pub mutations: Vec<Span>,
}

#[derive(Debug, Default)]
pub struct BindingTable {
    arena: Arena<BindingRecord>,
    by_scope: HashMap<(ScopeId, String), BindingId>,
    by_span: HashMap<Span, BindingId>,
}

impl BindingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares `name` in `scope`. A `var` or function declaration over an
    /// existing var, function or parameter of the same scope reuses it.
    pub fn declare(
        &mut self,
        name: &str,
        kind: BindingKind,
        scope: ScopeId,
        span: Span,
    ) -> BindingId {
        let key = (scope, name.to_string());
        if let Some(&existing) = self.by_scope.get(&key) {
            if matches!(
                self.arena[existing].kind,
                BindingKind::Var | BindingKind::Function | BindingKind::Parameter
            ) && matches!(kind, BindingKind::Var | BindingKind::Function)
            {
                self.by_span.insert(span, existing);
                return existing;
            }
        }

        let id = self.arena.alloc_with_id(|id| BindingRecord {
            id,
            name: name.to_string(),
            kind,
            scope,
            span,
            references: Vec::new(),
            mutations: Vec::new(),
        });
        self.by_scope.insert(key, id);
        self.by_span.insert(span, id);
        id
    }

    /// Innermost binding of `name` visible from `scope`.
    pub fn lookup(&self, name: &str, scope: ScopeId, tree: &ScopeTree) -> Option<BindingId> {
        tree.ancestors(scope)
            .find_map(|s| self.by_scope.get(&(s.id, name.to_string())).copied())
    }

    pub fn by_span(&self, span: Span) -> Option<BindingId> {
        self.by_span.get(&span).copied()
    }

    pub fn get(&self, id: BindingId) -> &BindingRecord {
        &self.arena[id]
    }

    pub fn add_reference(&mut self, id: BindingId, span: Span) {
        self.arena[id].references.push(span);
    }

    pub fn add_mutation(&mut self, id: BindingId, span: Span) {
        self.arena[id].mutations.push(span);
    }

    pub fn iter(&self) -> impl Iterator<Item = &BindingRecord> {
        self.arena.iter().map(|(_, record)| record)
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.len() == 0
    }
}
