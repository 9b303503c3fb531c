//! Scope tree for variable bindings.
//!
//! Scopes live in an arena and point at their parent; the global scope is
//! created with the tree and is always the root.

use id_arena::{Arena, Id};
use swc_common::Span;

pub type ScopeId = Id<Scope>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Global,
    Function,
    ArrowFunction,
    Block,
    For,
    Switch,
    Catch,
    Class,
}

impl ScopeKind {
    /// Whether `var` declarations stop at this scope.
    pub fn is_hoisting_target(self) -> bool {
        matches!(
            self,
            ScopeKind::Global | ScopeKind::Function | ScopeKind::ArrowFunction
        )
    }
}

#[derive(Debug)]
pub struct Scope {
    pub id: ScopeId,
    pub kind: ScopeKind,
    pub parent: Option<ScopeId>,
    pub span: Span,
}

#[derive(Debug)]
pub struct ScopeTree {
    arena: Arena<Scope>,
    root: ScopeId,
}

impl ScopeTree {
    pub fn new(span: Span) -> Self {
        let mut arena = Arena::new();
        let root = arena.alloc_with_id(|id| Scope {
            id,
            kind: ScopeKind::Global,
            parent: None,
            span,
        });
        Self { arena, root }
    }

    pub fn create_scope(&mut self, kind: ScopeKind, parent: ScopeId, span: Span) -> ScopeId {
        self.arena.alloc_with_id(|id| Scope {
            id,
            kind,
            parent: Some(parent),
            span,
        })
    }

    pub fn root(&self) -> ScopeId {
        self.root
    }

    pub fn get(&self, id: ScopeId) -> &Scope {
        &self.arena[id]
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.len() == 0
    }

    pub fn ancestors(&self, id: ScopeId) -> AncestorIter<'_> {
        AncestorIter {
            tree: self,
            current: Some(id),
        }
    }

    /// Nearest enclosing function, arrow or global scope, `id` included.
    pub fn hoisting_scope(&self, id: ScopeId) -> ScopeId {
        self.ancestors(id)
            .find(|scope| scope.kind.is_hoisting_target())
            .map(|scope| scope.id)
            .unwrap_or(self.root)
    }
}

pub struct AncestorIter<'a> {
    tree: &'a ScopeTree,
    current: Option<ScopeId>,
}

impl<'a> Iterator for AncestorIter<'a> {
    type Item = &'a Scope;

    fn next(&mut self) -> Option<Self::Item> {
        let current_id = self.current?;
        let scope = &self.tree.arena[current_id];
        self.current = scope.parent;
        Some(scope)
    }
}
