//! Variable declarations and parameters with usage counts.
//!
//! Declarators are collected first; parameter names are merged in afterwards
//! and only when no declarator already claimed the name.

use std::collections::HashSet;
use std::ops::ControlFlow;

use serde::Serialize;
use swc_ecma_ast::{BindingIdent, Pat, VarDeclKind, VarDeclarator};

use super::Extract;
use super::helpers::node_type;
use crate::parser::Location;
use crate::visitor::{AstVisitor, VisitorContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclarationKind {
    Const,
    Let,
    Var,
    Parameter,
}

impl From<VarDeclKind> for DeclarationKind {
    fn from(kind: VarDeclKind) -> Self {
        match kind {
            VarDeclKind::Const => DeclarationKind::Const,
            VarDeclKind::Let => DeclarationKind::Let,
            VarDeclKind::Var => DeclarationKind::Var,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariableEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub declaration_kind: DeclarationKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initialized: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initializer_type: Option<&'static str>,
    pub location: Location,
    /// Parameters are not reference-counted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mutation_count: Option<usize>,
    pub is_used: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VariableResults {
    pub constants: Vec<VariableEntry>,
    pub let_variables: Vec<VariableEntry>,
    pub parameters: Vec<VariableEntry>,
    pub unused: Vec<VariableEntry>,
    pub all: Vec<VariableEntry>,
}

impl VariableResults {
    pub fn from_entries(all: Vec<VariableEntry>) -> Self {
        let pick = |kind: DeclarationKind| -> Vec<VariableEntry> {
            all.iter()
                .filter(|entry| entry.declaration_kind == kind)
                .cloned()
                .collect()
        };
        Self {
            constants: pick(DeclarationKind::Const),
            let_variables: pick(DeclarationKind::Let),
            parameters: pick(DeclarationKind::Parameter),
            unused: all.iter().filter(|entry| !entry.is_used).cloned().collect(),
            all,
        }
    }
}

#[derive(Debug, Default)]
pub struct VariableExtractor {
    declared: Vec<VariableEntry>,
    params: Vec<(String, Location)>,
}

impl VariableExtractor {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AstVisitor for VariableExtractor {
    fn visit_var_declarator(
        &mut self,
        node: &VarDeclarator,
        kind: VarDeclKind,
        ctx: &VisitorContext,
    ) -> ControlFlow<()> {
        let (name, binding) = match &node.name {
            Pat::Ident(ident) => (
                Some(ident.id.sym.to_string()),
                ctx.binding_at(ident.id.span),
            ),
            _ => (None, None),
        };

        self.declared.push(VariableEntry {
            name,
            declaration_kind: kind.into(),
            initialized: Some(node.init.is_some()),
            initializer_type: node.init.as_deref().map(node_type),
            location: ctx.span_to_location(node.span),
            reference_count: Some(binding.map_or(0, |b| b.references)),
            mutation_count: Some(binding.map_or(0, |b| b.constant_violations)),
            is_used: binding.is_some_and(|b| b.referenced),
        });
        ControlFlow::Continue(())
    }

    fn visit_param_binding(&mut self, node: &BindingIdent, ctx: &VisitorContext) -> ControlFlow<()> {
        self.params
            .push((node.id.sym.to_string(), ctx.span_to_location(node.id.span)));
        ControlFlow::Continue(())
    }
}

impl Extract for VariableExtractor {
    type Output = VariableResults;

    fn finish(self, _ctx: &VisitorContext) -> VariableResults {
        let mut all = self.declared;
        let mut seen: HashSet<String> = all.iter().filter_map(|e| e.name.clone()).collect();

        for (name, location) in self.params {
            if !seen.insert(name.clone()) {
                continue;
            }
            all.push(VariableEntry {
                name: Some(name),
                declaration_kind: DeclarationKind::Parameter,
                initialized: None,
                initializer_type: None,
                location,
                reference_count: None,
                mutation_count: None,
                is_used: true,
            });
        }

        VariableResults::from_entries(all)
    }
}
