//! Syntactic role of a value node within its parent.
//!
//! One pass over the module indexes the direct value children of
//! declarators, assignments, call arguments and object properties by span.
//! Parentheses are transparent: `f(('x'))` still yields an argument context.

use std::collections::HashMap;

use serde::Serialize;
use swc_common::{Span, Spanned};
use swc_ecma_ast::{
    AssignExpr, AssignOp, CallExpr, Callee, Expr, KeyValueProp, MemberProp, Module, Pat, PropName,
    VarDeclarator,
};
use swc_ecma_visit::{Visit, VisitWith};

use crate::extract::helpers::{prop_name, unwrap_parens};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ValueContext {
    Variable {
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
    Assignment,
    Argument {
        callee: String,
    },
    Property {
        #[serde(skip_serializing_if = "Option::is_none")]
        key: Option<String>,
    },
    Other,
}

#[derive(Debug, Default)]
pub struct ContextResolver {
    contexts: HashMap<Span, ValueContext>,
}

impl ContextResolver {
    pub fn build(module: &Module) -> Self {
        let mut resolver = Self::default();
        module.visit_with(&mut resolver);
        resolver
    }

    pub fn resolve(&self, span: Span) -> ValueContext {
        self.contexts
            .get(&span)
            .cloned()
            .unwrap_or(ValueContext::Other)
    }

    fn insert(&mut self, expr: &Expr, context: ValueContext) {
        self.contexts.insert(unwrap_parens(expr).span(), context);
    }
}

impl Visit for ContextResolver {
    fn visit_var_declarator(&mut self, node: &VarDeclarator) {
        if let Some(init) = &node.init {
            let name = match &node.name {
                Pat::Ident(ident) => Some(ident.id.sym.to_string()),
                _ => None,
            };
            self.insert(init, ValueContext::Variable { name });
        }
        node.visit_children_with(self);
    }

    fn visit_assign_expr(&mut self, node: &AssignExpr) {
        if node.op == AssignOp::Assign {
            self.insert(&node.right, ValueContext::Assignment);
        }
        node.visit_children_with(self);
    }

    fn visit_call_expr(&mut self, node: &CallExpr) {
        let callee = match &node.callee {
            Callee::Expr(expr) => callee_name(expr),
            Callee::Super(_) | Callee::Import(_) => "unknown".to_string(),
        };
        for arg in node.args.iter().filter(|arg| arg.spread.is_none()) {
            self.insert(
                &arg.expr,
                ValueContext::Argument {
                    callee: callee.clone(),
                },
            );
        }
        node.visit_children_with(self);
    }

    fn visit_key_value_prop(&mut self, node: &KeyValueProp) {
        let key = prop_name(&node.key);
        if let PropName::Str(literal) = &node.key {
            self.contexts
                .insert(literal.span, ValueContext::Property { key: key.clone() });
        }
        self.insert(&node.value, ValueContext::Property { key });
        node.visit_children_with(self);
    }
}

/// Dotted name of a callee: `foo`, `console.log`, `a.b.c`; anything that is
/// not an identifier or member chain becomes `unknown`.
pub fn callee_name(expr: &Expr) -> String {
    match unwrap_parens(expr) {
        Expr::Ident(ident) => ident.sym.to_string(),
        Expr::Member(member) => {
            let property = match &member.prop {
                MemberProp::Ident(ident) => ident.sym.to_string(),
                MemberProp::PrivateName(private) => private.name.to_string(),
                MemberProp::Computed(computed) => match unwrap_parens(&computed.expr) {
                    Expr::Ident(ident) => ident.sym.to_string(),
                    _ => "unknown".to_string(),
                },
            };
            format!("{}.{}", callee_name(&member.obj), property)
        }
        _ => "unknown".to_string(),
    }
}
