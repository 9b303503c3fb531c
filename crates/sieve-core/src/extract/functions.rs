//! Function, arrow and class method extraction.

use std::ops::ControlFlow;

use serde::Serialize;
use swc_common::Span;
use swc_ecma_ast::{
    ArrowExpr, ClassMethod, Constructor, FnDecl, FnExpr, Function, Ident, MethodKind as SwcMethodKind,
    Stmt,
};

use super::Extract;
use super::helpers::prop_name;
use crate::complexity::ComplexityEstimator;
use crate::parser::Location;
use crate::visitor::{AstVisitor, VisitorContext};

const ANONYMOUS: &str = "anonymous";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FunctionKind {
    Declaration,
    Expression,
    Arrow,
    Method,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MethodKind {
    Method,
    Get,
    Set,
    Constructor,
}

impl From<SwcMethodKind> for MethodKind {
    fn from(kind: SwcMethodKind) -> Self {
        match kind {
            SwcMethodKind::Method => MethodKind::Method,
            SwcMethodKind::Getter => MethodKind::Get,
            SwcMethodKind::Setter => MethodKind::Set,
        }
    }
}

/// Top-level shape of a declaration's body block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BodyShape {
    pub statement_count: usize,
    pub has_return: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionEntry {
    pub name: String,
    pub kind: FunctionKind,
    pub is_async: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_generator: Option<bool>,
    pub param_count: usize,
    pub location: Location,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<BodyShape>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complexity: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method_kind: Option<MethodKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_static: Option<bool>,
}

#[derive(Debug, Default)]
pub struct FunctionExtractor {
    entries: Vec<FunctionEntry>,
}

impl FunctionExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    fn push_function(
        &mut self,
        name: Option<&Ident>,
        kind: FunctionKind,
        function: &Function,
        ctx: &VisitorContext,
    ) {
        // `declare function` and overload signatures
        if function.body.is_none() {
            return;
        }
        let body = (kind == FunctionKind::Declaration).then(|| body_shape(function));
        self.entries.push(FunctionEntry {
            name: name.map_or_else(|| ANONYMOUS.to_string(), |ident| ident.sym.to_string()),
            kind,
            is_async: function.is_async,
            is_generator: Some(function.is_generator),
            param_count: function.params.len(),
            location: ctx.span_to_location(function.span),
            body,
            complexity: Some(ComplexityEstimator::estimate(function)),
            method_kind: None,
            is_static: None,
        });
    }

    fn push_method(
        &mut self,
        name: String,
        method_kind: MethodKind,
        is_static: bool,
        is_async: bool,
        param_count: usize,
        span: Span,
        ctx: &VisitorContext,
    ) {
        self.entries.push(FunctionEntry {
            name,
            kind: FunctionKind::Method,
            is_async,
            is_generator: None,
            param_count,
            location: ctx.span_to_location(span),
            body: None,
            complexity: None,
            method_kind: Some(method_kind),
            is_static: Some(is_static),
        });
    }
}

fn body_shape(function: &Function) -> BodyShape {
    let stmts = function.body.as_ref().map_or(&[][..], |body| &body.stmts);
    BodyShape {
        statement_count: stmts.len(),
        has_return: stmts.iter().any(|stmt| matches!(stmt, Stmt::Return(_))),
    }
}

impl AstVisitor for FunctionExtractor {
    fn visit_fn_decl(&mut self, node: &FnDecl, ctx: &VisitorContext) -> ControlFlow<()> {
        self.push_function(
            Some(&node.ident),
            FunctionKind::Declaration,
            &node.function,
            ctx,
        );
        ControlFlow::Continue(())
    }

    fn visit_default_fn(&mut self, node: &FnExpr, ctx: &VisitorContext) -> ControlFlow<()> {
        self.push_function(
            node.ident.as_ref(),
            FunctionKind::Declaration,
            &node.function,
            ctx,
        );
        ControlFlow::Continue(())
    }

    fn visit_fn_expr(&mut self, node: &FnExpr, ctx: &VisitorContext) -> ControlFlow<()> {
        self.push_function(
            node.ident.as_ref(),
            FunctionKind::Expression,
            &node.function,
            ctx,
        );
        ControlFlow::Continue(())
    }

    fn visit_arrow_expr(&mut self, node: &ArrowExpr, ctx: &VisitorContext) -> ControlFlow<()> {
        self.entries.push(FunctionEntry {
            name: "arrow".to_string(),
            kind: FunctionKind::Arrow,
            is_async: node.is_async,
            is_generator: None,
            param_count: node.params.len(),
            location: ctx.span_to_location(node.span),
            body: None,
            complexity: Some(ComplexityEstimator::estimate(node)),
            method_kind: None,
            is_static: None,
        });
        ControlFlow::Continue(())
    }

    fn visit_class_method(&mut self, node: &ClassMethod, ctx: &VisitorContext) -> ControlFlow<()> {
        // abstract methods and overload signatures
        if node.function.body.is_none() {
            return ControlFlow::Continue(());
        }
        self.push_method(
            prop_name(&node.key).unwrap_or_else(|| ANONYMOUS.to_string()),
            node.kind.into(),
            node.is_static,
            node.function.is_async,
            node.function.params.len(),
            node.span,
            ctx,
        );
        ControlFlow::Continue(())
    }

    fn visit_constructor(&mut self, node: &Constructor, ctx: &VisitorContext) -> ControlFlow<()> {
        if node.body.is_none() {
            return ControlFlow::Continue(());
        }
        self.push_method(
            "constructor".to_string(),
            MethodKind::Constructor,
            false,
            false,
            node.params.len(),
            node.span,
            ctx,
        );
        ControlFlow::Continue(())
    }
}

impl Extract for FunctionExtractor {
    type Output = Vec<FunctionEntry>;

    fn finish(self, _ctx: &VisitorContext) -> Vec<FunctionEntry> {
        self.entries
    }
}
