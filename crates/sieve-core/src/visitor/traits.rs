//! AstVisitor trait for uniform AST traversal.

use std::ops::ControlFlow;

use swc_ecma_ast::{
    ArrowExpr, BindingIdent, CallExpr, ClassDecl, ClassExpr, ClassMethod, Constructor, ExportAll,
    ExportDecl, ExportDefaultDecl, ExportDefaultExpr, FnDecl, FnExpr, ImportDecl, NamedExport,
    PrivateMethod, Str, Tpl, VarDeclKind, VarDeclarator,
};

use super::context::VisitorContext;

/// Per-node-kind callbacks invoked by [`walk_ast`](super::walk_ast).
///
/// Every callback defaults to a no-op that keeps walking. Returning
/// `ControlFlow::Break(())` stops the whole walk.
pub trait AstVisitor {
    /// String literals outside of directive prologues.
    fn visit_str(&mut self, _node: &Str, _ctx: &VisitorContext) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    /// Template literals, including the quasi of tagged templates.
    fn visit_tpl(&mut self, _node: &Tpl, _ctx: &VisitorContext) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    fn visit_fn_decl(&mut self, _node: &FnDecl, _ctx: &VisitorContext) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    fn visit_fn_expr(&mut self, _node: &FnExpr, _ctx: &VisitorContext) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    /// `export default function () {}`: a declaration, never reported through
    /// [`visit_fn_expr`](Self::visit_fn_expr).
    fn visit_default_fn(&mut self, _node: &FnExpr, _ctx: &VisitorContext) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    fn visit_arrow_expr(&mut self, _node: &ArrowExpr, _ctx: &VisitorContext) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    fn visit_class_method(
        &mut self,
        _node: &ClassMethod,
        _ctx: &VisitorContext,
    ) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    fn visit_private_method(
        &mut self,
        _node: &PrivateMethod,
        _ctx: &VisitorContext,
    ) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    fn visit_constructor(
        &mut self,
        _node: &Constructor,
        _ctx: &VisitorContext,
    ) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    /// Each declarator together with the kind of its enclosing declaration.
    fn visit_var_declarator(
        &mut self,
        _node: &VarDeclarator,
        _kind: VarDeclKind,
        _ctx: &VisitorContext,
    ) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    /// Identifiers bound by function, arrow, method, constructor, setter and
    /// catch parameters, including those nested in destructuring patterns.
    fn visit_param_binding(
        &mut self,
        _node: &BindingIdent,
        _ctx: &VisitorContext,
    ) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    fn visit_class_decl(&mut self, _node: &ClassDecl, _ctx: &VisitorContext) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    fn visit_class_expr(&mut self, _node: &ClassExpr, _ctx: &VisitorContext) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    /// `export default class {}`: a declaration, never reported through
    /// [`visit_class_expr`](Self::visit_class_expr).
    fn visit_default_class(
        &mut self,
        _node: &ClassExpr,
        _ctx: &VisitorContext,
    ) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    fn visit_import_decl(&mut self, _node: &ImportDecl, _ctx: &VisitorContext) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    fn visit_call_expr(&mut self, _node: &CallExpr, _ctx: &VisitorContext) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    fn visit_export_decl(&mut self, _node: &ExportDecl, _ctx: &VisitorContext) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    fn visit_named_export(
        &mut self,
        _node: &NamedExport,
        _ctx: &VisitorContext,
    ) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    fn visit_export_default_decl(
        &mut self,
        _node: &ExportDefaultDecl,
        _ctx: &VisitorContext,
    ) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    fn visit_export_default_expr(
        &mut self,
        _node: &ExportDefaultExpr,
        _ctx: &VisitorContext,
    ) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    fn visit_export_all(&mut self, _node: &ExportAll, _ctx: &VisitorContext) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}
