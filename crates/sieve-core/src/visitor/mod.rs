//! Visitor pattern for AST traversal.
//!
//! Extractors implement [`AstVisitor`] and receive only the node kinds they
//! care about. [`walk_ast`] drives a single depth-first pass over a module.

mod context;
mod traits;

pub use context::VisitorContext;
pub use traits::AstVisitor;

use std::collections::HashSet;
use std::ops::ControlFlow;

use swc_common::Span;
use swc_ecma_ast::{
    ArrowExpr, BindingIdent, BlockStmtOrExpr, CallExpr, CatchClause, ClassDecl, ClassExpr,
    ClassMethod, Constructor, DefaultDecl, ExportAll, ExportDecl, ExportDefaultDecl,
    ExportDefaultExpr, Expr, FnDecl, FnExpr, Function, GetterProp, ImportDecl, Lit, Module,
    ModuleItem, NamedExport, ObjectPatProp, Param, Pat, PrivateMethod, SetterProp, Stmt, Str,
    Tpl, TsParamProp, TsParamPropParam, VarDecl, VarDeclKind, VarDeclarator,
};
use swc_ecma_visit::{Visit, VisitWith};

struct Walker<'a, V: AstVisitor> {
    visitor: &'a mut V,
    ctx: &'a VisitorContext<'a>,
    stopped: bool,
    var_kinds: Vec<VarDeclKind>,
    directives: HashSet<Span>,
}

impl<V: AstVisitor> Walker<'_, V> {
    /// Runs one callback; returns whether the walk should descend further.
    fn enter(
        &mut self,
        callback: impl FnOnce(&mut V, &VisitorContext) -> ControlFlow<()>,
    ) -> bool {
        if self.stopped {
            return false;
        }
        if let ControlFlow::Break(()) = callback(self.visitor, self.ctx) {
            self.stopped = true;
            return false;
        }
        true
    }

    fn params_of(&mut self, pat: &Pat) {
        for ident in binding_idents(pat) {
            if !self.enter(|v, ctx| v.visit_param_binding(ident, ctx)) {
                return;
            }
        }
    }

    fn mark_directives<'s>(&mut self, stmts: impl Iterator<Item = &'s Stmt>) {
        for stmt in stmts {
            match directive_literal(stmt) {
                Some(literal) => {
                    self.directives.insert(literal.span);
                }
                None => break,
            }
        }
    }
}

impl<V: AstVisitor> Visit for Walker<'_, V> {
    fn visit_module(&mut self, node: &Module) {
        self.mark_directives(node.body.iter().map_while(|item| match item {
            ModuleItem::Stmt(stmt) => Some(stmt),
            ModuleItem::ModuleDecl(_) => None,
        }));
        node.visit_children_with(self);
    }

    fn visit_function(&mut self, node: &Function) {
        if let Some(body) = &node.body {
            self.mark_directives(body.stmts.iter());
        }
        node.visit_children_with(self);
    }

    fn visit_str(&mut self, node: &Str) {
        if self.directives.contains(&node.span) {
            return;
        }
        self.enter(|v, ctx| v.visit_str(node, ctx));
    }

    fn visit_tpl(&mut self, node: &Tpl) {
        if self.enter(|v, ctx| v.visit_tpl(node, ctx)) {
            node.visit_children_with(self);
        }
    }

    fn visit_fn_decl(&mut self, node: &FnDecl) {
        if self.enter(|v, ctx| v.visit_fn_decl(node, ctx)) {
            node.visit_children_with(self);
        }
    }

    fn visit_fn_expr(&mut self, node: &FnExpr) {
        if self.enter(|v, ctx| v.visit_fn_expr(node, ctx)) {
            node.visit_children_with(self);
        }
    }

    fn visit_arrow_expr(&mut self, node: &ArrowExpr) {
        if !self.enter(|v, ctx| v.visit_arrow_expr(node, ctx)) {
            return;
        }
        for param in &node.params {
            self.params_of(param);
        }
        if let BlockStmtOrExpr::BlockStmt(body) = &*node.body {
            self.mark_directives(body.stmts.iter());
        }
        node.visit_children_with(self);
    }

    fn visit_param(&mut self, node: &Param) {
        self.params_of(&node.pat);
        node.visit_children_with(self);
    }

    fn visit_ts_param_prop(&mut self, node: &TsParamProp) {
        match &node.param {
            TsParamPropParam::Ident(ident) => {
                self.enter(|v, ctx| v.visit_param_binding(ident, ctx));
            }
            TsParamPropParam::Assign(assign) => self.params_of(&assign.left),
        }
        node.visit_children_with(self);
    }

    fn visit_getter_prop(&mut self, node: &GetterProp) {
        if let Some(body) = &node.body {
            self.mark_directives(body.stmts.iter());
        }
        node.visit_children_with(self);
    }

    fn visit_setter_prop(&mut self, node: &SetterProp) {
        self.params_of(&node.param);
        if let Some(body) = &node.body {
            self.mark_directives(body.stmts.iter());
        }
        node.visit_children_with(self);
    }

    fn visit_catch_clause(&mut self, node: &CatchClause) {
        if let Some(param) = &node.param {
            self.params_of(param);
        }
        node.visit_children_with(self);
    }

    fn visit_class_method(&mut self, node: &ClassMethod) {
        if self.enter(|v, ctx| v.visit_class_method(node, ctx)) {
            node.visit_children_with(self);
        }
    }

    fn visit_private_method(&mut self, node: &PrivateMethod) {
        if self.enter(|v, ctx| v.visit_private_method(node, ctx)) {
            node.visit_children_with(self);
        }
    }

    fn visit_constructor(&mut self, node: &Constructor) {
        if !self.enter(|v, ctx| v.visit_constructor(node, ctx)) {
            return;
        }
        if let Some(body) = &node.body {
            self.mark_directives(body.stmts.iter());
        }
        node.visit_children_with(self);
    }

    fn visit_var_decl(&mut self, node: &VarDecl) {
        if self.stopped {
            return;
        }
        self.var_kinds.push(node.kind);
        node.visit_children_with(self);
        self.var_kinds.pop();
    }

    fn visit_var_declarator(&mut self, node: &VarDeclarator) {
        let kind = self.var_kinds.last().copied().unwrap_or(VarDeclKind::Var);
        if self.enter(|v, ctx| v.visit_var_declarator(node, kind, ctx)) {
            node.visit_children_with(self);
        }
    }

    fn visit_class_decl(&mut self, node: &ClassDecl) {
        if self.enter(|v, ctx| v.visit_class_decl(node, ctx)) {
            node.visit_children_with(self);
        }
    }

    fn visit_class_expr(&mut self, node: &ClassExpr) {
        if self.enter(|v, ctx| v.visit_class_expr(node, ctx)) {
            node.visit_children_with(self);
        }
    }

    fn visit_import_decl(&mut self, node: &ImportDecl) {
        if self.enter(|v, ctx| v.visit_import_decl(node, ctx)) {
            node.visit_children_with(self);
        }
    }

    fn visit_call_expr(&mut self, node: &CallExpr) {
        if self.enter(|v, ctx| v.visit_call_expr(node, ctx)) {
            node.visit_children_with(self);
        }
    }

    fn visit_export_decl(&mut self, node: &ExportDecl) {
        if self.enter(|v, ctx| v.visit_export_decl(node, ctx)) {
            node.visit_children_with(self);
        }
    }

    fn visit_named_export(&mut self, node: &NamedExport) {
        if self.enter(|v, ctx| v.visit_named_export(node, ctx)) {
            node.visit_children_with(self);
        }
    }

    fn visit_export_default_decl(&mut self, node: &ExportDefaultDecl) {
        if !self.enter(|v, ctx| v.visit_export_default_decl(node, ctx)) {
            return;
        }
        match &node.decl {
            DefaultDecl::Fn(function) => {
                if self.enter(|v, ctx| v.visit_default_fn(function, ctx)) {
                    function.function.visit_with(self);
                }
            }
            DefaultDecl::Class(class) => {
                if self.enter(|v, ctx| v.visit_default_class(class, ctx)) {
                    class.class.visit_with(self);
                }
            }
            DefaultDecl::TsInterfaceDecl(_) => node.visit_children_with(self),
        }
    }

    fn visit_export_default_expr(&mut self, node: &ExportDefaultExpr) {
        if self.enter(|v, ctx| v.visit_export_default_expr(node, ctx)) {
            node.visit_children_with(self);
        }
    }

    fn visit_export_all(&mut self, node: &ExportAll) {
        if self.enter(|v, ctx| v.visit_export_all(node, ctx)) {
            node.visit_children_with(self);
        }
    }
}

pub fn walk_ast<V: AstVisitor>(module: &Module, visitor: &mut V, ctx: &VisitorContext) {
    let mut walker = Walker {
        visitor,
        ctx,
        stopped: false,
        var_kinds: Vec::new(),
        directives: HashSet::new(),
    };
    module.visit_with(&mut walker);
}

/// A leading `"use strict"`-style statement: a bare, unparenthesized string.
pub fn directive_literal(stmt: &Stmt) -> Option<&Str> {
    match stmt {
        Stmt::Expr(expr_stmt) => match &*expr_stmt.expr {
            Expr::Lit(Lit::Str(literal)) => Some(literal),
            _ => None,
        },
        _ => None,
    }
}

/// Every identifier a pattern binds, in source order.
pub fn binding_idents(pat: &Pat) -> Vec<&BindingIdent> {
    let mut out = Vec::new();
    collect_binding_idents(pat, &mut out);
    out
}

fn collect_binding_idents<'a>(pat: &'a Pat, out: &mut Vec<&'a BindingIdent>) {
    match pat {
        Pat::Ident(ident) => out.push(ident),
        Pat::Array(array) => {
            for elem in array.elems.iter().flatten() {
                collect_binding_idents(elem, out);
            }
        }
        Pat::Object(object) => {
            for prop in &object.props {
                match prop {
                    ObjectPatProp::KeyValue(kv) => collect_binding_idents(&kv.value, out),
                    ObjectPatProp::Assign(assign) => out.push(&assign.key),
                    ObjectPatProp::Rest(rest) => collect_binding_idents(&rest.arg, out),
                }
            }
        }
        Pat::Rest(rest) => collect_binding_idents(&rest.arg, out),
        Pat::Assign(assign) => collect_binding_idents(&assign.left, out),
        Pat::Expr(_) | Pat::Invalid(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use std::ops::ControlFlow;

    use super::*;
    use crate::parser::{ParseOptions, ParsedSource, SourceParser, SwcParser};

    fn parse(code: &str) -> ParsedSource {
        SwcParser::new()
            .parse(code, &ParseOptions::default())
            .unwrap()
    }

    #[derive(Default)]
    struct Recorder {
        strings: Vec<String>,
        fn_decls: usize,
        fn_exprs: usize,
        default_fns: usize,
        default_classes: usize,
        class_exprs: usize,
        declarators: Vec<VarDeclKind>,
        params: Vec<String>,
    }

    impl AstVisitor for Recorder {
        fn visit_str(&mut self, node: &Str, _ctx: &VisitorContext) -> ControlFlow<()> {
            self.strings.push(node.value.to_string());
            ControlFlow::Continue(())
        }

        fn visit_fn_decl(&mut self, _node: &FnDecl, _ctx: &VisitorContext) -> ControlFlow<()> {
            self.fn_decls += 1;
            ControlFlow::Continue(())
        }

        fn visit_fn_expr(&mut self, _node: &FnExpr, _ctx: &VisitorContext) -> ControlFlow<()> {
            self.fn_exprs += 1;
            ControlFlow::Continue(())
        }

        fn visit_default_fn(&mut self, _node: &FnExpr, _ctx: &VisitorContext) -> ControlFlow<()> {
            self.default_fns += 1;
            ControlFlow::Continue(())
        }

        fn visit_class_expr(&mut self, _node: &ClassExpr, _ctx: &VisitorContext) -> ControlFlow<()> {
            self.class_exprs += 1;
            ControlFlow::Continue(())
        }

        fn visit_default_class(
            &mut self,
            _node: &ClassExpr,
            _ctx: &VisitorContext,
        ) -> ControlFlow<()> {
            self.default_classes += 1;
            ControlFlow::Continue(())
        }

        fn visit_var_declarator(
            &mut self,
            _node: &VarDeclarator,
            kind: VarDeclKind,
            _ctx: &VisitorContext,
        ) -> ControlFlow<()> {
            self.declarators.push(kind);
            ControlFlow::Continue(())
        }

        fn visit_param_binding(
            &mut self,
            node: &BindingIdent,
            _ctx: &VisitorContext,
        ) -> ControlFlow<()> {
            self.params.push(node.id.sym.to_string());
            ControlFlow::Continue(())
        }
    }

    fn record(code: &str) -> Recorder {
        let parsed = parse(code);
        let ctx = VisitorContext::new(&parsed);
        let mut recorder = Recorder::default();
        walk_ast(parsed.module(), &mut recorder, &ctx);
        recorder
    }

    #[test]
    fn skips_directive_prologue_strings() {
        let recorder = record(
            r#"'use strict';
function f() { "use asm"; return "body"; }
const x = ('paren');
"#,
        );

        assert_eq!(recorder.strings, vec!["body", "paren"]);
    }

    #[test]
    fn skips_directive_prologues_in_accessor_bodies() {
        let recorder = record(
            r#"const o = {
    get x() { 'use strict'; return "got"; },
    set y(v) { 'use strict'; this.v = "set"; },
};
"#,
        );

        assert_eq!(recorder.strings, vec!["got", "set"]);
    }

    #[test]
    fn default_exports_are_reported_as_declarations() {
        let recorder = record(
            "export default function () { return function inner() {}; }\nconst C = class {};",
        );

        assert_eq!(recorder.default_fns, 1);
        assert_eq!(recorder.fn_exprs, 1);
        assert_eq!(recorder.fn_decls, 0);
        assert_eq!(recorder.class_exprs, 1);

        let recorder = record("export default class {}");
        assert_eq!(recorder.default_classes, 1);
        assert_eq!(recorder.class_exprs, 0);
    }

    #[test]
    fn declarators_carry_their_declaration_kind() {
        let recorder = record("var a = 1; let b, c; const d = () => { const e = 2; };");

        assert_eq!(
            recorder.declarators,
            vec![
                VarDeclKind::Var,
                VarDeclKind::Let,
                VarDeclKind::Let,
                VarDeclKind::Const,
                VarDeclKind::Const,
            ]
        );
    }

    #[test]
    fn parameter_bindings_include_nested_patterns() {
        let recorder = record(
            r#"
function f(a, { b, c: [d] }, ...rest) {}
const g = (x = 1) => x;
try {} catch ({ message }) {}
class K { constructor(y) {} set v(z) {} }
const o = { set w(q) {} };
"#,
        );

        assert_eq!(
            recorder.params,
            vec!["a", "b", "d", "rest", "x", "message", "y", "z", "q"]
        );
    }

    #[test]
    fn break_stops_the_walk() {
        struct FirstString(Option<String>);

        impl AstVisitor for FirstString {
            fn visit_str(&mut self, node: &Str, _ctx: &VisitorContext) -> ControlFlow<()> {
                self.0 = Some(node.value.to_string());
                ControlFlow::Break(())
            }
        }

        let parsed = parse("const a = 'one'; const b = 'two';");
        let ctx = VisitorContext::new(&parsed);
        let mut first = FirstString(None);
        walk_ast(parsed.module(), &mut first, &ctx);

        assert_eq!(first.0.as_deref(), Some("one"));
    }

    #[test]
    fn binding_idents_in_source_order() {
        let parsed = parse("const { a, b: [c, ...d], ...e } = obj;");
        let ModuleItem::Stmt(Stmt::Decl(swc_ecma_ast::Decl::Var(var))) = &parsed.module().body[0]
        else {
            panic!("expected a variable declaration");
        };

        let names: Vec<String> = binding_idents(&var.decls[0].name)
            .iter()
            .map(|b| b.id.sym.to_string())
            .collect();
        assert_eq!(names, vec!["a", "c", "d", "e"]);
    }
}
