//! Scope visitor that builds the scope tree and binding table from a module.
//!
//! Declarations are registered as the walk meets them. Identifier uses are
//! queued with the scope they occur in and resolved once the walk is done,
//! so hoisted functions and use-before-declaration resolve correctly.

use swc_common::Span;
use swc_ecma_ast::{
    ArrowExpr, AssignExpr, AssignTarget, AssignTargetPat, BlockStmt, BlockStmtOrExpr, CatchClause,
    Class, ClassDecl, ClassExpr, Constructor, DefaultDecl, ExportDefaultDecl, ExportSpecifier,
    Expr, FnDecl, FnExpr, ForHead, ForInStmt, ForOfStmt, ForStmt, Function, Ident, ImportDecl,
    ImportSpecifier, JSXElementName, JSXObject, Module, ModuleExportName, NamedExport,
    ParamOrTsParamProp, Pat, Prop, SetterProp, SimpleAssignTarget, SwitchStmt, TsParamPropParam,
    UpdateExpr, VarDecl, VarDeclKind,
};
use swc_ecma_visit::{Visit, VisitWith};

use super::SemanticModel;
use super::bindings::{BindingKind, BindingTable};
use super::scope::{ScopeId, ScopeKind, ScopeTree};
use crate::visitor::binding_idents;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Access {
    Read,
    Write,
    ReadWrite,
}

#[derive(Debug)]
struct PendingReference {
    name: String,
    scope: ScopeId,
    span: Span,
    access: Access,
}

pub struct ScopeBuilder {
    scopes: ScopeTree,
    bindings: BindingTable,
    current: ScopeId,
    pending: Vec<PendingReference>,
}

impl ScopeBuilder {
    pub fn build(module: &Module) -> SemanticModel {
        let scopes = ScopeTree::new(module.span);
        let current = scopes.root();
        let mut builder = Self {
            scopes,
            bindings: BindingTable::new(),
            current,
            pending: Vec::new(),
        };

        module.visit_children_with(&mut builder);
        builder.resolve_pending();

        tracing::trace!(
            scopes = builder.scopes.len(),
            bindings = builder.bindings.len(),
            "built semantic model"
        );

        SemanticModel {
            scopes: builder.scopes,
            bindings: builder.bindings,
        }
    }

    fn with_scope(&mut self, kind: ScopeKind, span: Span, f: impl FnOnce(&mut Self)) {
        let parent = self.current;
        self.current = self.scopes.create_scope(kind, parent, span);
        f(self);
        self.current = parent;
    }

    fn declare(&mut self, ident: &Ident, kind: BindingKind) {
        let scope = if kind == BindingKind::Var {
            self.scopes.hoisting_scope(self.current)
        } else {
            self.current
        };
        self.bindings.declare(&ident.sym, kind, scope, ident.span);
    }

    fn declare_pat(&mut self, pat: &Pat, kind: BindingKind) {
        for binding in binding_idents(pat) {
            self.declare(&binding.id, kind);
        }
    }

    fn record(&mut self, ident: &Ident, access: Access) {
        self.pending.push(PendingReference {
            name: ident.sym.to_string(),
            scope: self.current,
            span: ident.span,
            access,
        });
    }

    fn record_writes(&mut self, pat: &Pat) {
        for binding in binding_idents(pat) {
            self.record(&binding.id, Access::Write);
        }
    }

    fn resolve_pending(&mut self) {
        for reference in std::mem::take(&mut self.pending) {
            let Some(id) = self
                .bindings
                .lookup(&reference.name, reference.scope, &self.scopes)
            else {
                continue;
            };
            match reference.access {
                Access::Read => self.bindings.add_reference(id, reference.span),
                Access::Write => self.bindings.add_mutation(id, reference.span),
                Access::ReadWrite => {
                    self.bindings.add_reference(id, reference.span);
                    self.bindings.add_mutation(id, reference.span);
                }
            }
        }
    }
}

impl Visit for ScopeBuilder {
    fn visit_var_decl(&mut self, node: &VarDecl) {
        let kind = match node.kind {
            VarDeclKind::Var => BindingKind::Var,
            VarDeclKind::Let => BindingKind::Let,
            VarDeclKind::Const => BindingKind::Const,
        };
        for decl in &node.decls {
            self.declare_pat(&decl.name, kind);
            decl.name.visit_with(self);
            if let Some(init) = &decl.init {
                init.visit_with(self);
            }
        }
    }

    fn visit_fn_decl(&mut self, node: &FnDecl) {
        self.declare(&node.ident, BindingKind::Function);
        node.function.visit_with(self);
    }

    fn visit_fn_expr(&mut self, node: &FnExpr) {
        match &node.ident {
            Some(ident) => self.with_scope(ScopeKind::Function, node.function.span, |this| {
                this.declare(ident, BindingKind::Function);
                node.function.visit_with(this);
            }),
            None => node.function.visit_with(self),
        }
    }

    fn visit_function(&mut self, node: &Function) {
        node.decorators.visit_with(self);
        self.with_scope(ScopeKind::Function, node.span, |this| {
            for param in &node.params {
                this.declare_pat(&param.pat, BindingKind::Parameter);
            }
            node.params.visit_with(this);
            if let Some(body) = &node.body {
                body.stmts.visit_with(this);
            }
        });
    }

    fn visit_arrow_expr(&mut self, node: &ArrowExpr) {
        self.with_scope(ScopeKind::ArrowFunction, node.span, |this| {
            for param in &node.params {
                this.declare_pat(param, BindingKind::Parameter);
            }
            node.params.visit_with(this);
            match &*node.body {
                BlockStmtOrExpr::BlockStmt(block) => block.stmts.visit_with(this),
                BlockStmtOrExpr::Expr(expr) => expr.visit_with(this),
            }
        });
    }

    fn visit_constructor(&mut self, node: &Constructor) {
        node.key.visit_with(self);
        self.with_scope(ScopeKind::Function, node.span, |this| {
            for param in &node.params {
                match param {
                    ParamOrTsParamProp::Param(param) => {
                        this.declare_pat(&param.pat, BindingKind::Parameter)
                    }
                    ParamOrTsParamProp::TsParamProp(prop) => match &prop.param {
                        TsParamPropParam::Ident(ident) => {
                            this.declare(&ident.id, BindingKind::Parameter)
                        }
                        TsParamPropParam::Assign(assign) => {
                            this.declare_pat(&assign.left, BindingKind::Parameter)
                        }
                    },
                }
            }
            node.params.visit_with(this);
            if let Some(body) = &node.body {
                body.stmts.visit_with(this);
            }
        });
    }

    fn visit_setter_prop(&mut self, node: &SetterProp) {
        node.key.visit_with(self);
        self.with_scope(ScopeKind::Function, node.span, |this| {
            this.declare_pat(&node.param, BindingKind::Parameter);
            node.param.visit_with(this);
            if let Some(body) = &node.body {
                body.stmts.visit_with(this);
            }
        });
    }

    fn visit_class_decl(&mut self, node: &ClassDecl) {
        self.declare(&node.ident, BindingKind::Class);
        node.class.visit_with(self);
    }

    fn visit_class_expr(&mut self, node: &ClassExpr) {
        match &node.ident {
            Some(ident) => self.with_scope(ScopeKind::Class, node.class.span, |this| {
                this.declare(ident, BindingKind::Class);
                node.class.visit_with(this);
            }),
            None => node.class.visit_with(self),
        }
    }

    fn visit_class(&mut self, node: &Class) {
        node.decorators.visit_with(self);
        if let Some(super_class) = &node.super_class {
            super_class.visit_with(self);
        }
        self.with_scope(ScopeKind::Class, node.span, |this| {
            node.body.visit_with(this);
        });
    }

    fn visit_export_default_decl(&mut self, node: &ExportDefaultDecl) {
        match &node.decl {
            DefaultDecl::Fn(function) => {
                if let Some(ident) = &function.ident {
                    self.declare(ident, BindingKind::Function);
                }
                function.function.visit_with(self);
            }
            DefaultDecl::Class(class) => {
                if let Some(ident) = &class.ident {
                    self.declare(ident, BindingKind::Class);
                }
                class.class.visit_with(self);
            }
            DefaultDecl::TsInterfaceDecl(_) => {}
        }
    }

    fn visit_block_stmt(&mut self, node: &BlockStmt) {
        self.with_scope(ScopeKind::Block, node.span, |this| {
            node.stmts.visit_with(this);
        });
    }

    fn visit_for_stmt(&mut self, node: &ForStmt) {
        self.with_scope(ScopeKind::For, node.span, |this| {
            node.visit_children_with(this);
        });
    }

    fn visit_for_in_stmt(&mut self, node: &ForInStmt) {
        self.with_scope(ScopeKind::For, node.span, |this| {
            node.left.visit_with(this);
            node.right.visit_with(this);
            node.body.visit_with(this);
        });
    }

    fn visit_for_of_stmt(&mut self, node: &ForOfStmt) {
        self.with_scope(ScopeKind::For, node.span, |this| {
            node.left.visit_with(this);
            node.right.visit_with(this);
            node.body.visit_with(this);
        });
    }

    fn visit_for_head(&mut self, node: &ForHead) {
        match node {
            ForHead::Pat(pat) => {
                self.record_writes(pat);
                pat.visit_with(self);
            }
            _ => node.visit_children_with(self),
        }
    }

    fn visit_catch_clause(&mut self, node: &CatchClause) {
        self.with_scope(ScopeKind::Catch, node.span, |this| {
            if let Some(param) = &node.param {
                this.declare_pat(param, BindingKind::Parameter);
                param.visit_with(this);
            }
            node.body.stmts.visit_with(this);
        });
    }

    fn visit_switch_stmt(&mut self, node: &SwitchStmt) {
        node.discriminant.visit_with(self);
        self.with_scope(ScopeKind::Switch, node.span, |this| {
            node.cases.visit_with(this);
        });
    }

    fn visit_import_decl(&mut self, node: &ImportDecl) {
        for specifier in &node.specifiers {
            let local = match specifier {
                ImportSpecifier::Named(named) => &named.local,
                ImportSpecifier::Default(default) => &default.local,
                ImportSpecifier::Namespace(namespace) => &namespace.local,
            };
            self.declare(local, BindingKind::Import);
        }
    }

    fn visit_named_export(&mut self, node: &NamedExport) {
        if node.src.is_some() {
            return;
        }
        for specifier in &node.specifiers {
            if let ExportSpecifier::Named(named) = specifier {
                if let ModuleExportName::Ident(ident) = &named.orig {
                    self.record(ident, Access::Read);
                }
            }
        }
    }

    fn visit_expr(&mut self, node: &Expr) {
        match node {
            Expr::Ident(ident) => self.record(ident, Access::Read),
            _ => node.visit_children_with(self),
        }
    }

    fn visit_prop(&mut self, node: &Prop) {
        match node {
            Prop::Shorthand(ident) => self.record(ident, Access::Read),
            _ => node.visit_children_with(self),
        }
    }

    fn visit_pat(&mut self, node: &Pat) {
        match node {
            Pat::Ident(_) => {}
            Pat::Expr(expr) => match &**expr {
                Expr::Ident(ident) => self.record(ident, Access::Write),
                other => other.visit_with(self),
            },
            _ => node.visit_children_with(self),
        }
    }

    fn visit_assign_expr(&mut self, node: &AssignExpr) {
        match &node.left {
            AssignTarget::Simple(SimpleAssignTarget::Ident(ident)) => {
                self.record(&ident.id, Access::Write)
            }
            AssignTarget::Simple(target) => target.visit_with(self),
            AssignTarget::Pat(target) => {
                let pat = match target {
                    AssignTargetPat::Array(array) => Pat::Array(array.clone()),
                    AssignTargetPat::Object(object) => Pat::Object(object.clone()),
                    AssignTargetPat::Invalid(invalid) => Pat::Invalid(invalid.clone()),
                };
                self.record_writes(&pat);
                pat.visit_with(self);
            }
        }
        node.right.visit_with(self);
    }

    fn visit_update_expr(&mut self, node: &UpdateExpr) {
        let mut arg = &*node.arg;
        while let Expr::Paren(paren) = arg {
            arg = &paren.expr;
        }
        match arg {
            Expr::Ident(ident) => self.record(ident, Access::ReadWrite),
            other => other.visit_with(self),
        }
    }

    fn visit_jsx_element_name(&mut self, node: &JSXElementName) {
        match node {
            JSXElementName::Ident(ident) if !is_intrinsic_element(&ident.sym) => {
                self.record(ident, Access::Read)
            }
            JSXElementName::JSXMemberExpr(member) => member.visit_with(self),
            _ => {}
        }
    }

    fn visit_jsx_object(&mut self, node: &JSXObject) {
        match node {
            JSXObject::Ident(ident) => self.record(ident, Access::Read),
            JSXObject::JSXMemberExpr(member) => member.visit_with(self),
        }
    }
}

fn is_intrinsic_element(name: &str) -> bool {
    name.starts_with(|c: char| c.is_ascii_lowercase())
}
