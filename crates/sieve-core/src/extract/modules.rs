//! ES import/export statements and CommonJS `require` calls.

use std::ops::ControlFlow;

use serde::Serialize;
use swc_common::Span;
use swc_ecma_ast::{
    CallExpr, Callee, Decl, DefaultDecl, ExportAll, ExportDecl, ExportDefaultDecl,
    ExportDefaultExpr, ExportSpecifier, Expr, ImportDecl, ImportSpecifier, Lit, NamedExport,
};

use super::Extract;
use super::helpers::{default_decl_type, export_name, node_type, unwrap_parens};
use crate::parser::Location;
use crate::visitor::{AstVisitor, VisitorContext, binding_idents};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportKind {
    Import,
    Require,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ImportSpecifierEntry {
    Default { local: String },
    Namespace { local: String },
    Named { imported: String, local: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportEntry {
    pub kind: ImportKind,
    pub source: String,
    pub is_local: bool,
    pub specifiers: Vec<ImportSpecifierEntry>,
    pub location: Location,
}

fn is_local_source(source: &str) -> bool {
    source.starts_with(['.', '/'])
}

#[derive(Debug, Default)]
pub struct ImportExtractor {
    entries: Vec<ImportEntry>,
}

impl ImportExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(
        &mut self,
        kind: ImportKind,
        source: String,
        specifiers: Vec<ImportSpecifierEntry>,
        span: Span,
        ctx: &VisitorContext,
    ) {
        self.entries.push(ImportEntry {
            kind,
            is_local: is_local_source(&source),
            source,
            specifiers,
            location: ctx.span_to_location(span),
        });
    }
}

impl AstVisitor for ImportExtractor {
    fn visit_import_decl(&mut self, node: &ImportDecl, ctx: &VisitorContext) -> ControlFlow<()> {
        let specifiers = node
            .specifiers
            .iter()
            .map(|specifier| match specifier {
                ImportSpecifier::Default(default) => ImportSpecifierEntry::Default {
                    local: default.local.sym.to_string(),
                },
                ImportSpecifier::Namespace(namespace) => ImportSpecifierEntry::Namespace {
                    local: namespace.local.sym.to_string(),
                },
                ImportSpecifier::Named(named) => {
                    let local = named.local.sym.to_string();
                    ImportSpecifierEntry::Named {
                        imported: named
                            .imported
                            .as_ref()
                            .map_or_else(|| local.clone(), export_name),
                        local,
                    }
                }
            })
            .collect();

        self.push(
            ImportKind::Import,
            node.src.value.to_string(),
            specifiers,
            node.span,
            ctx,
        );
        ControlFlow::Continue(())
    }

    fn visit_call_expr(&mut self, node: &CallExpr, ctx: &VisitorContext) -> ControlFlow<()> {
        let Callee::Expr(callee) = &node.callee else {
            return ControlFlow::Continue(());
        };
        let is_require = matches!(
            unwrap_parens(callee),
            Expr::Ident(ident) if ident.sym.as_ref() == "require"
        );
        if let (true, [arg]) = (is_require, node.args.as_slice()) {
            if let (None, Expr::Lit(Lit::Str(source))) = (arg.spread, unwrap_parens(&arg.expr)) {
                self.push(
                    ImportKind::Require,
                    source.value.to_string(),
                    Vec::new(),
                    node.span,
                    ctx,
                );
            }
        }
        ControlFlow::Continue(())
    }
}

impl Extract for ImportExtractor {
    type Output = Vec<ImportEntry>;

    fn finish(self, _ctx: &VisitorContext) -> Vec<ImportEntry> {
        self.entries
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportKind {
    Named,
    Default,
    All,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportEntry {
    pub kind: ExportKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declaration_type: Option<&'static str>,
    pub location: Location,
}

impl ExportEntry {
    fn new(kind: ExportKind, location: Location) -> Self {
        Self {
            kind,
            name: None,
            local_name: None,
            source: None,
            declaration_type: None,
            location,
        }
    }

    fn named(name: String, location: Location) -> Self {
        Self {
            name: Some(name),
            ..Self::new(ExportKind::Named, location)
        }
    }
}

#[derive(Debug, Default)]
pub struct ExportExtractor {
    entries: Vec<ExportEntry>,
}

impl ExportExtractor {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AstVisitor for ExportExtractor {
    fn visit_export_decl(&mut self, node: &ExportDecl, ctx: &VisitorContext) -> ControlFlow<()> {
        let location = ctx.span_to_location(node.span);
        match &node.decl {
            Decl::Fn(function) if !function.declare => self
                .entries
                .push(ExportEntry::named(function.ident.sym.to_string(), location)),
            Decl::Var(var) if !var.declare => {
                for declarator in &var.decls {
                    for ident in binding_idents(&declarator.name) {
                        self.entries
                            .push(ExportEntry::named(ident.id.sym.to_string(), location));
                    }
                }
            }
            // Only function and variable declarations are recorded. Classes
            // and type-level or ambient declarations are not.
            _ => {}
        }
        ControlFlow::Continue(())
    }

    fn visit_named_export(&mut self, node: &NamedExport, ctx: &VisitorContext) -> ControlFlow<()> {
        let location = ctx.span_to_location(node.span);
        let source = node.src.as_ref().map(|src| src.value.to_string());

        for specifier in &node.specifiers {
            let (name, local_name) = match specifier {
                ExportSpecifier::Named(named) => {
                    let local = export_name(&named.orig);
                    let exported = named
                        .exported
                        .as_ref()
                        .map_or_else(|| local.clone(), export_name);
                    (exported, Some(local))
                }
                ExportSpecifier::Namespace(namespace) => (export_name(&namespace.name), None),
                ExportSpecifier::Default(default) => (default.exported.sym.to_string(), None),
            };
            self.entries.push(ExportEntry {
                local_name,
                source: source.clone(),
                ..ExportEntry::named(name, location)
            });
        }
        ControlFlow::Continue(())
    }

    fn visit_export_default_decl(
        &mut self,
        node: &ExportDefaultDecl,
        ctx: &VisitorContext,
    ) -> ControlFlow<()> {
        let name = match &node.decl {
            DefaultDecl::Fn(function) => function.ident.as_ref(),
            DefaultDecl::Class(class) => class.ident.as_ref(),
            DefaultDecl::TsInterfaceDecl(interface) => Some(&interface.id),
        };
        self.entries.push(ExportEntry {
            name: Some(name.map_or_else(|| "anonymous".to_string(), |id| id.sym.to_string())),
            declaration_type: Some(default_decl_type(&node.decl)),
            ..ExportEntry::new(ExportKind::Default, ctx.span_to_location(node.span))
        });
        ControlFlow::Continue(())
    }

    fn visit_export_default_expr(
        &mut self,
        node: &ExportDefaultExpr,
        ctx: &VisitorContext,
    ) -> ControlFlow<()> {
        self.entries.push(ExportEntry {
            name: Some("anonymous".to_string()),
            declaration_type: Some(node_type(&node.expr)),
            ..ExportEntry::new(ExportKind::Default, ctx.span_to_location(node.span))
        });
        ControlFlow::Continue(())
    }

    fn visit_export_all(&mut self, node: &ExportAll, ctx: &VisitorContext) -> ControlFlow<()> {
        self.entries.push(ExportEntry {
            source: Some(node.src.value.to_string()),
            ..ExportEntry::new(ExportKind::All, ctx.span_to_location(node.span))
        });
        ControlFlow::Continue(())
    }
}

impl Extract for ExportExtractor {
    type Output = Vec<ExportEntry>;

    fn finish(self, _ctx: &VisitorContext) -> Vec<ExportEntry> {
        self.entries
    }
}
