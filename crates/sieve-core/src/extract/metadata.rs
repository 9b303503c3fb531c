//! File-level facts about the parsed program.

use serde::Serialize;
use swc_ecma_ast::{Expr, Module, ModuleItem, Stmt};

use super::helpers::unwrap_parens;
use crate::visitor::directive_literal;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metadata {
    pub has_use_strict: bool,
    pub top_level_await: bool,
    /// Not detected; always `false`.
    pub has_shebang: bool,
    /// Reported as `module` regardless of the parse mode.
    pub source_type: &'static str,
}

pub fn detect_metadata(module: &Module) -> Metadata {
    let stmts = module.body.iter().map_while(|item| match item {
        ModuleItem::Stmt(stmt) => Some(stmt),
        ModuleItem::ModuleDecl(_) => None,
    });

    let has_use_strict = stmts
        .map_while(directive_literal)
        .any(|literal| literal.value.to_string() == "use strict");

    let top_level_await = module.body.iter().any(|item| match item {
        ModuleItem::Stmt(Stmt::Expr(expr_stmt)) => {
            matches!(unwrap_parens(&expr_stmt.expr), Expr::Await(_))
        }
        _ => false,
    });

    Metadata {
        has_use_strict,
        top_level_await,
        has_shebang: false,
        source_type: "module",
    }
}
