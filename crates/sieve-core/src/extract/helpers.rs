//! Shared AST helpers for the category extractors.

use swc_ecma_ast::{BinaryOp, DefaultDecl, Expr, Lit, ModuleExportName, OptChainBase, PropName};

/// Strips any number of wrapping parentheses.
pub fn unwrap_parens(mut expr: &Expr) -> &Expr {
    while let Expr::Paren(paren) = expr {
        expr = &paren.expr;
    }
    expr
}

/// ESTree/Babel node-type name of an expression, e.g. `StringLiteral` or
/// `ArrowFunctionExpression`. Parentheses are transparent.
pub fn node_type(expr: &Expr) -> &'static str {
    match unwrap_parens(expr) {
        Expr::Lit(lit) => match lit {
            Lit::Str(_) => "StringLiteral",
            Lit::Num(_) => "NumericLiteral",
            Lit::Bool(_) => "BooleanLiteral",
            Lit::Null(_) => "NullLiteral",
            Lit::BigInt(_) => "BigIntLiteral",
            Lit::Regex(_) => "RegExpLiteral",
            Lit::JSXText(_) => "JSXText",
        },
        Expr::Tpl(_) => "TemplateLiteral",
        Expr::TaggedTpl(_) => "TaggedTemplateExpression",
        Expr::Ident(_) => "Identifier",
        Expr::This(_) => "ThisExpression",
        Expr::Array(_) => "ArrayExpression",
        Expr::Object(_) => "ObjectExpression",
        Expr::Fn(_) => "FunctionExpression",
        Expr::Arrow(_) => "ArrowFunctionExpression",
        Expr::Class(_) => "ClassExpression",
        Expr::Unary(_) => "UnaryExpression",
        Expr::Update(_) => "UpdateExpression",
        Expr::Bin(bin) => match bin.op {
            BinaryOp::LogicalAnd | BinaryOp::LogicalOr | BinaryOp::NullishCoalescing => {
                "LogicalExpression"
            }
            _ => "BinaryExpression",
        },
        Expr::Assign(_) => "AssignmentExpression",
        Expr::Member(_) | Expr::SuperProp(_) => "MemberExpression",
        Expr::Cond(_) => "ConditionalExpression",
        Expr::Call(_) => "CallExpression",
        Expr::New(_) => "NewExpression",
        Expr::Seq(_) => "SequenceExpression",
        Expr::Await(_) => "AwaitExpression",
        Expr::Yield(_) => "YieldExpression",
        Expr::MetaProp(_) => "MetaProperty",
        Expr::OptChain(chain) => match &*chain.base {
            OptChainBase::Member(_) => "OptionalMemberExpression",
            OptChainBase::Call(_) => "OptionalCallExpression",
        },
        Expr::JSXElement(_) => "JSXElement",
        Expr::JSXFragment(_) => "JSXFragment",
        Expr::JSXMember(_) => "JSXMemberExpression",
        Expr::JSXNamespacedName(_) => "JSXNamespacedName",
        Expr::JSXEmpty(_) => "JSXEmptyExpression",
        Expr::TsAs(_) | Expr::TsConstAssertion(_) => "TSAsExpression",
        Expr::TsTypeAssertion(_) => "TSTypeAssertion",
        Expr::TsNonNull(_) => "TSNonNullExpression",
        Expr::TsSatisfies(_) => "TSSatisfiesExpression",
        Expr::TsInstantiation(_) => "TSInstantiationExpression",
        Expr::PrivateName(_) => "PrivateName",
        Expr::Paren(_) => "ParenthesizedExpression",
        Expr::Invalid(_) => "Invalid",
    }
}

pub fn default_decl_type(decl: &DefaultDecl) -> &'static str {
    match decl {
        DefaultDecl::Fn(_) => "FunctionDeclaration",
        DefaultDecl::Class(_) => "ClassDeclaration",
        DefaultDecl::TsInterfaceDecl(_) => "TSInterfaceDeclaration",
    }
}

/// Static name of a property or method key; computed keys have none.
pub fn prop_name(key: &PropName) -> Option<String> {
    match key {
        PropName::Ident(ident) => Some(ident.sym.to_string()),
        PropName::Str(literal) => Some(literal.value.to_string()),
        PropName::Num(number) => Some(number.value.to_string()),
        PropName::BigInt(big) => Some(big.value.to_string()),
        PropName::Computed(_) => None,
    }
}

pub fn export_name(name: &ModuleExportName) -> String {
    match name {
        ModuleExportName::Ident(ident) => ident.sym.to_string(),
        ModuleExportName::Str(literal) => literal.value.to_string(),
    }
}

/// JavaScript `String.prototype.length`: UTF-16 code units.
pub fn js_length(value: &str) -> usize {
    value.encode_utf16().count()
}

#[cfg(test)]
mod tests {
    use swc_ecma_ast::{Decl, ModuleItem, Stmt};

    use super::*;
    use crate::parser::{ParseOptions, SourceParser, SwcParser};

    fn initializer_types(code: &str) -> Vec<&'static str> {
        let parsed = SwcParser::new()
            .parse(code, &ParseOptions::default())
            .unwrap();
        parsed
            .module()
            .body
            .iter()
            .filter_map(|item| match item {
                ModuleItem::Stmt(Stmt::Decl(Decl::Var(var))) => var.decls[0].init.as_deref(),
                _ => None,
            })
            .map(node_type)
            .collect()
    }

    #[test]
    fn maps_common_initializers() {
        let types = initializer_types(
            r#"
const a = 'x';
const b = 1;
const c = () => {};
const d = function () {};
const e = a || b;
const f = a + b;
const g = (null);
const h = `t`;
const i = new Map();
const j = a?.b;
const k = <div />;
"#,
        );

        assert_eq!(
            types,
            vec![
                "StringLiteral",
                "NumericLiteral",
                "ArrowFunctionExpression",
                "FunctionExpression",
                "LogicalExpression",
                "BinaryExpression",
                "NullLiteral",
                "TemplateLiteral",
                "NewExpression",
                "OptionalMemberExpression",
                "JSXElement",
            ]
        );
    }

    #[test]
    fn js_length_counts_utf16_units() {
        assert_eq!(js_length("abc"), 3);
        assert_eq!(js_length("é"), 1);
        assert_eq!(js_length("😀"), 2);
    }
}
