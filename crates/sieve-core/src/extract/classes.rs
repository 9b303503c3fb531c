//! Class declarations with member summaries, and bare class expressions.

use std::ops::ControlFlow;

use serde::Serialize;
use swc_ecma_ast::{Class, ClassDecl, ClassExpr, ClassMember, Expr, Ident};

use super::Extract;
use super::functions::MethodKind;
use super::helpers::{prop_name, unwrap_parens};
use crate::parser::Location;
use crate::visitor::{AstVisitor, VisitorContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassKind {
    Declaration,
    Expression,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassMethodEntry {
    pub name: String,
    pub kind: MethodKind,
    pub is_static: bool,
    pub is_async: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassPropertyEntry {
    pub name: String,
    pub is_static: bool,
}

/// Members of a declared class, in body order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassBody {
    pub methods: Vec<ClassMethodEntry>,
    pub properties: Vec<ClassPropertyEntry>,
    pub method_count: usize,
    pub property_count: usize,
}

impl ClassBody {
    fn of(class: &Class) -> Self {
        let mut body = Self::default();
        for member in &class.body {
            match member {
                ClassMember::Constructor(_) => body.methods.push(ClassMethodEntry {
                    name: "constructor".to_string(),
                    kind: MethodKind::Constructor,
                    is_static: false,
                    is_async: false,
                }),
                ClassMember::Method(method) => body.methods.push(ClassMethodEntry {
                    name: prop_name(&method.key).unwrap_or_else(|| "anonymous".to_string()),
                    kind: method.kind.into(),
                    is_static: method.is_static,
                    is_async: method.function.is_async,
                }),
                ClassMember::PrivateMethod(method) => body.methods.push(ClassMethodEntry {
                    name: format!("#{}", method.key.name),
                    kind: method.kind.into(),
                    is_static: method.is_static,
                    is_async: method.function.is_async,
                }),
                ClassMember::ClassProp(prop) => body.properties.push(ClassPropertyEntry {
                    name: prop_name(&prop.key).unwrap_or_else(|| "anonymous".to_string()),
                    is_static: prop.is_static,
                }),
                ClassMember::PrivateProp(prop) => body.properties.push(ClassPropertyEntry {
                    name: format!("#{}", prop.key.name),
                    is_static: prop.is_static,
                }),
                _ => {}
            }
        }
        body.method_count = body.methods.len();
        body.property_count = body.properties.len();
        body
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassEntry {
    pub name: String,
    pub kind: ClassKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub super_class_name: Option<String>,
    pub location: Location,
    /// Present for declarations only.
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub body: Option<ClassBody>,
}

#[derive(Debug, Default)]
pub struct ClassExtractor {
    entries: Vec<ClassEntry>,
}

impl ClassExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, ident: Option<&Ident>, class: &Class, kind: ClassKind, ctx: &VisitorContext) {
        self.entries.push(ClassEntry {
            name: ident.map_or_else(|| "anonymous".to_string(), |id| id.sym.to_string()),
            kind,
            super_class_name: super_class_name(class),
            location: ctx.span_to_location(class.span),
            body: (kind == ClassKind::Declaration).then(|| ClassBody::of(class)),
        });
    }
}

fn super_class_name(class: &Class) -> Option<String> {
    match unwrap_parens(class.super_class.as_deref()?) {
        Expr::Ident(ident) => Some(ident.sym.to_string()),
        _ => None,
    }
}

impl AstVisitor for ClassExtractor {
    fn visit_class_decl(&mut self, node: &ClassDecl, ctx: &VisitorContext) -> ControlFlow<()> {
        self.push(Some(&node.ident), &node.class, ClassKind::Declaration, ctx);
        ControlFlow::Continue(())
    }

    fn visit_default_class(&mut self, node: &ClassExpr, ctx: &VisitorContext) -> ControlFlow<()> {
        self.push(node.ident.as_ref(), &node.class, ClassKind::Declaration, ctx);
        ControlFlow::Continue(())
    }

    fn visit_class_expr(&mut self, node: &ClassExpr, ctx: &VisitorContext) -> ControlFlow<()> {
        self.push(node.ident.as_ref(), &node.class, ClassKind::Expression, ctx);
        ControlFlow::Continue(())
    }
}

impl Extract for ClassExtractor {
    type Output = Vec<ClassEntry>;

    fn finish(self, _ctx: &VisitorContext) -> Vec<ClassEntry> {
        self.entries
    }
}
