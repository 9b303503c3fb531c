//! Cyclomatic complexity estimate for function-like nodes.

use swc_ecma_ast::{BinExpr, BinaryOp, CondExpr, ForStmt, IfStmt, SwitchCase, WhileStmt};
use swc_ecma_visit::{Visit, VisitWith};

/// Counts decision points below a node. Nested functions are not a
/// boundary: their branches count toward the enclosing function too.
///
/// Only `if`, C-style `for`, `while`, switch cases, `?:` and logical
/// operators count. `for-in`, `for-of` and `do-while` do not.
#[derive(Debug)]
pub struct ComplexityEstimator {
    complexity: usize,
}

impl ComplexityEstimator {
    /// `1 +` the decision points anywhere under `node`.
    pub fn estimate<N>(node: &N) -> usize
    where
        N: VisitWith<Self>,
    {
        let mut estimator = Self { complexity: 1 };
        node.visit_children_with(&mut estimator);
        estimator.complexity
    }
}

impl Visit for ComplexityEstimator {
    fn visit_if_stmt(&mut self, node: &IfStmt) {
        self.complexity += 1;
        node.visit_children_with(self);
    }

    fn visit_for_stmt(&mut self, node: &ForStmt) {
        self.complexity += 1;
        node.visit_children_with(self);
    }

    fn visit_while_stmt(&mut self, node: &WhileStmt) {
        self.complexity += 1;
        node.visit_children_with(self);
    }

    fn visit_switch_case(&mut self, node: &SwitchCase) {
        self.complexity += 1;
        node.visit_children_with(self);
    }

    fn visit_cond_expr(&mut self, node: &CondExpr) {
        self.complexity += 1;
        node.visit_children_with(self);
    }

    fn visit_bin_expr(&mut self, node: &BinExpr) {
        if matches!(
            node.op,
            BinaryOp::LogicalAnd | BinaryOp::LogicalOr | BinaryOp::NullishCoalescing
        ) {
            self.complexity += 1;
        }
        node.visit_children_with(self);
    }
}
