//! Constant folding pass
//!
//! Folds operators whose operands are constants after their own children have
//! been folded:
//! - arithmetic and comparison over two numbers
//! - `+` over two strings
//! - `!` over a boolean, unary `-`/`+` over a number
//! - `c ? a : b` and `if (c)` with a boolean test
//!
//! A dropped `if` branch never runs, but its hoisted bindings still exist:
//! each dropped `var` survives as an initializer-less declaration, and an `if`
//! whose dead branch declares a function is left alone. A folded callee that
//! turns into a member access is called as `(0, o.m)()` so the call keeps its
//! `this`.

use std::sync::Arc;

use scriptc_ast::rewrite::{walk_binary, walk_conditional, walk_if, walk_unary};
use scriptc_ast::{
    BinaryExpr, BinaryOp, BlockStmt, ConditionalExpr, Constant, Expr, IfStmt, InvocationExpr,
    NodeList, Rewriter, SameNode, Stmt, UnaryExpr, UnaryOp, VariableDeclaration,
};

#[derive(Debug, Default)]
pub struct FoldStats {
    pub folded: usize,
}

pub struct ConstantFolder;

fn fold_numbers(op: BinaryOp, l: f64, r: f64) -> Option<Constant> {
    let value = match op {
        BinaryOp::Add => Constant::Number(l + r),
        BinaryOp::Sub => Constant::Number(l - r),
        BinaryOp::Mul => Constant::Number(l * r),
        BinaryOp::Div => Constant::Number(l / r),
        BinaryOp::Mod => Constant::Number(l % r),
        BinaryOp::Lt => Constant::Boolean(l < r),
        BinaryOp::Le => Constant::Boolean(l <= r),
        BinaryOp::Gt => Constant::Boolean(l > r),
        BinaryOp::Ge => Constant::Boolean(l >= r),
        BinaryOp::Eq | BinaryOp::StrictEq => Constant::Boolean(l == r),
        BinaryOp::Ne | BinaryOp::StrictNe => Constant::Boolean(l != r),
        _ => return None,
    };
    Some(value)
}

fn fold_binary(op: BinaryOp, left: &Constant, right: &Constant) -> Option<Constant> {
    match (left, right) {
        (Constant::Number(l), Constant::Number(r)) => fold_numbers(op, *l, *r),
        (Constant::String(l), Constant::String(r)) if op == BinaryOp::Add => {
            Some(Constant::String(format!("{}{}", l, r)))
        }
        _ => None,
    }
}

fn fold_unary(op: UnaryOp, operand: &Constant) -> Option<Constant> {
    match (op, operand) {
        (UnaryOp::Not, Constant::Boolean(b)) => Some(Constant::Boolean(!b)),
        (UnaryOp::Neg, Constant::Number(n)) => Some(Constant::Number(-n)),
        (UnaryOp::Pos, Constant::Number(n)) => Some(Constant::Number(*n)),
        _ => None,
    }
}

fn as_boolean(expr: &Expr) -> Option<bool> {
    match expr.as_constant() {
        Some(Constant::Boolean(b)) => Some(*b),
        _ => None,
    }
}

fn is_member_reference(expr: &Expr) -> bool {
    match expr {
        Expr::MemberAccess(_) => true,
        Expr::Binary(node) => node.op() == BinaryOp::Index,
        _ => false,
    }
}

/// Bindings a statement introduces into the enclosing function scope
#[derive(Debug, Default)]
struct Hoisted {
    vars: Vec<String>,
    functions: bool,
}

impl Hoisted {
    fn of(block: &BlockStmt) -> Self {
        let mut hoisted = Hoisted::default();
        hoisted.block(block);
        hoisted
    }

    fn block(&mut self, block: &BlockStmt) {
        for stmt in block.statements().iter() {
            self.stmt(stmt);
        }
    }

    fn var(&mut self, name: &str) {
        if !self.vars.iter().any(|v| v == name) {
            self.vars.push(name.to_string());
        }
    }

    fn stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Block(node) => self.block(node),
            Stmt::DoWhile(node) => self.block(node.body()),
            Stmt::While(node) => self.block(node.body()),
            Stmt::ForEachIn(node) => {
                if node.declares_variable() {
                    self.var(node.variable());
                }
                self.stmt(node.body());
            }
            Stmt::For(node) => {
                if let Some(init) = node.init() {
                    self.stmt(init);
                }
                self.block(node.body());
            }
            Stmt::If(node) => {
                self.block(node.then_branch());
                if let Some(else_branch) = node.else_branch() {
                    self.block(else_branch);
                }
            }
            Stmt::Switch(node) => {
                for section in node.sections().iter() {
                    self.block(section.body());
                }
            }
            Stmt::Try(node) => {
                self.block(node.guarded());
                if let Some(catch) = node.catch() {
                    self.block(catch.body());
                }
                if let Some(finally) = node.finally() {
                    self.block(finally);
                }
            }
            Stmt::VariableDeclaration(node) => {
                for declaration in node.declarations().iter() {
                    self.var(declaration.name());
                }
            }
            Stmt::With(node) => self.stmt(node.body()),
            Stmt::Labelled(node) => self.stmt(node.statement()),
            Stmt::Function(_) => self.functions = true,
            Stmt::Break(_)
            | Stmt::Continue(_)
            | Stmt::Comment(_)
            | Stmt::Empty(_)
            | Stmt::Expression(_)
            | Stmt::Return(_)
            | Stmt::Throw(_)
            | Stmt::Goto(_)
            | Stmt::Yield(_) => {}
        }
    }

    fn declaration(&self) -> Option<Stmt> {
        if self.vars.is_empty() {
            return None;
        }
        let declarations: Vec<_> = self
            .vars
            .iter()
            .map(|name| VariableDeclaration::new(name.as_str(), None))
            .collect();
        Some(Stmt::var_decl(declarations))
    }
}

/// Replace a constant `if` by its live branch, keeping the dead branch's `var`s
fn select_branch(live: Option<&Arc<BlockStmt>>, dead: Option<&Arc<BlockStmt>>) -> Option<Stmt> {
    let hoisted = dead.map(|block| Hoisted::of(block)).unwrap_or_default();
    if hoisted.functions {
        return None;
    }
    let stmt = match (live, hoisted.declaration()) {
        (Some(live), None) => Stmt::Block(Arc::clone(live)),
        (Some(live), Some(vars)) => {
            let mut statements = live.statements().to_vec();
            statements.push(vars);
            Stmt::block(statements)
        }
        (None, Some(vars)) => vars,
        (None, None) => Stmt::empty(),
    };
    Some(stmt)
}

impl Rewriter<FoldStats> for ConstantFolder {
    fn rewrite_invocation(&self, expr: &Arc<InvocationExpr>, stats: &mut FoldStats) -> Expr {
        let method = self.rewrite_expression(expr.method(), stats);
        let arguments = self.rewrite_expressions(expr.arguments(), stats);
        if method.same(expr.method()) && arguments.same(expr.arguments()) {
            return Expr::Invocation(Arc::clone(expr));
        }
        let method = if is_member_reference(&method) && !is_member_reference(expr.method()) {
            Expr::comma(vec![Expr::number(0.0), method])
        } else {
            method
        };
        Expr::invocation(method, arguments)
    }

    fn rewrite_binary(&self, expr: &Arc<BinaryExpr>, stats: &mut FoldStats) -> Expr {
        let walked = walk_binary(self, expr, stats);
        let Expr::Binary(node) = &walked else {
            return walked;
        };
        let (Some(left), Some(right)) = (node.left().as_constant(), node.right().as_constant())
        else {
            return walked;
        };
        match fold_binary(node.op(), left, right) {
            Some(value) => {
                log::trace!("fold {:?} {} {:?} -> {:?}", left, node.op().symbol(), right, value);
                stats.folded += 1;
                Expr::constant(value)
            }
            None => walked,
        }
    }

    fn rewrite_unary(&self, expr: &Arc<UnaryExpr>, stats: &mut FoldStats) -> Expr {
        let walked = walk_unary(self, expr, stats);
        let Expr::Unary(node) = &walked else {
            return walked;
        };
        let folded = node
            .operand()
            .as_constant()
            .and_then(|c| fold_unary(node.op(), c));
        match folded {
            Some(value) => {
                stats.folded += 1;
                Expr::constant(value)
            }
            None => walked,
        }
    }

    fn rewrite_conditional(&self, expr: &Arc<ConditionalExpr>, stats: &mut FoldStats) -> Expr {
        let walked = walk_conditional(self, expr, stats);
        let Expr::Conditional(node) = &walked else {
            return walked;
        };
        match as_boolean(node.test()) {
            Some(true) => {
                stats.folded += 1;
                node.true_part().clone()
            }
            Some(false) => {
                stats.folded += 1;
                node.false_part().clone()
            }
            None => walked,
        }
    }

    fn rewrite_if(&self, stmt: &Arc<IfStmt>, stats: &mut FoldStats) -> Stmt {
        let walked = walk_if(self, stmt, stats);
        let Stmt::If(node) = &walked else {
            return walked;
        };
        let folded = match as_boolean(node.test()) {
            Some(true) => select_branch(Some(node.then_branch()), node.else_branch()),
            Some(false) => select_branch(node.else_branch(), Some(node.then_branch())),
            None => None,
        };
        match folded {
            Some(stmt) => {
                stats.folded += 1;
                stmt
            }
            None => walked,
        }
    }
}

/// Fold constants across a statement list
pub fn fold_constants(program: &NodeList<Stmt>, stats: &mut FoldStats) -> NodeList<Stmt> {
    ConstantFolder.rewrite_statements(program, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scriptc_ast::{CaseLabel, SwitchSection};

    fn fold(expr: &Expr) -> (Expr, usize) {
        let mut stats = FoldStats::default();
        let result = ConstantFolder.rewrite_expression(expr, &mut stats);
        (result, stats.folded)
    }

    #[test]
    fn test_fold_nested_arithmetic() {
        // (1 + 2) * 4
        let expr = Expr::binary(
            BinaryOp::Mul,
            Expr::binary(BinaryOp::Add, Expr::number(1.0), Expr::number(2.0)),
            Expr::number(4.0),
        );
        let (result, folded) = fold(&expr);
        assert_eq!(result.as_constant(), Some(&Constant::Number(12.0)));
        assert_eq!(folded, 2);
    }

    #[test]
    fn test_fold_strings_and_comparisons() {
        let concat = Expr::binary(BinaryOp::Add, Expr::string("a"), Expr::string("b"));
        assert_eq!(fold(&concat).0.as_constant(), Some(&Constant::String("ab".into())));

        let cmp = Expr::binary(BinaryOp::StrictEq, Expr::number(1.0), Expr::number(1.0));
        assert_eq!(fold(&cmp).0.as_constant(), Some(&Constant::Boolean(true)));

        let not = Expr::unary(UnaryOp::Not, cmp);
        assert_eq!(fold(&not).0.as_constant(), Some(&Constant::Boolean(false)));

        let neg = Expr::unary(UnaryOp::Neg, Expr::number(3.0));
        assert_eq!(fold(&neg).0.as_constant(), Some(&Constant::Number(-3.0)));
    }

    #[test]
    fn test_non_constant_operands_left_alone() {
        let expr = Expr::binary(BinaryOp::Add, Expr::identifier("x"), Expr::number(1.0));
        let (result, folded) = fold(&expr);
        assert!(result.same(&expr));
        assert_eq!(folded, 0);

        // `typeof 1` is not folded
        let expr = Expr::unary(UnaryOp::TypeOf, Expr::number(1.0));
        assert!(fold(&expr).0.same(&expr));

        // mixed string/number `+` is not folded
        let expr = Expr::binary(BinaryOp::Add, Expr::string("a"), Expr::number(1.0));
        assert!(fold(&expr).0.same(&expr));
    }

    #[test]
    fn test_partial_fold_rebuilds_parent() {
        // f(x, 2 * 3)
        let x = Expr::identifier("x");
        let expr = Expr::invocation(
            Expr::identifier("f"),
            vec![x.clone(), Expr::binary(BinaryOp::Mul, Expr::number(2.0), Expr::number(3.0))],
        );
        let (result, _) = fold(&expr);
        let Expr::Invocation(call) = &result else { panic!("expected invocation") };
        assert!(!result.same(&expr));
        assert!(call.arguments()[0].same(&x));
        assert_eq!(call.arguments()[1].as_constant(), Some(&Constant::Number(6.0)));
    }

    #[test]
    fn test_fold_conditional_picks_branch() {
        let a = Expr::identifier("a");
        let expr = Expr::conditional(
            Expr::unary(UnaryOp::Not, Expr::boolean(false)),
            a.clone(),
            Expr::identifier("b"),
        );
        let (result, folded) = fold(&expr);
        assert!(result.same(&a));
        assert_eq!(folded, 2);
    }

    #[test]
    fn test_fold_if_with_constant_test() {
        let then_block = BlockStmt::new(vec![Stmt::expression(Expr::identifier("a"))]);
        let program: NodeList<Stmt> = vec![
            Stmt::if_else(Expr::boolean(true), then_block.clone(), None),
            Stmt::if_else(Expr::boolean(false), BlockStmt::new(Vec::new()), None),
        ]
        .into();
        let mut stats = FoldStats::default();
        let result = fold_constants(&program, &mut stats);

        let Stmt::Block(block) = &result[0] else { panic!("expected block") };
        assert!(block.same(&then_block));
        assert!(matches!(result[1], Stmt::Empty(_)));
        assert_eq!(stats.folded, 2);
    }

    #[test]
    fn test_dead_branch_keeps_var_bindings() {
        // if (false) { var a = 1; } return a;
        let program: NodeList<Stmt> = vec![
            Stmt::if_else(
                Expr::boolean(false),
                BlockStmt::new(vec![Stmt::var_decl(vec![VariableDeclaration::new(
                    "a",
                    Some(Expr::number(1.0)),
                )])]),
                None,
            ),
            Stmt::return_(Some(Expr::identifier("a"))),
        ]
        .into();
        let mut stats = FoldStats::default();
        let result = fold_constants(&program, &mut stats);

        let Stmt::VariableDeclaration(decls) = &result[0] else { panic!("expected var") };
        assert_eq!(decls.declarations().len(), 1);
        assert_eq!(decls.declarations()[0].name(), "a");
        assert!(decls.declarations()[0].initializer().is_none());
        assert!(result[1].same(&program[1]));
        assert_eq!(stats.folded, 1);
    }

    #[test]
    fn test_live_branch_gains_nested_dead_vars() {
        // if (true) { f(); } else { for (var i;;) { switch (k) { default: var j, i; } } }
        let call = Stmt::expression(Expr::invocation(Expr::identifier("f"), Vec::new()));
        let dead = BlockStmt::new(vec![Stmt::for_loop(
            Some(Stmt::var_decl(vec![VariableDeclaration::new("i", None)])),
            None,
            None,
            BlockStmt::new(vec![Stmt::switch(
                Expr::identifier("k"),
                vec![SwitchSection::new(
                    vec![CaseLabel::Default],
                    BlockStmt::new(vec![Stmt::var_decl(vec![
                        VariableDeclaration::new("j", None),
                        VariableDeclaration::new("i", None),
                    ])]),
                )],
            )]),
        )]);
        let program: NodeList<Stmt> = vec![Stmt::if_else(
            Expr::boolean(true),
            BlockStmt::new(vec![call.clone()]),
            Some(dead),
        )]
        .into();
        let result = fold_constants(&program, &mut FoldStats::default());

        let Stmt::Block(block) = &result[0] else { panic!("expected block") };
        assert_eq!(block.statements().len(), 2);
        assert!(block.statements()[0].same(&call));
        let Stmt::VariableDeclaration(decls) = &block.statements()[1] else { panic!("expected var") };
        let names: Vec<_> = decls.declarations().iter().map(|d| d.name()).collect();
        assert_eq!(names, ["i", "j"]);
    }

    #[test]
    fn test_dead_branch_with_function_not_folded() {
        let program: NodeList<Stmt> = vec![Stmt::if_else(
            Expr::boolean(false),
            BlockStmt::new(vec![Stmt::function("g", Vec::new(), BlockStmt::new(Vec::new()))]),
            None,
        )]
        .into();
        let mut stats = FoldStats::default();
        let result = fold_constants(&program, &mut stats);
        assert!(result.same(&program));
        assert_eq!(stats.folded, 0);
    }

    #[test]
    fn test_folded_callee_keeps_this_unbound() {
        // (true ? o.m : f)()
        let member = Expr::member(Expr::identifier("o"), "m");
        let expr = Expr::invocation(
            Expr::conditional(Expr::boolean(true), member.clone(), Expr::identifier("f")),
            Vec::new(),
        );
        let (result, folded) = fold(&expr);
        assert_eq!(folded, 1);

        let Expr::Invocation(call) = &result else { panic!("expected invocation") };
        let Expr::Comma(comma) = call.method() else { panic!("expected comma callee") };
        assert_eq!(comma.expressions().len(), 2);
        assert_eq!(comma.expressions()[0].as_constant(), Some(&Constant::Number(0.0)));
        assert!(comma.expressions()[1].same(&member));

        // a plain function callee needs no wrapping
        let expr = Expr::invocation(
            Expr::conditional(Expr::boolean(false), member, Expr::identifier("f")),
            Vec::new(),
        );
        let Expr::Invocation(call) = &fold(&expr).0 else { panic!("expected invocation") };
        assert_eq!(call.method().as_identifier(), Some("f"));
    }

    #[test]
    fn test_member_callee_with_folded_target_not_wrapped() {
        // (1 + 2).toFixed()
        let expr = Expr::invocation(
            Expr::member(
                Expr::binary(BinaryOp::Add, Expr::number(1.0), Expr::number(2.0)),
                "toFixed",
            ),
            Vec::new(),
        );
        let Expr::Invocation(call) = &fold(&expr).0 else { panic!("expected invocation") };
        let Expr::MemberAccess(member) = call.method() else { panic!("expected member access") };
        assert_eq!(member.target().as_constant(), Some(&Constant::Number(3.0)));
    }
}
