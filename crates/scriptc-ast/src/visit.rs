//! Traversal protocol
//!
//! One visitor trait per node category, with one method per variant. Nodes
//! dispatch themselves through `accept`, so a visitor never matches on the
//! variant tag. The match in `accept` is exhaustive: adding a variant to
//! [`Expr`] or [`Stmt`] is a compile error until every visitor learns about it.
//!
//! `D` is the caller-supplied context threaded through every call. It is the
//! only channel for pass state; visitors take `&self`.

use std::sync::Arc;

use crate::ir::*;

/// Visitor over expression variants
pub trait ExprVisitor<D: ?Sized> {
    type Output;

    fn visit_array_literal(&self, expr: &Arc<ArrayLiteralExpr>, data: &mut D) -> Self::Output;
    fn visit_binary(&self, expr: &Arc<BinaryExpr>, data: &mut D) -> Self::Output;
    fn visit_comma(&self, expr: &Arc<CommaExpr>, data: &mut D) -> Self::Output;
    fn visit_conditional(&self, expr: &Arc<ConditionalExpr>, data: &mut D) -> Self::Output;
    fn visit_constant(&self, expr: &Arc<ConstantExpr>, data: &mut D) -> Self::Output;
    fn visit_function(&self, expr: &Arc<FunctionExpr>, data: &mut D) -> Self::Output;
    fn visit_identifier(&self, expr: &Arc<IdentifierExpr>, data: &mut D) -> Self::Output;
    fn visit_invocation(&self, expr: &Arc<InvocationExpr>, data: &mut D) -> Self::Output;
    fn visit_object_literal(&self, expr: &Arc<ObjectLiteralExpr>, data: &mut D) -> Self::Output;
    fn visit_member_access(&self, expr: &Arc<MemberAccessExpr>, data: &mut D) -> Self::Output;
    fn visit_new(&self, expr: &Arc<NewExpr>, data: &mut D) -> Self::Output;
    fn visit_unary(&self, expr: &Arc<UnaryExpr>, data: &mut D) -> Self::Output;
    fn visit_type_reference(&self, expr: &Arc<TypeReferenceExpr>, data: &mut D) -> Self::Output;
    fn visit_this(&self, expr: &Arc<ThisExpr>, data: &mut D) -> Self::Output;
    fn visit_literal(&self, expr: &Arc<LiteralExpr>, data: &mut D) -> Self::Output;
}

/// Visitor over statement variants
pub trait StmtVisitor<D: ?Sized> {
    type Output;

    fn visit_block(&self, stmt: &Arc<BlockStmt>, data: &mut D) -> Self::Output;
    fn visit_break(&self, stmt: &Arc<BreakStmt>, data: &mut D) -> Self::Output;
    fn visit_continue(&self, stmt: &Arc<ContinueStmt>, data: &mut D) -> Self::Output;
    fn visit_comment(&self, stmt: &Arc<CommentStmt>, data: &mut D) -> Self::Output;
    fn visit_do_while(&self, stmt: &Arc<DoWhileStmt>, data: &mut D) -> Self::Output;
    fn visit_empty(&self, stmt: &Arc<EmptyStmt>, data: &mut D) -> Self::Output;
    fn visit_expression(&self, stmt: &Arc<ExpressionStmt>, data: &mut D) -> Self::Output;
    fn visit_for_each_in(&self, stmt: &Arc<ForEachInStmt>, data: &mut D) -> Self::Output;
    fn visit_for(&self, stmt: &Arc<ForStmt>, data: &mut D) -> Self::Output;
    fn visit_if(&self, stmt: &Arc<IfStmt>, data: &mut D) -> Self::Output;
    fn visit_return(&self, stmt: &Arc<ReturnStmt>, data: &mut D) -> Self::Output;
    fn visit_switch(&self, stmt: &Arc<SwitchStmt>, data: &mut D) -> Self::Output;
    fn visit_throw(&self, stmt: &Arc<ThrowStmt>, data: &mut D) -> Self::Output;
    fn visit_try(&self, stmt: &Arc<TryStmt>, data: &mut D) -> Self::Output;
    fn visit_variable_declaration(
        &self,
        stmt: &Arc<VariableDeclarationStmt>,
        data: &mut D,
    ) -> Self::Output;
    fn visit_while(&self, stmt: &Arc<WhileStmt>, data: &mut D) -> Self::Output;
    fn visit_with(&self, stmt: &Arc<WithStmt>, data: &mut D) -> Self::Output;
    fn visit_labelled(&self, stmt: &Arc<LabelledStmt>, data: &mut D) -> Self::Output;
    fn visit_function(&self, stmt: &Arc<FunctionStmt>, data: &mut D) -> Self::Output;
    fn visit_goto(&self, stmt: &Arc<GotoStmt>, data: &mut D) -> Self::Output;
    fn visit_yield(&self, stmt: &Arc<YieldStmt>, data: &mut D) -> Self::Output;
}

impl Expr {
    /// Dispatch to the visitor method matching this variant
    pub fn accept<D, V>(&self, visitor: &V, data: &mut D) -> V::Output
    where
        D: ?Sized,
        V: ExprVisitor<D> + ?Sized,
    {
        match self {
            Expr::ArrayLiteral(e) => visitor.visit_array_literal(e, data),
            Expr::Binary(e) => visitor.visit_binary(e, data),
            Expr::Comma(e) => visitor.visit_comma(e, data),
            Expr::Conditional(e) => visitor.visit_conditional(e, data),
            Expr::Constant(e) => visitor.visit_constant(e, data),
            Expr::Function(e) => visitor.visit_function(e, data),
            Expr::Identifier(e) => visitor.visit_identifier(e, data),
            Expr::Invocation(e) => visitor.visit_invocation(e, data),
            Expr::ObjectLiteral(e) => visitor.visit_object_literal(e, data),
            Expr::MemberAccess(e) => visitor.visit_member_access(e, data),
            Expr::New(e) => visitor.visit_new(e, data),
            Expr::Unary(e) => visitor.visit_unary(e, data),
            Expr::TypeReference(e) => visitor.visit_type_reference(e, data),
            Expr::This(e) => visitor.visit_this(e, data),
            Expr::Literal(e) => visitor.visit_literal(e, data),
        }
    }
}

impl Stmt {
    /// Dispatch to the visitor method matching this variant
    pub fn accept<D, V>(&self, visitor: &V, data: &mut D) -> V::Output
    where
        D: ?Sized,
        V: StmtVisitor<D> + ?Sized,
    {
        match self {
            Stmt::Block(s) => visitor.visit_block(s, data),
            Stmt::Break(s) => visitor.visit_break(s, data),
            Stmt::Continue(s) => visitor.visit_continue(s, data),
            Stmt::Comment(s) => visitor.visit_comment(s, data),
            Stmt::DoWhile(s) => visitor.visit_do_while(s, data),
            Stmt::Empty(s) => visitor.visit_empty(s, data),
            Stmt::Expression(s) => visitor.visit_expression(s, data),
            Stmt::ForEachIn(s) => visitor.visit_for_each_in(s, data),
            Stmt::For(s) => visitor.visit_for(s, data),
            Stmt::If(s) => visitor.visit_if(s, data),
            Stmt::Return(s) => visitor.visit_return(s, data),
            Stmt::Switch(s) => visitor.visit_switch(s, data),
            Stmt::Throw(s) => visitor.visit_throw(s, data),
            Stmt::Try(s) => visitor.visit_try(s, data),
            Stmt::VariableDeclaration(s) => visitor.visit_variable_declaration(s, data),
            Stmt::While(s) => visitor.visit_while(s, data),
            Stmt::With(s) => visitor.visit_with(s, data),
            Stmt::Labelled(s) => visitor.visit_labelled(s, data),
            Stmt::Function(s) => visitor.visit_function(s, data),
            Stmt::Goto(s) => visitor.visit_goto(s, data),
            Stmt::Yield(s) => visitor.visit_yield(s, data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Names the variant it was dispatched to, and counts dispatches.
    struct KindName;

    impl ExprVisitor<usize> for KindName {
        type Output = &'static str;

        fn visit_array_literal(&self, _: &Arc<ArrayLiteralExpr>, n: &mut usize) -> &'static str {
            *n += 1;
            "array"
        }
        fn visit_binary(&self, _: &Arc<BinaryExpr>, n: &mut usize) -> &'static str {
            *n += 1;
            "binary"
        }
        fn visit_comma(&self, _: &Arc<CommaExpr>, n: &mut usize) -> &'static str {
            *n += 1;
            "comma"
        }
        fn visit_conditional(&self, _: &Arc<ConditionalExpr>, n: &mut usize) -> &'static str {
            *n += 1;
            "conditional"
        }
        fn visit_constant(&self, _: &Arc<ConstantExpr>, n: &mut usize) -> &'static str {
            *n += 1;
            "constant"
        }
        fn visit_function(&self, _: &Arc<FunctionExpr>, n: &mut usize) -> &'static str {
            *n += 1;
            "function"
        }
        fn visit_identifier(&self, _: &Arc<IdentifierExpr>, n: &mut usize) -> &'static str {
            *n += 1;
            "identifier"
        }
        fn visit_invocation(&self, _: &Arc<InvocationExpr>, n: &mut usize) -> &'static str {
            *n += 1;
            "invocation"
        }
        fn visit_object_literal(&self, _: &Arc<ObjectLiteralExpr>, n: &mut usize) -> &'static str {
            *n += 1;
            "object"
        }
        fn visit_member_access(&self, _: &Arc<MemberAccessExpr>, n: &mut usize) -> &'static str {
            *n += 1;
            "member"
        }
        fn visit_new(&self, _: &Arc<NewExpr>, n: &mut usize) -> &'static str {
            *n += 1;
            "new"
        }
        fn visit_unary(&self, _: &Arc<UnaryExpr>, n: &mut usize) -> &'static str {
            *n += 1;
            "unary"
        }
        fn visit_type_reference(&self, _: &Arc<TypeReferenceExpr>, n: &mut usize) -> &'static str {
            *n += 1;
            "type"
        }
        fn visit_this(&self, _: &Arc<ThisExpr>, n: &mut usize) -> &'static str {
            *n += 1;
            "this"
        }
        fn visit_literal(&self, _: &Arc<LiteralExpr>, n: &mut usize) -> &'static str {
            *n += 1;
            "literal"
        }
    }

    #[test]
    fn test_expr_dispatch_reaches_matching_method() {
        let cases = vec![
            (Expr::array_literal(Vec::new()), "array"),
            (Expr::binary(BinaryOp::Add, Expr::number(1.0), Expr::number(2.0)), "binary"),
            (Expr::comma(vec![Expr::this()]), "comma"),
            (Expr::conditional(Expr::this(), Expr::this(), Expr::this()), "conditional"),
            (Expr::string("s"), "constant"),
            (Expr::function(Vec::new(), BlockStmt::new(Vec::new()), None), "function"),
            (Expr::identifier("x"), "identifier"),
            (Expr::invocation(Expr::identifier("f"), Vec::new()), "invocation"),
            (Expr::object_literal(Vec::new()), "object"),
            (Expr::member(Expr::this(), "m"), "member"),
            (Expr::construct(Expr::type_reference("Foo"), Vec::new()), "new"),
            (Expr::unary(UnaryOp::Not, Expr::boolean(true)), "unary"),
            (Expr::type_reference("System.Type"), "type"),
            (Expr::this(), "this"),
            (Expr::literal("{0}", vec![Expr::null()]), "literal"),
        ];

        let mut dispatched = 0;
        for (expr, expected) in &cases {
            assert_eq!(expr.accept(&KindName, &mut dispatched), *expected);
        }
        assert_eq!(dispatched, cases.len());
    }

    /// Counts statements in a tree, descending into nested statement bodies.
    struct StmtCounter;

    impl StmtCounter {
        fn block(&self, block: &BlockStmt) -> usize {
            block.statements().iter().map(|s| s.accept(self, &mut ())).sum()
        }
    }

    impl StmtVisitor<()> for StmtCounter {
        type Output = usize;

        fn visit_block(&self, stmt: &Arc<BlockStmt>, _: &mut ()) -> usize {
            1 + self.block(stmt)
        }
        fn visit_break(&self, _: &Arc<BreakStmt>, _: &mut ()) -> usize {
            1
        }
        fn visit_continue(&self, _: &Arc<ContinueStmt>, _: &mut ()) -> usize {
            1
        }
        fn visit_comment(&self, _: &Arc<CommentStmt>, _: &mut ()) -> usize {
            1
        }
        fn visit_do_while(&self, stmt: &Arc<DoWhileStmt>, _: &mut ()) -> usize {
            1 + self.block(stmt.body())
        }
        fn visit_empty(&self, _: &Arc<EmptyStmt>, _: &mut ()) -> usize {
            1
        }
        fn visit_expression(&self, _: &Arc<ExpressionStmt>, _: &mut ()) -> usize {
            1
        }
        fn visit_for_each_in(&self, stmt: &Arc<ForEachInStmt>, data: &mut ()) -> usize {
            1 + stmt.body().accept(self, data)
        }
        fn visit_for(&self, stmt: &Arc<ForStmt>, _: &mut ()) -> usize {
            1 + self.block(stmt.body())
        }
        fn visit_if(&self, stmt: &Arc<IfStmt>, _: &mut ()) -> usize {
            1 + self.block(stmt.then_branch()) + stmt.else_branch().map_or(0, |b| self.block(b))
        }
        fn visit_return(&self, _: &Arc<ReturnStmt>, _: &mut ()) -> usize {
            1
        }
        fn visit_switch(&self, stmt: &Arc<SwitchStmt>, _: &mut ()) -> usize {
            1 + stmt.sections().iter().map(|s| self.block(s.body())).sum::<usize>()
        }
        fn visit_throw(&self, _: &Arc<ThrowStmt>, _: &mut ()) -> usize {
            1
        }
        fn visit_try(&self, stmt: &Arc<TryStmt>, _: &mut ()) -> usize {
            1 + self.block(stmt.guarded())
                + stmt.catch().map_or(0, |c| self.block(c.body()))
                + stmt.finally().map_or(0, |b| self.block(b))
        }
        fn visit_variable_declaration(&self, _: &Arc<VariableDeclarationStmt>, _: &mut ()) -> usize {
            1
        }
        fn visit_while(&self, stmt: &Arc<WhileStmt>, _: &mut ()) -> usize {
            1 + self.block(stmt.body())
        }
        fn visit_with(&self, stmt: &Arc<WithStmt>, data: &mut ()) -> usize {
            1 + stmt.body().accept(self, data)
        }
        fn visit_labelled(&self, stmt: &Arc<LabelledStmt>, data: &mut ()) -> usize {
            1 + stmt.statement().accept(self, data)
        }
        fn visit_function(&self, stmt: &Arc<FunctionStmt>, _: &mut ()) -> usize {
            1 + self.block(stmt.body())
        }
        fn visit_goto(&self, _: &Arc<GotoStmt>, _: &mut ()) -> usize {
            1
        }
        fn visit_yield(&self, _: &Arc<YieldStmt>, _: &mut ()) -> usize {
            1
        }
    }

    #[test]
    fn test_stmt_dispatch_with_custom_output() {
        // while (x) { if (y) { break; } else { continue; } }
        let stmt = Stmt::while_loop(
            Expr::identifier("x"),
            BlockStmt::new(vec![Stmt::if_else(
                Expr::identifier("y"),
                BlockStmt::new(vec![Stmt::break_(None)]),
                Some(BlockStmt::new(vec![Stmt::continue_(None)])),
            )]),
        );
        assert_eq!(stmt.accept(&StmtCounter, &mut ()), 4);

        let labelled = Stmt::labelled("outer", Stmt::block(vec![Stmt::goto("outer"), Stmt::empty()]));
        assert_eq!(labelled.accept(&StmtCounter, &mut ()), 4);
    }
}
