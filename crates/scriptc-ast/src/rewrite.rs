//! Identity-preserving rewriting
//!
//! [`Rewriter`] is the base for every output-AST pass. Its default methods
//! descend into every child, and rebuild a node only when at least one child
//! came back as a different instance. An untouched subtree is handed back as
//! the very same `Arc`, so ancestors can short-circuit too and a pass that
//! changes nothing allocates nothing.
//!
//! A pass overrides the `rewrite_*` methods for the variants it cares about.
//! The default behavior for each composite variant is also exposed as a free
//! `walk_*` function, so an override can rewrite the children first and then
//! inspect the result.
//!
//! Children are visited in declaration order (left to right, top to bottom)
//! and a parent is rebuilt only after all of its children have been visited.

use std::sync::Arc;

use crate::ir::*;
use crate::visit::{ExprVisitor, StmtVisitor};

/// Rewrite each element of `orig`, sharing the original list when nothing changed.
///
/// Runs in two phases. The scan phase walks the list until some element comes
/// back as a different instance; if none does, `orig` itself is returned. The
/// build phase then allocates one new list holding the untouched prefix, the
/// first divergent element and the rewritten remainder. `rewrite` is called
/// exactly once per element, in order.
pub fn rewrite_list<T, F>(orig: &NodeList<T>, mut rewrite: F) -> NodeList<T>
where
    T: SameNode + Clone,
    F: FnMut(&T) -> T,
{
    let mut rest = orig.iter().enumerate();
    let (index, first_changed) = loop {
        match rest.next() {
            None => return Arc::clone(orig),
            Some((i, before)) => {
                let after = rewrite(before);
                if !after.same(before) {
                    break (i, after);
                }
            }
        }
    };

    let mut rebuilt = Vec::with_capacity(orig.len());
    rebuilt.extend(orig[..index].iter().cloned());
    rebuilt.push(first_changed);
    rebuilt.extend(rest.map(|(_, before)| rewrite(before)));
    rebuilt.into()
}

fn rewrite_opt<T, F>(orig: Option<&T>, rewrite: F) -> Option<T>
where
    F: FnOnce(&T) -> T,
{
    orig.map(rewrite)
}

fn same_opt<T: SameNode>(before: Option<&T>, after: Option<&T>) -> bool {
    match (before, after) {
        (Some(a), Some(b)) => a.same(b),
        (None, None) => true,
        _ => false,
    }
}

/// Base trait for output-AST rewrite passes.
///
/// Every method has an identity-preserving default. `D` is the pass context,
/// threaded through every call.
pub trait Rewriter<D: ?Sized = ()> {
    // --- Entry points ---

    fn rewrite_expression(&self, expr: &Expr, data: &mut D) -> Expr {
        expr.accept(self, data)
    }

    fn rewrite_statement(&self, stmt: &Stmt, data: &mut D) -> Stmt {
        stmt.accept(self, data)
    }

    // --- Sequences and aggregates ---

    fn rewrite_expressions(&self, exprs: &NodeList<Expr>, data: &mut D) -> NodeList<Expr> {
        rewrite_list(exprs, |e| self.rewrite_expression(e, data))
    }

    fn rewrite_statements(&self, stmts: &NodeList<Stmt>, data: &mut D) -> NodeList<Stmt> {
        rewrite_list(stmts, |s| self.rewrite_statement(s, data))
    }

    fn rewrite_object_properties(
        &self,
        properties: &NodeList<Arc<ObjectProperty>>,
        data: &mut D,
    ) -> NodeList<Arc<ObjectProperty>> {
        rewrite_list(properties, |p| self.rewrite_object_property(p, data))
    }

    fn rewrite_object_property(
        &self,
        property: &Arc<ObjectProperty>,
        data: &mut D,
    ) -> Arc<ObjectProperty> {
        walk_object_property(self, property, data)
    }

    fn rewrite_variable_declarations(
        &self,
        declarations: &NodeList<Arc<VariableDeclaration>>,
        data: &mut D,
    ) -> NodeList<Arc<VariableDeclaration>> {
        rewrite_list(declarations, |d| self.rewrite_variable_declaration(d, data))
    }

    fn rewrite_variable_declaration(
        &self,
        declaration: &Arc<VariableDeclaration>,
        data: &mut D,
    ) -> Arc<VariableDeclaration> {
        walk_variable_declaration(self, declaration, data)
    }

    fn rewrite_switch_sections(
        &self,
        sections: &NodeList<Arc<SwitchSection>>,
        data: &mut D,
    ) -> NodeList<Arc<SwitchSection>> {
        rewrite_list(sections, |s| self.rewrite_switch_section(s, data))
    }

    fn rewrite_switch_section(
        &self,
        section: &Arc<SwitchSection>,
        data: &mut D,
    ) -> Arc<SwitchSection> {
        walk_switch_section(self, section, data)
    }

    fn rewrite_case_label(&self, label: &CaseLabel, data: &mut D) -> CaseLabel {
        match label {
            CaseLabel::Value(value) => CaseLabel::Value(self.rewrite_expression(value, data)),
            CaseLabel::Default => CaseLabel::Default,
        }
    }

    fn rewrite_catch_clause(&self, clause: &Arc<CatchClause>, data: &mut D) -> Arc<CatchClause> {
        walk_catch_clause(self, clause, data)
    }

    /// Blocks are rewritten as blocks: every typed block child goes through here,
    /// and so does a block appearing as a plain statement.
    fn rewrite_block(&self, block: &Arc<BlockStmt>, data: &mut D) -> Arc<BlockStmt> {
        walk_block(self, block, data)
    }

    // --- Expressions ---

    fn rewrite_array_literal(&self, expr: &Arc<ArrayLiteralExpr>, data: &mut D) -> Expr {
        walk_array_literal(self, expr, data)
    }

    fn rewrite_binary(&self, expr: &Arc<BinaryExpr>, data: &mut D) -> Expr {
        walk_binary(self, expr, data)
    }

    fn rewrite_comma(&self, expr: &Arc<CommaExpr>, data: &mut D) -> Expr {
        walk_comma(self, expr, data)
    }

    fn rewrite_conditional(&self, expr: &Arc<ConditionalExpr>, data: &mut D) -> Expr {
        walk_conditional(self, expr, data)
    }

    fn rewrite_constant(&self, expr: &Arc<ConstantExpr>, _data: &mut D) -> Expr {
        Expr::Constant(Arc::clone(expr))
    }

    fn rewrite_function(&self, expr: &Arc<FunctionExpr>, data: &mut D) -> Expr {
        walk_function(self, expr, data)
    }

    fn rewrite_identifier(&self, expr: &Arc<IdentifierExpr>, _data: &mut D) -> Expr {
        Expr::Identifier(Arc::clone(expr))
    }

    fn rewrite_invocation(&self, expr: &Arc<InvocationExpr>, data: &mut D) -> Expr {
        walk_invocation(self, expr, data)
    }

    fn rewrite_object_literal(&self, expr: &Arc<ObjectLiteralExpr>, data: &mut D) -> Expr {
        walk_object_literal(self, expr, data)
    }

    fn rewrite_member_access(&self, expr: &Arc<MemberAccessExpr>, data: &mut D) -> Expr {
        walk_member_access(self, expr, data)
    }

    fn rewrite_new(&self, expr: &Arc<NewExpr>, data: &mut D) -> Expr {
        walk_new(self, expr, data)
    }

    fn rewrite_unary(&self, expr: &Arc<UnaryExpr>, data: &mut D) -> Expr {
        walk_unary(self, expr, data)
    }

    fn rewrite_type_reference(&self, expr: &Arc<TypeReferenceExpr>, _data: &mut D) -> Expr {
        Expr::TypeReference(Arc::clone(expr))
    }

    fn rewrite_this(&self, expr: &Arc<ThisExpr>, _data: &mut D) -> Expr {
        Expr::This(Arc::clone(expr))
    }

    fn rewrite_literal(&self, expr: &Arc<LiteralExpr>, data: &mut D) -> Expr {
        walk_literal(self, expr, data)
    }

    // --- Statements ---

    fn rewrite_break(&self, stmt: &Arc<BreakStmt>, _data: &mut D) -> Stmt {
        Stmt::Break(Arc::clone(stmt))
    }

    fn rewrite_continue(&self, stmt: &Arc<ContinueStmt>, _data: &mut D) -> Stmt {
        Stmt::Continue(Arc::clone(stmt))
    }

    fn rewrite_comment(&self, stmt: &Arc<CommentStmt>, _data: &mut D) -> Stmt {
        Stmt::Comment(Arc::clone(stmt))
    }

    fn rewrite_do_while(&self, stmt: &Arc<DoWhileStmt>, data: &mut D) -> Stmt {
        walk_do_while(self, stmt, data)
    }

    fn rewrite_empty(&self, stmt: &Arc<EmptyStmt>, _data: &mut D) -> Stmt {
        Stmt::Empty(Arc::clone(stmt))
    }

    fn rewrite_expression_stmt(&self, stmt: &Arc<ExpressionStmt>, data: &mut D) -> Stmt {
        walk_expression_stmt(self, stmt, data)
    }

    fn rewrite_for_each_in(&self, stmt: &Arc<ForEachInStmt>, data: &mut D) -> Stmt {
        walk_for_each_in(self, stmt, data)
    }

    fn rewrite_for(&self, stmt: &Arc<ForStmt>, data: &mut D) -> Stmt {
        walk_for(self, stmt, data)
    }

    fn rewrite_if(&self, stmt: &Arc<IfStmt>, data: &mut D) -> Stmt {
        walk_if(self, stmt, data)
    }

    fn rewrite_return(&self, stmt: &Arc<ReturnStmt>, data: &mut D) -> Stmt {
        walk_return(self, stmt, data)
    }

    fn rewrite_switch(&self, stmt: &Arc<SwitchStmt>, data: &mut D) -> Stmt {
        walk_switch(self, stmt, data)
    }

    fn rewrite_throw(&self, stmt: &Arc<ThrowStmt>, data: &mut D) -> Stmt {
        walk_throw(self, stmt, data)
    }

    fn rewrite_try(&self, stmt: &Arc<TryStmt>, data: &mut D) -> Stmt {
        walk_try(self, stmt, data)
    }

    fn rewrite_variable_declaration_stmt(
        &self,
        stmt: &Arc<VariableDeclarationStmt>,
        data: &mut D,
    ) -> Stmt {
        walk_variable_declaration_stmt(self, stmt, data)
    }

    fn rewrite_while(&self, stmt: &Arc<WhileStmt>, data: &mut D) -> Stmt {
        walk_while(self, stmt, data)
    }

    fn rewrite_with(&self, stmt: &Arc<WithStmt>, data: &mut D) -> Stmt {
        walk_with(self, stmt, data)
    }

    fn rewrite_labelled(&self, stmt: &Arc<LabelledStmt>, data: &mut D) -> Stmt {
        walk_labelled(self, stmt, data)
    }

    fn rewrite_function_stmt(&self, stmt: &Arc<FunctionStmt>, data: &mut D) -> Stmt {
        walk_function_stmt(self, stmt, data)
    }

    fn rewrite_goto(&self, stmt: &Arc<GotoStmt>, _data: &mut D) -> Stmt {
        Stmt::Goto(Arc::clone(stmt))
    }

    fn rewrite_yield(&self, stmt: &Arc<YieldStmt>, data: &mut D) -> Stmt {
        walk_yield(self, stmt, data)
    }
}

// Every rewriter is a visitor producing nodes; `accept` routes back into the
// matching `rewrite_*` method.

impl<D, R> ExprVisitor<D> for R
where
    D: ?Sized,
    R: Rewriter<D> + ?Sized,
{
    type Output = Expr;

    fn visit_array_literal(&self, expr: &Arc<ArrayLiteralExpr>, data: &mut D) -> Expr {
        self.rewrite_array_literal(expr, data)
    }
    fn visit_binary(&self, expr: &Arc<BinaryExpr>, data: &mut D) -> Expr {
        self.rewrite_binary(expr, data)
    }
    fn visit_comma(&self, expr: &Arc<CommaExpr>, data: &mut D) -> Expr {
        self.rewrite_comma(expr, data)
    }
    fn visit_conditional(&self, expr: &Arc<ConditionalExpr>, data: &mut D) -> Expr {
        self.rewrite_conditional(expr, data)
    }
    fn visit_constant(&self, expr: &Arc<ConstantExpr>, data: &mut D) -> Expr {
        self.rewrite_constant(expr, data)
    }
    fn visit_function(&self, expr: &Arc<FunctionExpr>, data: &mut D) -> Expr {
        self.rewrite_function(expr, data)
    }
    fn visit_identifier(&self, expr: &Arc<IdentifierExpr>, data: &mut D) -> Expr {
        self.rewrite_identifier(expr, data)
    }
    fn visit_invocation(&self, expr: &Arc<InvocationExpr>, data: &mut D) -> Expr {
        self.rewrite_invocation(expr, data)
    }
    fn visit_object_literal(&self, expr: &Arc<ObjectLiteralExpr>, data: &mut D) -> Expr {
        self.rewrite_object_literal(expr, data)
    }
    fn visit_member_access(&self, expr: &Arc<MemberAccessExpr>, data: &mut D) -> Expr {
        self.rewrite_member_access(expr, data)
    }
    fn visit_new(&self, expr: &Arc<NewExpr>, data: &mut D) -> Expr {
        self.rewrite_new(expr, data)
    }
    fn visit_unary(&self, expr: &Arc<UnaryExpr>, data: &mut D) -> Expr {
        self.rewrite_unary(expr, data)
    }
    fn visit_type_reference(&self, expr: &Arc<TypeReferenceExpr>, data: &mut D) -> Expr {
        self.rewrite_type_reference(expr, data)
    }
    fn visit_this(&self, expr: &Arc<ThisExpr>, data: &mut D) -> Expr {
        self.rewrite_this(expr, data)
    }
    fn visit_literal(&self, expr: &Arc<LiteralExpr>, data: &mut D) -> Expr {
        self.rewrite_literal(expr, data)
    }
}

impl<D, R> StmtVisitor<D> for R
where
    D: ?Sized,
    R: Rewriter<D> + ?Sized,
{
    type Output = Stmt;

    fn visit_block(&self, stmt: &Arc<BlockStmt>, data: &mut D) -> Stmt {
        Stmt::Block(self.rewrite_block(stmt, data))
    }
    fn visit_break(&self, stmt: &Arc<BreakStmt>, data: &mut D) -> Stmt {
        self.rewrite_break(stmt, data)
    }
    fn visit_continue(&self, stmt: &Arc<ContinueStmt>, data: &mut D) -> Stmt {
        self.rewrite_continue(stmt, data)
    }
    fn visit_comment(&self, stmt: &Arc<CommentStmt>, data: &mut D) -> Stmt {
        self.rewrite_comment(stmt, data)
    }
    fn visit_do_while(&self, stmt: &Arc<DoWhileStmt>, data: &mut D) -> Stmt {
        self.rewrite_do_while(stmt, data)
    }
    fn visit_empty(&self, stmt: &Arc<EmptyStmt>, data: &mut D) -> Stmt {
        self.rewrite_empty(stmt, data)
    }
    fn visit_expression(&self, stmt: &Arc<ExpressionStmt>, data: &mut D) -> Stmt {
        self.rewrite_expression_stmt(stmt, data)
    }
    fn visit_for_each_in(&self, stmt: &Arc<ForEachInStmt>, data: &mut D) -> Stmt {
        self.rewrite_for_each_in(stmt, data)
    }
    fn visit_for(&self, stmt: &Arc<ForStmt>, data: &mut D) -> Stmt {
        self.rewrite_for(stmt, data)
    }
    fn visit_if(&self, stmt: &Arc<IfStmt>, data: &mut D) -> Stmt {
        self.rewrite_if(stmt, data)
    }
    fn visit_return(&self, stmt: &Arc<ReturnStmt>, data: &mut D) -> Stmt {
        self.rewrite_return(stmt, data)
    }
    fn visit_switch(&self, stmt: &Arc<SwitchStmt>, data: &mut D) -> Stmt {
        self.rewrite_switch(stmt, data)
    }
    fn visit_throw(&self, stmt: &Arc<ThrowStmt>, data: &mut D) -> Stmt {
        self.rewrite_throw(stmt, data)
    }
    fn visit_try(&self, stmt: &Arc<TryStmt>, data: &mut D) -> Stmt {
        self.rewrite_try(stmt, data)
    }
    fn visit_variable_declaration(&self, stmt: &Arc<VariableDeclarationStmt>, data: &mut D) -> Stmt {
        self.rewrite_variable_declaration_stmt(stmt, data)
    }
    fn visit_while(&self, stmt: &Arc<WhileStmt>, data: &mut D) -> Stmt {
        self.rewrite_while(stmt, data)
    }
    fn visit_with(&self, stmt: &Arc<WithStmt>, data: &mut D) -> Stmt {
        self.rewrite_with(stmt, data)
    }
    fn visit_labelled(&self, stmt: &Arc<LabelledStmt>, data: &mut D) -> Stmt {
        self.rewrite_labelled(stmt, data)
    }
    fn visit_function(&self, stmt: &Arc<FunctionStmt>, data: &mut D) -> Stmt {
        self.rewrite_function_stmt(stmt, data)
    }
    fn visit_goto(&self, stmt: &Arc<GotoStmt>, data: &mut D) -> Stmt {
        self.rewrite_goto(stmt, data)
    }
    fn visit_yield(&self, stmt: &Arc<YieldStmt>, data: &mut D) -> Stmt {
        self.rewrite_yield(stmt, data)
    }
}

// ============================================================================
// Default traversal
// ============================================================================

pub fn walk_object_property<R, D>(
    rewriter: &R,
    property: &Arc<ObjectProperty>,
    data: &mut D,
) -> Arc<ObjectProperty>
where
    R: Rewriter<D> + ?Sized,
    D: ?Sized,
{
    let value = rewriter.rewrite_expression(property.value(), data);
    if value.same(property.value()) {
        Arc::clone(property)
    } else {
        ObjectProperty::new(property.name(), value)
    }
}

pub fn walk_variable_declaration<R, D>(
    rewriter: &R,
    declaration: &Arc<VariableDeclaration>,
    data: &mut D,
) -> Arc<VariableDeclaration>
where
    R: Rewriter<D> + ?Sized,
    D: ?Sized,
{
    let initializer = rewrite_opt(declaration.initializer(), |e| rewriter.rewrite_expression(e, data));
    if same_opt(declaration.initializer(), initializer.as_ref()) {
        Arc::clone(declaration)
    } else {
        VariableDeclaration::new(declaration.name(), initializer)
    }
}

pub fn walk_switch_section<R, D>(
    rewriter: &R,
    section: &Arc<SwitchSection>,
    data: &mut D,
) -> Arc<SwitchSection>
where
    R: Rewriter<D> + ?Sized,
    D: ?Sized,
{
    let labels = rewrite_list(section.labels(), |l| rewriter.rewrite_case_label(l, data));
    let body = rewriter.rewrite_block(section.body(), data);
    if labels.same(section.labels()) && body.same(section.body()) {
        Arc::clone(section)
    } else {
        SwitchSection::new(labels, body)
    }
}

pub fn walk_catch_clause<R, D>(
    rewriter: &R,
    clause: &Arc<CatchClause>,
    data: &mut D,
) -> Arc<CatchClause>
where
    R: Rewriter<D> + ?Sized,
    D: ?Sized,
{
    let body = rewriter.rewrite_block(clause.body(), data);
    if body.same(clause.body()) {
        Arc::clone(clause)
    } else {
        CatchClause::new(clause.identifier(), body)
    }
}

pub fn walk_block<R, D>(rewriter: &R, block: &Arc<BlockStmt>, data: &mut D) -> Arc<BlockStmt>
where
    R: Rewriter<D> + ?Sized,
    D: ?Sized,
{
    let statements = rewriter.rewrite_statements(block.statements(), data);
    if statements.same(block.statements()) {
        Arc::clone(block)
    } else {
        BlockStmt::new(statements)
    }
}

pub fn walk_array_literal<R, D>(rewriter: &R, expr: &Arc<ArrayLiteralExpr>, data: &mut D) -> Expr
where
    R: Rewriter<D> + ?Sized,
    D: ?Sized,
{
    let elements = rewriter.rewrite_expressions(expr.elements(), data);
    if elements.same(expr.elements()) {
        Expr::ArrayLiteral(Arc::clone(expr))
    } else {
        Expr::array_literal(elements)
    }
}

pub fn walk_binary<R, D>(rewriter: &R, expr: &Arc<BinaryExpr>, data: &mut D) -> Expr
where
    R: Rewriter<D> + ?Sized,
    D: ?Sized,
{
    let left = rewriter.rewrite_expression(expr.left(), data);
    let right = rewriter.rewrite_expression(expr.right(), data);
    if left.same(expr.left()) && right.same(expr.right()) {
        Expr::Binary(Arc::clone(expr))
    } else {
        Expr::binary(expr.op(), left, right)
    }
}

pub fn walk_comma<R, D>(rewriter: &R, expr: &Arc<CommaExpr>, data: &mut D) -> Expr
where
    R: Rewriter<D> + ?Sized,
    D: ?Sized,
{
    let expressions = rewriter.rewrite_expressions(expr.expressions(), data);
    if expressions.same(expr.expressions()) {
        Expr::Comma(Arc::clone(expr))
    } else {
        Expr::comma(expressions)
    }
}

pub fn walk_conditional<R, D>(rewriter: &R, expr: &Arc<ConditionalExpr>, data: &mut D) -> Expr
where
    R: Rewriter<D> + ?Sized,
    D: ?Sized,
{
    let test = rewriter.rewrite_expression(expr.test(), data);
    let true_part = rewriter.rewrite_expression(expr.true_part(), data);
    let false_part = rewriter.rewrite_expression(expr.false_part(), data);
    if test.same(expr.test())
        && true_part.same(expr.true_part())
        && false_part.same(expr.false_part())
    {
        Expr::Conditional(Arc::clone(expr))
    } else {
        Expr::conditional(test, true_part, false_part)
    }
}

pub fn walk_function<R, D>(rewriter: &R, expr: &Arc<FunctionExpr>, data: &mut D) -> Expr
where
    R: Rewriter<D> + ?Sized,
    D: ?Sized,
{
    let body = rewriter.rewrite_block(expr.body(), data);
    if body.same(expr.body()) {
        Expr::Function(Arc::clone(expr))
    } else {
        Expr::function(expr.params().to_vec(), body, expr.name().map(str::to_string))
    }
}

pub fn walk_invocation<R, D>(rewriter: &R, expr: &Arc<InvocationExpr>, data: &mut D) -> Expr
where
    R: Rewriter<D> + ?Sized,
    D: ?Sized,
{
    let method = rewriter.rewrite_expression(expr.method(), data);
    let arguments = rewriter.rewrite_expressions(expr.arguments(), data);
    if method.same(expr.method()) && arguments.same(expr.arguments()) {
        Expr::Invocation(Arc::clone(expr))
    } else {
        Expr::invocation(method, arguments)
    }
}

pub fn walk_object_literal<R, D>(rewriter: &R, expr: &Arc<ObjectLiteralExpr>, data: &mut D) -> Expr
where
    R: Rewriter<D> + ?Sized,
    D: ?Sized,
{
    let properties = rewriter.rewrite_object_properties(expr.properties(), data);
    if properties.same(expr.properties()) {
        Expr::ObjectLiteral(Arc::clone(expr))
    } else {
        Expr::object_literal(properties)
    }
}

pub fn walk_member_access<R, D>(rewriter: &R, expr: &Arc<MemberAccessExpr>, data: &mut D) -> Expr
where
    R: Rewriter<D> + ?Sized,
    D: ?Sized,
{
    let target = rewriter.rewrite_expression(expr.target(), data);
    if target.same(expr.target()) {
        Expr::MemberAccess(Arc::clone(expr))
    } else {
        Expr::member(target, expr.member())
    }
}

pub fn walk_new<R, D>(rewriter: &R, expr: &Arc<NewExpr>, data: &mut D) -> Expr
where
    R: Rewriter<D> + ?Sized,
    D: ?Sized,
{
    let constructor = rewriter.rewrite_expression(expr.constructor(), data);
    let arguments = rewriter.rewrite_expressions(expr.arguments(), data);
    if constructor.same(expr.constructor()) && arguments.same(expr.arguments()) {
        Expr::New(Arc::clone(expr))
    } else {
        Expr::construct(constructor, arguments)
    }
}

pub fn walk_unary<R, D>(rewriter: &R, expr: &Arc<UnaryExpr>, data: &mut D) -> Expr
where
    R: Rewriter<D> + ?Sized,
    D: ?Sized,
{
    let operand = rewriter.rewrite_expression(expr.operand(), data);
    if operand.same(expr.operand()) {
        Expr::Unary(Arc::clone(expr))
    } else {
        Expr::unary(expr.op(), operand)
    }
}

pub fn walk_literal<R, D>(rewriter: &R, expr: &Arc<LiteralExpr>, data: &mut D) -> Expr
where
    R: Rewriter<D> + ?Sized,
    D: ?Sized,
{
    let arguments = rewriter.rewrite_expressions(expr.arguments(), data);
    if arguments.same(expr.arguments()) {
        Expr::Literal(Arc::clone(expr))
    } else {
        Expr::literal(expr.format(), arguments)
    }
}

pub fn walk_do_while<R, D>(rewriter: &R, stmt: &Arc<DoWhileStmt>, data: &mut D) -> Stmt
where
    R: Rewriter<D> + ?Sized,
    D: ?Sized,
{
    let condition = rewriter.rewrite_expression(stmt.condition(), data);
    let body = rewriter.rewrite_block(stmt.body(), data);
    if condition.same(stmt.condition()) && body.same(stmt.body()) {
        Stmt::DoWhile(Arc::clone(stmt))
    } else {
        Stmt::do_while(condition, body)
    }
}

pub fn walk_expression_stmt<R, D>(rewriter: &R, stmt: &Arc<ExpressionStmt>, data: &mut D) -> Stmt
where
    R: Rewriter<D> + ?Sized,
    D: ?Sized,
{
    let expression = rewriter.rewrite_expression(stmt.expression(), data);
    if expression.same(stmt.expression()) {
        Stmt::Expression(Arc::clone(stmt))
    } else {
        Stmt::expression(expression)
    }
}

pub fn walk_for_each_in<R, D>(rewriter: &R, stmt: &Arc<ForEachInStmt>, data: &mut D) -> Stmt
where
    R: Rewriter<D> + ?Sized,
    D: ?Sized,
{
    let object = rewriter.rewrite_expression(stmt.object(), data);
    let body = rewriter.rewrite_statement(stmt.body(), data);
    if object.same(stmt.object()) && body.same(stmt.body()) {
        Stmt::ForEachIn(Arc::clone(stmt))
    } else {
        Stmt::for_each_in(stmt.variable(), object, body, stmt.declares_variable())
    }
}

pub fn walk_for<R, D>(rewriter: &R, stmt: &Arc<ForStmt>, data: &mut D) -> Stmt
where
    R: Rewriter<D> + ?Sized,
    D: ?Sized,
{
    let init = rewrite_opt(stmt.init(), |s| rewriter.rewrite_statement(s, data));
    let condition = rewrite_opt(stmt.condition(), |e| rewriter.rewrite_expression(e, data));
    let iterator = rewrite_opt(stmt.iterator(), |e| rewriter.rewrite_expression(e, data));
    let body = rewriter.rewrite_block(stmt.body(), data);
    if same_opt(stmt.init(), init.as_ref())
        && same_opt(stmt.condition(), condition.as_ref())
        && same_opt(stmt.iterator(), iterator.as_ref())
        && body.same(stmt.body())
    {
        Stmt::For(Arc::clone(stmt))
    } else {
        Stmt::for_loop(init, condition, iterator, body)
    }
}

pub fn walk_if<R, D>(rewriter: &R, stmt: &Arc<IfStmt>, data: &mut D) -> Stmt
where
    R: Rewriter<D> + ?Sized,
    D: ?Sized,
{
    let test = rewriter.rewrite_expression(stmt.test(), data);
    let then_branch = rewriter.rewrite_block(stmt.then_branch(), data);
    let else_branch = rewrite_opt(stmt.else_branch(), |b| rewriter.rewrite_block(b, data));
    if test.same(stmt.test())
        && then_branch.same(stmt.then_branch())
        && same_opt(stmt.else_branch(), else_branch.as_ref())
    {
        Stmt::If(Arc::clone(stmt))
    } else {
        Stmt::if_else(test, then_branch, else_branch)
    }
}

pub fn walk_return<R, D>(rewriter: &R, stmt: &Arc<ReturnStmt>, data: &mut D) -> Stmt
where
    R: Rewriter<D> + ?Sized,
    D: ?Sized,
{
    let value = rewrite_opt(stmt.value(), |e| rewriter.rewrite_expression(e, data));
    if same_opt(stmt.value(), value.as_ref()) {
        Stmt::Return(Arc::clone(stmt))
    } else {
        Stmt::return_(value)
    }
}

pub fn walk_switch<R, D>(rewriter: &R, stmt: &Arc<SwitchStmt>, data: &mut D) -> Stmt
where
    R: Rewriter<D> + ?Sized,
    D: ?Sized,
{
    let discriminant = rewriter.rewrite_expression(stmt.discriminant(), data);
    let sections = rewriter.rewrite_switch_sections(stmt.sections(), data);
    if discriminant.same(stmt.discriminant()) && sections.same(stmt.sections()) {
        Stmt::Switch(Arc::clone(stmt))
    } else {
        Stmt::switch(discriminant, sections)
    }
}

pub fn walk_throw<R, D>(rewriter: &R, stmt: &Arc<ThrowStmt>, data: &mut D) -> Stmt
where
    R: Rewriter<D> + ?Sized,
    D: ?Sized,
{
    let expression = rewriter.rewrite_expression(stmt.expression(), data);
    if expression.same(stmt.expression()) {
        Stmt::Throw(Arc::clone(stmt))
    } else {
        Stmt::throw(expression)
    }
}

pub fn walk_try<R, D>(rewriter: &R, stmt: &Arc<TryStmt>, data: &mut D) -> Stmt
where
    R: Rewriter<D> + ?Sized,
    D: ?Sized,
{
    let guarded = rewriter.rewrite_block(stmt.guarded(), data);
    let catch = rewrite_opt(stmt.catch(), |c| rewriter.rewrite_catch_clause(c, data));
    let finally = rewrite_opt(stmt.finally(), |b| rewriter.rewrite_block(b, data));
    if guarded.same(stmt.guarded())
        && same_opt(stmt.catch(), catch.as_ref())
        && same_opt(stmt.finally(), finally.as_ref())
    {
        Stmt::Try(Arc::clone(stmt))
    } else {
        Stmt::try_catch(guarded, catch, finally)
    }
}

pub fn walk_variable_declaration_stmt<R, D>(
    rewriter: &R,
    stmt: &Arc<VariableDeclarationStmt>,
    data: &mut D,
) -> Stmt
where
    R: Rewriter<D> + ?Sized,
    D: ?Sized,
{
    let declarations = rewriter.rewrite_variable_declarations(stmt.declarations(), data);
    if declarations.same(stmt.declarations()) {
        Stmt::VariableDeclaration(Arc::clone(stmt))
    } else {
        Stmt::var_decl(declarations)
    }
}

pub fn walk_while<R, D>(rewriter: &R, stmt: &Arc<WhileStmt>, data: &mut D) -> Stmt
where
    R: Rewriter<D> + ?Sized,
    D: ?Sized,
{
    let condition = rewriter.rewrite_expression(stmt.condition(), data);
    let body = rewriter.rewrite_block(stmt.body(), data);
    if condition.same(stmt.condition()) && body.same(stmt.body()) {
        Stmt::While(Arc::clone(stmt))
    } else {
        Stmt::while_loop(condition, body)
    }
}

pub fn walk_with<R, D>(rewriter: &R, stmt: &Arc<WithStmt>, data: &mut D) -> Stmt
where
    R: Rewriter<D> + ?Sized,
    D: ?Sized,
{
    let object = rewriter.rewrite_expression(stmt.object(), data);
    let body = rewriter.rewrite_statement(stmt.body(), data);
    if object.same(stmt.object()) && body.same(stmt.body()) {
        Stmt::With(Arc::clone(stmt))
    } else {
        Stmt::with(object, body)
    }
}

pub fn walk_labelled<R, D>(rewriter: &R, stmt: &Arc<LabelledStmt>, data: &mut D) -> Stmt
where
    R: Rewriter<D> + ?Sized,
    D: ?Sized,
{
    let statement = rewriter.rewrite_statement(stmt.statement(), data);
    if statement.same(stmt.statement()) {
        Stmt::Labelled(Arc::clone(stmt))
    } else {
        Stmt::labelled(stmt.label(), statement)
    }
}

pub fn walk_function_stmt<R, D>(rewriter: &R, stmt: &Arc<FunctionStmt>, data: &mut D) -> Stmt
where
    R: Rewriter<D> + ?Sized,
    D: ?Sized,
{
    let body = rewriter.rewrite_block(stmt.body(), data);
    if body.same(stmt.body()) {
        Stmt::Function(Arc::clone(stmt))
    } else {
        Stmt::function(stmt.name(), stmt.params().to_vec(), body)
    }
}

pub fn walk_yield<R, D>(rewriter: &R, stmt: &Arc<YieldStmt>, data: &mut D) -> Stmt
where
    R: Rewriter<D> + ?Sized,
    D: ?Sized,
{
    let value = rewrite_opt(stmt.value(), |e| rewriter.rewrite_expression(e, data));
    if same_opt(stmt.value(), value.as_ref()) {
        Stmt::Yield(Arc::clone(stmt))
    } else {
        Stmt::yield_(value)
    }
}
