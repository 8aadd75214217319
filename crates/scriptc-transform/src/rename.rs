//! Identifier renaming pass
//!
//! Renames identifiers and the bindings that introduce them (variable
//! declarations, function names and parameters, catch variables, for-in
//! variables) according to a rename table. The table is the pass context, so
//! the same `Renamer` can run over several trees with different tables.

use std::collections::HashMap;
use std::sync::Arc;

use scriptc_ast::rewrite::{
    walk_catch_clause, walk_for_each_in, walk_function, walk_function_stmt,
    walk_variable_declaration,
};
use scriptc_ast::{
    CatchClause, Expr, ForEachInStmt, FunctionExpr, FunctionStmt, IdentifierExpr, NodeList,
    Rewriter, Stmt, VariableDeclaration,
};

/// Old name -> new name, plus a count of replacements made so far
#[derive(Debug, Default)]
pub struct RenameTable {
    names: HashMap<String, String>,
    renamed: usize,
}

impl RenameTable {
    pub fn new(names: HashMap<String, String>) -> Self {
        Self { names, renamed: 0 }
    }

    pub fn insert(&mut self, from: impl Into<String>, to: impl Into<String>) {
        self.names.insert(from.into(), to.into());
    }

    /// Number of identifiers and bindings replaced
    pub fn renamed(&self) -> usize {
        self.renamed
    }

    fn lookup(&mut self, name: &str) -> Option<String> {
        let new_name = self.names.get(name)?.clone();
        self.renamed += 1;
        log::trace!("rename {} -> {}", name, new_name);
        Some(new_name)
    }

    fn rename_params(&mut self, params: &[String]) -> Option<Vec<String>> {
        if !params.iter().any(|p| self.names.contains_key(p)) {
            return None;
        }
        Some(
            params
                .iter()
                .map(|p| self.lookup(p).unwrap_or_else(|| p.clone()))
                .collect(),
        )
    }
}

pub struct Renamer;

impl Rewriter<RenameTable> for Renamer {
    fn rewrite_identifier(&self, expr: &Arc<IdentifierExpr>, table: &mut RenameTable) -> Expr {
        match table.lookup(expr.name()) {
            Some(new_name) => Expr::identifier(new_name),
            None => Expr::Identifier(Arc::clone(expr)),
        }
    }

    fn rewrite_variable_declaration(
        &self,
        declaration: &Arc<VariableDeclaration>,
        table: &mut RenameTable,
    ) -> Arc<VariableDeclaration> {
        let walked = walk_variable_declaration(self, declaration, table);
        match table.lookup(walked.name()) {
            Some(new_name) => VariableDeclaration::new(new_name, walked.initializer().cloned()),
            None => walked,
        }
    }

    fn rewrite_catch_clause(
        &self,
        clause: &Arc<CatchClause>,
        table: &mut RenameTable,
    ) -> Arc<CatchClause> {
        let walked = walk_catch_clause(self, clause, table);
        match table.lookup(walked.identifier()) {
            Some(new_name) => CatchClause::new(new_name, Arc::clone(walked.body())),
            None => walked,
        }
    }

    fn rewrite_for_each_in(&self, stmt: &Arc<ForEachInStmt>, table: &mut RenameTable) -> Stmt {
        let walked = walk_for_each_in(self, stmt, table);
        let Some(new_name) = table.lookup(stmt.variable()) else {
            return walked;
        };
        let Stmt::ForEachIn(node) = &walked else {
            return walked;
        };
        Stmt::for_each_in(
            new_name,
            node.object().clone(),
            node.body().clone(),
            node.declares_variable(),
        )
    }

    fn rewrite_function(&self, expr: &Arc<FunctionExpr>, table: &mut RenameTable) -> Expr {
        let walked = walk_function(self, expr, table);
        let name = expr.name().and_then(|name| table.lookup(name));
        let params = table.rename_params(expr.params());
        if name.is_none() && params.is_none() {
            return walked;
        }
        let Expr::Function(node) = &walked else {
            return walked;
        };
        Expr::function(
            params.unwrap_or_else(|| node.params().to_vec()),
            Arc::clone(node.body()),
            name.or_else(|| node.name().map(str::to_string)),
        )
    }

    fn rewrite_function_stmt(&self, stmt: &Arc<FunctionStmt>, table: &mut RenameTable) -> Stmt {
        let walked = walk_function_stmt(self, stmt, table);
        let name = table.lookup(stmt.name());
        let params = table.rename_params(stmt.params());
        if name.is_none() && params.is_none() {
            return walked;
        }
        let Stmt::Function(node) = &walked else {
            return walked;
        };
        Stmt::function(
            name.unwrap_or_else(|| node.name().to_string()),
            params.unwrap_or_else(|| node.params().to_vec()),
            Arc::clone(node.body()),
        )
    }
}

/// Rename identifiers across a statement list, returning the rewritten list
pub fn rename_identifiers(program: &NodeList<Stmt>, table: &mut RenameTable) -> NodeList<Stmt> {
    Renamer.rewrite_statements(program, table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scriptc_ast::{BinaryOp, BlockStmt, Constant, SameNode};

    fn table(pairs: &[(&str, &str)]) -> RenameTable {
        let mut table = RenameTable::default();
        for (from, to) in pairs {
            table.insert(*from, *to);
        }
        table
    }

    #[test]
    fn test_rename_if_else_shares_untouched_branch() {
        // if (x) { return x + 1; } else { return 0; }
        let else_block = BlockStmt::new(vec![Stmt::return_(Some(Expr::number(0.0)))]);
        let program: NodeList<Stmt> = vec![Stmt::if_else(
            Expr::identifier("x"),
            BlockStmt::new(vec![Stmt::return_(Some(Expr::binary(
                BinaryOp::Add,
                Expr::identifier("x"),
                Expr::number(1.0),
            )))]),
            Some(else_block.clone()),
        )]
        .into();

        let mut names = table(&[("x", "y")]);
        let result = rename_identifiers(&program, &mut names);
        assert_eq!(names.renamed(), 2);

        let Stmt::If(node) = &result[0] else { panic!("expected if") };
        assert_eq!(node.test().as_identifier(), Some("y"));
        assert!(node.else_branch().is_some_and(|b| b.same(&else_block)));

        let Stmt::Return(ret) = &node.then_branch().statements()[0] else {
            panic!("expected return")
        };
        let Some(Expr::Binary(sum)) = ret.value() else { panic!("expected binary") };
        assert_eq!(sum.left().as_identifier(), Some("y"));
        assert_eq!(sum.right().as_constant(), Some(&Constant::Number(1.0)));
    }

    #[test]
    fn test_rename_bindings() {
        let program: NodeList<Stmt> = vec![
            Stmt::var_decl(vec![
                VariableDeclaration::new("x", Some(Expr::identifier("x"))),
                VariableDeclaration::new("z", None),
            ]),
            Stmt::function("f", vec!["x".into(), "w".into()], BlockStmt::new(Vec::new())),
            Stmt::try_catch(
                BlockStmt::new(Vec::new()),
                Some(CatchClause::new("x", BlockStmt::new(Vec::new()))),
                None,
            ),
            Stmt::for_each_in("x", Expr::identifier("o"), Stmt::empty(), true),
        ]
        .into();

        let mut names = table(&[("x", "y")]);
        let result = rename_identifiers(&program, &mut names);
        assert_eq!(names.renamed(), 5);

        let Stmt::VariableDeclaration(decls) = &result[0] else { panic!() };
        assert_eq!(decls.declarations()[0].name(), "y");
        assert_eq!(decls.declarations()[0].initializer().and_then(Expr::as_identifier), Some("y"));
        let Stmt::VariableDeclaration(orig) = &program[0] else { panic!() };
        assert!(decls.declarations()[1].same(&orig.declarations()[1]));

        let Stmt::Function(func) = &result[1] else { panic!() };
        assert_eq!(func.params(), ["y", "w"]);
        assert_eq!(func.name(), "f");

        let Stmt::Try(try_stmt) = &result[2] else { panic!() };
        assert_eq!(try_stmt.catch().map(|c| c.identifier()), Some("y"));

        let Stmt::ForEachIn(for_in) = &result[3] else { panic!() };
        assert_eq!(for_in.variable(), "y");
        assert!(for_in.declares_variable());
    }

    #[test]
    fn test_no_matches_shares_program() {
        let program: NodeList<Stmt> = vec![
            Stmt::expression(Expr::invocation(Expr::identifier("f"), vec![Expr::this()])),
            Stmt::function("g", vec!["a".into()], BlockStmt::new(vec![Stmt::return_(None)])),
        ]
        .into();
        let mut names = table(&[("x", "y")]);
        let result = rename_identifiers(&program, &mut names);
        assert!(result.same(&program));
        assert_eq!(names.renamed(), 0);
    }

    #[test]
    fn test_rename_function_name_with_call_site() {
        // function x() {} x(); var g = function x(x) {};
        let program: NodeList<Stmt> = vec![
            Stmt::function("x", Vec::new(), BlockStmt::new(Vec::new())),
            Stmt::expression(Expr::invocation(Expr::identifier("x"), Vec::new())),
            Stmt::var_decl(vec![VariableDeclaration::new(
                "g",
                Some(Expr::function(vec!["x".into()], BlockStmt::new(Vec::new()), Some("x".into()))),
            )]),
        ]
        .into();

        let mut names = table(&[("x", "y")]);
        let result = rename_identifiers(&program, &mut names);
        assert_eq!(names.renamed(), 4);

        let Stmt::Function(func) = &result[0] else { panic!() };
        assert_eq!(func.name(), "y");
        let Stmt::Expression(call) = &result[1] else { panic!() };
        let Expr::Invocation(call) = call.expression() else { panic!() };
        assert_eq!(call.method().as_identifier(), Some("y"));

        let Stmt::VariableDeclaration(decls) = &result[2] else { panic!() };
        let Some(Expr::Function(func)) = decls.declarations()[0].initializer() else { panic!() };
        assert_eq!(func.name(), Some("y"));
        assert_eq!(func.params(), ["y"]);
    }
}
