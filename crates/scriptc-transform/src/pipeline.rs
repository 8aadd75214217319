//! Pass pipeline
//!
//! Runs a configured list of passes over a program (a top-level statement
//! list). Passes see each other's output in order. When `max_iterations` is
//! above one, the whole list is repeated until an iteration hands back the
//! identical program.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use scriptc_ast::{NodeList, SameNode, Stmt};

use crate::config::PipelineConfig;
use crate::error::{Result, TransformError};
use crate::fold::{fold_constants, FoldStats};
use crate::inline_code::{collapse_templates, TemplateReport};
use crate::rename::{rename_identifiers, RenameTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    Rename,
    Fold,
    InlineCode,
}

impl FromStr for Pass {
    type Err = TransformError;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            "rename" => Ok(Pass::Rename),
            "fold" => Ok(Pass::Fold),
            "inline-code" => Ok(Pass::InlineCode),
            other => Err(TransformError::UnknownPass(other.to_string())),
        }
    }
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Pass::Rename => "rename",
            Pass::Fold => "fold",
            Pass::InlineCode => "inline-code",
        })
    }
}

/// What a pipeline run produced
#[derive(Debug)]
pub struct PipelineOutput {
    pub program: NodeList<Stmt>,
    /// Iterations actually run
    pub iterations: usize,
    /// Whether the last iteration handed back the program it was given
    pub converged: bool,
    pub renamed: usize,
    pub folded: usize,
    pub collapsed: usize,
}

impl PipelineOutput {
    /// Whether any pass rebuilt the program
    pub fn changed(&self, original: &NodeList<Stmt>) -> bool {
        !self.program.same(original)
    }
}

#[derive(Debug)]
pub struct Pipeline {
    passes: Vec<Pass>,
    renames: HashMap<String, String>,
    max_iterations: usize,
}

impl Pipeline {
    pub fn from_config(config: &PipelineConfig) -> Result<Self> {
        if config.max_iterations == 0 {
            return Err(TransformError::NoIterations);
        }
        let passes = config
            .passes
            .iter()
            .map(|name| name.parse())
            .collect::<Result<Vec<Pass>>>()?;
        Ok(Self {
            passes,
            renames: config.rename.clone(),
            max_iterations: config.max_iterations,
        })
    }

    pub fn passes(&self) -> &[Pass] {
        &self.passes
    }

    /// Run every pass over `program`.
    ///
    /// Fails on the first pass that reports template errors; the remaining
    /// errors of that pass are logged.
    pub fn run(&self, program: &NodeList<Stmt>) -> Result<PipelineOutput> {
        let mut current = program.clone();
        let mut renames = RenameTable::new(self.renames.clone());
        let mut fold_stats = FoldStats::default();
        let mut templates = TemplateReport::default();
        let mut iterations = 0;
        let mut converged = false;

        while iterations < self.max_iterations {
            iterations += 1;
            let start = current.clone();

            for pass in &self.passes {
                let before = current.clone();
                current = match pass {
                    Pass::Rename => rename_identifiers(&current, &mut renames),
                    Pass::Fold => fold_constants(&current, &mut fold_stats),
                    Pass::InlineCode => collapse_templates(&current, &mut templates),
                };
                log::debug!(
                    "iteration {} pass {}: {}",
                    iterations,
                    pass,
                    if current.same(&before) { "unchanged" } else { "changed" }
                );

                if !templates.errors.is_empty() {
                    let mut errors = std::mem::take(&mut templates.errors).into_iter();
                    let first = errors.next();
                    for extra in errors {
                        log::warn!("{}", extra);
                    }
                    if let Some(first) = first {
                        return Err(first);
                    }
                }
            }

            if current.same(&start) {
                converged = true;
                break;
            }
        }

        if !converged && self.max_iterations > 1 {
            log::warn!(
                "pipeline stopped after {} iterations without reaching a fixpoint",
                iterations
            );
        }

        Ok(PipelineOutput {
            program: current,
            iterations,
            converged,
            renamed: renames.renamed(),
            folded: fold_stats.folded,
            collapsed: templates.collapsed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scriptc_ast::{BinaryOp, BlockStmt, Constant, Expr, VariableDeclaration};

    fn config(source: &str) -> PipelineConfig {
        PipelineConfig::from_toml_str(source).unwrap()
    }

    #[test]
    fn test_unknown_pass_rejected() {
        let err = Pipeline::from_config(&config(r#"passes = ["rename", "mangle"]"#)).unwrap_err();
        assert!(matches!(err, TransformError::UnknownPass(ref name) if name == "mangle"));
    }

    #[test]
    fn test_pass_names_round_trip() {
        for pass in [Pass::Rename, Pass::Fold, Pass::InlineCode] {
            assert_eq!(pass.to_string().parse::<Pass>().unwrap(), pass);
        }
    }

    #[test]
    fn test_passes_run_in_order() {
        // var a = <"{0}" wrapping 2 + 1>: the template collapses, folding then
        // sees the bare sum, and renaming runs last.
        let program: NodeList<Stmt> = vec![Stmt::var_decl(vec![VariableDeclaration::new(
            "a",
            Some(Expr::literal(
                "{0}",
                vec![Expr::binary(BinaryOp::Add, Expr::number(2.0), Expr::number(1.0))],
            )),
        )])]
        .into();

        let pipeline = Pipeline::from_config(&config(
            r#"
            passes = ["inline-code", "fold", "rename"]
            [rename]
            a = "b"
            "#,
        ))
        .unwrap();
        let output = pipeline.run(&program).unwrap();

        assert!(output.changed(&program));
        assert_eq!(output.collapsed, 1);
        assert_eq!(output.folded, 1);
        assert_eq!(output.renamed, 1);

        let Stmt::VariableDeclaration(decls) = &output.program[0] else { panic!() };
        let decl = &decls.declarations()[0];
        assert_eq!(decl.name(), "b");
        assert_eq!(decl.initializer().and_then(Expr::as_constant), Some(&Constant::Number(3.0)));
    }

    #[test]
    fn test_fixpoint_stops_when_unchanged() {
        let program: NodeList<Stmt> = vec![Stmt::if_else(
            Expr::binary(BinaryOp::Lt, Expr::number(1.0), Expr::number(2.0)),
            BlockStmt::new(vec![Stmt::return_(None)]),
            None,
        )]
        .into();

        let pipeline = Pipeline::from_config(&config(
            r#"
            passes = ["fold"]
            max-iterations = 5
            "#,
        ))
        .unwrap();
        let output = pipeline.run(&program).unwrap();

        // first iteration folds, second sees nothing to do
        assert_eq!(output.iterations, 2);
        assert!(output.converged);
        assert_eq!(output.folded, 2);
        assert!(matches!(output.program[0], Stmt::Block(_)));
    }

    #[test]
    fn test_unchanged_program_is_shared() {
        let program: NodeList<Stmt> = vec![Stmt::expression(Expr::identifier("x"))].into();
        let pipeline = Pipeline::from_config(&PipelineConfig::default()).unwrap();
        let output = pipeline.run(&program).unwrap();
        assert!(!output.changed(&program));
        assert!(output.program.same(&program));
        assert_eq!(output.iterations, 1);
    }

    #[test]
    fn test_template_error_fails_run() {
        let program: NodeList<Stmt> = vec![
            Stmt::expression(Expr::literal("{3}", Vec::new())),
            Stmt::expression(Expr::literal("{", Vec::new())),
        ]
        .into();
        let pipeline = Pipeline::from_config(&PipelineConfig::default()).unwrap();
        let err = pipeline.run(&program).unwrap_err();
        assert!(matches!(err, TransformError::TemplateArgument { index: 3, available: 0, .. }));
    }

    #[test]
    fn test_iteration_limit_without_fixpoint() {
        // x -> y -> x never settles
        let program: NodeList<Stmt> = vec![Stmt::expression(Expr::identifier("x"))].into();
        let pipeline = Pipeline::from_config(&config(
            r#"
            passes = ["rename"]
            max-iterations = 3
            [rename]
            x = "y"
            y = "x"
            "#,
        ))
        .unwrap();
        let output = pipeline.run(&program).unwrap();
        assert_eq!(output.iterations, 3);
        assert!(!output.converged);
        assert_eq!(output.renamed, 3);
        let Stmt::Expression(stmt) = &output.program[0] else { panic!() };
        assert_eq!(stmt.expression().as_identifier(), Some("y"));
    }

    #[test]
    fn test_runs_do_not_share_rename_counts() {
        let program: NodeList<Stmt> = vec![Stmt::expression(Expr::identifier("x"))].into();
        let pipeline = Pipeline::from_config(&config(
            r#"
            passes = ["rename"]
            [rename]
            x = "y"
            "#,
        ))
        .unwrap();
        assert_eq!(pipeline.run(&program).unwrap().renamed, 1);
        assert_eq!(pipeline.run(&program).unwrap().renamed, 1);
    }
}
