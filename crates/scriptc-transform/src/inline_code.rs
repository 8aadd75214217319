//! Inline-code template checks and collapse
//!
//! Runtime-library members can carry an inline-code template that lowering
//! expands into a templated literal: a format string whose `{0}`, `{1}`, ...
//! placeholders index into the literal's argument list. `{{` and `}}` stand
//! for literal braces.
//!
//! This pass validates every template against its arguments and collapses
//! templates that are nothing but one placeholder (`"{0}"`) into the argument
//! itself. Problems are collected in the pass context; the traversal itself
//! never fails.

use std::sync::Arc;

use scriptc_ast::rewrite::walk_literal;
use scriptc_ast::{Expr, LiteralExpr, NodeList, Rewriter, Stmt};

use crate::error::{Result, TransformError};

/// A piece of a parsed template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Argument(usize),
}

fn malformed(format: &str, offset: usize) -> TransformError {
    TransformError::MalformedTemplate {
        format: format.to_string(),
        offset,
    }
}

/// Split a template into text runs and argument placeholders
pub fn parse_template(format: &str) -> Result<Vec<Segment>> {
    let mut segments = Vec::new();
    let mut text = String::new();
    let mut chars = format.char_indices().peekable();

    while let Some((offset, c)) = chars.next() {
        match c {
            '{' if matches!(chars.peek(), Some((_, '{'))) => {
                chars.next();
                text.push('{');
            }
            '}' if matches!(chars.peek(), Some((_, '}'))) => {
                chars.next();
                text.push('}');
            }
            '{' => {
                let mut digits = String::new();
                loop {
                    match chars.next() {
                        Some((_, '}')) => break,
                        Some((_, d)) if d.is_ascii_digit() => digits.push(d),
                        _ => return Err(malformed(format, offset)),
                    }
                }
                let index = digits
                    .parse::<usize>()
                    .map_err(|_| malformed(format, offset))?;
                if !text.is_empty() {
                    segments.push(Segment::Text(std::mem::take(&mut text)));
                }
                segments.push(Segment::Argument(index));
            }
            '}' => return Err(malformed(format, offset)),
            c => text.push(c),
        }
    }

    if !text.is_empty() {
        segments.push(Segment::Text(text));
    }
    Ok(segments)
}

#[derive(Debug, Default)]
pub struct TemplateReport {
    pub collapsed: usize,
    pub errors: Vec<TransformError>,
}

pub struct TemplateCollapser;

impl Rewriter<TemplateReport> for TemplateCollapser {
    fn rewrite_literal(&self, expr: &Arc<LiteralExpr>, report: &mut TemplateReport) -> Expr {
        let walked = walk_literal(self, expr, report);
        let Expr::Literal(node) = &walked else {
            return walked;
        };

        let segments = match parse_template(node.format()) {
            Ok(segments) => segments,
            Err(err) => {
                log::warn!("{}", err);
                report.errors.push(err);
                return walked;
            }
        };

        let available = node.arguments().len();
        let mut valid = true;
        for segment in &segments {
            if let Segment::Argument(index) = *segment {
                if index >= available {
                    valid = false;
                    report.errors.push(TransformError::TemplateArgument {
                        format: node.format().to_string(),
                        index,
                        available,
                    });
                }
            }
        }
        if !valid {
            return walked;
        }

        match segments.as_slice() {
            [Segment::Argument(index)] => {
                log::trace!("collapse template `{}` to argument {}", node.format(), index);
                report.collapsed += 1;
                node.arguments()[*index].clone()
            }
            _ => walked,
        }
    }
}

/// Validate and collapse templated literals across a statement list
pub fn collapse_templates(program: &NodeList<Stmt>, report: &mut TemplateReport) -> NodeList<Stmt> {
    TemplateCollapser.rewrite_statements(program, report)
}
