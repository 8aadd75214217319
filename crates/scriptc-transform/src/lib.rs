//! Rewrite passes over the scriptc output AST
//!
//! Every pass here is a [`scriptc_ast::Rewriter`] that overrides only the node
//! kinds it cares about:
//! - Identifier renaming
//! - Constant folding
//! - Inline-code template validation and collapse
//!
//! [`Pipeline`] runs a configured sequence of them.

pub mod config;
pub mod error;
pub mod fold;
pub mod inline_code;
pub mod pipeline;
pub mod rename;

pub use config::PipelineConfig;
pub use error::TransformError;
pub use fold::{fold_constants, ConstantFolder, FoldStats};
pub use inline_code::{collapse_templates, parse_template, TemplateCollapser, TemplateReport};
pub use pipeline::{Pass, Pipeline, PipelineOutput};
pub use rename::{rename_identifiers, RenameTable, Renamer};
