//! Output AST for scriptc
//!
//! The output AST is the immutable JavaScript-shaped tree that lowering
//! produces and every later pass rewrites. Subtrees are shared behind `Arc`s,
//! and the [`Rewriter`] base keeps every untouched subtree shared when a pass
//! rebuilds the tree.

pub mod ir;
pub mod rewrite;
pub mod visit;

pub use ir::*;
pub use rewrite::{rewrite_list, Rewriter};
pub use visit::{ExprVisitor, StmtVisitor};
