//! Cartrule predicate grammar, parser, and expression tree.
//!
//! Discount rules carry small boolean eligibility predicates such as
//! `quantity = 1 and attributes.mode = "verified"`. This crate turns a
//! predicate string into a canonical expression tree; `cartrule-eval`
//! walks that tree against a line-item context.
//!
//! Parsing is pure and the tree is the cacheable artifact: parse a
//! predicate once and reuse the `Expr` across many evaluations.

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;

pub use ast::{CompareOp, Expr, FieldPath, Literal, Operand};
pub use error::SyntaxError;
pub use parser::parse;
