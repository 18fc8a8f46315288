//! Cartrule predicate evaluator — consumes a parsed predicate plus a
//! line-item context, produces a boolean verdict deciding whether a cart
//! discount applies.
//!
//! The engine is synchronous, CPU-bound, and stateless across calls: the
//! context and options are explicit parameters everywhere, so a predicate
//! parsed once serves concurrent evaluations from multiple threads without
//! locking. It performs no I/O and persists nothing; collaborators supply
//! the predicate string and the context, and consume the verdict.

pub mod context;
pub mod predicate;
pub mod trace;
pub mod types;

pub use context::{build_context, Attribute, Product, Variant};
pub use predicate::{eval_expr, evaluate_ast, EvalOptions};
pub use trace::{eval_traced, TraceStyle};
pub use types::{Error, EvalError, Value};

/// Parse and evaluate a predicate in one call.
///
/// Convenience for single evaluations. For repeated evaluation of the
/// same predicate, parse once with `cartrule_core::parse` and call
/// `evaluate_ast` per context.
pub fn evaluate(
    predicate: &str,
    ctx: &serde_json::Value,
    opts: &EvalOptions,
) -> Result<bool, Error> {
    let expr = cartrule_core::parse(predicate)?;
    Ok(evaluate_ast(&expr, ctx, opts)?)
}

// ──────────────────────────────────────────────
// Integration tests
// ──────────────────────────────────────────────
