//! Debug tracer — the evaluator's walk, annotated.
//!
//! Produces the same verdict as `predicate::eval_expr` plus a formatted
//! trace marking every sub-evaluation pass/fail. Leaf nodes delegate to
//! the evaluator wholesale and logical nodes mirror its two-operand eager
//! combination, so the tracer cannot drift from evaluation semantics. An
//! error aborts the trace exactly where evaluation would fail.

use cartrule_core::Expr;

use crate::predicate::{eval_expr, EvalOptions};
use crate::types::{EvalError, Value};

/// Trace rendering style (terminal ANSI colors, or plain markers for
/// piping and tests).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceStyle {
    Terminal,
    Plain,
}

impl TraceStyle {
    fn mark(&self, hit: bool) -> &'static str {
        match (self, hit) {
            (TraceStyle::Terminal, true) => "\x1b[32m[ok]\x1b[0m",
            (TraceStyle::Terminal, false) => "\x1b[31m[no]\x1b[0m",
            (TraceStyle::Plain, true) => "[T]",
            (TraceStyle::Plain, false) => "[F]",
        }
    }
}

/// Evaluate a predicate and return `(verdict, trace)`.
///
/// The trace lists the root first, sub-evaluations indented one level per
/// nesting depth, each line marked with its own outcome.
pub fn eval_traced(
    expr: &Expr,
    ctx: &serde_json::Value,
    opts: &EvalOptions,
    style: TraceStyle,
) -> Result<(bool, String), EvalError> {
    let mut out = String::new();
    let value = trace_node(expr, ctx, opts, style, 0, &mut out)?;
    let verdict = match value {
        Value::Bool(b) => b,
        other => {
            return Err(EvalError::NonBooleanResult {
                got: other.type_name().to_string(),
            });
        }
    };
    Ok((verdict, out))
}

fn trace_node(
    expr: &Expr,
    ctx: &serde_json::Value,
    opts: &EvalOptions,
    style: TraceStyle,
    depth: usize,
    out: &mut String,
) -> Result<Value, EvalError> {
    let mut children = String::new();
    let value = match expr {
        // Logical nodes mirror eval_expr: both sides, in order, eager.
        Expr::And(l, r) => {
            let lv = trace_node(l, ctx, opts, style, depth + 1, &mut children)?.as_bool()?;
            let rv = trace_node(r, ctx, opts, style, depth + 1, &mut children)?.as_bool()?;
            Value::Bool(lv && rv)
        }
        Expr::Or(l, r) => {
            let lv = trace_node(l, ctx, opts, style, depth + 1, &mut children)?.as_bool()?;
            let rv = trace_node(r, ctx, opts, style, depth + 1, &mut children)?.as_bool()?;
            Value::Bool(lv || rv)
        }
        // Leaves delegate to the evaluator wholesale.
        leaf => eval_expr(leaf, ctx, opts)?,
    };

    let hit = matches!(value, Value::Bool(true));
    for _ in 0..depth {
        out.push_str("    ");
    }
    out.push_str(style.mark(hit));
    out.push(' ');
    out.push_str(&expr.to_string());
    out.push('\n');
    out.push_str(&children);

    Ok(value)
}
