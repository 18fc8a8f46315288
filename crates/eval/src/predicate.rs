//! Predicate expression evaluator.
//!
//! Walks a parsed expression tree against a line-item context, producing a
//! boolean verdict or an `EvalError`. The context is an explicit parameter
//! on every recursive call — the engine holds no per-call state, so one
//! parsed predicate safely serves concurrent evaluations.
//!
//! `and` / `or` evaluate BOTH operands unconditionally. A failing
//! right-hand side (e.g. a missing attribute path) fails the whole
//! expression even when the left-hand side alone would decide it. This
//! eager evaluation is a compatibility-relevant semantic of the discount
//! configurations, not an optimization opportunity.

use std::cmp::Ordering;

use cartrule_core::{CompareOp, Expr, FieldPath, Literal, Operand};

use crate::types::{EvalError, Value};

/// Evaluation dialect flags.
///
/// The two hand-duplicated upstream engines differed only in literal
/// coercion; the delta is an explicit flag here instead of forked code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvalOptions {
    /// Coerce bare `true` / `false` literals in comparisons to 1 / 0,
    /// matching boolean-flag attributes stored as 0/1 in the context.
    /// Off by default.
    pub coerce_bool_literals: bool,
}

/// Evaluate one expression node.
///
/// Logical and membership nodes yield `Value::Bool`; a function call in
/// field position yields `Value::Num(0|1)` before its enclosing
/// comparison. The tracer reuses this walk node for node.
pub fn eval_expr(
    expr: &Expr,
    ctx: &serde_json::Value,
    opts: &EvalOptions,
) -> Result<Value, EvalError> {
    match expr {
        Expr::Compare { field, op, literal } => {
            let left = eval_operand(field, ctx, opts)?;
            let right = literal_value(literal, opts);
            compare(&left, *op, &right).map(Value::Bool)
        }

        Expr::And(l, r) => {
            // Both sides, in order, no short-circuit.
            let lv = eval_expr(l, ctx, opts)?.as_bool()?;
            let rv = eval_expr(r, ctx, opts)?.as_bool()?;
            Ok(Value::Bool(lv && rv))
        }

        Expr::Or(l, r) => {
            let lv = eval_expr(l, ctx, opts)?.as_bool()?;
            let rv = eval_expr(r, ctx, opts)?.as_bool()?;
            Ok(Value::Bool(lv || rv))
        }

        Expr::InList {
            field,
            items,
            negate,
        } => {
            let resolved = resolve_path(field, ctx)?;
            let found = items
                .iter()
                .any(|item| values_equal(&resolved, &literal_value(item, opts)));
            Ok(Value::Bool(found != *negate))
        }

        Expr::IsDefined { field, negate } => {
            // Resolution is not defensively wrapped: a missing segment is a
            // hard failure. The fixed context guarantees the paths this is
            // realistically used on (e.g. custom.bundleId) always exist,
            // even as null.
            let resolved = resolve_path(field, ctx)?;
            let defined = resolved != Value::Null;
            Ok(Value::Bool(defined != *negate))
        }
    }
}

/// Evaluate the root of a predicate; the result must be boolean.
pub fn evaluate_ast(
    expr: &Expr,
    ctx: &serde_json::Value,
    opts: &EvalOptions,
) -> Result<bool, EvalError> {
    match eval_expr(expr, ctx, opts)? {
        Value::Bool(b) => Ok(b),
        other => Err(EvalError::NonBooleanResult {
            got: other.type_name().to_string(),
        }),
    }
}

fn eval_operand(
    operand: &Operand,
    ctx: &serde_json::Value,
    opts: &EvalOptions,
) -> Result<Value, EvalError> {
    match operand {
        Operand::Path(path) => resolve_path(path, ctx),
        Operand::Call { name, args } => eval_call(name, args, ctx, opts),
    }
}

fn eval_call(
    name: &str,
    args: &[Expr],
    ctx: &serde_json::Value,
    opts: &EvalOptions,
) -> Result<Value, EvalError> {
    match name {
        // Both functions evaluate their argument over the single candidate
        // line item: 1 if it matches, else 0. Arguments beyond the first
        // are ignored, matching the reference behavior.
        "lineItemCount" | "lineItemExists" => {
            let arg = args.first().ok_or_else(|| EvalError::MissingArgument {
                function: name.to_string(),
            })?;
            let hit = eval_expr(arg, ctx, opts)?.as_bool()?;
            Ok(Value::Num(if hit { 1.0 } else { 0.0 }))
        }
        _ => Err(EvalError::UnknownFunction {
            name: name.to_string(),
        }),
    }
}

/// Walk a dotted path through the context. A missing key at any step —
/// including the last — is `UnresolvedPath`; a present key holding JSON
/// `null` resolves to `Value::Null`.
fn resolve_path(path: &FieldPath, ctx: &serde_json::Value) -> Result<Value, EvalError> {
    let mut cur = ctx;
    for seg in path.segments() {
        cur = match cur {
            serde_json::Value::Object(map) => map.get(seg.as_str()),
            _ => None,
        }
        .ok_or_else(|| EvalError::UnresolvedPath {
            path: path.dotted(),
        })?;
    }
    Value::from_json(cur)
}

fn literal_value(lit: &Literal, opts: &EvalOptions) -> Value {
    match lit {
        Literal::Str(s) => Value::Text(s.clone()),
        Literal::Num(n) => Value::Num(*n),
        Literal::Word(w) => {
            if opts.coerce_bool_literals {
                match w.as_str() {
                    "true" => return Value::Num(1.0),
                    "false" => return Value::Num(0.0),
                    _ => {}
                }
            }
            Value::Text(w.clone())
        }
    }
}

/// Equality across mismatched types is simply unequal, never an error.
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Num(x), Value::Num(y)) => x == y,
        (Value::Text(x), Value::Text(y)) => x == y,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Null, Value::Null) => true,
        _ => false,
    }
}

fn compare(left: &Value, op: CompareOp, right: &Value) -> Result<bool, EvalError> {
    match op {
        CompareOp::Eq => Ok(values_equal(left, right)),
        CompareOp::Neq => Ok(!values_equal(left, right)),
        _ => {
            let ordering = match (left, right) {
                (Value::Num(x), Value::Num(y)) => {
                    x.partial_cmp(y).ok_or_else(|| EvalError::TypeError {
                        message: "NaN in numeric comparison".to_string(),
                    })?
                }
                (Value::Text(x), Value::Text(y)) => x.cmp(y),
                _ => {
                    return Err(EvalError::TypeError {
                        message: format!(
                            "cannot order {} against {}",
                            left.type_name(),
                            right.type_name()
                        ),
                    });
                }
            };
            Ok(match op {
                CompareOp::Gt => ordering == Ordering::Greater,
                CompareOp::Lt => ordering == Ordering::Less,
                CompareOp::Gte => ordering != Ordering::Less,
                CompareOp::Lte => ordering != Ordering::Greater,
                CompareOp::Eq | CompareOp::Neq => unreachable!(),
            })
        }
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
