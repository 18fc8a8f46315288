//! Runtime value types and evaluation errors for the cartrule evaluator.
//!
//! These types are distinct from the `cartrule-core` AST: the evaluator
//! resolves context paths to scalar runtime values and combines them into
//! a boolean verdict.

use cartrule_core::SyntaxError;
use std::fmt;

// ──────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────

/// Errors that can occur during evaluation.
///
/// Every variant is fatal for that call and never retried — pure
/// computation has no transient failure mode. Treating one of these as
/// "predicate does not match" would mask a misconfigured predicate or a
/// stale context shape; surface it instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// A context path segment does not exist.
    UnresolvedPath { path: String },
    /// A function name other than the implemented ones.
    UnknownFunction { name: String },
    /// A known function called with no arguments.
    MissingArgument { function: String },
    /// Type error during evaluation (non-boolean operand, mismatched
    /// ordering comparison, non-scalar context leaf).
    TypeError { message: String },
    /// The root evaluation produced a non-boolean value.
    NonBooleanResult { got: String },
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::UnresolvedPath { path } => {
                write!(f, "context path does not resolve: {}", path)
            }
            EvalError::UnknownFunction { name } => {
                write!(f, "unimplemented function: {}", name)
            }
            EvalError::MissingArgument { function } => {
                write!(f, "function '{}' called with no arguments", function)
            }
            EvalError::TypeError { message } => {
                write!(f, "type error: {}", message)
            }
            EvalError::NonBooleanResult { got } => {
                write!(f, "predicate evaluated to {}, expected a boolean", got)
            }
        }
    }
}

impl std::error::Error for EvalError {}

/// Top-level error for the parse-and-evaluate convenience API.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    Syntax(SyntaxError),
    Eval(EvalError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Syntax(e) => e.fmt(f),
            Error::Eval(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for Error {}

impl From<SyntaxError> for Error {
    fn from(e: SyntaxError) -> Self {
        Error::Syntax(e)
    }
}

impl From<EvalError> for Error {
    fn from(e: EvalError) -> Self {
        Error::Eval(e)
    }
}

// ──────────────────────────────────────────────
// Runtime values
// ──────────────────────────────────────────────

/// A scalar value resolved from the context or produced by a node.
/// Numbers compare with `f64` semantics; a resolved JSON `null` is `Null`
/// (present but undefined, e.g. `custom.bundleId`).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Num(f64),
    Text(String),
    Null,
}

impl Value {
    /// Returns a human-readable type name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "Bool",
            Value::Num(_) => "Num",
            Value::Text(_) => "Text",
            Value::Null => "Null",
        }
    }

    /// Extracts a boolean or returns a type error.
    pub fn as_bool(&self) -> Result<bool, EvalError> {
        match self {
            Value::Bool(b) => Ok(*b),
            other => Err(EvalError::TypeError {
                message: format!("expected Bool, got {}", other.type_name()),
            }),
        }
    }

    /// Converts a resolved context leaf to a runtime value. Arrays and
    /// objects are not comparable leaves.
    pub fn from_json(v: &serde_json::Value) -> Result<Value, EvalError> {
        match v {
            serde_json::Value::Null => Ok(Value::Null),
            serde_json::Value::Bool(b) => Ok(Value::Bool(*b)),
            serde_json::Value::Number(n) => {
                n.as_f64().map(Value::Num).ok_or_else(|| EvalError::TypeError {
                    message: format!("unrepresentable number: {}", n),
                })
            }
            serde_json::Value::String(s) => Ok(Value::Text(s.clone())),
            other => Err(EvalError::TypeError {
                message: format!("context value is not a scalar: {}", other),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_json_scalars() {
        assert_eq!(Value::from_json(&json!(null)).unwrap(), Value::Null);
        assert_eq!(Value::from_json(&json!(true)).unwrap(), Value::Bool(true));
        assert_eq!(Value::from_json(&json!(2)).unwrap(), Value::Num(2.0));
        assert_eq!(
            Value::from_json(&json!("x")).unwrap(),
            Value::Text("x".to_string())
        );
    }

    #[test]
    fn from_json_rejects_containers() {
        assert!(Value::from_json(&json!([1, 2])).is_err());
        assert!(Value::from_json(&json!({"a": 1})).is_err());
    }

    #[test]
    fn as_bool_rejects_non_bool() {
        let err = Value::Num(1.0).as_bool().unwrap_err();
        assert!(matches!(err, EvalError::TypeError { .. }));
    }

    #[test]
    fn error_display() {
        let e = EvalError::UnresolvedPath {
            path: "attributes.mode".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "context path does not resolve: attributes.mode"
        );
    }
}
