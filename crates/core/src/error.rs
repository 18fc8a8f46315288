use serde::{Deserialize, Serialize};
use std::fmt;

/// A predicate syntax error.
///
/// Always fatal for that predicate and never retried: a malformed predicate
/// is a configuration defect in the discount rule, not a transient
/// condition. The caller decides whether to skip, log, or surface the
/// misconfigured rule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SyntaxError {
    /// 1-based character column of the offending token. Predicates are
    /// single-line, so a column locates the error fully.
    pub col: u32,
    pub message: String,
}

impl SyntaxError {
    pub fn new(col: u32, message: impl Into<String>) -> Self {
        SyntaxError {
            col,
            message: message.into(),
        }
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "syntax error at column {}: {}", self.col, self.message)
    }
}

impl std::error::Error for SyntaxError {}
