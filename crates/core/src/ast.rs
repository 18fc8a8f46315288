//! Canonical expression tree for cart-discount predicates.
//!
//! These types are produced by the parser and consumed by the evaluator.
//! They live here so that downstream crates can import them without
//! depending on parser internals.

use serde::Serialize;
use std::fmt::{self, Display};

// ──────────────────────────────────────────────
// Operators
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CompareOp {
    Eq,
    Neq,
    Gt,
    Lt,
    Gte,
    Lte,
}

impl CompareOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Neq => "!=",
            CompareOp::Gt => ">",
            CompareOp::Lt => "<",
            CompareOp::Gte => ">=",
            CompareOp::Lte => "<=",
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

// ──────────────────────────────────────────────
// Field paths
// ──────────────────────────────────────────────

/// A dotted context path. Backtick-quoted segments survive verbatim as a
/// single segment regardless of internal punctuation, so segments are kept
/// separate rather than pre-joined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldPath(pub Vec<String>);

impl FieldPath {
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// The `.`-joined form used in error messages and lookups.
    pub fn dotted(&self) -> String {
        self.0.join(".")
    }
}

fn bare_segment(seg: &str) -> bool {
    !seg.is_empty()
        && seg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, seg) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            if bare_segment(seg) {
                f.write_str(seg)?;
            } else {
                write!(f, "`{}`", seg)?;
            }
        }
        Ok(())
    }
}

// ──────────────────────────────────────────────
// Literals
// ──────────────────────────────────────────────

/// A value literal on the right-hand side of a comparison or in an `in`
/// list. Bare identifiers are kept verbatim — this is what lets unquoted
/// `true` / `false` flow through to comparison evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Literal {
    Str(String),
    Num(f64),
    Word(String),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Str(s) => write!(f, "\"{}\"", s),
            Literal::Num(n) => {
                if n.fract() == 0.0 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            Literal::Word(w) => f.write_str(w),
        }
    }
}

// ──────────────────────────────────────────────
// Expressions
// ──────────────────────────────────────────────

/// The left-hand side of a comparison: either a context path or a function
/// call whose arguments are full sub-expressions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Operand {
    Path(FieldPath),
    Call { name: String, args: Vec<Expr> },
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Path(p) => p.fmt(f),
            Operand::Call { name, args } => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    arg.fmt(f)?;
                }
                f.write_str(")")
            }
        }
    }
}

/// A predicate expression. `InList` items are literals only, never nested
/// field references — a deliberate grammar restriction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expr {
    Compare {
        field: Operand,
        op: CompareOp,
        literal: Literal,
    },
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
    InList {
        field: FieldPath,
        items: Vec<Literal>,
        negate: bool,
    },
    IsDefined {
        field: FieldPath,
        negate: bool,
    },
}

impl Expr {
    /// Parenthesize an `or` operand appearing under `and`, so the rendered
    /// text re-parses with the same shape.
    fn fmt_under_and(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if matches!(self, Expr::Or(_, _)) {
            write!(f, "({})", self)
        } else {
            self.fmt(f)
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Compare { field, op, literal } => {
                write!(f, "{} {} {}", field, op, literal)
            }
            Expr::And(l, r) => {
                l.fmt_under_and(f)?;
                f.write_str(" and ")?;
                r.fmt_under_and(f)
            }
            Expr::Or(l, r) => {
                write!(f, "{} or {}", l, r)
            }
            Expr::InList {
                field,
                items,
                negate,
            } => {
                write!(f, "{} ", field)?;
                if *negate {
                    f.write_str("not ")?;
                }
                f.write_str("in (")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    item.fmt(f)?;
                }
                f.write_str(")")
            }
            Expr::IsDefined { field, negate } => {
                write!(f, "{} is ", field)?;
                if *negate {
                    f.write_str("not ")?;
                }
                f.write_str("defined")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_field_path_requotes_punctuated_segments() {
        let p = FieldPath(vec!["attributes".to_string(), "course-key".to_string()]);
        assert_eq!(p.to_string(), "attributes.`course-key`");
        assert_eq!(p.dotted(), "attributes.course-key");
    }

    #[test]
    fn display_compare() {
        let e = Expr::Compare {
            field: Operand::Path(FieldPath(vec!["quantity".to_string()])),
            op: CompareOp::Eq,
            literal: Literal::Num(1.0),
        };
        assert_eq!(e.to_string(), "quantity = 1");
    }

    #[test]
    fn display_parenthesizes_or_under_and() {
        let cmp = |name: &str, n: f64| Expr::Compare {
            field: Operand::Path(FieldPath(vec![name.to_string()])),
            op: CompareOp::Eq,
            literal: Literal::Num(n),
        };
        let e = Expr::And(
            Box::new(cmp("a", 1.0)),
            Box::new(Expr::Or(Box::new(cmp("b", 2.0)), Box::new(cmp("c", 3.0)))),
        );
        assert_eq!(e.to_string(), "a = 1 and (b = 2 or c = 3)");
    }

    #[test]
    fn display_in_list() {
        let e = Expr::InList {
            field: FieldPath(vec!["attributes".to_string(), "mode".to_string()]),
            items: vec![
                Literal::Str("verified".to_string()),
                Literal::Str("professional".to_string()),
            ],
            negate: true,
        };
        assert_eq!(
            e.to_string(),
            "attributes.mode not in (\"verified\", \"professional\")"
        );
    }

    #[test]
    fn display_is_defined() {
        let e = Expr::IsDefined {
            field: FieldPath(vec!["custom".to_string(), "bundleId".to_string()]),
            negate: false,
        };
        assert_eq!(e.to_string(), "custom.bundleId is defined");
    }
}
