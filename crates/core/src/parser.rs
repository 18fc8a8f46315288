//! Recursive-descent parser for the predicate grammar.
//!
//! Grammar, precedence low→high:
//!
//! ```text
//! expression    := term ( "or" term )*
//! term          := factor ( "and" factor )*
//! factor        := "(" expression ")" | comparison
//! comparison    := field comp_op value
//!                | field [ "not" ] "in" "(" value ( "," value )* ")"
//!                | field "is" [ "not" ] "defined"
//! field         := function_call | dotted_name
//! function_call := WORD "(" [ expression ( "," expression )* ] ")"
//! dotted_name   := WORD ( "." ( WORD | TICK ) )*
//! value         := STR | NUM | WORD
//! ```
//!
//! Keywords (`and`, `or`, `not`, `in`, `is`, `defined`) are ordinary word
//! tokens recognized positionally. A zero-length function argument list is
//! accepted here; the arity error belongs to evaluation.

use crate::ast::{CompareOp, Expr, FieldPath, Literal, Operand};
use crate::error::SyntaxError;
use crate::lexer::{lex, Spanned, Token};

/// Parse a predicate string into its expression tree.
///
/// Parsing is pure and the result is the cacheable artifact: parse once,
/// evaluate against many contexts. Trailing tokens after a complete
/// expression are a syntax error.
pub fn parse(src: &str) -> Result<Expr, SyntaxError> {
    let tokens = lex(src)?;
    let mut p = Parser::new(&tokens);
    let expr = p.parse_expression()?;
    if p.peek() != &Token::Eof {
        return Err(p.err(format!("unexpected trailing input: {:?}", p.peek())));
    }
    Ok(expr)
}

// ──────────────────────────────────────────────
// Parser
// ──────────────────────────────────────────────

struct Parser<'a> {
    tokens: &'a [Spanned],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Spanned]) -> Self {
        Parser { tokens, pos: 0 }
    }

    fn cur(&self) -> &Spanned {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek(&self) -> &Token {
        &self.cur().token
    }

    fn cur_col(&self) -> u32 {
        self.cur().col
    }

    fn advance(&mut self) {
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
    }

    fn err(&self, msg: impl Into<String>) -> SyntaxError {
        SyntaxError::new(self.cur_col(), msg)
    }

    fn is_word(&self, w: &str) -> bool {
        matches!(self.peek(), Token::Word(x) if x == w)
    }

    fn take_word(&mut self) -> Result<String, SyntaxError> {
        if let Token::Word(w) = self.peek().clone() {
            self.advance();
            Ok(w)
        } else {
            Err(self.err(format!("expected identifier, got {:?}", self.peek())))
        }
    }

    fn expect_word(&mut self, expected: &str) -> Result<(), SyntaxError> {
        if self.is_word(expected) {
            self.advance();
            Ok(())
        } else {
            Err(self.err(format!("expected '{}', got {:?}", expected, self.peek())))
        }
    }

    fn expect_lparen(&mut self) -> Result<(), SyntaxError> {
        if self.peek() == &Token::LParen {
            self.advance();
            Ok(())
        } else {
            Err(self.err(format!("expected '(', got {:?}", self.peek())))
        }
    }

    fn expect_rparen(&mut self) -> Result<(), SyntaxError> {
        if self.peek() == &Token::RParen {
            self.advance();
            Ok(())
        } else {
            Err(self.err(format!("expected ')', got {:?}", self.peek())))
        }
    }

    // -- Expression parsing --------------------------------------

    fn parse_expression(&mut self) -> Result<Expr, SyntaxError> {
        let mut left = self.parse_term()?;
        while self.is_word("or") {
            self.advance();
            let right = self.parse_term()?;
            left = Expr::Or(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_term(&mut self) -> Result<Expr, SyntaxError> {
        let mut left = self.parse_factor()?;
        while self.is_word("and") {
            self.advance();
            let right = self.parse_factor()?;
            left = Expr::And(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_factor(&mut self) -> Result<Expr, SyntaxError> {
        if self.peek() == &Token::LParen {
            self.advance();
            let expr = self.parse_expression()?;
            self.expect_rparen()?;
            return Ok(expr);
        }
        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> Result<Expr, SyntaxError> {
        let field = self.parse_field()?;

        if let Some(op) = self.comparison_op() {
            self.advance();
            let literal = self.parse_literal()?;
            return Ok(Expr::Compare { field, op, literal });
        }

        // The remaining comparison forms apply to field paths only; a
        // function call on the left pairs only with a relational operator.
        let path = match field {
            Operand::Path(p) => p,
            Operand::Call { .. } => {
                return Err(self.err(format!(
                    "expected comparison operator, got {:?}",
                    self.peek()
                )));
            }
        };

        if self.is_word("is") {
            self.advance();
            let negate = if self.is_word("not") {
                self.advance();
                true
            } else {
                false
            };
            self.expect_word("defined")?;
            return Ok(Expr::IsDefined {
                field: path,
                negate,
            });
        }

        let negate = if self.is_word("not") {
            self.advance();
            self.expect_word("in")?;
            true
        } else if self.is_word("in") {
            self.advance();
            false
        } else {
            return Err(self.err(format!(
                "expected comparison operator, got {:?}",
                self.peek()
            )));
        };

        let items = self.parse_literal_list()?;
        Ok(Expr::InList {
            field: path,
            items,
            negate,
        })
    }

    fn comparison_op(&self) -> Option<CompareOp> {
        match self.peek() {
            Token::Eq => Some(CompareOp::Eq),
            Token::Neq => Some(CompareOp::Neq),
            Token::Gt => Some(CompareOp::Gt),
            Token::Lt => Some(CompareOp::Lt),
            Token::Gte => Some(CompareOp::Gte),
            Token::Lte => Some(CompareOp::Lte),
            _ => None,
        }
    }

    // -- Field parsing -------------------------------------------

    fn parse_field(&mut self) -> Result<Operand, SyntaxError> {
        let head = self.take_word()?;

        // Function call: identifier directly followed by '('
        if self.peek() == &Token::LParen {
            self.advance();
            let mut args = Vec::new();
            if self.peek() != &Token::RParen {
                loop {
                    args.push(self.parse_expression()?);
                    if self.peek() == &Token::Comma {
                        self.advance();
                        continue;
                    }
                    break;
                }
            }
            self.expect_rparen()?;
            return Ok(Operand::Call { name: head, args });
        }

        let mut segments = vec![head];
        while self.peek() == &Token::Dot {
            self.advance();
            match self.peek().clone() {
                Token::Word(w) => {
                    self.advance();
                    segments.push(w);
                }
                Token::Tick(s) => {
                    self.advance();
                    segments.push(s);
                }
                other => {
                    return Err(self.err(format!("expected path segment, got {:?}", other)));
                }
            }
        }
        Ok(Operand::Path(FieldPath(segments)))
    }

    // -- Literal parsing -----------------------------------------

    fn parse_literal(&mut self) -> Result<Literal, SyntaxError> {
        match self.peek().clone() {
            Token::Str(s) => {
                self.advance();
                Ok(Literal::Str(s))
            }
            Token::Num(n) => {
                self.advance();
                Ok(Literal::Num(n))
            }
            Token::Word(w) => {
                self.advance();
                Ok(Literal::Word(w))
            }
            _ => Err(self.err(format!("expected literal value, got {:?}", self.peek()))),
        }
    }

    fn parse_literal_list(&mut self) -> Result<Vec<Literal>, SyntaxError> {
        self.expect_lparen()?;
        let mut items = vec![self.parse_literal()?];
        while self.peek() == &Token::Comma {
            self.advance();
            items.push(self.parse_literal()?);
        }
        self.expect_rparen()?;
        Ok(items)
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
