use crate::error::SyntaxError;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Identifiers and keywords — distinguished in the parser
    Word(String),
    /// Double-quoted string literal (content without quotes, escapes resolved)
    Str(String),
    /// Numeric literal — predicates compare with float semantics
    Num(f64),
    /// Backtick-quoted path segment, content kept verbatim (no escapes)
    Tick(String),
    // Punctuation
    LParen,
    RParen,
    Comma,
    Dot,
    // Comparison operators
    Eq,
    Neq,
    Lt,
    Lte,
    Gt,
    Gte,
    // End of input
    Eof,
}

#[derive(Debug, Clone)]
pub struct Spanned {
    pub token: Token,
    /// 1-based character column of the token start.
    pub col: u32,
}

pub fn lex(src: &str) -> Result<Vec<Spanned>, SyntaxError> {
    let mut tokens = Vec::new();
    let chars: Vec<char> = src.chars().collect();
    let mut pos = 0usize;

    while pos < chars.len() {
        let c = chars[pos];

        // Whitespace
        if c.is_whitespace() {
            pos += 1;
            continue;
        }

        let tok_col = (pos + 1) as u32;

        // String literal
        if c == '"' {
            pos += 1;
            let mut s = String::new();
            loop {
                if pos >= chars.len() {
                    return Err(SyntaxError::new(tok_col, "unterminated string literal"));
                }
                let sc = chars[pos];
                if sc == '"' {
                    pos += 1;
                    break;
                }
                if sc == '\\' {
                    pos += 1;
                    if pos >= chars.len() {
                        return Err(SyntaxError::new(tok_col, "unterminated escape in string"));
                    }
                    match chars[pos] {
                        '"' => s.push('"'),
                        '\\' => s.push('\\'),
                        'n' => s.push('\n'),
                        't' => s.push('\t'),
                        other => {
                            s.push('\\');
                            s.push(other);
                        }
                    }
                    pos += 1;
                    continue;
                }
                s.push(sc);
                pos += 1;
            }
            tokens.push(Spanned {
                token: Token::Str(s),
                col: tok_col,
            });
            continue;
        }

        // Backtick-quoted path segment. Content is kept verbatim so that
        // attribute names with punctuation (e.g. `course-key`) survive as
        // a single segment.
        if c == '`' {
            pos += 1;
            let start = pos;
            while pos < chars.len() && chars[pos] != '`' {
                pos += 1;
            }
            if pos >= chars.len() {
                return Err(SyntaxError::new(tok_col, "unterminated backtick segment"));
            }
            let s: String = chars[start..pos].iter().collect();
            pos += 1; // consume closing backtick
            tokens.push(Spanned {
                token: Token::Tick(s),
                col: tok_col,
            });
            continue;
        }

        // Number
        if c.is_ascii_digit()
            || (c == '-' && pos + 1 < chars.len() && chars[pos + 1].is_ascii_digit())
        {
            let start = pos;
            if c == '-' {
                pos += 1;
            }
            while pos < chars.len() && chars[pos].is_ascii_digit() {
                pos += 1;
            }
            if pos < chars.len()
                && chars[pos] == '.'
                && pos + 1 < chars.len()
                && chars[pos + 1].is_ascii_digit()
            {
                pos += 1; // consume '.'
                while pos < chars.len() && chars[pos].is_ascii_digit() {
                    pos += 1;
                }
            }
            let s: String = chars[start..pos].iter().collect();
            let n: f64 = s
                .parse()
                .map_err(|_| SyntaxError::new(tok_col, format!("invalid number '{}'", s)))?;
            tokens.push(Spanned {
                token: Token::Num(n),
                col: tok_col,
            });
            continue;
        }

        // Operators and punctuation
        match c {
            '=' => {
                tokens.push(Spanned {
                    token: Token::Eq,
                    col: tok_col,
                });
                pos += 1;
                continue;
            }
            '<' => {
                if pos + 1 < chars.len() && chars[pos + 1] == '=' {
                    tokens.push(Spanned {
                        token: Token::Lte,
                        col: tok_col,
                    });
                    pos += 2;
                } else {
                    tokens.push(Spanned {
                        token: Token::Lt,
                        col: tok_col,
                    });
                    pos += 1;
                }
                continue;
            }
            '>' => {
                if pos + 1 < chars.len() && chars[pos + 1] == '=' {
                    tokens.push(Spanned {
                        token: Token::Gte,
                        col: tok_col,
                    });
                    pos += 2;
                } else {
                    tokens.push(Spanned {
                        token: Token::Gt,
                        col: tok_col,
                    });
                    pos += 1;
                }
                continue;
            }
            '!' => {
                if pos + 1 < chars.len() && chars[pos + 1] == '=' {
                    tokens.push(Spanned {
                        token: Token::Neq,
                        col: tok_col,
                    });
                    pos += 2;
                } else {
                    return Err(SyntaxError::new(
                        tok_col,
                        format!("unexpected character '{}'", c),
                    ));
                }
                continue;
            }
            '(' => {
                tokens.push(Spanned {
                    token: Token::LParen,
                    col: tok_col,
                });
                pos += 1;
                continue;
            }
            ')' => {
                tokens.push(Spanned {
                    token: Token::RParen,
                    col: tok_col,
                });
                pos += 1;
                continue;
            }
            ',' => {
                tokens.push(Spanned {
                    token: Token::Comma,
                    col: tok_col,
                });
                pos += 1;
                continue;
            }
            '.' => {
                tokens.push(Spanned {
                    token: Token::Dot,
                    col: tok_col,
                });
                pos += 1;
                continue;
            }
            _ => {}
        }

        // Identifier / keyword
        if c.is_alphabetic() || c == '_' {
            let start = pos;
            while pos < chars.len() && (chars[pos].is_alphanumeric() || chars[pos] == '_') {
                pos += 1;
            }
            let word: String = chars[start..pos].iter().collect();
            tokens.push(Spanned {
                token: Token::Word(word),
                col: tok_col,
            });
            continue;
        }

        return Err(SyntaxError::new(
            tok_col,
            format!("unexpected character '{}'", c),
        ));
    }

    tokens.push(Spanned {
        token: Token::Eof,
        col: (chars.len() + 1) as u32,
    });
    Ok(tokens)
}
