//! Call-text tokenizer — converts a textual function call into a token stream
//!
//! Handles: identifiers/words, decimal integers, hex literals, quoted strings
//! (single or double quotes), and the symbols `( ) [ ] ,`.
//! Integer and hex tokens keep their raw text; checking the digits is left to
//! literal coercion so malformed literals report against the declared type.
//!
//! Guarantees:
//! - Deterministic: same input always produces same token stream
//! - Every error carries line:column

/// Token types for call text
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    IntegerLiteral(String),
    HexLiteral(String),
    StringLiteral(String),

    // Symbols
    LParen,   // (
    RParen,   // )
    LBracket, // [
    RBracket, // ]
    Comma,    // ,

    // Other
    Identifier(String),
    Eof,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Token::IntegerLiteral(text) | Token::HexLiteral(text) => write!(f, "'{}'", text),
            Token::StringLiteral(text) => write!(f, "string \"{}\"", text),
            Token::LParen => write!(f, "'('"),
            Token::RParen => write!(f, "')'"),
            Token::LBracket => write!(f, "'['"),
            Token::RBracket => write!(f, "']'"),
            Token::Comma => write!(f, "','"),
            Token::Identifier(name) => write!(f, "'{}'", name),
            Token::Eof => write!(f, "end of input"),
        }
    }
}

/// Position in source text for error reporting
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Token with source position
#[derive(Debug, Clone, PartialEq)]
pub struct SpannedToken {
    pub token: Token,
    pub span: Span,
}

/// Tokenizer for call text
pub struct Tokenizer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Tokenizer {
    /// Create a new tokenizer for the given input text
    pub fn new(text: &str) -> Self {
        Tokenizer {
            input: text.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize the entire input into a stream of spanned tokens
    pub fn tokenize(&mut self) -> crate::Result<Vec<SpannedToken>> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace();

            if self.is_at_end() {
                tokens.push(SpannedToken {
                    token: Token::Eof,
                    span: self.current_span(),
                });
                break;
            }

            let token = self.next_token()?;
            tokens.push(token);
        }

        Ok(tokens)
    }

    // ── Character helpers ──────────────────────────────────

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_ahead(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.input.get(self.position).copied();
        if let Some(c) = ch {
            self.position += 1;
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        ch
    }

    fn current_span(&self) -> Span {
        Span {
            line: self.line,
            column: self.column,
            offset: self.position,
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Consume `[A-Za-z0-9_$]*` and return it
    fn read_word_chars(&mut self) -> String {
        let start = self.position;
        while let Some(ch) = self.peek() {
            if is_word_char(ch) {
                self.advance();
            } else {
                break;
            }
        }
        self.input[start..self.position].iter().collect()
    }

    // ── Main dispatch ──────────────────────────────────────

    fn next_token(&mut self) -> crate::Result<SpannedToken> {
        let span = self.current_span();
        let ch = match self.peek() {
            Some(ch) => ch,
            None => return Ok(SpannedToken { token: Token::Eof, span }),
        };

        match ch {
            '(' => { self.advance(); Ok(SpannedToken { token: Token::LParen, span }) }
            ')' => { self.advance(); Ok(SpannedToken { token: Token::RParen, span }) }
            '[' => { self.advance(); Ok(SpannedToken { token: Token::LBracket, span }) }
            ']' => { self.advance(); Ok(SpannedToken { token: Token::RBracket, span }) }
            ',' => { self.advance(); Ok(SpannedToken { token: Token::Comma, span }) }
            '"' | '\'' => self.read_string(ch, span),
            '-' => self.read_number(span),
            c if c.is_ascii_digit() => self.read_number(span),
            c if c.is_alphabetic() || c == '_' || c == '$' => {
                let text = self.read_word_chars();
                Ok(SpannedToken { token: Token::Identifier(text), span })
            }
            _ => Err(crate::Error::SyntaxError(
                format!("Unexpected character '{}' at {}", ch, span)
            )),
        }
    }

    // ── String literals ────────────────────────────────────

    fn read_string(&mut self, quote: char, span: Span) -> crate::Result<SpannedToken> {
        self.advance(); // consume opening quote
        let mut value = String::new();

        loop {
            match self.advance() {
                None => {
                    return Err(crate::Error::SyntaxError(
                        format!("Unterminated string starting at {}", span)
                    ));
                }
                Some(c) if c == quote => break,
                Some('\\') => {
                    match self.advance() {
                        Some('n') => value.push('\n'),
                        Some('t') => value.push('\t'),
                        Some('\\') => value.push('\\'),
                        Some('"') => value.push('"'),
                        Some('\'') => value.push('\''),
                        Some(c) => {
                            return Err(crate::Error::SyntaxError(
                                format!("Invalid escape sequence '\\{}' at {}", c, self.current_span())
                            ));
                        }
                        None => {
                            return Err(crate::Error::SyntaxError(
                                format!("Unterminated escape sequence at {}", self.current_span())
                            ));
                        }
                    }
                }
                Some(c) => value.push(c),
            }
        }

        Ok(SpannedToken {
            token: Token::StringLiteral(value),
            span,
        })
    }

    // ── Numbers & hex ──────────────────────────────────────

    fn read_number(&mut self, span: Span) -> crate::Result<SpannedToken> {
        let mut text = String::new();

        if self.peek() == Some('-') {
            self.advance();
            match self.peek() {
                Some(c) if c.is_ascii_digit() => text.push('-'),
                _ => {
                    return Err(crate::Error::SyntaxError(
                        format!("Expected digit after '-' at {}", span)
                    ));
                }
            }
        }

        let is_hex = text.is_empty()
            && self.peek() == Some('0')
            && matches!(self.peek_ahead(1), Some('x') | Some('X'));

        text.push_str(&self.read_word_chars());

        let token = if is_hex {
            Token::HexLiteral(text)
        } else {
            Token::IntegerLiteral(text)
        };
        Ok(SpannedToken { token, span })
    }
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '$'
}
