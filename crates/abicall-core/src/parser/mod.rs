//! Call parser — tokenizer, AST types, recursive descent parser and walker
//!
//! Converts call text into a [`CallNode`] and replays it as an ordered stream
//! of structural events through the [`CallListener`] trait.
//!
//! ```text
//! call      := IDENT '(' [ arg (',' arg)* ] ')' EOF
//! arguments := [ arg (',' arg)* ] EOF
//! arg       := INTEGER | HEX | STRING | WORD | '[' [ arg (',' arg)* ] ']'
//! ```

pub mod ast;
pub mod tokenizer;

use crate::{Error, Result};
use ast::{ArgKind, ArgNode, CallNode, LiteralKind};
use tokenizer::{Span, SpannedToken, Token, Tokenizer};

/// Receiver of the structural events emitted while walking a call
///
/// Events arrive strictly left to right. Each argument, including each array
/// element, is bracketed by `argument_start`/`argument_end` and contains
/// either one `literal` or an `array_start` ... `array_end` pair.
pub trait CallListener {
    fn function_name(&mut self, name: &str);
    fn argument_start(&mut self);
    fn argument_end(&mut self);
    fn literal(&mut self, kind: LiteralKind, text: &str);
    fn array_start(&mut self);
    fn array_end(&mut self);
}

/// Parse call text of the form `name(arg, ...)`
///
/// # Errors
/// Returns `SyntaxError` with line:column for grammar violations.
pub fn parse_call(input: &str) -> Result<CallNode> {
    let tokens = Tokenizer::new(input).tokenize()?;
    Parser::new(tokens).parse_call()
}

/// Parse a bare comma-separated argument list such as `false,2,0x12`
pub fn parse_arguments(input: &str) -> Result<Vec<ArgNode>> {
    let tokens = Tokenizer::new(input).tokenize()?;
    Parser::new(tokens).parse_arg_list(&Token::Eof)
}

/// Emit the events for a whole call
pub fn walk_call<L: CallListener + ?Sized>(call: &CallNode, listener: &mut L) {
    listener.function_name(&call.name);
    walk_arguments(&call.args, listener);
}

/// Emit the events for an argument list
pub fn walk_arguments<L: CallListener + ?Sized>(args: &[ArgNode], listener: &mut L) {
    for arg in args {
        walk_arg(arg, listener);
    }
}

fn walk_arg<L: CallListener + ?Sized>(arg: &ArgNode, listener: &mut L) {
    listener.argument_start();
    match &arg.kind {
        ArgKind::Literal(kind, text) => listener.literal(*kind, text),
        ArgKind::Array(elements) => {
            listener.array_start();
            for element in elements {
                walk_arg(element, listener);
            }
            listener.array_end();
        }
    }
    listener.argument_end();
}

// ── Recursive descent ─────────────────────────────────────

/// Deepest array nesting accepted in call text
pub const MAX_NESTING: usize = 64;

struct Parser {
    tokens: Vec<SpannedToken>,
    position: usize,
    depth: usize,
}

impl Parser {
    fn new(tokens: Vec<SpannedToken>) -> Self {
        Parser {
            tokens,
            position: 0,
            depth: 0,
        }
    }

    fn peek(&self) -> &SpannedToken {
        // tokenize() always terminates the stream with Eof
        &self.tokens[self.position.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> SpannedToken {
        let token = self.peek().clone();
        if self.position < self.tokens.len() - 1 {
            self.position += 1;
        }
        token
    }

    fn expect(&mut self, expected: &Token) -> Result<Span> {
        let next = self.advance();
        if &next.token == expected {
            Ok(next.span)
        } else {
            Err(Error::SyntaxError(format!(
                "Expected {}, found {} at {}",
                expected, next.token, next.span
            )))
        }
    }

    fn parse_call(&mut self) -> Result<CallNode> {
        let next = self.advance();
        let name = match next.token {
            Token::Identifier(name) => name,
            other => {
                return Err(Error::SyntaxError(format!(
                    "Expected method name, found {} at {}",
                    other, next.span
                )))
            }
        };
        self.expect(&Token::LParen)?;
        let args = self.parse_arg_list(&Token::RParen)?;
        self.expect(&Token::Eof)?;
        Ok(CallNode { name, args })
    }

    /// Parse `[ arg (',' arg)* ] close`
    fn parse_arg_list(&mut self, close: &Token) -> Result<Vec<ArgNode>> {
        let mut args = Vec::new();
        if &self.peek().token == close {
            self.advance();
            return Ok(args);
        }

        loop {
            args.push(self.parse_arg()?);
            if self.peek().token == Token::Comma {
                self.advance();
            } else {
                break;
            }
        }
        self.expect(close)?;
        Ok(args)
    }

    fn parse_arg(&mut self) -> Result<ArgNode> {
        let next = self.advance();
        let kind = match next.token {
            Token::IntegerLiteral(text) => ArgKind::Literal(LiteralKind::Integer, text),
            Token::HexLiteral(text) => ArgKind::Literal(LiteralKind::Hex, text),
            Token::StringLiteral(text) => ArgKind::Literal(LiteralKind::String, text),
            Token::Identifier(text) => ArgKind::Literal(LiteralKind::Boolean, text),
            Token::LBracket => {
                if self.depth >= MAX_NESTING {
                    return Err(Error::SyntaxError(format!(
                        "Arrays nested deeper than {} levels at {}",
                        MAX_NESTING, next.span
                    )));
                }
                self.depth += 1;
                let elements = self.parse_arg_list(&Token::RBracket);
                self.depth -= 1;
                ArgKind::Array(elements?)
            }
            other => {
                return Err(Error::SyntaxError(format!(
                    "Expected argument, found {} at {}",
                    other, next.span
                )))
            }
        };
        Ok(ArgNode {
            kind,
            span: next.span,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records events as compact strings
    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl CallListener for Recorder {
        fn function_name(&mut self, name: &str) {
            self.events.push(format!("name:{}", name));
        }
        fn argument_start(&mut self) {
            self.events.push("(".into());
        }
        fn argument_end(&mut self) {
            self.events.push(")".into());
        }
        fn literal(&mut self, kind: LiteralKind, text: &str) {
            self.events.push(format!("{}:{}", kind, text));
        }
        fn array_start(&mut self) {
            self.events.push("[".into());
        }
        fn array_end(&mut self) {
            self.events.push("]".into());
        }
    }

    fn events(input: &str) -> Vec<String> {
        let call = parse_call(input).unwrap();
        let mut recorder = Recorder::default();
        walk_call(&call, &mut recorder);
        recorder.events
    }

    fn parse_err(input: &str) -> String {
        parse_call(input).unwrap_err().to_string()
    }

    // ── Parsing ────────────────────────────────────────

    #[test]
    fn test_parse_no_arguments() {
        let call = parse_call("totalSupply()").unwrap();
        assert_eq!(call.name, "totalSupply");
        assert!(call.args.is_empty());
    }

    #[test]
    fn test_parse_literals() {
        let call = parse_call(r#"f(1, 0xab, "s", true)"#).unwrap();
        let kinds: Vec<_> = call
            .args
            .iter()
            .map(|a| match &a.kind {
                ArgKind::Literal(kind, _) => *kind,
                ArgKind::Array(_) => panic!("unexpected array"),
            })
            .collect();
        assert_eq!(
            kinds,
            vec![
                LiteralKind::Integer,
                LiteralKind::Hex,
                LiteralKind::String,
                LiteralKind::Boolean
            ]
        );
    }

    #[test]
    fn test_parse_nested_arrays() {
        let call = parse_call("f([[1],[]], [])").unwrap();
        assert_eq!(call.args.len(), 2);
        match &call.args[0].kind {
            ArgKind::Array(outer) => {
                assert_eq!(outer.len(), 2);
                assert_eq!(outer[1].kind, ArgKind::Array(vec![]));
            }
            other => panic!("expected array, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_arguments_only() {
        let args = parse_arguments("false,2,0x5FfC014343cd971B7eb70732021E26C35B744cc4").unwrap();
        assert_eq!(args.len(), 3);
        assert!(parse_arguments("").unwrap().is_empty());
    }

    // ── Syntax errors ──────────────────────────────────

    #[test]
    fn test_missing_parenthesis() {
        assert!(parse_err("f(1").contains("Expected ')', found end of input"));
        assert!(parse_err("f 1)").contains("Expected '('"));
    }

    #[test]
    fn test_trailing_comma() {
        assert!(parse_err("f(1,)").contains("Expected argument, found ')' at 1:5"));
    }

    #[test]
    fn test_unbalanced_brackets() {
        assert!(parse_err("f([1,2)").contains("Expected ']'"));
        assert!(parse_err("f(1])").contains("Expected ')'"));
    }

    #[test]
    fn test_nesting_limit() {
        let nested = |n: usize| format!("f({}{})", "[".repeat(n), "]".repeat(n));
        assert!(parse_call(&nested(MAX_NESTING)).is_ok());
        let err = parse_err(&nested(MAX_NESTING + 1));
        assert!(err.contains("nested deeper than 64 levels at 1:67"), "{}", err);
        assert!(parse_err(&nested(200_000)).contains("nested deeper"));
        assert!(parse_arguments(&"[".repeat(100_000)).is_err());
    }

    #[test]
    fn test_trailing_input() {
        assert!(parse_err("f(1) g").contains("Expected end of input"));
    }

    #[test]
    fn test_missing_name() {
        assert!(parse_err("(1)").contains("Expected method name"));
        assert!(parse_err("").contains("Expected method name"));
    }

    // ── Event stream ───────────────────────────────────

    #[test]
    fn test_events_for_scalars() {
        assert_eq!(
            events("transfer(0xab, 100)"),
            vec!["name:transfer", "(", "hex:0xab", ")", "(", "integer:100", ")"]
        );
    }

    #[test]
    fn test_events_for_nested_array() {
        assert_eq!(
            events("f([[1],[]])"),
            vec![
                "name:f", "(", "[", "(", "[", "(", "integer:1", ")", "]", ")", "(", "[", "]",
                ")", "]", ")"
            ]
        );
    }

    #[test]
    fn test_walk_determinism_100_iterations() {
        let first = events(r#"f([1,2,3], "x", [[true],[false]])"#);
        for i in 0..100 {
            let result = events(r#"f([1,2,3], "x", [[true],[false]])"#);
            assert_eq!(first, result, "Determinism failure at iteration {}", i);
        }
    }
}
