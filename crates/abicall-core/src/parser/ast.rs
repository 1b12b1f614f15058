//! Call AST — the parsed structure of a textual function call
//!
//! The AST only records structure and raw literal text. Types are applied
//! later, while the assembler consumes the events produced by walking it.

use super::tokenizer::Span;

/// Lexical category of a scalar literal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    /// Decimal integer, optionally negative
    Integer,
    /// `0x`-prefixed hex digits
    Hex,
    /// Quoted string, already unescaped
    String,
    /// Bare word such as `true` or `False`
    Boolean,
}

impl std::fmt::Display for LiteralKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LiteralKind::Integer => write!(f, "integer"),
            LiteralKind::Hex => write!(f, "hex"),
            LiteralKind::String => write!(f, "string"),
            LiteralKind::Boolean => write!(f, "boolean"),
        }
    }
}

/// A parsed call: `name(arg, ...)`
#[derive(Debug, Clone, PartialEq)]
pub struct CallNode {
    pub name: String,
    pub args: Vec<ArgNode>,
}

/// One argument or array element
#[derive(Debug, Clone, PartialEq)]
pub struct ArgNode {
    pub kind: ArgKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ArgKind {
    Literal(LiteralKind, String),
    Array(Vec<ArgNode>),
}
