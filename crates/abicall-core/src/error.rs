//! Error types for abicall
//!
//! All fallible operations return `Result<T, Error>`.
//! Input errors carry enough context to be shown to the user verbatim;
//! internal defects are flagged by [`Error::is_internal`].

use thiserror::Error;

/// abicall error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Call text does not match the call-expression grammar
    #[error("Syntax error: {0}")]
    SyntaxError(String),

    /// Contract interface could not be loaded or a type string is invalid
    #[error("ABI error: {0}")]
    AbiError(String),

    /// Method name not present in the contract interface
    #[error("unknown method name {0}")]
    UnknownMethod(String),

    /// More top-level arguments than declared parameters
    #[error("too many arguments (expected {expected})")]
    TooManyArguments { expected: usize },

    /// Fewer top-level arguments than declared parameters
    #[error("too few arguments (expected {expected}, found {found})")]
    TooFewArguments { expected: usize, found: usize },

    /// Literal kind cannot denote the declared parameter type
    #[error("unexpected {literal} literal for parameter of type {declared}")]
    UnknownScalarType { literal: String, declared: String },

    /// Malformed literal (bad hex, wrong byte length, not a boolean, ...)
    #[error("Format error: {0}")]
    FormatError(String),

    /// Integer literal outside the declared width
    #[error("value {value} out of range for {ty}")]
    RangeError { value: String, ty: String },

    /// Array nesting in the call text disagrees with the declared type
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    /// Fixed-length array level received the wrong number of elements
    #[error("array of type {ty} requires {expected} elements, found {found}")]
    ArrayLength {
        ty: String,
        expected: usize,
        found: usize,
    },

    /// Value of the wrong concrete kind reached an array container
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// Kind, width or nesting combination with no construction rule
    #[error("unhandled type {0}")]
    UnhandledType(String),

    /// Structural events arrived in an order the grammar never produces
    #[error("Event order violation: {0}")]
    EventOrder(String),
}

impl Error {
    /// True for errors that indicate a defect in abicall rather than bad input
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Error::TypeMismatch { .. } | Error::UnhandledType(_) | Error::EventOrder(_)
        )
    }
}

/// Result type alias for abicall operations
pub type Result<T> = std::result::Result<T, Error>;
