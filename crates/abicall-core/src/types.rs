//! Parameter types — scalar kinds, array wrappers, and introspection
//!
//! A declared parameter type is a base scalar kind wrapped in zero or more
//! array levels. Type strings follow the Solidity ABI spelling; the rightmost
//! bracket pair is the outermost array level, so `uint8[2][3]` is three
//! elements of `uint8[2]`.

use std::fmt;

use crate::{Error, Result};

// ── Scalar kinds ──────────────────────────────────────────

/// The non-array element type of a parameter
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// Signed integer of the given bit width
    Int(usize),
    /// Unsigned integer of the given bit width
    Uint(usize),
    Bool,
    /// UTF-8 string
    String,
    /// 20-byte account address
    Address,
    /// 32-byte hash
    Hash,
    /// Dynamic-length byte string
    Bytes,
    /// Fixed-length byte string (`bytes1` .. `bytes32`)
    FixedBytes(usize),
    /// External function reference
    Function,
    /// Tuple of component types
    Tuple(Vec<ParamType>),
}

impl ScalarKind {
    /// Whether the call grammar has a literal that can denote this kind
    pub fn has_literal_form(&self) -> bool {
        !matches!(self, ScalarKind::Function | ScalarKind::Tuple(_))
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarKind::Int(bits) => write!(f, "int{}", bits),
            ScalarKind::Uint(bits) => write!(f, "uint{}", bits),
            ScalarKind::Bool => write!(f, "bool"),
            ScalarKind::String => write!(f, "string"),
            ScalarKind::Address => write!(f, "address"),
            ScalarKind::Hash => write!(f, "hash"),
            ScalarKind::Bytes => write!(f, "bytes"),
            ScalarKind::FixedBytes(size) => write!(f, "bytes{}", size),
            ScalarKind::Function => write!(f, "function"),
            ScalarKind::Tuple(components) => {
                write!(f, "(")?;
                for (i, c) in components.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", c)?;
                }
                write!(f, ")")
            }
        }
    }
}

// ── Parameter types ───────────────────────────────────────

/// A declared parameter type: a scalar kind plus array levels
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParamType {
    Scalar(ScalarKind),
    /// Dynamically sized array `T[]`
    Array(Box<ParamType>),
    /// Fixed-length array `T[N]`
    FixedArray(Box<ParamType>, usize),
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamType::Scalar(kind) => write!(f, "{}", kind),
            ParamType::Array(elem) => write!(f, "{}[]", elem),
            ParamType::FixedArray(elem, len) => write!(f, "{}[{}]", elem, len),
        }
    }
}

impl ParamType {
    /// Strip every array level and return the scalar kind underneath
    pub fn base_type(&self) -> &ScalarKind {
        match self {
            ParamType::Scalar(kind) => kind,
            ParamType::Array(elem) | ParamType::FixedArray(elem, _) => elem.base_type(),
        }
    }

    /// Number of array levels wrapping the base kind (0 for a plain scalar)
    pub fn array_depth(&self) -> usize {
        match self {
            ParamType::Scalar(_) => 0,
            ParamType::Array(elem) | ParamType::FixedArray(elem, _) => 1 + elem.array_depth(),
        }
    }

    /// Element type of an array level, `None` for scalars
    pub fn element(&self) -> Option<&ParamType> {
        match self {
            ParamType::Scalar(_) => None,
            ParamType::Array(elem) | ParamType::FixedArray(elem, _) => Some(elem),
        }
    }

    /// Declared length of this level when it is a fixed-length array
    pub fn fixed_len(&self) -> Option<usize> {
        match self {
            ParamType::FixedArray(_, len) => Some(*len),
            _ => None,
        }
    }

    /// Type at nesting level `n`, counting from the outside (0 = `self`)
    pub fn level(&self, n: usize) -> Option<&ParamType> {
        if n == 0 {
            Some(self)
        } else {
            self.element()?.level(n - 1)
        }
    }

    /// Parse a type string such as `uint256`, `bytes32[]` or `(address,bool)[2]`
    pub fn parse(text: &str) -> Result<ParamType> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::AbiError("empty type".to_string()));
        }

        if let Some(stripped) = text.strip_suffix(']') {
            let open = stripped
                .rfind('[')
                .ok_or_else(|| Error::AbiError(format!("unbalanced brackets in type '{}'", text)))?;
            let elem = Box::new(ParamType::parse(&stripped[..open])?);
            let len = &stripped[open + 1..];
            if len.is_empty() {
                return Ok(ParamType::Array(elem));
            }
            let len: usize = len
                .parse()
                .map_err(|_| Error::AbiError(format!("invalid array length in type '{}'", text)))?;
            return Ok(ParamType::FixedArray(elem, len));
        }

        parse_scalar(text).map(ParamType::Scalar)
    }

    /// Parse a comma-separated list of type strings, e.g. `bool,uint256,address`
    pub fn parse_list(text: &str) -> Result<Vec<ParamType>> {
        split_top_level(text)?
            .into_iter()
            .map(ParamType::parse)
            .collect()
    }
}

fn parse_scalar(text: &str) -> Result<ScalarKind> {
    let tuple_body = text
        .strip_prefix("tuple(")
        .or_else(|| text.strip_prefix('('))
        .and_then(|rest| rest.strip_suffix(')'));
    if let Some(body) = tuple_body {
        return Ok(ScalarKind::Tuple(ParamType::parse_list(body)?));
    }

    let kind = match text {
        "bool" => ScalarKind::Bool,
        "string" => ScalarKind::String,
        "address" => ScalarKind::Address,
        "hash" => ScalarKind::Hash,
        "bytes" => ScalarKind::Bytes,
        "function" => ScalarKind::Function,
        "int" => ScalarKind::Int(256),
        "uint" => ScalarKind::Uint(256),
        "byte" => ScalarKind::FixedBytes(1),
        _ => {
            if let Some(bits) = text.strip_prefix("uint") {
                ScalarKind::Uint(parse_int_width(text, bits)?)
            } else if let Some(bits) = text.strip_prefix("int") {
                ScalarKind::Int(parse_int_width(text, bits)?)
            } else if let Some(size) = text.strip_prefix("bytes") {
                let size: usize = size
                    .parse()
                    .map_err(|_| Error::AbiError(format!("unknown type '{}'", text)))?;
                if !(1..=32).contains(&size) {
                    return Err(Error::AbiError(format!("invalid byte size in type '{}'", text)));
                }
                ScalarKind::FixedBytes(size)
            } else {
                return Err(Error::AbiError(format!("unknown type '{}'", text)));
            }
        }
    };
    Ok(kind)
}

fn parse_int_width(text: &str, bits: &str) -> Result<usize> {
    let bits: usize = bits
        .parse()
        .map_err(|_| Error::AbiError(format!("unknown type '{}'", text)))?;
    if bits == 0 || bits > 256 || bits % 8 != 0 {
        return Err(Error::AbiError(format!("invalid integer width in type '{}'", text)));
    }
    Ok(bits)
}

/// Split on commas that are not nested inside parentheses or brackets
pub(crate) fn split_top_level(text: &str) -> Result<Vec<&str>> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut parts = Vec::new();
    let mut depth: i32 = 0;
    let mut start = 0;
    for (i, ch) in text.char_indices() {
        match ch {
            '(' | '[' => depth += 1,
            ')' | ']' => {
                depth -= 1;
                if depth < 0 {
                    return Err(Error::AbiError(format!("unbalanced type list '{}'", text)));
                }
            }
            ',' if depth == 0 => {
                parts.push(text[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(Error::AbiError(format!("unbalanced type list '{}'", text)));
    }
    parts.push(text[start..].trim());
    Ok(parts)
}
