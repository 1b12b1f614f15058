//! Typed argument values
//!
//! Integers of width 8/16/32/64 keep their native Rust type; every other
//! width is an arbitrary-precision integer tagged with its bit width. Arrays
//! are one generic container tagged with the element kind and the number of
//! levels below it, so a container only ever holds elements of one concrete
//! kind.

use std::fmt;

use num_bigint::{BigInt, BigUint};

use crate::types::ScalarKind;
use crate::{Error, Result};

// ── Integers ──────────────────────────────────────────────

/// Signed integer value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntValue {
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Big { bits: usize, value: BigInt },
}

impl IntValue {
    pub fn bits(&self) -> usize {
        match self {
            IntValue::I8(_) => 8,
            IntValue::I16(_) => 16,
            IntValue::I32(_) => 32,
            IntValue::I64(_) => 64,
            IntValue::Big { bits, .. } => *bits,
        }
    }
}

impl fmt::Display for IntValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntValue::I8(v) => write!(f, "{}", v),
            IntValue::I16(v) => write!(f, "{}", v),
            IntValue::I32(v) => write!(f, "{}", v),
            IntValue::I64(v) => write!(f, "{}", v),
            IntValue::Big { value, .. } => write!(f, "{}", value),
        }
    }
}

/// Unsigned integer value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UintValue {
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Big { bits: usize, value: BigUint },
}

impl UintValue {
    pub fn bits(&self) -> usize {
        match self {
            UintValue::U8(_) => 8,
            UintValue::U16(_) => 16,
            UintValue::U32(_) => 32,
            UintValue::U64(_) => 64,
            UintValue::Big { bits, .. } => *bits,
        }
    }
}

impl fmt::Display for UintValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UintValue::U8(v) => write!(f, "{}", v),
            UintValue::U16(v) => write!(f, "{}", v),
            UintValue::U32(v) => write!(f, "{}", v),
            UintValue::U64(v) => write!(f, "{}", v),
            UintValue::Big { value, .. } => write!(f, "{}", value),
        }
    }
}

// ── Values ────────────────────────────────────────────────

/// One typed argument value, scalar or array
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Int(IntValue),
    Uint(UintValue),
    Bool(bool),
    String(String),
    Address([u8; 20]),
    Hash([u8; 32]),
    Bytes(Vec<u8>),
    FixedBytes(Vec<u8>),
    Array(ArrayValue),
}

impl Value {
    /// Scalar kind of this value, `None` for arrays
    pub fn scalar_kind(&self) -> Option<ScalarKind> {
        let kind = match self {
            Value::Int(v) => ScalarKind::Int(v.bits()),
            Value::Uint(v) => ScalarKind::Uint(v.bits()),
            Value::Bool(_) => ScalarKind::Bool,
            Value::String(_) => ScalarKind::String,
            Value::Address(_) => ScalarKind::Address,
            Value::Hash(_) => ScalarKind::Hash,
            Value::Bytes(_) => ScalarKind::Bytes,
            Value::FixedBytes(b) => ScalarKind::FixedBytes(b.len()),
            Value::Array(_) => return None,
        };
        Some(kind)
    }

    /// Type name for error messages, e.g. `uint8` or `address[][]`
    pub fn type_name(&self) -> String {
        match self {
            Value::Array(array) => array.type_name(),
            // scalar_kind is always Some for non-arrays
            other => other
                .scalar_kind()
                .map(|k| k.to_string())
                .unwrap_or_default(),
        }
    }

    pub fn as_array(&self) -> Option<&ArrayValue> {
        match self {
            Value::Array(array) => Some(array),
            _ => None,
        }
    }

    /// Convert to serde_json::Value
    ///
    /// Native-width integers become JSON numbers; wider integers become
    /// decimal strings so no precision is lost.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value as Json;
        match self {
            Value::Int(IntValue::I8(v)) => Json::from(*v),
            Value::Int(IntValue::I16(v)) => Json::from(*v),
            Value::Int(IntValue::I32(v)) => Json::from(*v),
            Value::Int(IntValue::I64(v)) => Json::from(*v),
            Value::Int(IntValue::Big { value, .. }) => Json::String(value.to_string()),
            Value::Uint(UintValue::U8(v)) => Json::from(*v),
            Value::Uint(UintValue::U16(v)) => Json::from(*v),
            Value::Uint(UintValue::U32(v)) => Json::from(*v),
            Value::Uint(UintValue::U64(v)) => Json::from(*v),
            Value::Uint(UintValue::Big { value, .. }) => Json::String(value.to_string()),
            Value::Bool(b) => Json::Bool(*b),
            Value::String(s) => Json::String(s.clone()),
            Value::Address(a) => Json::String(format!("0x{}", hex::encode(a))),
            Value::Hash(h) => Json::String(format!("0x{}", hex::encode(h))),
            Value::Bytes(b) | Value::FixedBytes(b) => {
                Json::String(format!("0x{}", hex::encode(b)))
            }
            Value::Array(array) => Json::Array(array.items.iter().map(Value::to_json).collect()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{}", v),
            Value::Uint(v) => write!(f, "{}", v),
            Value::Bool(b) => write!(f, "{}", b),
            Value::String(s) => write!(f, "\"{}\"", s),
            Value::Address(a) => write!(f, "0x{}", hex::encode(a)),
            Value::Hash(h) => write!(f, "0x{}", hex::encode(h)),
            Value::Bytes(b) | Value::FixedBytes(b) => write!(f, "0x{}", hex::encode(b)),
            Value::Array(array) => {
                write!(f, "[")?;
                for (i, v) in array.items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                write!(f, "]")
            }
        }
    }
}

// ── Arrays ────────────────────────────────────────────────

/// Array container whose element type is fixed at creation
///
/// `depth` counts the levels from this container down to the scalars: a
/// depth-1 array holds scalars of `element`, a depth-2 array holds depth-1
/// arrays of `element`, and so on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayValue {
    element: ScalarKind,
    depth: usize,
    items: Vec<Value>,
}

impl ArrayValue {
    pub fn new(element: ScalarKind, depth: usize) -> Self {
        ArrayValue {
            element,
            depth: depth.max(1),
            items: Vec::new(),
        }
    }

    pub fn element(&self) -> &ScalarKind {
        &self.element
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn items(&self) -> &[Value] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn type_name(&self) -> String {
        format!("{}{}", self.element, "[]".repeat(self.depth))
    }

    /// Whether `value` has exactly the concrete type of this container's elements
    pub fn accepts(&self, value: &Value) -> bool {
        if self.depth == 1 {
            value.scalar_kind().as_ref() == Some(&self.element)
        } else {
            match value {
                Value::Array(inner) => {
                    inner.element == self.element && inner.depth + 1 == self.depth
                }
                _ => false,
            }
        }
    }

    /// Append an element, refusing anything of a different concrete type
    pub fn push(&mut self, value: Value) -> Result<()> {
        if !self.accepts(&value) {
            let expected = if self.depth == 1 {
                self.element.to_string()
            } else {
                format!("{}{}", self.element, "[]".repeat(self.depth - 1))
            };
            return Err(Error::TypeMismatch {
                expected,
                found: value.type_name(),
            });
        }
        self.items.push(value);
        Ok(())
    }
}
