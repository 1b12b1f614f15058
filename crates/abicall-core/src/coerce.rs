//! Literal coercion — literal text plus a declared scalar kind to a typed value
//!
//! Every function here is pure. Integers are decimal; addresses, hashes and
//! byte strings are hex with an optional `0x` prefix.

use num_bigint::{BigInt, BigUint};

use crate::types::ScalarKind;
use crate::value::{IntValue, UintValue, Value};
use crate::{Error, Result};

/// Coerce literal text to a value of the declared scalar kind
pub fn coerce(kind: &ScalarKind, text: &str) -> Result<Value> {
    let value = match kind {
        ScalarKind::Int(bits) => Value::Int(str_to_int(*bits, text)?),
        ScalarKind::Uint(bits) => Value::Uint(str_to_uint(*bits, text)?),
        ScalarKind::Bool => Value::Bool(str_to_bool(text)?),
        ScalarKind::String => Value::String(str_to_string(text)),
        ScalarKind::Address => Value::Address(str_to_address(text)?),
        ScalarKind::Hash => Value::Hash(str_to_hash(text)?),
        ScalarKind::Bytes => Value::Bytes(str_to_bytes(None, text)?),
        ScalarKind::FixedBytes(size) => Value::FixedBytes(str_to_bytes(Some(*size), text)?),
        ScalarKind::Function | ScalarKind::Tuple(_) => {
            return Err(Error::UnhandledType(kind.to_string()))
        }
    };
    Ok(value)
}

// ── Integers ──────────────────────────────────────────────

fn check_decimal(text: &str, signed: bool) -> Result<()> {
    let digits = if signed {
        text.strip_prefix('-').unwrap_or(text)
    } else {
        text
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::FormatError(format!("invalid integer '{}'", text)));
    }
    Ok(())
}

fn range_error(text: &str, ty: String) -> Error {
    Error::RangeError {
        value: text.to_string(),
        ty,
    }
}

/// Parse a signed decimal integer of the given bit width
pub fn str_to_int(bits: usize, text: &str) -> Result<IntValue> {
    check_decimal(text, true)?;
    let ty = format!("int{}", bits);
    let value = match bits {
        8 => IntValue::I8(text.parse().map_err(|_| range_error(text, ty))?),
        16 => IntValue::I16(text.parse().map_err(|_| range_error(text, ty))?),
        32 => IntValue::I32(text.parse().map_err(|_| range_error(text, ty))?),
        64 => IntValue::I64(text.parse().map_err(|_| range_error(text, ty))?),
        _ => {
            let value = BigInt::parse_bytes(text.as_bytes(), 10)
                .ok_or_else(|| Error::FormatError(format!("invalid integer '{}'", text)))?;
            let limit = BigInt::from(1u8) << (bits - 1);
            let min = -limit.clone();
            let max = limit - BigInt::from(1u8);
            if value < min || value > max {
                return Err(range_error(text, ty));
            }
            IntValue::Big { bits, value }
        }
    };
    Ok(value)
}

/// Parse an unsigned decimal integer of the given bit width
pub fn str_to_uint(bits: usize, text: &str) -> Result<UintValue> {
    let ty = format!("uint{}", bits);
    if text.starts_with('-') {
        check_decimal(text, true)?;
        return Err(range_error(text, ty));
    }
    check_decimal(text, false)?;
    let value = match bits {
        8 => UintValue::U8(text.parse().map_err(|_| range_error(text, ty))?),
        16 => UintValue::U16(text.parse().map_err(|_| range_error(text, ty))?),
        32 => UintValue::U32(text.parse().map_err(|_| range_error(text, ty))?),
        64 => UintValue::U64(text.parse().map_err(|_| range_error(text, ty))?),
        _ => {
            let value = BigUint::parse_bytes(text.as_bytes(), 10)
                .ok_or_else(|| Error::FormatError(format!("invalid integer '{}'", text)))?;
            if value.bits() > bits as u64 {
                return Err(range_error(text, ty));
            }
            UintValue::Big { bits, value }
        }
    };
    Ok(value)
}

// ── Booleans & strings ────────────────────────────────────

pub fn str_to_bool(text: &str) -> Result<bool> {
    if text.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if text.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(Error::FormatError(format!("invalid boolean '{}'", text)))
    }
}

/// Strings arrive already unescaped by the tokenizer
pub fn str_to_string(text: &str) -> String {
    text.to_string()
}

// ── Hex kinds ─────────────────────────────────────────────

fn decode_hex(text: &str) -> Result<Vec<u8>> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    hex::decode(digits).map_err(|e| Error::FormatError(format!("invalid hex '{}': {}", text, e)))
}

fn decode_exact<const N: usize>(what: &str, text: &str) -> Result<[u8; N]> {
    let bytes = decode_hex(text)?;
    <[u8; N]>::try_from(bytes.as_slice()).map_err(|_| {
        Error::FormatError(format!(
            "invalid {} '{}': expected {} bytes, found {}",
            what,
            text,
            N,
            bytes.len()
        ))
    })
}

pub fn str_to_address(text: &str) -> Result<[u8; 20]> {
    decode_exact::<20>("address", text)
}

pub fn str_to_hash(text: &str) -> Result<[u8; 32]> {
    decode_exact::<32>("hash", text)
}

/// Decode a byte string; `size` is the declared length of `bytes<N>` kinds
pub fn str_to_bytes(size: Option<usize>, text: &str) -> Result<Vec<u8>> {
    let bytes = decode_hex(text)?;
    if let Some(size) = size {
        if bytes.len() != size {
            return Err(Error::FormatError(format!(
                "invalid bytes{} '{}': found {} bytes",
                size,
                text,
                bytes.len()
            )));
        }
    }
    Ok(bytes)
}
