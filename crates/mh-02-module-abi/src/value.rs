//! # ABI Values
//!
//! Runtime values paired with [`AbiType`](crate::types::AbiType) for
//! encoding, plus coercion from raw JSON form values.

use crate::errors::AbiError;
use crate::types::AbiType;
use primitive_types::U256;
use shared_types::{Address, Bytes};

/// A user-supplied value for one ABI parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AbiValue {
    /// An account address.
    Address(Address),
    /// A boolean.
    Bool(bool),
    /// An unsigned integer, as a 256-bit word.
    Uint(U256),
    /// A signed integer, as a two's-complement 256-bit word.
    Int(U256),
    /// A fixed byte string (`bytesN`).
    FixedBytes(Vec<u8>),
    /// A dynamic byte string.
    Bytes(Vec<u8>),
    /// A UTF-8 string.
    String(String),
    /// An array (fixed or dynamic, per the declared type).
    Array(Vec<AbiValue>),
    /// A tuple of field values.
    Tuple(Vec<AbiValue>),
}

impl AbiValue {
    /// Short kind label for error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Address(_) => "address",
            Self::Bool(_) => "bool",
            Self::Uint(_) => "uint",
            Self::Int(_) => "int",
            Self::FixedBytes(_) => "fixed bytes",
            Self::Bytes(_) => "bytes",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Tuple(_) => "tuple",
        }
    }

    /// Convenience constructor for small uints.
    #[must_use]
    pub fn uint(value: u64) -> Self {
        Self::Uint(U256::from(value))
    }

    /// Coerces a raw JSON form value into an ABI value of type `ty`.
    ///
    /// Form fields arrive as JSON: numbers or decimal/hex strings for
    /// integers, `0x` hex strings for addresses and byte blobs, arrays for
    /// arrays and tuples.
    pub fn from_json(ty: &AbiType, raw: &serde_json::Value) -> Result<Self, AbiError> {
        use serde_json::Value;

        match ty {
            AbiType::Address => {
                let text = raw
                    .as_str()
                    .ok_or_else(|| AbiError::InvalidValue(format!("address expects a string, got {raw}")))?;
                let address = Address::from_hex(text)
                    .map_err(|e| AbiError::InvalidValue(format!("bad address {text:?}: {e}")))?;
                Ok(Self::Address(address))
            }
            AbiType::Bool => match raw {
                Value::Bool(b) => Ok(Self::Bool(*b)),
                Value::String(s) if s == "true" => Ok(Self::Bool(true)),
                Value::String(s) if s == "false" => Ok(Self::Bool(false)),
                other => Err(AbiError::InvalidValue(format!("bool expects true/false, got {other}"))),
            },
            AbiType::Uint(_) => parse_word(raw).map(Self::Uint),
            AbiType::Int(_) => parse_word(raw).map(Self::Int),
            AbiType::FixedBytes(_) => parse_hex_blob(raw).map(Self::FixedBytes),
            AbiType::Bytes => parse_hex_blob(raw).map(Self::Bytes),
            AbiType::String => {
                let text = raw
                    .as_str()
                    .ok_or_else(|| AbiError::InvalidValue(format!("string expects a string, got {raw}")))?;
                Ok(Self::String(text.to_string()))
            }
            AbiType::Array(inner) => coerce_sequence(inner, raw).map(Self::Array),
            AbiType::FixedArray(inner, count) => {
                let items = coerce_sequence(inner, raw)?;
                if items.len() != *count {
                    return Err(AbiError::InvalidValue(format!(
                        "fixed array expects {count} elements, got {}",
                        items.len()
                    )));
                }
                Ok(Self::Array(items))
            }
            AbiType::Tuple(fields) => {
                let elements = raw.as_array().ok_or_else(|| {
                    AbiError::InvalidValue(format!("tuple expects an array, got {raw}"))
                })?;
                if elements.len() != fields.len() {
                    return Err(AbiError::InvalidValue(format!(
                        "tuple expects {} fields, got {}",
                        fields.len(),
                        elements.len()
                    )));
                }
                let values = fields
                    .iter()
                    .zip(elements)
                    .map(|(field_ty, element)| Self::from_json(field_ty, element))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Self::Tuple(values))
            }
        }
    }
}

fn coerce_sequence(inner: &AbiType, raw: &serde_json::Value) -> Result<Vec<AbiValue>, AbiError> {
    let elements = raw
        .as_array()
        .ok_or_else(|| AbiError::InvalidValue(format!("array expects a JSON array, got {raw}")))?;
    elements
        .iter()
        .map(|element| AbiValue::from_json(inner, element))
        .collect()
}

fn parse_word(raw: &serde_json::Value) -> Result<U256, AbiError> {
    match raw {
        serde_json::Value::Number(n) => {
            let value = n
                .as_u64()
                .ok_or_else(|| AbiError::InvalidValue(format!("integer out of u64 range: {n}")))?;
            Ok(U256::from(value))
        }
        serde_json::Value::String(s) => {
            let text = s.trim();
            if let Some(hexdigits) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
                U256::from_str_radix(hexdigits, 16)
                    .map_err(|e| AbiError::InvalidValue(format!("bad hex integer {text:?}: {e}")))
            } else {
                U256::from_dec_str(text)
                    .map_err(|e| AbiError::InvalidValue(format!("bad integer {text:?}: {e}")))
            }
        }
        other => Err(AbiError::InvalidValue(format!(
            "integer expects a number or string, got {other}"
        ))),
    }
}

fn parse_hex_blob(raw: &serde_json::Value) -> Result<Vec<u8>, AbiError> {
    let text = raw
        .as_str()
        .ok_or_else(|| AbiError::InvalidValue(format!("bytes expects a 0x string, got {raw}")))?;
    Bytes::from_hex(text)
        .map(|b| b.0)
        .map_err(|e| AbiError::InvalidValue(format!("bad bytes {text:?}: {e}")))
}

// =============================================================================
// TESTS
// =============================================================================
