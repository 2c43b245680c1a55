//! # ABI Type Descriptors
//!
//! Parsed form of the textual type descriptors used by the ABI
//! (`uint256`, `address[]`, `tuple(...)`, ...). Parsing resolves tuple
//! layouts from the parameter's `components` declarations.

use crate::errors::AbiError;
use crate::model::AbiParam;
use std::fmt;

/// A fully resolved ABI type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AbiType {
    /// `address` - 20-byte account address.
    Address,
    /// `bool`.
    Bool,
    /// `uintN` - unsigned integer of N bits (8..=256, multiple of 8).
    Uint(usize),
    /// `intN` - signed integer of N bits, two's complement.
    Int(usize),
    /// `bytesN` - fixed byte string of N bytes (1..=32).
    FixedBytes(usize),
    /// `bytes` - dynamic byte string.
    Bytes,
    /// `string` - dynamic UTF-8 string.
    String,
    /// `T[]` - dynamic array.
    Array(Box<AbiType>),
    /// `T[k]` - fixed-size array.
    FixedArray(Box<AbiType>, usize),
    /// `tuple` - ordered fields, resolved from `components`.
    Tuple(Vec<AbiType>),
}

impl AbiType {
    /// Parses a type descriptor, resolving `tuple` against `components`.
    pub fn parse(descriptor: &str, components: Option<&[AbiParam]>) -> Result<Self, AbiError> {
        let descriptor = descriptor.trim();

        // Array suffixes bind outermost-last: `tuple[2][]` is a dynamic
        // array of fixed arrays of tuples.
        if let Some(stripped) = descriptor.strip_suffix(']') {
            let open = stripped
                .rfind('[')
                .ok_or_else(|| AbiError::UnsupportedType(descriptor.to_string()))?;
            let inner = Self::parse(&stripped[..open], components)?;
            let size = &stripped[open + 1..];
            return if size.is_empty() {
                Ok(Self::Array(Box::new(inner)))
            } else {
                let count: usize = size
                    .parse()
                    .map_err(|_| AbiError::UnsupportedType(descriptor.to_string()))?;
                Ok(Self::FixedArray(Box::new(inner), count))
            };
        }

        match descriptor {
            "address" => Ok(Self::Address),
            "bool" => Ok(Self::Bool),
            "bytes" => Ok(Self::Bytes),
            "string" => Ok(Self::String),
            "uint" => Ok(Self::Uint(256)),
            "int" => Ok(Self::Int(256)),
            "tuple" => {
                let fields = components
                    .ok_or_else(|| AbiError::Malformed("tuple without components".to_string()))?;
                let types = fields
                    .iter()
                    .map(|field| Self::parse(&field.ty, field.components.as_deref()))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Self::Tuple(types))
            }
            _ => {
                if let Some(bits) = descriptor.strip_prefix("uint") {
                    return parse_bits(bits, descriptor).map(Self::Uint);
                }
                if let Some(bits) = descriptor.strip_prefix("int") {
                    return parse_bits(bits, descriptor).map(Self::Int);
                }
                if let Some(width) = descriptor.strip_prefix("bytes") {
                    let n: usize = width
                        .parse()
                        .map_err(|_| AbiError::UnsupportedType(descriptor.to_string()))?;
                    if (1..=32).contains(&n) {
                        return Ok(Self::FixedBytes(n));
                    }
                    return Err(AbiError::UnsupportedType(descriptor.to_string()));
                }
                Err(AbiError::UnsupportedType(descriptor.to_string()))
            }
        }
    }

    /// Parses the full type of a declared parameter.
    pub fn of_param(param: &AbiParam) -> Result<Self, AbiError> {
        Self::parse(&param.ty, param.components.as_deref())
    }

    /// True for types encoded behind an offset (tail encoding).
    #[must_use]
    pub fn is_dynamic(&self) -> bool {
        match self {
            Self::Bytes | Self::String | Self::Array(_) => true,
            Self::FixedArray(inner, _) => inner.is_dynamic(),
            Self::Tuple(fields) => fields.iter().any(AbiType::is_dynamic),
            _ => false,
        }
    }

    /// Number of 32-byte words this type occupies in its enclosing head.
    ///
    /// Dynamic types occupy exactly one word (the offset).
    #[must_use]
    pub fn head_words(&self) -> usize {
        if self.is_dynamic() {
            return 1;
        }
        match self {
            Self::FixedArray(inner, count) => inner.head_words() * count,
            Self::Tuple(fields) => fields.iter().map(AbiType::head_words).sum(),
            _ => 1,
        }
    }

    /// Canonical descriptor used in function signatures.
    ///
    /// Tuples render as parenthesized component lists, per the ABI
    /// signature convention.
    #[must_use]
    pub fn canonical(&self) -> String {
        match self {
            Self::Address => "address".to_string(),
            Self::Bool => "bool".to_string(),
            Self::Uint(bits) => format!("uint{bits}"),
            Self::Int(bits) => format!("int{bits}"),
            Self::FixedBytes(n) => format!("bytes{n}"),
            Self::Bytes => "bytes".to_string(),
            Self::String => "string".to_string(),
            Self::Array(inner) => format!("{}[]", inner.canonical()),
            Self::FixedArray(inner, count) => format!("{}[{count}]", inner.canonical()),
            Self::Tuple(fields) => {
                let inner: Vec<String> = fields.iter().map(AbiType::canonical).collect();
                format!("({})", inner.join(","))
            }
        }
    }
}

impl fmt::Display for AbiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

fn parse_bits(bits: &str, descriptor: &str) -> Result<usize, AbiError> {
    let n: usize = bits
        .parse()
        .map_err(|_| AbiError::UnsupportedType(descriptor.to_string()))?;
    if n == 0 || n > 256 || n % 8 != 0 {
        return Err(AbiError::UnsupportedType(descriptor.to_string()));
    }
    Ok(n)
}

// =============================================================================
// TESTS
// =============================================================================
