//! # ABI Encoding
//!
//! Contract ABI encoding of parameter values: static values inline in the
//! head, dynamic values behind byte offsets with their payload in the tail.
//! Offsets are relative to the start of the enclosing tuple's encoding.
//!
//! Values are fully typechecked against the declared parameter types before
//! any bytes are produced, so error messages can name the offending
//! parameter instead of a byte position.

use crate::errors::AbiError;
use crate::model::AbiParam;
use crate::types::AbiType;
use crate::value::AbiValue;
use primitive_types::U256;
use shared_types::{keccak256, Bytes};
use tracing::trace;

/// ABI word size in bytes.
const WORD: usize = 32;

// =============================================================================
// PUBLIC API
// =============================================================================

/// Encodes `values` against the declared `params`.
///
/// This is the install-data encoding: a bare parameter tuple with no
/// function selector. An empty parameter list encodes to the empty byte
/// string.
pub fn encode_values(params: &[AbiParam], values: &[AbiValue]) -> Result<Bytes, AbiError> {
    if params.len() != values.len() {
        return Err(AbiError::ArityMismatch {
            expected: params.len(),
            actual: values.len(),
        });
    }

    let mut items = Vec::with_capacity(params.len());
    for (param, value) in params.iter().zip(values) {
        let ty = AbiType::of_param(param)?;
        typecheck(&ty, value).map_err(|e| e.named(&param.name))?;
        items.push((ty, value));
    }

    let encoded = encode_items(&items)?;
    trace!(params = params.len(), bytes = encoded.len(), "Encoded parameter tuple");
    Ok(Bytes(encoded))
}

/// Computes the 4-byte function selector for `name(params...)`.
///
/// The signature uses canonical type descriptors, with tuples expanded to
/// parenthesized component lists.
pub fn function_selector(name: &str, params: &[AbiParam]) -> Result<[u8; 4], AbiError> {
    let types = params
        .iter()
        .map(AbiType::of_param)
        .collect::<Result<Vec<_>, _>>()?;
    let descriptors: Vec<String> = types.iter().map(AbiType::canonical).collect();
    let signature = format!("{name}({})", descriptors.join(","));

    let digest = keccak256(signature.as_bytes());
    let mut selector = [0u8; 4];
    selector.copy_from_slice(&digest.as_bytes()[..4]);
    Ok(selector)
}

/// Encodes a full function call: selector followed by the encoded values.
pub fn encode_function_call(
    name: &str,
    params: &[AbiParam],
    values: &[AbiValue],
) -> Result<Bytes, AbiError> {
    let selector = function_selector(name, params)?;
    let encoded = encode_values(params, values)?;

    let mut out = Vec::with_capacity(4 + encoded.len());
    out.extend_from_slice(&selector);
    out.extend_from_slice(encoded.as_slice());
    Ok(Bytes(out))
}

// =============================================================================
// TYPECHECKING
// =============================================================================

/// Validates that `value` is encodable as `ty`, including integer ranges,
/// fixed-bytes widths, and fixed-array lengths.
fn typecheck(ty: &AbiType, value: &AbiValue) -> Result<(), AbiError> {
    match (ty, value) {
        (AbiType::Address, AbiValue::Address(_))
        | (AbiType::Bool, AbiValue::Bool(_))
        | (AbiType::Bytes, AbiValue::Bytes(_))
        | (AbiType::String, AbiValue::String(_)) => Ok(()),

        (AbiType::Uint(bits), AbiValue::Uint(word)) => {
            if *bits < 256 && !(*word >> *bits).is_zero() {
                return Err(out_of_range(format!("{word} does not fit uint{bits}")));
            }
            Ok(())
        }

        (AbiType::Int(bits), AbiValue::Int(word)) => {
            // Two's-complement range check: the bits above the sign bit
            // must be all zero (non-negative) or all one (negative).
            if *bits < 256 {
                let above_sign = *word >> (*bits - 1);
                let all_ones = U256::MAX >> (*bits - 1);
                if !above_sign.is_zero() && above_sign != all_ones {
                    return Err(out_of_range(format!("value does not fit int{bits}")));
                }
            }
            Ok(())
        }

        (AbiType::FixedBytes(width), AbiValue::FixedBytes(data)) => {
            if data.len() != *width {
                return Err(out_of_range(format!(
                    "bytes{width} expects {width} bytes, got {}",
                    data.len()
                )));
            }
            Ok(())
        }

        (AbiType::Array(inner), AbiValue::Array(items)) => {
            for item in items {
                typecheck(inner, item)?;
            }
            Ok(())
        }

        (AbiType::FixedArray(inner, count), AbiValue::Array(items)) => {
            if items.len() != *count {
                return Err(out_of_range(format!(
                    "fixed array expects {count} elements, got {}",
                    items.len()
                )));
            }
            for item in items {
                typecheck(inner, item)?;
            }
            Ok(())
        }

        (AbiType::Tuple(fields), AbiValue::Tuple(items)) => {
            if fields.len() != items.len() {
                return Err(out_of_range(format!(
                    "tuple expects {} fields, got {}",
                    fields.len(),
                    items.len()
                )));
            }
            for (field_ty, item) in fields.iter().zip(items) {
                typecheck(field_ty, item)?;
            }
            Ok(())
        }

        (expected, actual) => Err(AbiError::TypeMismatch {
            param: String::new(),
            expected: expected.canonical(),
            actual: actual.kind().to_string(),
        }),
    }
}

fn out_of_range(detail: String) -> AbiError {
    AbiError::ValueOutOfRange {
        param: String::new(),
        detail,
    }
}

// =============================================================================
// ENCODING
// =============================================================================

/// Encodes an ordered sequence of typed values as a tuple body:
/// head (static values and offsets) followed by tail (dynamic payloads).
fn encode_items(items: &[(AbiType, &AbiValue)]) -> Result<Vec<u8>, AbiError> {
    let head_len: usize = items.iter().map(|(ty, _)| ty.head_words() * WORD).sum();

    let mut head = Vec::with_capacity(head_len);
    let mut tail = Vec::new();

    for (ty, value) in items {
        if ty.is_dynamic() {
            head.extend_from_slice(&usize_word(head_len + tail.len()));
            tail.extend_from_slice(&encode_dynamic(ty, value)?);
        } else {
            encode_static(ty, value, &mut head)?;
        }
    }

    head.extend_from_slice(&tail);
    Ok(head)
}

/// Encodes a static value directly into `out`.
fn encode_static(ty: &AbiType, value: &AbiValue, out: &mut Vec<u8>) -> Result<(), AbiError> {
    match (ty, value) {
        (AbiType::Address, AbiValue::Address(address)) => {
            out.extend_from_slice(&[0u8; 12]);
            out.extend_from_slice(address.as_bytes());
            Ok(())
        }
        (AbiType::Bool, AbiValue::Bool(flag)) => {
            let mut word = [0u8; WORD];
            word[WORD - 1] = u8::from(*flag);
            out.extend_from_slice(&word);
            Ok(())
        }
        (AbiType::Uint(_), AbiValue::Uint(word)) | (AbiType::Int(_), AbiValue::Int(word)) => {
            out.extend_from_slice(&u256_word(word));
            Ok(())
        }
        (AbiType::FixedBytes(_), AbiValue::FixedBytes(data)) => {
            out.extend_from_slice(&pad_right(data));
            Ok(())
        }
        (AbiType::FixedArray(inner, _), AbiValue::Array(elements)) => {
            for element in elements {
                encode_static(inner, element, out)?;
            }
            Ok(())
        }
        (AbiType::Tuple(fields), AbiValue::Tuple(elements)) => {
            for (field_ty, element) in fields.iter().zip(elements) {
                encode_static(field_ty, element, out)?;
            }
            Ok(())
        }
        (expected, actual) => Err(AbiError::TypeMismatch {
            param: String::new(),
            expected: expected.canonical(),
            actual: actual.kind().to_string(),
        }),
    }
}

/// Encodes the standalone body of a dynamic value (the tail payload).
fn encode_dynamic(ty: &AbiType, value: &AbiValue) -> Result<Vec<u8>, AbiError> {
    match (ty, value) {
        (AbiType::Bytes, AbiValue::Bytes(data)) => Ok(length_prefixed(data)),
        (AbiType::String, AbiValue::String(text)) => Ok(length_prefixed(text.as_bytes())),

        (AbiType::Array(inner), AbiValue::Array(elements)) => {
            let items: Vec<(AbiType, &AbiValue)> = elements
                .iter()
                .map(|element| ((**inner).clone(), element))
                .collect();
            let mut out = usize_word(elements.len()).to_vec();
            out.extend_from_slice(&encode_items(&items)?);
            Ok(out)
        }

        // A fixed array lands here only when its element type is dynamic;
        // the element count is statically known, so no length prefix.
        (AbiType::FixedArray(inner, _), AbiValue::Array(elements)) => {
            let items: Vec<(AbiType, &AbiValue)> = elements
                .iter()
                .map(|element| ((**inner).clone(), element))
                .collect();
            encode_items(&items)
        }

        (AbiType::Tuple(fields), AbiValue::Tuple(elements)) => {
            let items: Vec<(AbiType, &AbiValue)> = fields
                .iter()
                .cloned()
                .zip(elements.iter())
                .collect();
            encode_items(&items)
        }

        (expected, actual) => Err(AbiError::TypeMismatch {
            param: String::new(),
            expected: expected.canonical(),
            actual: actual.kind().to_string(),
        }),
    }
}

// =============================================================================
// WORD HELPERS
// =============================================================================

fn u256_word(value: &U256) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    value.to_big_endian(&mut word);
    word
}

fn usize_word(value: usize) -> [u8; WORD] {
    u256_word(&U256::from(value))
}

/// Right-pads `data` to a word boundary.
fn pad_right(data: &[u8]) -> Vec<u8> {
    let padded_len = data.len().div_ceil(WORD) * WORD;
    let mut out = Vec::with_capacity(padded_len);
    out.extend_from_slice(data);
    out.resize(padded_len, 0);
    out
}

/// Length word followed by the right-padded payload.
fn length_prefixed(data: &[u8]) -> Vec<u8> {
    let mut out = usize_word(data.len()).to_vec();
    out.extend_from_slice(&pad_right(data));
    out
}

// =============================================================================
// TESTS
// =============================================================================
