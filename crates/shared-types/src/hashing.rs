//! # Hashing
//!
//! Keccak-256, used for EIP-55 address checksums, function selectors, and
//! bytecode fingerprints.

use crate::value_objects::Hash;
use sha3::{Digest, Keccak256};

/// Computes the Keccak-256 digest of `data`.
#[must_use]
pub fn keccak256(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    let digest = hasher.finalize();

    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&digest);
    Hash::new(bytes)
}
