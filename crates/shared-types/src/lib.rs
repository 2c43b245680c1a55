//! # Shared Types Crate
//!
//! Value objects shared by every ModHub subsystem.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-subsystem primitives are defined here.
//! - **Value semantics**: These types are defined by their value, not identity,
//!   and are immutable once constructed.
//! - **Strict parsing**: Hex input is validated on the way in (length, digits,
//!   EIP-55 checksum for mixed-case addresses); invalid data never becomes a
//!   value object.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod hashing;
pub mod value_objects;

pub use errors::ParseError;
pub use hashing::keccak256;
pub use value_objects::{Address, Bytes, ChainId, Hash};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
