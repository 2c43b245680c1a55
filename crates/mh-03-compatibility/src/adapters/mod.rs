//! # Adapters
//!
//! In-memory implementations of the outbound ports, used in tests and as
//! reference implementations. Production adapters backed by a chain SDK and
//! a content gateway live with the host application.

pub mod bytecode_store;
pub mod oracle;

pub use bytecode_store::InMemoryBytecodeStore;
pub use oracle::StaticOracle;
