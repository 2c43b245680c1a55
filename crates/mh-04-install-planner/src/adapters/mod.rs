//! # Adapters
//!
//! In-memory implementation of the transaction gateway, used in tests and
//! as a reference implementation. A production adapter wrapping a chain
//! SDK lives with the host application.

pub mod gateway;

pub use gateway::InMemoryGateway;
