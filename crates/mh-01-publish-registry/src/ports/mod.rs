//! # Ports
//!
//! Trait interfaces between the registry subsystem and its collaborators.

pub mod outbound;
