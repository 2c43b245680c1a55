//! # Ports
//!
//! Trait interfaces between the compatibility subsystem and its
//! collaborators.

pub mod outbound;
