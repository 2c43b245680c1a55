//! # Ports
//!
//! Trait interfaces between the install planner and the transaction layer.

pub mod outbound;
