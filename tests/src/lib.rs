//! # ModHub Test Suite
//!
//! Unified test crate containing cross-subsystem choreography tests.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── install_flow.rs       # End-to-end install/uninstall flows
//!     ├── registry_consistency.rs # Latest/catalog consistency, resolver bypass
//!     └── reactivity.rs         # Cache invalidation and fail-closed gating
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p mh-tests
//!
//! # By category
//! cargo test -p mh-tests integration::
//! ```

#![allow(unused_imports)]
#![allow(dead_code)]

pub mod integration;
