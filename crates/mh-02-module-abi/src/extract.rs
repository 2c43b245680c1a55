//! # Install-Parameter Extraction
//!
//! Pulls the install/uninstall parameter schemas out of a module's ABI.
//! The returned parameter lists drive dynamic configuration forms and,
//! later, call-data encoding.

use crate::model::{AbiParam, ContractAbi};
use tracing::debug;

/// Function a module declares its install-time parameters through.
pub const INSTALL_ENCODER: &str = "encodeBytesOnInstall";

/// Function a module declares its uninstall-time parameters through.
pub const UNINSTALL_ENCODER: &str = "encodeBytesOnUninstall";

/// Returns the install-time parameter schema of a module.
///
/// The declared inputs are returned verbatim; a module whose ABI lacks the
/// encoder function, or declares it with no inputs, takes no parameters and
/// yields an empty list.
#[must_use]
pub fn install_params(abi: &ContractAbi) -> Vec<AbiParam> {
    encoder_params(abi, INSTALL_ENCODER)
}

/// Returns the uninstall-time parameter schema of a module.
#[must_use]
pub fn uninstall_params(abi: &ContractAbi) -> Vec<AbiParam> {
    encoder_params(abi, UNINSTALL_ENCODER)
}

fn encoder_params(abi: &ContractAbi, encoder: &str) -> Vec<AbiParam> {
    let params = abi
        .find_function(encoder)
        .map(|entry| entry.inputs.clone())
        .unwrap_or_default();

    debug!(encoder, count = params.len(), "Extracted parameter schema");
    params
}

// =============================================================================
// TESTS
// =============================================================================
