//! Machine-readable diagnostics for fatal runtime errors

use crate::error::RuntimeError;
use serde::{Deserialize, Serialize};

/// Diagnostic schema version
pub const DIAG_VERSION: u32 = 1;

/// Stable error codes
pub mod error_codes {
    pub const OUT_OF_BOUNDS: &str = "E0001";
    pub const UNSUPPORTED_ALU_OPERATION: &str = "E0002";
    pub const UNKNOWN_OPCODE: &str = "E0003";
    pub const INVALID_REGISTER: &str = "E0004";
    pub const OUTPUT_FAILURE: &str = "E0005";
}

/// A reportable runtime failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub diag_version: u32,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<usize>,
    /// Opcode rendered in binary, e.g. `0b11111111`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opcode: Option<String>,
}

impl From<&RuntimeError> for Diagnostic {
    fn from(err: &RuntimeError) -> Self {
        let code = match err {
            RuntimeError::OutOfBounds { .. } => error_codes::OUT_OF_BOUNDS,
            RuntimeError::UnsupportedAluOperation { .. } => error_codes::UNSUPPORTED_ALU_OPERATION,
            RuntimeError::UnknownOpcode { .. } => error_codes::UNKNOWN_OPCODE,
            RuntimeError::InvalidRegister { .. } => error_codes::INVALID_REGISTER,
            RuntimeError::Output(_) => error_codes::OUTPUT_FAILURE,
        };
        Self {
            diag_version: DIAG_VERSION,
            code: code.to_string(),
            message: err.to_string(),
            address: err.address(),
            opcode: err.opcode().map(|op| format!("{:#010b}", op)),
        }
    }
}
