//! Runtime errors raised by the machine

use thiserror::Error;

/// Fatal machine error
///
/// Every variant stops execution immediately. There is no resumable state
/// after one of these is returned from [`crate::Cpu::step`] or
/// [`crate::Cpu::run`].
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Memory access outside `[0, MEMORY_SIZE)`
    #[error("memory address {address:#04x} out of bounds")]
    OutOfBounds { address: usize },

    /// ALU asked to perform an operation it does not implement
    #[error("unsupported ALU operation {opcode:#010b}")]
    UnsupportedAluOperation { opcode: u8 },

    /// Instruction byte with no entry in the opcode table
    #[error("unknown instruction {opcode:#010b} at address {address}")]
    UnknownOpcode { opcode: u8, address: usize },

    /// Register operand outside `0..REGISTER_COUNT`
    #[error("invalid register R{index}")]
    InvalidRegister { index: u8 },

    /// Writing to the output channel failed
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl RuntimeError {
    /// Memory address associated with the error, if any
    pub fn address(&self) -> Option<usize> {
        match self {
            RuntimeError::OutOfBounds { address } | RuntimeError::UnknownOpcode { address, .. } => {
                Some(*address)
            }
            _ => None,
        }
    }

    /// Offending opcode byte, if any
    pub fn opcode(&self) -> Option<u8> {
        match self {
            RuntimeError::UnknownOpcode { opcode, .. }
            | RuntimeError::UnsupportedAluOperation { opcode } => Some(*opcode),
            _ => None,
        }
    }
}
