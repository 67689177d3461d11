//! Arithmetic logic unit
//!
//! Binary register operations. The result always lands in the first operand
//! register, truncated to 8 bits.

use crate::bytecode::Opcode;
use crate::error::RuntimeError;
use crate::registers::Registers;

/// Operation supported by the ALU
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AluOp {
    Add,
    Mul,
}

impl AluOp {
    /// Compute the 8-bit result of `a op b`
    pub fn compute(self, a: u8, b: u8) -> u8 {
        match self {
            AluOp::Add => a.wrapping_add(b),
            AluOp::Mul => a.wrapping_mul(b),
        }
    }
}

impl TryFrom<Opcode> for AluOp {
    type Error = RuntimeError;

    fn try_from(opcode: Opcode) -> Result<Self, Self::Error> {
        let unsupported = RuntimeError::UnsupportedAluOperation {
            opcode: opcode.byte(),
        };
        if !opcode.is_alu() {
            return Err(unsupported);
        }
        match opcode {
            Opcode::Add => Ok(AluOp::Add),
            Opcode::Mul => Ok(AluOp::Mul),
            _ => Err(unsupported),
        }
    }
}

/// regA = regA `op` regB
pub fn apply(op: AluOp, registers: &mut Registers, reg_a: u8, reg_b: u8) -> Result<(), RuntimeError> {
    let a = registers.get(reg_a)?;
    let b = registers.get(reg_b)?;
    registers.set(reg_a, op.compute(a, b))
}
