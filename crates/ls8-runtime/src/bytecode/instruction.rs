//! Decoded instructions
//!
//! Decoding turns the opcode byte at an address into an [`Instruction`]
//! carrying exactly the operands that opcode declares. Operand bytes past
//! the declared count are never read.

use super::Opcode;
use crate::cpu::dispatch::decode_opcode;
use crate::error::RuntimeError;
use crate::memory::Memory;
use std::fmt;

/// A fully decoded instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Hlt,
    Ldi { reg: u8, value: u8 },
    Prn { reg: u8 },
    Add { a: u8, b: u8 },
    Mul { a: u8, b: u8 },
    Push { reg: u8 },
    Pop { reg: u8 },
    Call { reg: u8 },
    Ret,
}

impl Instruction {
    /// Decode the instruction stored at `address`
    ///
    /// Fails with [`RuntimeError::UnknownOpcode`] if the byte is not in the
    /// opcode table, or [`RuntimeError::OutOfBounds`] if an operand would lie
    /// past the end of memory.
    pub fn decode(memory: &Memory, address: usize) -> Result<Self, RuntimeError> {
        let byte = memory.read(address)?;
        let opcode = decode_opcode(byte).ok_or(RuntimeError::UnknownOpcode {
            opcode: byte,
            address,
        })?;

        let mut operands = [0u8; 2];
        for (i, operand) in operands.iter_mut().take(opcode.operand_count()).enumerate() {
            *operand = memory.read(address + 1 + i)?;
        }

        Ok(Self::from_parts(opcode, operands))
    }

    /// Build an instruction from an opcode and its (already fetched) operands
    ///
    /// Operands beyond the opcode's operand count are ignored.
    pub fn from_parts(opcode: Opcode, operands: [u8; 2]) -> Self {
        let [a, b] = operands;
        match opcode {
            Opcode::Hlt => Instruction::Hlt,
            Opcode::Ldi => Instruction::Ldi { reg: a, value: b },
            Opcode::Prn => Instruction::Prn { reg: a },
            Opcode::Add => Instruction::Add { a, b },
            Opcode::Mul => Instruction::Mul { a, b },
            Opcode::Push => Instruction::Push { reg: a },
            Opcode::Pop => Instruction::Pop { reg: a },
            Opcode::Call => Instruction::Call { reg: a },
            Opcode::Ret => Instruction::Ret,
        }
    }

    pub fn opcode(&self) -> Opcode {
        match self {
            Instruction::Hlt => Opcode::Hlt,
            Instruction::Ldi { .. } => Opcode::Ldi,
            Instruction::Prn { .. } => Opcode::Prn,
            Instruction::Add { .. } => Opcode::Add,
            Instruction::Mul { .. } => Opcode::Mul,
            Instruction::Push { .. } => Opcode::Push,
            Instruction::Pop { .. } => Opcode::Pop,
            Instruction::Call { .. } => Opcode::Call,
            Instruction::Ret => Opcode::Ret,
        }
    }

    /// Encode back into bytes (opcode first)
    pub fn encode(&self) -> Vec<u8> {
        let mut bytes = vec![self.opcode().byte()];
        match *self {
            Instruction::Hlt | Instruction::Ret => {}
            Instruction::Prn { reg }
            | Instruction::Push { reg }
            | Instruction::Pop { reg }
            | Instruction::Call { reg } => bytes.push(reg),
            Instruction::Ldi { reg, value } => bytes.extend([reg, value]),
            Instruction::Add { a, b } | Instruction::Mul { a, b } => bytes.extend([a, b]),
        }
        bytes
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mnemonic = self.opcode().mnemonic();
        match *self {
            Instruction::Hlt | Instruction::Ret => write!(f, "{}", mnemonic),
            Instruction::Prn { reg }
            | Instruction::Push { reg }
            | Instruction::Pop { reg }
            | Instruction::Call { reg } => write!(f, "{} R{}", mnemonic, reg),
            Instruction::Ldi { reg, value } => write!(f, "{} R{},{}", mnemonic, reg, value),
            Instruction::Add { a, b } | Instruction::Mul { a, b } => {
                write!(f, "{} R{},R{}", mnemonic, a, b)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MEMORY_SIZE;

    fn memory_with(bytes: &[u8], at: usize) -> Memory {
        let mut memory = Memory::new();
        for (i, byte) in bytes.iter().enumerate() {
            memory.write(at + i, *byte).unwrap();
        }
        memory
    }

    #[test]
    fn test_decode_two_operands() {
        let memory = memory_with(&[0b1000_0010, 3, 42], 0);
        assert_eq!(
            Instruction::decode(&memory, 0).unwrap(),
            Instruction::Ldi { reg: 3, value: 42 }
        );
    }

    #[test]
    fn test_decode_one_operand() {
        let memory = memory_with(&[0b0100_0111, 5], 10);
        assert_eq!(
            Instruction::decode(&memory, 10).unwrap(),
            Instruction::Prn { reg: 5 }
        );
    }

    #[test]
    fn test_decode_unknown_opcode() {
        let memory = memory_with(&[0b1111_1111], 0);
        assert!(matches!(
            Instruction::decode(&memory, 0),
            Err(RuntimeError::UnknownOpcode {
                opcode: 0xFF,
                address: 0
            })
        ));
    }

    #[test]
    fn test_zero_operand_instruction_at_top_of_memory() {
        let memory = memory_with(&[Opcode::Hlt.byte()], MEMORY_SIZE - 1);
        assert_eq!(
            Instruction::decode(&memory, MEMORY_SIZE - 1).unwrap(),
            Instruction::Hlt
        );
    }

    #[test]
    fn test_operand_past_top_of_memory() {
        let memory = memory_with(&[Opcode::Ldi.byte(), 0], MEMORY_SIZE - 2);
        assert!(matches!(
            Instruction::decode(&memory, MEMORY_SIZE - 2),
            Err(RuntimeError::OutOfBounds { address: 256 })
        ));
    }

    #[test]
    fn test_encode_matches_decode() {
        let ins = Instruction::Mul { a: 0, b: 1 };
        let memory = memory_with(&ins.encode(), 0);
        assert_eq!(Instruction::decode(&memory, 0).unwrap(), ins);
        assert_eq!(ins.encode().len(), Opcode::Mul.instruction_len());
    }

    #[test]
    fn test_display() {
        assert_eq!(Instruction::Ldi { reg: 0, value: 8 }.to_string(), "LDI R0,8");
        assert_eq!(Instruction::Mul { a: 0, b: 1 }.to_string(), "MUL R0,R1");
        assert_eq!(Instruction::Call { reg: 1 }.to_string(), "CALL R1");
        assert_eq!(Instruction::Ret.to_string(), "RET");
    }
}
