//! Instruction set, decoding and disassembly

mod disasm;
mod instruction;
mod opcode;

pub use disasm::disassemble;
pub use instruction::Instruction;
pub use opcode::Opcode;
