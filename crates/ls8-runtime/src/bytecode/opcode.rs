//! LS-8 instruction set
//!
//! Nine opcodes. The opcode byte carries its own metadata:
//!
//! ```text
//!   7 6   5   4   3 2 1 0
//!  +---+---+---+---------+
//!  | N | A | P |   id    |
//!  +---+---+---+---------+
//!  N = number of operand bytes (0-2)
//!  A = ALU operation
//!  P = instruction sets PC itself
//! ```

/// Mask of the operand-count field
const OPERAND_COUNT_MASK: u8 = 0b1100_0000;
/// Shift of the operand-count field
const OPERAND_COUNT_SHIFT: u8 = 6;
/// Set when the instruction is dispatched through the ALU
const ALU_FLAG: u8 = 0b0010_0000;
/// Set when the handler writes PC itself
const SETS_PC_FLAG: u8 = 0b0001_0000;

/// Bytecode opcode (9 instructions)
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Opcode {
    /// Halt the machine
    Hlt = 0b0000_0001,
    /// Load immediate [reg, value]
    Ldi = 0b1000_0010,
    /// Print register in decimal [reg]
    Prn = 0b0100_0111,
    /// regA = regA + regB [regA, regB]
    Add = 0b1010_0000,
    /// regA = regA * regB [regA, regB]
    Mul = 0b1010_0010,
    /// Push register onto the stack [reg]
    Push = 0b0100_0101,
    /// Pop top of stack into register [reg]
    Pop = 0b0100_0110,
    /// Call subroutine at address held in register [reg]
    Call = 0b0101_0000,
    /// Return from subroutine
    Ret = 0b0001_0001,
}

impl Opcode {
    /// Every opcode, in table order
    pub const ALL: [Opcode; 9] = [
        Opcode::Hlt,
        Opcode::Ldi,
        Opcode::Prn,
        Opcode::Add,
        Opcode::Mul,
        Opcode::Push,
        Opcode::Pop,
        Opcode::Call,
        Opcode::Ret,
    ];

    /// Raw encoding
    pub const fn byte(self) -> u8 {
        self as u8
    }

    /// Number of operand bytes following the opcode, read from bits 6-7
    pub const fn operand_count(self) -> usize {
        ((self as u8 & OPERAND_COUNT_MASK) >> OPERAND_COUNT_SHIFT) as usize
    }

    /// Whether the handler moves PC itself (bit 4)
    pub const fn sets_pc(self) -> bool {
        self as u8 & SETS_PC_FLAG != 0
    }

    /// Whether the instruction goes through the ALU (bit 5)
    pub const fn is_alu(self) -> bool {
        self as u8 & ALU_FLAG != 0
    }

    /// Encoded length of the instruction, opcode byte included
    pub const fn instruction_len(self) -> usize {
        self.operand_count() + 1
    }

    /// Assembly mnemonic
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Hlt => "HLT",
            Opcode::Ldi => "LDI",
            Opcode::Prn => "PRN",
            Opcode::Add => "ADD",
            Opcode::Mul => "MUL",
            Opcode::Push => "PUSH",
            Opcode::Pop => "POP",
            Opcode::Call => "CALL",
            Opcode::Ret => "RET",
        }
    }
}

impl TryFrom<u8> for Opcode {
    type Error = ();

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        crate::cpu::dispatch::decode_opcode(byte).ok_or(())
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.mnemonic())
    }
}
