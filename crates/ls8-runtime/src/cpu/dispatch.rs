//! Instruction dispatch table
//!
//! Uses a static lookup table for O(1) opcode decoding. The table is built
//! at compile time and never mutated.

use crate::bytecode::Opcode;

/// Static dispatch table mapping byte values to optional Opcodes.
/// Indexed by the raw u8 opcode byte.
static OPCODE_TABLE: [Option<Opcode>; 256] = {
    let mut table: [Option<Opcode>; 256] = [None; 256];
    let mut i = 0;
    while i < Opcode::ALL.len() {
        let op = Opcode::ALL[i];
        table[op.byte() as usize] = Some(op);
        i += 1;
    }
    table
};

/// Decode an opcode byte using the static lookup table.
/// Returns None for bytes with no handler.
#[inline(always)]
pub fn decode_opcode(byte: u8) -> Option<Opcode> {
    OPCODE_TABLE[byte as usize]
}
