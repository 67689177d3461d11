//! Program image disassembler
//!
//! Converts a loaded image back to a human-readable listing.
//! Used by `ls8 --disasm` and in tests.

use super::Instruction;
use crate::cpu::dispatch::decode_opcode;
use crate::image::ProgramImage;
use std::fmt::Write;

/// Disassemble a program image
///
/// # Format
/// ```text
/// 00  LDI R0,8
/// 03  PRN R0
/// 05  HLT
/// ```
///
/// Bytes that are not opcodes are listed as data (`.byte 0b...`) and the
/// listing continues at the next byte. An instruction whose operands run
/// past the end of the image is printed as `<truncated MNEMONIC>`.
pub fn disassemble(image: &ProgramImage) -> String {
    let bytes = image.bytes();
    let mut output = String::new();
    let mut offset = 0;
    while offset < bytes.len() {
        let line = disassemble_instruction(bytes, &mut offset);
        // Writing to a String cannot fail
        let _ = writeln!(output, "{}", line);
    }
    output
}

/// Disassemble a single instruction at the given offset
///
/// Advances offset past the instruction and its operands.
fn disassemble_instruction(bytes: &[u8], offset: &mut usize) -> String {
    let start = *offset;
    let byte = bytes[start];
    *offset += 1;

    let opcode = match decode_opcode(byte) {
        Some(op) => op,
        None => return format!("{:02X}  .byte {:#010b}", start, byte),
    };

    let count = opcode.operand_count();
    if start + count >= bytes.len() {
        *offset = bytes.len();
        return format!("{:02X}  <truncated {}>", start, opcode);
    }

    let mut operands = [0u8; 2];
    operands[..count].copy_from_slice(&bytes[start + 1..start + 1 + count]);
    *offset += count;

    format!("{:02X}  {}", start, Instruction::from_parts(opcode, operands))
}
