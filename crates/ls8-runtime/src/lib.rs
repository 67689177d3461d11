//! LS-8 Runtime - Core emulator implementation
//!
//! This library provides the complete LS-8 machine including:
//! - Memory and register file model
//! - Opcode table, instruction decoding and the ALU
//! - The fetch-decode-execute loop
//! - Program image loading and disassembly

/// LS-8 runtime version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Public API modules
pub mod alu;
pub mod bytecode;
pub mod cpu;
pub mod diagnostic;
pub mod error;
pub mod image;
pub mod memory;
pub mod output;
pub mod registers;

// Re-export commonly used types
pub use alu::AluOp;
pub use bytecode::{disassemble, Instruction, Opcode};
pub use cpu::{Cpu, CpuState, Profiler};
pub use diagnostic::{error_codes, Diagnostic};
pub use error::RuntimeError;
pub use image::{ImageError, ProgramImage};
pub use memory::{Memory, MEMORY_SIZE};
pub use output::{capture_writer, stdout_writer, CaptureBuffer, OutputWriter};
pub use registers::{Registers, REGISTER_COUNT, STACK_POINTER, STACK_POINTER_INIT};
