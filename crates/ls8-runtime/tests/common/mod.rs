//! Shared test utilities
//!
//! Helpers to assemble small programs, run them with captured output, and
//! locate the sample programs shipped in `programs/`.

#![allow(dead_code)]

use ls8_runtime::{capture_writer, Cpu, Instruction, ProgramImage, RuntimeError};
use std::path::PathBuf;

/// Encode a sequence of instructions into image bytes
pub fn assemble(instructions: &[Instruction]) -> Vec<u8> {
    instructions.iter().flat_map(|ins| ins.encode()).collect()
}

/// Build a CPU with `bytes` loaded and PRN output captured
pub fn load(bytes: Vec<u8>) -> (Cpu, ls8_runtime::CaptureBuffer) {
    let mut cpu = Cpu::new();
    let (writer, buffer) = capture_writer();
    cpu.set_output_writer(writer);
    cpu.load(&ProgramImage::from_bytes(bytes))
        .expect("image fits in memory");
    (cpu, buffer)
}

/// Run a program to completion, returning the CPU and everything it printed
pub fn run_bytes(bytes: Vec<u8>) -> (Cpu, String) {
    let (mut cpu, buffer) = load(bytes);
    cpu.run().expect("program halts cleanly");
    (cpu, buffer.contents())
}

/// Run a program expected to fail
pub fn run_err(bytes: Vec<u8>) -> RuntimeError {
    let (mut cpu, _) = load(bytes);
    match cpu.run() {
        Ok(()) => panic!("Expected runtime error, program halted"),
        Err(err) => err,
    }
}

/// Path to one of the sample programs
pub fn program_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../programs")
        .join(name)
}

/// Load a sample program from disk
pub fn sample(name: &str) -> ProgramImage {
    ProgramImage::from_file(program_path(name)).expect("sample program parses")
}
