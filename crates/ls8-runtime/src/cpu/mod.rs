//! LS-8 central processing unit
//!
//! Runs the fetch-decode-execute cycle over [`Memory`] and [`Registers`].
//! - Instructions are decoded through the static opcode table
//! - PC advances by the instruction length unless the opcode sets PC itself
//! - Every error is fatal and leaves the CPU stopped

pub mod dispatch;
mod profiler;

pub use profiler::Profiler;

use crate::alu::{self, AluOp};
use crate::bytecode::Instruction;
use crate::error::RuntimeError;
use crate::image::ProgramImage;
use crate::memory::Memory;
use crate::output::{stdout_writer, OutputWriter};
use crate::registers::Registers;
use std::fmt::Write as _;
use std::io::Write as _;

/// Lifecycle state of the CPU
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuState {
    /// Initial and terminal state
    Stopped,
    /// Executing instructions
    Running,
}

/// CPU state
pub struct Cpu {
    /// Main memory
    memory: Memory,
    /// General-purpose registers (R7 is the stack pointer)
    registers: Registers,
    /// Program counter
    pc: usize,
    /// Running flag
    state: CpuState,
    /// Destination of PRN output (defaults to stdout)
    output_writer: OutputWriter,
    /// Optional profiler for per-opcode counts
    profiler: Option<Profiler>,
    /// Instructions executed since construction
    steps: u64,
}

impl Cpu {
    /// Create a CPU in its power-on state
    pub fn new() -> Self {
        Self {
            memory: Memory::new(),
            registers: Registers::new(),
            pc: 0,
            state: CpuState::Stopped,
            output_writer: stdout_writer(),
            profiler: None,
            steps: 0,
        }
    }

    /// Create a CPU with profiling enabled
    pub fn with_profiling() -> Self {
        let mut cpu = Self::new();
        cpu.profiler = Some(Profiler::new());
        cpu
    }

    /// Set the output writer used by PRN
    pub fn set_output_writer(&mut self, writer: OutputWriter) {
        self.output_writer = writer;
    }

    /// Copy a program image into memory at address 0
    pub fn load(&mut self, image: &ProgramImage) -> Result<(), RuntimeError> {
        self.memory.load(image)
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    pub fn registers(&self) -> &Registers {
        &self.registers
    }

    pub fn pc(&self) -> usize {
        self.pc
    }

    pub fn set_pc(&mut self, pc: usize) {
        self.pc = pc;
    }

    pub fn state(&self) -> CpuState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == CpuState::Running
    }

    /// Number of instructions executed so far
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn profiler(&self) -> Option<&Profiler> {
        self.profiler.as_ref()
    }

    /// Transition Stopped -> Running without executing anything
    pub fn start(&mut self) {
        self.state = CpuState::Running;
    }

    /// Run until HLT or a fatal error
    pub fn run(&mut self) -> Result<(), RuntimeError> {
        self.start();
        tracing::debug!(pc = self.pc, "cpu started");

        while self.is_running() {
            self.step()?;
        }

        tracing::debug!(pc = self.pc, steps = self.steps, "cpu halted");
        Ok(())
    }

    /// Execute exactly one instruction
    ///
    /// On error the CPU is left in [`CpuState::Stopped`].
    pub fn step(&mut self) -> Result<(), RuntimeError> {
        let result = self.execute_next();
        if let Err(ref err) = result {
            self.state = CpuState::Stopped;
            tracing::debug!(pc = self.pc, error = %err, "cpu stopped on error");
        }
        result
    }

    fn execute_next(&mut self) -> Result<(), RuntimeError> {
        let pc = self.pc;
        let instruction = Instruction::decode(&self.memory, pc)?;
        let opcode = instruction.opcode();
        tracing::trace!(pc, %instruction, "execute");

        if let Some(ref mut profiler) = self.profiler {
            profiler.record_instruction(opcode);
        }
        self.steps += 1;

        self.execute(instruction)?;

        if !opcode.sets_pc() {
            self.pc = pc + opcode.instruction_len();
        }
        Ok(())
    }

    fn execute(&mut self, instruction: Instruction) -> Result<(), RuntimeError> {
        match instruction {
            Instruction::Hlt => {
                self.state = CpuState::Stopped;
            }
            Instruction::Ldi { reg, value } => {
                self.registers.set(reg, value)?;
            }
            Instruction::Prn { reg } => {
                let value = self.registers.get(reg)?;
                let mut out = self.output_writer.lock().unwrap_or_else(|e| e.into_inner());
                writeln!(out, "{}", value)?;
                out.flush()?;
            }
            Instruction::Add { a, b } | Instruction::Mul { a, b } => {
                let op = AluOp::try_from(instruction.opcode())?;
                alu::apply(op, &mut self.registers, a, b)?;
            }
            Instruction::Push { reg } => {
                let sp = self.registers.stack_pointer().wrapping_sub(1);
                self.registers.set_stack_pointer(sp);
                let value = self.registers.get(reg)?;
                self.memory.write(sp as usize, value)?;
            }
            Instruction::Pop { reg } => {
                let value = self.memory.read(self.registers.stack_pointer() as usize)?;
                self.registers.set(reg, value)?;
                let sp = self.registers.stack_pointer().wrapping_add(1);
                self.registers.set_stack_pointer(sp);
            }
            Instruction::Call { reg } => {
                let return_address = self.pc + instruction.opcode().instruction_len();
                let return_byte = u8::try_from(return_address).map_err(|_| {
                    RuntimeError::OutOfBounds {
                        address: return_address,
                    }
                })?;
                self.push_value(return_byte)?;
                self.pc = self.registers.get(reg)? as usize;
            }
            Instruction::Ret => {
                self.pc = self.pop_value()? as usize;
            }
        }
        Ok(())
    }

    /// Push a byte onto the stack
    fn push_value(&mut self, value: u8) -> Result<(), RuntimeError> {
        let sp = self.registers.stack_pointer().wrapping_sub(1);
        self.registers.set_stack_pointer(sp);
        self.memory.write(sp as usize, value)
    }

    /// Pop a byte off the stack
    fn pop_value(&mut self) -> Result<u8, RuntimeError> {
        let sp = self.registers.stack_pointer();
        let value = self.memory.read(sp as usize)?;
        self.registers.set_stack_pointer(sp.wrapping_add(1));
        Ok(value)
    }

    /// One-line dump of the machine state
    ///
    /// ```text
    /// TRACE: 00 | 82 00 08 | 00 00 00 00 00 00 00 F4
    /// ```
    ///
    /// Bytes past the top of memory are shown as `--`.
    pub fn trace_line(&self) -> String {
        let byte_at = |address: usize| match self.memory.peek(address) {
            Some(byte) => format!("{:02X}", byte),
            None => "--".to_string(),
        };

        let mut line = format!(
            "TRACE: {:02X} | {} {} {} |",
            self.pc,
            byte_at(self.pc),
            byte_at(self.pc + 1),
            byte_at(self.pc + 2)
        );
        for value in self.registers.snapshot() {
            let _ = write!(line, " {:02X}", value);
        }
        line
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bytecode::Opcode;
    use crate::output::capture_writer;
    use crate::registers::STACK_POINTER_INIT;

    fn cpu_with(bytes: Vec<u8>) -> (Cpu, crate::output::CaptureBuffer) {
        let mut cpu = Cpu::new();
        let (writer, buffer) = capture_writer();
        cpu.set_output_writer(writer);
        cpu.load(&ProgramImage::from_bytes(bytes)).unwrap();
        (cpu, buffer)
    }

    #[test]
    fn test_power_on_state() {
        let cpu = Cpu::new();
        assert_eq!(cpu.pc(), 0);
        assert_eq!(cpu.state(), CpuState::Stopped);
        assert_eq!(cpu.registers().stack_pointer(), STACK_POINTER_INIT);
        assert_eq!(cpu.steps(), 0);
    }

    #[test]
    fn test_ldi_advances_pc_by_three() {
        let (mut cpu, _) = cpu_with(vec![Opcode::Ldi.byte(), 2, 99]);
        cpu.step().unwrap();
        assert_eq!(cpu.pc(), 3);
        assert_eq!(cpu.registers().get(2).unwrap(), 99);
    }

    #[test]
    fn test_prn_writes_decimal_line() {
        let (mut cpu, out) = cpu_with(vec![
            Opcode::Ldi.byte(),
            0,
            255,
            Opcode::Prn.byte(),
            0,
            Opcode::Hlt.byte(),
        ]);
        cpu.run().unwrap();
        assert_eq!(out.contents(), "255\n");
        assert_eq!(cpu.pc(), 6);
    }

    #[test]
    fn test_hlt_stops() {
        let (mut cpu, _) = cpu_with(vec![Opcode::Hlt.byte()]);
        cpu.run().unwrap();
        assert_eq!(cpu.state(), CpuState::Stopped);
        assert_eq!(cpu.steps(), 1);
    }

    #[test]
    fn test_push_writes_below_stack_pointer() {
        let (mut cpu, _) = cpu_with(vec![
            Opcode::Ldi.byte(),
            1,
            42,
            Opcode::Push.byte(),
            1,
            Opcode::Hlt.byte(),
        ]);
        cpu.run().unwrap();
        assert_eq!(cpu.registers().stack_pointer(), 0xF3);
        assert_eq!(cpu.memory().read(0xF3).unwrap(), 42);
    }

    #[test]
    fn test_call_pushes_return_address() {
        // 00: LDI R1,6  03: CALL R1  05: HLT  06: RET
        let (mut cpu, _) = cpu_with(vec![
            Opcode::Ldi.byte(),
            1,
            6,
            Opcode::Call.byte(),
            1,
            Opcode::Hlt.byte(),
            Opcode::Ret.byte(),
        ]);
        cpu.step().unwrap();
        cpu.step().unwrap();
        assert_eq!(cpu.pc(), 6);
        assert_eq!(cpu.registers().stack_pointer(), 0xF3);
        assert_eq!(cpu.memory().read(0xF3).unwrap(), 5);

        cpu.step().unwrap();
        assert_eq!(cpu.pc(), 5);
        assert_eq!(cpu.registers().stack_pointer(), STACK_POINTER_INIT);
    }

    #[test]
    fn test_unknown_opcode_stops_cpu() {
        let (mut cpu, _) = cpu_with(vec![0b1111_1111]);
        let err = cpu.run().unwrap_err();
        assert!(matches!(
            err,
            RuntimeError::UnknownOpcode {
                opcode: 0xFF,
                address: 0
            }
        ));
        assert_eq!(cpu.state(), CpuState::Stopped);
        assert_eq!(cpu.steps(), 0);
    }

    #[test]
    fn test_running_off_the_end_of_memory() {
        // LDI R0,0 repeated with nothing but zeros after it: 0x00 is unknown
        let (mut cpu, _) = cpu_with(vec![Opcode::Ldi.byte(), 0, 0]);
        let err = cpu.run().unwrap_err();
        assert!(matches!(
            err,
            RuntimeError::UnknownOpcode {
                opcode: 0,
                address: 3
            }
        ));
    }

    #[test]
    fn test_profiling_counts_instructions() {
        let mut cpu = Cpu::with_profiling();
        let (writer, _) = capture_writer();
        cpu.set_output_writer(writer);
        cpu.load(&ProgramImage::from_bytes(vec![
            Opcode::Ldi.byte(),
            0,
            1,
            Opcode::Ldi.byte(),
            1,
            2,
            Opcode::Hlt.byte(),
        ]))
        .unwrap();
        cpu.run().unwrap();
        let profiler = cpu.profiler().unwrap();
        assert_eq!(profiler.total_instructions(), 3);
        assert_eq!(profiler.instruction_count(Opcode::Ldi), 2);
    }

    #[test]
    fn test_trace_line() {
        let (cpu, _) = cpu_with(vec![Opcode::Ldi.byte(), 0, 8]);
        assert_eq!(
            cpu.trace_line(),
            "TRACE: 00 | 82 00 08 | 00 00 00 00 00 00 00 F4"
        );
    }

    #[test]
    fn test_trace_line_at_top_of_memory() {
        let (mut cpu, _) = cpu_with(Vec::new());
        cpu.set_pc(255);
        assert!(cpu.trace_line().starts_with("TRACE: FF | 00 -- -- |"));
    }

    #[test]
    fn test_profiler_attached_only_with_profiling() {
        let image = ProgramImage::from_bytes(vec![Opcode::Hlt.byte()]);

        let mut plain = Cpu::new();
        plain.load(&image).unwrap();
        plain.run().unwrap();
        assert!(plain.profiler().is_none());

        let mut profiled = Cpu::with_profiling();
        profiled.load(&image).unwrap();
        profiled.run().unwrap();
        let profiler = profiled.profiler().unwrap();
        assert_eq!(profiler.total_instructions(), 1);
        assert_eq!(profiler.instruction_count(Opcode::Hlt), 1);
    }
}
