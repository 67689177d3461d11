//! CPU profiling and instrumentation
//!
//! Counts executed instructions per opcode. The CPU only records when a
//! profiler is attached (see `Cpu::with_profiling`).

use crate::bytecode::Opcode;
use std::collections::HashMap;

/// Per-opcode execution counter
#[derive(Debug, Clone, Default)]
pub struct Profiler {
    /// Total instructions executed
    total_instructions: u64,
    /// Instructions executed per opcode
    instruction_counts: HashMap<Opcode, u64>,
}

impl Profiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an instruction execution
    pub fn record_instruction(&mut self, opcode: Opcode) {
        self.total_instructions += 1;
        *self.instruction_counts.entry(opcode).or_insert(0) += 1;
    }

    pub fn total_instructions(&self) -> u64 {
        self.total_instructions
    }

    /// Get instruction count for a specific opcode
    pub fn instruction_count(&self, opcode: Opcode) -> u64 {
        self.instruction_counts.get(&opcode).copied().unwrap_or(0)
    }

    /// Generate a profiling report
    ///
    /// Opcodes are listed by count, highest first, ties by opcode byte.
    pub fn report(&self) -> String {
        let mut report = format!(
            "Total instructions executed: {}\n\n",
            self.total_instructions
        );

        if self.instruction_counts.is_empty() {
            report.push_str("No instructions recorded\n");
            return report;
        }

        report.push_str("Instruction counts by opcode:\n");

        let mut counts: Vec<_> = self.instruction_counts.iter().collect();
        counts.sort_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)));

        for (opcode, count) in counts {
            let percentage = (*count as f64 / self.total_instructions as f64) * 100.0;
            report.push_str(&format!(
                "  {:<6} {:>10} ({:>6.2}%)\n",
                opcode.mnemonic(),
                count,
                percentage
            ));
        }

        report
    }
}
