//! Run command - execute an LS-8 program image

use anyhow::{bail, Context, Result};
use ls8_runtime::{Cpu, ProgramImage};
use std::path::PathBuf;

/// Options for a single run, already merged from config, env and flags
#[derive(Debug, Clone, Default)]
pub struct RunArgs {
    pub program: PathBuf,
    pub trace: bool,
    pub stats: bool,
    pub max_steps: Option<u64>,
}

/// Load the image and execute it until HLT
///
/// PRN output goes to stdout; trace lines and the stats report go to stderr.
pub fn run(args: &RunArgs) -> Result<()> {
    let image = ProgramImage::from_file(&args.program)?;

    let mut cpu = if args.stats {
        Cpu::with_profiling()
    } else {
        Cpu::new()
    };
    cpu.load(&image).with_context(|| {
        format!(
            "program image {} does not fit in memory ({} bytes)",
            args.program.display(),
            image.len()
        )
    })?;

    let result = execute(&mut cpu, args);

    // Counts are still useful when the program faulted
    if let Some(profiler) = cpu.profiler() {
        eprint!("{}", profiler.report());
    }

    result
}

fn execute(cpu: &mut Cpu, args: &RunArgs) -> Result<()> {
    if !args.trace && args.max_steps.is_none() {
        cpu.run()?;
        return Ok(());
    }

    cpu.start();
    while cpu.is_running() {
        if let Some(limit) = args.max_steps {
            if cpu.steps() >= limit {
                bail!(
                    "step limit of {} instructions reached at address {}",
                    limit,
                    cpu.pc()
                );
            }
        }
        if args.trace {
            eprintln!("{}", cpu.trace_line());
        }
        cpu.step()?;
    }
    Ok(())
}
