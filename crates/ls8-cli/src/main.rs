use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use ls8_runtime::{Diagnostic, RuntimeError};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

/// LS-8 emulator.
///
/// Loads a program image (one binary byte per line, `#` comments allowed)
/// into the 256-byte memory of an 8-bit machine and runs it until HLT.
///
/// EXAMPLES:
///     ls8 programs/mult.ls8                Run a program
///     ls8 programs/call.ls8 --trace        Print machine state per instruction
///     ls8 programs/stack.ls8 --stats       Print instruction counts
///     ls8 programs/call.ls8 --disasm       Print a listing instead of running
///
/// ENVIRONMENT VARIABLES:
///     LS8_MAX_STEPS     Default instruction limit
///     LS8_TRACE         Set to '1' to trace by default
///     LS8_STATS         Set to '1' to print stats by default
///     LS8_DIAGNOSTICS   Set to 'json' for JSON diagnostics by default
///     LS8_LOG           Log filter (default: warn)
///     NO_COLOR          Set to disable colored output
#[derive(Parser)]
#[command(name = "ls8")]
#[command(version)]
struct Cli {
    /// Path to the program image
    program: PathBuf,

    /// Print a machine-state line per instruction to stderr
    #[arg(long, short = 't')]
    trace: bool,

    /// Print per-opcode execution counts to stderr after the run
    #[arg(long, short = 's')]
    stats: bool,

    /// Abort with a non-zero status after N instructions
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    max_steps: Option<u64>,

    /// Print a disassembly listing of the image instead of running it
    #[arg(long, short = 'd')]
    disasm: bool,

    /// Report fatal errors as a JSON diagnostic on stderr
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let cli_config = config::Config::from_env();

    init_logging(&cli_config.log_filter);
    if cli_config.no_color {
        colored::control::set_override(false);
    }

    let flag_json = cli.json || cli_config.default_json;
    let project_config = match load_project_config() {
        Ok(config) => config,
        Err(err) => {
            report(&err, flag_json);
            return ExitCode::FAILURE;
        }
    };

    // Command-line flags override configuration
    let use_json = flag_json || project_config.json();

    match execute(cli, &project_config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err, use_json);
            ExitCode::FAILURE
        }
    }
}

/// Project configuration (ls8.toml) with LS8_* overrides applied
fn load_project_config() -> Result<ls8_config::Config> {
    let config = ls8_config::ConfigLoader::new().load_from_directory(&std::env::current_dir()?)?;
    if let Some(root) = config.project_root() {
        tracing::debug!(root = %root.display(), "loaded ls8.toml");
    }
    Ok(config)
}

fn execute(cli: Cli, project_config: &ls8_config::Config) -> Result<()> {
    if cli.disasm {
        return commands::disasm::run(&cli.program);
    }

    let args = commands::run::RunArgs {
        program: cli.program,
        trace: cli.trace || project_config.trace(),
        stats: cli.stats || project_config.stats(),
        max_steps: cli.max_steps.or(project_config.max_steps()),
    };
    commands::run::run(&args)
}

fn init_logging(filter: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_new(filter).unwrap_or_else(|_| config::DEFAULT_LOG_FILTER.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Print a fatal error to stderr as a single line
fn report(err: &anyhow::Error, use_json: bool) {
    if use_json {
        let diagnostic = match err.downcast_ref::<RuntimeError>() {
            Some(runtime_err) => serde_json::to_value(Diagnostic::from(runtime_err)),
            None => Ok(serde_json::json!({ "message": format!("{:#}", err) })),
        };
        match diagnostic {
            Ok(value) => eprintln!("{}", value),
            Err(_) => eprintln!("{} {:#}", "error:".red().bold(), err),
        }
    } else {
        eprintln!("{} {:#}", "error:".red().bold(), err);
    }
}
