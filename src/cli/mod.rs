//! CLI module for crossrun
//!
//! ## Usage
//!
//! - `crossrun [-b BACKEND] [--srcdir DIR] -- <COMMAND>...` - run a test program once per backend
//! - `crossrun --list` - list the backends available in this build
//! - `crossrun --capabilities` - list the capability vocabulary
//!
//! ## Modules
//!
//! - `commands` - Command implementations
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::Parser;

use crate::harness::ReportFormat;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
    /// The run was aborted by a harness failure (`EX_SOFTWARE`).
    pub const HARNESS_FAILURE: ExitCode = ExitCode(70);
    /// Largest exit code a completed run reports; everything above it is reserved for aborts.
    pub const MAX_AGGREGATE: ExitCode = ExitCode(Self::HARNESS_FAILURE.0 - 1);

    /// Exit code for a completed run with the given aggregate result.
    ///
    /// Aggregates at or above [`Self::HARNESS_FAILURE`] saturate to [`Self::MAX_AGGREGATE`], so a run whose suite
    /// itself exits with `EX_SOFTWARE` still reads as a completed, failing run rather than an abort.
    pub fn from_aggregate(aggregate: u32) -> Self {
        match i32::try_from(aggregate) {
            Ok(code) if code < Self::HARNESS_FAILURE.0 => ExitCode(code),
            _ => Self::MAX_AGGREGATE,
        }
    }
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Run one test program once per storage backend
#[derive(Parser, Debug)]
#[command(name = "crossrun")]
#[command(version = VERSION)]
#[command(about = "Run one test suite once per storage backend", long_about = None)]
pub struct Cli {
    /// Only run this backend, or backends in its family (e.g. `chert`, `remoteprog`)
    #[arg(short = 'b', long = "backend", value_name = "BACKEND", default_value = "")]
    pub backend: String,

    /// Source root; backends are pointed at `<DIR>/testdata`
    #[arg(long, value_name = "DIR")]
    pub srcdir: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Also report skipped backends and per-backend results
    #[arg(short, long)]
    pub verbose: bool,

    /// List the backends available in this build and exit
    #[arg(long, conflicts_with_all = ["capabilities", "command"])]
    pub list: bool,

    /// List the capability vocabulary and exit
    #[arg(long, conflicts_with = "command")]
    pub capabilities: bool,

    /// Test program (and its arguments) to run once per selected backend
    #[arg(value_name = "COMMAND", trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<OsString>,
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    if cli.list {
        return commands::list_backends();
    }
    if cli.capabilities {
        return commands::list_capabilities();
    }
    commands::run_backends(cli)
}

// ============================================================================
// Tests
// ============================================================================
