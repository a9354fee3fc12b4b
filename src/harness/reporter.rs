//! Run reporting
//!
//! The dispatcher reports through a [`RunReporter`] so output format is separate from dispatch. Both reporters print
//! one progress line per backend as it starts. The console reporter prints it to stdout; the JSON reporter prints it
//! to its error stream, so stdout carries nothing but the single summary object printed once the run completes.
//!
//! Both reporters write the abort banner to their error stream:
//!
//! ```text
//!
//! Test harness failed with Unknown property 'bogus' found in proplist
//! ```

use std::io::{self, Stderr, Stdout, Write};

use serde::Serialize;

use super::runner::HarnessFailure;

/// Trait for reporting dispatcher progress.
///
/// Implement this trait to customize output (TAP, JUnit, ...).
pub trait RunReporter {
    /// Called when a candidate backend is rejected by the user filter
    fn on_backend_skipped(&mut self, _name: &str) {}

    /// Called right before the suite runs against a backend
    fn on_backend_start(&mut self, name: &str);

    /// Called when the suite returned a result code for a backend
    fn on_backend_complete(&mut self, _name: &str, _result: u32) {}

    /// Called once every candidate has been processed
    fn on_run_complete(&mut self, summary: &RunSummary);

    /// Called when the run was aborted by a harness failure
    fn on_abort(&mut self, failure: &HarnessFailure);
}

/// One backend the suite ran against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackendRun {
    pub backend: String,
    pub result: u32,
}

/// Outcome of a completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Backends the suite ran against, in run order
    pub runs: Vec<BackendRun>,
    /// Backends rejected by the user filter, in candidate order
    pub skipped: Vec<String>,
    /// Worst result code seen; 0 when nothing ran
    pub aggregate: u32,
}

impl RunSummary {
    /// Record a finished backend. The aggregate only ever grows.
    pub fn record(&mut self, backend: impl Into<String>, result: u32) {
        self.aggregate = self.aggregate.max(result);
        self.runs.push(BackendRun {
            backend: backend.into(),
            result,
        });
    }

    pub fn record_skipped(&mut self, backend: impl Into<String>) {
        self.skipped.push(backend.into());
    }

    pub fn aggregate(&self) -> u32 {
        self.aggregate
    }

    /// Whether every backend that ran returned 0
    pub fn passed(&self) -> bool {
        self.aggregate == 0
    }
}

fn write_progress_line(out: &mut impl Write, name: &str) {
    let _ = writeln!(out, "Running tests with backend \"{name}\"...");
    let _ = out.flush();
}

fn write_abort_banner(err: &mut impl Write, failure: &HarnessFailure) {
    let _ = writeln!(err);
    let _ = writeln!(err, "Test harness failed with {failure}");
}

/// Default console reporter
pub struct ConsoleReporter<W: Write = Stdout, E: Write = Stderr> {
    out: W,
    err: E,
    verbose: bool,
}

impl ConsoleReporter {
    /// Reporter on the process's stdout and stderr
    pub fn stdio(verbose: bool) -> Self {
        Self::new(io::stdout(), io::stderr(), verbose)
    }
}

impl<W: Write, E: Write> ConsoleReporter<W, E> {
    pub fn new(out: W, err: E, verbose: bool) -> Self {
        Self { out, err, verbose }
    }

    /// Recover the output streams (used by tests writing to buffers).
    pub fn into_inner(self) -> (W, E) {
        (self.out, self.err)
    }
}

impl<W: Write, E: Write> RunReporter for ConsoleReporter<W, E> {
    fn on_backend_skipped(&mut self, name: &str) {
        if self.verbose {
            let _ = writeln!(self.out, "Skipping backend \"{name}\"");
        }
    }

    fn on_backend_start(&mut self, name: &str) {
        write_progress_line(&mut self.out, name);
    }

    fn on_backend_complete(&mut self, name: &str, result: u32) {
        if self.verbose {
            let _ = writeln!(self.out, "Backend \"{name}\" finished with result {result}");
        }
    }

    fn on_run_complete(&mut self, summary: &RunSummary) {
        if self.verbose {
            let _ = writeln!(
                self.out,
                "{} backend(s) run, {} skipped, overall result {}",
                summary.runs.len(),
                summary.skipped.len(),
                summary.aggregate
            );
        }
        let _ = self.out.flush();
    }

    fn on_abort(&mut self, failure: &HarnessFailure) {
        let _ = self.out.flush();
        write_abort_banner(&mut self.err, failure);
    }
}

/// Reporter printing a JSON summary once the run completes
pub struct JsonReporter<W: Write = Stdout, E: Write = Stderr> {
    out: W,
    err: E,
}

impl JsonReporter {
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }
}

impl<W: Write, E: Write> JsonReporter<W, E> {
    pub fn new(out: W, err: E) -> Self {
        Self { out, err }
    }

    pub fn into_inner(self) -> (W, E) {
        (self.out, self.err)
    }
}

impl<W: Write, E: Write> RunReporter for JsonReporter<W, E> {
    fn on_backend_start(&mut self, name: &str) {
        write_progress_line(&mut self.err, name);
    }

    fn on_run_complete(&mut self, summary: &RunSummary) {
        match serde_json::to_string_pretty(summary) {
            Ok(json) => {
                let _ = writeln!(self.out, "{json}");
            }
            Err(e) => tracing::error!(error = %e, "failed to serialize run summary"),
        }
        let _ = self.out.flush();
    }

    fn on_abort(&mut self, failure: &HarnessFailure) {
        write_abort_banner(&mut self.err, failure);
    }
}
