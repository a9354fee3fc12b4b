#![forbid(unsafe_code)]
//! crossrun: run one test suite once per storage backend.
//!
//! The dispatcher enumerates the backends available in this build, keeps the ones selected by the user's
//! `--backend` filter, resolves each one's declared capabilities from the property registry in `crossrun_core`, and
//! hands the backend plus its capabilities to a [`harness::TestSuite`]. The overall result is the worst (largest)
//! result code any backend produced.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` and `harness` modules
//!   enforce `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **Suites**: A panic raised from inside a suite is treated as an unstructured harness failure: it is caught at
//!   the outer boundary ([`harness::TestRunner::run_tests`]), reported verbatim, and aborts the run.

pub mod cli;
pub mod harness;

pub use crossrun_core::{BackendRegistry, CapabilityId, CapabilitySet};
pub use harness::{
    Backend, ConsoleReporter, HarnessError, HarnessFailure, JsonReporter, RunContext, RunReporter, RunSummary,
    RunnerConfig, SuiteError, TestRunner, TestSuite,
};
