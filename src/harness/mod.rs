//! Cross-backend test dispatch
//!
//! ## Modules
//!
//! - `backend` - Backend trait, built-in backend descriptors and the factory list for this build
//! - `selector` - User backend filter (exact name or `<filter>_` family prefix)
//! - `suite` - Suite-execution boundary: `TestSuite`, `RunContext`, `CommandSuite`
//! - `reporter` - Progress and summary output (console, JSON)
//! - `runner` - The dispatch loop and its outer error boundary
//! - `config` - Runner configuration
//! - `srcdir` - Source-root resolution
//!
//! ## Design
//!
//! The dispatch loop never touches global state: the backend being exercised and its capabilities are passed to the
//! suite in a [`RunContext`], and the set of candidate backends is a plain list of factories assembled once by
//! [`available_backends`]. Tests substitute fake factories, fake suites and a recording reporter.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod backend;
pub mod config;
pub mod reporter;
pub mod runner;
pub mod selector;
pub mod srcdir;
pub mod suite;

pub use backend::{Backend, BackendFactory, BackendKind, BuiltinBackend, available_backends};
pub use config::{ReportFormat, RunnerConfig};
pub use reporter::{BackendRun, ConsoleReporter, JsonReporter, RunReporter, RunSummary};
pub use runner::{HarnessError, HarnessFailure, TestRunner};
pub use selector::selected;
pub use suite::{CommandSuite, RunContext, SuiteError, TestSuite};
