//! The dispatch loop
//!
//! [`TestRunner::run_all`] walks the candidate backends in order. For each one it builds the backend, checks the
//! user filter, and (if selected) points the backend at the data directory, resolves its capabilities from the
//! property registry, and runs the suite against it. The overall result is the maximum of the per-backend results.
//!
//! A failing suite is not an error: it is a non-zero result code and later backends still run. Harness failures
//! (unknown backend, unrecognized capability, a structured [`SuiteError`], or a panic inside the suite) abort the
//! whole run. [`TestRunner::run_tests`] is the outer boundary that catches them and reports them.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crossrun_core::{BackendRegistry, CapabilitySet, UnknownBackend, UnrecognizedProperty};
use miette::Diagnostic;
use thiserror::Error;

use super::backend::{Backend, BackendFactory};
use super::config::RunnerConfig;
use super::reporter::{RunReporter, RunSummary};
use super::selector::selected;
use super::suite::{RunContext, SuiteError, TestSuite};

/// Structured harness failure. Any of these aborts the run.
#[derive(Debug, Error, Diagnostic)]
pub enum HarnessError {
    #[error(transparent)]
    #[diagnostic(
        code(crossrun::unknown_backend),
        help("every backend this build can construct needs an entry in the backend property registry")
    )]
    UnknownBackend(#[from] UnknownBackend),

    #[error(transparent)]
    #[diagnostic(
        code(crossrun::unrecognized_property),
        help("capability strings may only use names from the capability vocabulary (see `crossrun --capabilities`)")
    )]
    UnrecognizedProperty(#[from] UnrecognizedProperty),

    #[error(transparent)]
    #[diagnostic(code(crossrun::suite))]
    Suite(#[from] SuiteError),
}

/// Why a run was aborted, as reported at the outer boundary.
#[derive(Debug, Error)]
pub enum HarnessFailure {
    #[error("{0}")]
    Structured(#[from] HarnessError),

    /// A panic raised while the suite ran; holds the panic message verbatim.
    #[error("\"{0}\"")]
    Unstructured(String),
}

/// Runs a suite once per selected backend.
pub struct TestRunner<R: RunReporter> {
    config: RunnerConfig,
    registry: BackendRegistry,
    reporter: R,
}

impl<R: RunReporter> TestRunner<R> {
    /// Runner using the built-in backend property registry.
    pub fn new(config: RunnerConfig, reporter: R) -> Self {
        Self {
            config,
            registry: BackendRegistry::builtin(),
            reporter,
        }
    }

    /// Replace the property registry.
    pub fn with_registry(mut self, registry: BackendRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    pub fn into_reporter(self) -> R {
        self.reporter
    }

    /// Resolve the capability flags declared for `backend_name`.
    ///
    /// Always builds a fresh set; nothing carries over from a previous backend.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn capabilities_for(&self, backend_name: &str) -> Result<CapabilitySet, HarnessError> {
        let properties = self.registry.lookup(backend_name)?;
        Ok(CapabilitySet::parse(properties)?)
    }

    /// Run `suite` against every selected candidate, in order.
    ///
    /// Each candidate is constructed, used (or skipped), and dropped before the next one is built. On error the
    /// current candidate is dropped and the remaining ones are never constructed.
    #[tracing::instrument(skip_all, fields(candidates = candidates.len(), filter = %self.config.backend_filter))]
    pub fn run_all(
        &mut self,
        candidates: &[BackendFactory],
        suite: &mut dyn TestSuite,
    ) -> Result<RunSummary, HarnessError> {
        let mut summary = RunSummary::default();

        for make_backend in candidates {
            let mut backend = make_backend();
            self.run_backend(backend.as_mut(), suite, &mut summary)?;
        }

        self.reporter.on_run_complete(&summary);
        Ok(summary)
    }

    fn run_backend(
        &mut self,
        backend: &mut dyn Backend,
        suite: &mut dyn TestSuite,
        summary: &mut RunSummary,
    ) -> Result<(), HarnessError> {
        let name = backend.name();
        if !selected(&name, &self.config.backend_filter) {
            tracing::debug!(backend = %name, "skipped by backend filter");
            self.reporter.on_backend_skipped(&name);
            summary.record_skipped(name);
            return Ok(());
        }

        let datadir = self.config.datadir();
        backend.set_datadir(&datadir);
        let capabilities = self.capabilities_for(&name)?;

        self.reporter.on_backend_start(&name);
        let ctx = RunContext {
            backend: &*backend,
            capabilities,
            datadir: &datadir,
        };
        let result = suite.run(&ctx)?;

        tracing::info!(backend = %name, result, "suite finished");
        self.reporter.on_backend_complete(&name, result);
        summary.record(name, result);
        Ok(())
    }

    /// Outer boundary: [`run_all`](Self::run_all), with every harness failure caught and reported.
    ///
    /// Structured failures are reported with their description, panics from inside the suite with their message.
    /// Either way the reporter's `on_abort` is called and no further backends run.
    pub fn run_tests(
        &mut self,
        candidates: &[BackendFactory],
        suite: &mut dyn TestSuite,
    ) -> Result<RunSummary, HarnessFailure> {
        let outcome = catch_quietly(|| self.run_all(candidates, suite));

        let failure = match outcome {
            Ok(Ok(summary)) => return Ok(summary),
            Ok(Err(err)) => HarnessFailure::Structured(err),
            Err(payload) => HarnessFailure::Unstructured(panic_message(payload.as_ref())),
        };

        tracing::warn!(error = %failure, "backend dispatch aborted");
        self.reporter.on_abort(&failure);
        Err(failure)
    }
}

/// Serializes tests that swap the process-wide panic hook.
#[cfg(test)]
pub(crate) static PANIC_HOOK_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// Run `f`, catching a panic without printing the default panic report.
///
/// The panic is still visible as a debug event. The previously installed hook is restored before returning.
fn catch_quietly<T>(f: impl FnOnce() -> T) -> std::thread::Result<T> {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(|info| tracing::debug!(%info, "suite panicked")));
    let outcome = panic::catch_unwind(AssertUnwindSafe(f));
    panic::set_hook(previous);
    outcome
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
