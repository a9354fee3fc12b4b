//! Suite-execution boundary
//!
//! The dispatcher does not run tests itself. For each selected backend it builds a [`RunContext`] (the backend, its
//! data directory and its capabilities) and hands it to a [`TestSuite`], which returns a result code: `0` for full
//! success, larger values for worse outcomes.
//!
//! A suite signals a *harness* failure (as opposed to failing tests) by returning a [`SuiteError`]; that aborts the
//! whole run.

use std::ffi::{OsStr, OsString};
use std::path::Path;
use std::process::Command;

use crossrun_core::{CapabilityId, CapabilitySet};
use thiserror::Error;

use super::backend::Backend;

/// Environment variable carrying the backend name to a [`CommandSuite`] child.
pub const BACKEND_ENV: &str = "CROSSRUN_BACKEND";
/// Environment variable carrying the data directory to a [`CommandSuite`] child.
pub const DATADIR_ENV: &str = "CROSSRUN_DATADIR";
/// Environment variable carrying the canonical capability string to a [`CommandSuite`] child.
pub const CAPABILITIES_ENV: &str = "CROSSRUN_CAPABILITIES";

/// Structured failure raised by a suite.
#[derive(Debug, Error)]
pub enum SuiteError {
    #[error("failed to launch `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` was terminated by a signal")]
    Terminated { command: String },

    #[error("{0}")]
    Failed(String),
}

/// The backend currently being exercised, as seen by a suite.
pub struct RunContext<'a> {
    pub backend: &'a dyn Backend,
    pub capabilities: CapabilitySet,
    pub datadir: &'a Path,
}

impl RunContext<'_> {
    pub fn backend_name(&self) -> String {
        self.backend.name()
    }

    /// Whether the current backend declares `capability`.
    pub fn has(&self, capability: CapabilityId) -> bool {
        self.capabilities.contains(capability)
    }
}

/// Runs the test suite against one backend.
pub trait TestSuite {
    /// Run every test against `ctx.backend` and return the result code.
    fn run(&mut self, ctx: &RunContext<'_>) -> Result<u32, SuiteError>;
}

impl<F> TestSuite for F
where
    F: FnMut(&RunContext<'_>) -> Result<u32, SuiteError>,
{
    fn run(&mut self, ctx: &RunContext<'_>) -> Result<u32, SuiteError> {
        self(ctx)
    }
}

/// Runs an external test program once per backend.
///
/// The child inherits stdio and sees the current backend through [`BACKEND_ENV`], [`DATADIR_ENV`] and
/// [`CAPABILITIES_ENV`]. Its exit status is the result code.
#[derive(Debug, Clone)]
pub struct CommandSuite {
    program: OsString,
    args: Vec<OsString>,
}

impl CommandSuite {
    /// Build a suite from a command line (`argv[0]` is the program).
    ///
    /// Returns `None` for an empty command line.
    pub fn from_argv<I, S>(argv: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut argv = argv.into_iter().map(|a| a.as_ref().to_os_string());
        let program = argv.next()?;
        Some(Self {
            program,
            args: argv.collect(),
        })
    }

    /// Command line for messages.
    pub fn display(&self) -> String {
        std::iter::once(&self.program)
            .chain(&self.args)
            .map(|a| a.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl TestSuite for CommandSuite {
    fn run(&mut self, ctx: &RunContext<'_>) -> Result<u32, SuiteError> {
        let status = Command::new(&self.program)
            .args(&self.args)
            .env(BACKEND_ENV, ctx.backend_name())
            .env(DATADIR_ENV, ctx.datadir)
            .env(CAPABILITIES_ENV, ctx.capabilities.to_string())
            .status()
            .map_err(|source| SuiteError::Spawn {
                command: self.display(),
                source,
            })?;

        match status.code() {
            // Negative codes only occur on Windows and are reported as the worst result.
            Some(code) => Ok(u32::try_from(code).unwrap_or(u32::MAX)),
            None => Err(SuiteError::Terminated { command: self.display() }),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::harness::backend::{BackendKind, BuiltinBackend};

    fn context_for<'a>(backend: &'a BuiltinBackend, datadir: &'a Path) -> RunContext<'a> {
        RunContext {
            backend,
            capabilities: CapabilitySet::parse("backend,writable,inmemory").unwrap(),
            datadir,
        }
    }

    #[test]
    fn test_closure_is_a_suite() {
        let backend = BuiltinBackend::new(BackendKind::Local("inmemory"));
        let ctx = context_for(&backend, Path::new("testdata"));
        let mut suite = |ctx: &RunContext<'_>| Ok::<u32, SuiteError>(if ctx.has(CapabilityId::Writable) { 0 } else { 1 });
        assert_eq!(suite.run(&ctx).ok(), Some(0));
    }

    #[test]
    fn test_from_argv_empty() {
        assert!(CommandSuite::from_argv(Vec::<OsString>::new()).is_none());
    }

    #[test]
    fn test_display_joins_argv() {
        let suite = CommandSuite::from_argv(["apitest", "-v", "--abort-on-error"]);
        assert_eq!(
            suite.map(|s| s.display()).as_deref(),
            Some("apitest -v --abort-on-error")
        );
    }

    #[test]
    fn test_spawn_failure_is_structured() {
        let backend = BuiltinBackend::new(BackendKind::None);
        let ctx = context_for(&backend, Path::new("testdata"));
        let mut suite = CommandSuite::from_argv(["crossrun-definitely-not-a-program"]).unwrap();
        let err = suite.run(&ctx).err();
        assert!(matches!(err, Some(SuiteError::Spawn { .. })), "got {err:?}");
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_status_is_result_code() {
        let backend = BuiltinBackend::new(BackendKind::None);
        let ctx = context_for(&backend, Path::new("testdata"));
        let mut suite = CommandSuite::from_argv(["sh", "-c", "exit 3"]).unwrap();
        assert_eq!(suite.run(&ctx).ok(), Some(3));
    }

    #[cfg(unix)]
    #[test]
    fn test_child_sees_backend_environment() {
        let backend = BuiltinBackend::new(BackendKind::Local("inmemory"));
        let ctx = context_for(&backend, Path::new("src/testdata"));
        let script = r#"test "$CROSSRUN_BACKEND" = inmemory \
            && test "$CROSSRUN_DATADIR" = src/testdata \
            && test "$CROSSRUN_CAPABILITIES" = backend,writable,inmemory"#;
        let mut suite = CommandSuite::from_argv(["sh", "-c", script]).unwrap();
        assert_eq!(suite.run(&ctx).ok(), Some(0));
    }
}
