//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use crossrun_core::{BackendRegistry, CAPABILITIES};

use crate::harness::srcdir::resolve_srcdir;
use crate::harness::{
    Backend, BackendFactory, CommandSuite, ConsoleReporter, HarnessFailure, JsonReporter, ReportFormat, RunReporter,
    RunnerConfig, TestRunner, available_backends,
};

use super::{Cli, CliError, CliResult, ExitCode};

/// Run the test command once per selected backend.
pub fn run_backends(cli: Cli) -> CliResult<ExitCode> {
    let mut suite = CommandSuite::from_argv(&cli.command).ok_or_else(|| {
        CliError::failure("Error: no test command given\nUsage: crossrun [-b BACKEND] -- <COMMAND> [ARGS]...")
    })?;

    let config = RunnerConfig::new()
        .with_backend_filter(cli.backend)
        .with_srcdir(resolve_srcdir(cli.srcdir))
        .with_format(cli.format)
        .with_verbose(cli.verbose);
    tracing::debug!(srcdir = %config.srcdir.display(), filter = %config.backend_filter, "dispatcher configured");

    let candidates = available_backends();
    match config.format {
        ReportFormat::Text => {
            let reporter = ConsoleReporter::stdio(config.verbose);
            dispatch(config, reporter, &candidates, &mut suite)
        }
        ReportFormat::Json => dispatch(config, JsonReporter::stdio(), &candidates, &mut suite),
    }
}

fn dispatch<R: RunReporter>(
    config: RunnerConfig,
    reporter: R,
    candidates: &[BackendFactory],
    suite: &mut CommandSuite,
) -> CliResult<ExitCode> {
    let verbose = config.verbose;
    let mut runner = TestRunner::new(config, reporter);

    match runner.run_tests(candidates, suite) {
        Ok(summary) => Ok(ExitCode::from_aggregate(summary.aggregate())),
        Err(failure) => {
            // The reporter already printed the failure banner.
            if verbose {
                if let HarnessFailure::Structured(err) = failure {
                    eprintln!("{:?}", miette::Report::new(err));
                }
            }
            Err(CliError::new("", ExitCode::HARNESS_FAILURE))
        }
    }
}

/// Print every backend in this build with its declared capabilities.
pub fn list_backends() -> CliResult<ExitCode> {
    let registry = BackendRegistry::builtin();
    for make_backend in available_backends() {
        let name = make_backend().name();
        let properties = registry
            .lookup(&name)
            .map_err(|e| CliError::new(e.to_string(), ExitCode::HARNESS_FAILURE))?;
        println!("{name:<20} {properties}");
    }
    Ok(ExitCode::SUCCESS)
}

/// Print the capability vocabulary.
pub fn list_capabilities() -> CliResult<ExitCode> {
    for info in CAPABILITIES {
        println!("{:<14} {}", info.canonical, info.description);
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::harness::runner::PANIC_HOOK_LOCK;
    use crate::harness::{BackendKind, BuiltinBackend};

    fn quiet() -> ConsoleReporter<Vec<u8>, Vec<u8>> {
        ConsoleReporter::new(Vec::new(), Vec::new(), false)
    }

    fn exit_code_for(kinds: &[BackendKind], argv: &[&str]) -> ExitCode {
        let candidates: Vec<BackendFactory> = kinds.iter().copied().map(BuiltinBackend::factory).collect();
        let mut suite = CommandSuite::from_argv(argv).unwrap();
        let _guard = PANIC_HOOK_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        match dispatch(RunnerConfig::new(), quiet(), &candidates, &mut suite) {
            Ok(code) => code,
            Err(err) => err.exit_code,
        }
    }

    #[test]
    fn test_unknown_backend_exits_with_harness_failure() {
        let code = exit_code_for(&[BackendKind::Local("brass")], &["true"]);
        assert_eq!(code, ExitCode::HARNESS_FAILURE);
    }

    #[test]
    fn test_unlaunchable_suite_exits_with_harness_failure() {
        let code = exit_code_for(&[BackendKind::None], &["crossrun-definitely-not-a-program"]);
        assert_eq!(code, ExitCode::HARNESS_FAILURE);
    }

    #[test]
    fn test_no_candidates_exits_cleanly() {
        assert_eq!(exit_code_for(&[], &["true"]), ExitCode::SUCCESS);
    }

    #[cfg(unix)]
    #[test]
    fn test_suite_exit_status_becomes_exit_code() {
        let code = exit_code_for(&[BackendKind::None], &["sh", "-c", "exit 3"]);
        assert_eq!(code, ExitCode(3));
    }

    #[cfg(unix)]
    #[test]
    fn test_suite_exiting_with_ex_software_is_not_an_abort() {
        let code = exit_code_for(&[BackendKind::None], &["sh", "-c", "exit 70"]);
        assert_eq!(code, ExitCode::MAX_AGGREGATE);
        assert_ne!(code, ExitCode::HARNESS_FAILURE);
    }
}
